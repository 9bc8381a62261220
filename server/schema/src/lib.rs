//! sea-orm entities for the shukatsu tracker schema.

pub mod companies;
pub mod password_reset_tokens;
pub mod users;
