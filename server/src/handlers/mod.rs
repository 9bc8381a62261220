pub mod company;
pub mod reset_token;
pub mod user;
