pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod health;
pub mod identity;
pub mod infra;
pub mod middleware;
pub mod router;
pub mod serde;
pub mod state;
pub mod usecase;
