pub mod db;
pub mod hash;
pub mod notifier;
