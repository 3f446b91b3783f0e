pub mod activity;
pub mod core_value;
pub mod error;
pub mod friend;
pub mod import;
pub mod instance;
pub mod location;
pub mod participation;
pub mod user;
