pub mod github_user_service;
pub mod import_service;
pub mod user_service;

pub use github_user_service::*;
pub use import_service::*;
pub use user_service::{MongoUserStore, UserRepository, UserService};
