pub mod github_user;
pub mod user;
pub mod user_filter;

pub use github_user::*;
pub use user::*;
pub use user_filter::*;
