use crate::services::user_service::UserStore;
use crate::services::{ImportService, UserRepository, UserService, UserSource};
use std::sync::Arc;
use std::time::Duration;

/// Shared by every worker through `web::Data`.
pub struct AppState {
    pub github: Arc<dyn UserSource>,
    pub store: Arc<dyn UserStore>,
    pub users: Arc<dyn UserRepository>,
    pub imports: ImportService,
}

impl AppState {
    pub fn new(github: Arc<dyn UserSource>, store: Arc<dyn UserStore>, page_delay: Duration) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(UserService::new(store.clone()));
        Self {
            imports: ImportService::new(github.clone(), users.clone(), page_delay),
            github,
            store,
            users,
        }
    }
}
