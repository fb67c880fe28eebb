// ==================== GITHUB IMPORT ====================
// Fetches users from GitHub and saves them one by one.
// Saving is best-effort per user; fetching failures abort the import.

use crate::{
    models::{User, UserFilter},
    services::github_user_service::{GitHubUserPaginator, UserSource},
    services::user_service::UserRepository,
    utils::AppError,
};
use std::sync::Arc;
use std::time::Duration;

pub struct ImportService {
    source: Arc<dyn UserSource>,
    paginator: GitHubUserPaginator,
    users: Arc<dyn UserRepository>,
}

impl ImportService {
    pub fn new(source: Arc<dyn UserSource>, users: Arc<dyn UserRepository>, page_delay: Duration) -> Self {
        Self {
            paginator: GitHubUserPaginator::new(source.clone(), page_delay),
            source,
            users,
        }
    }

    pub fn paginator(&self) -> &GitHubUserPaginator {
        &self.paginator
    }

    /// Imports one page of users; returns how many were saved.
    pub async fn import_users_from_github_by_page(
        &self,
        id_greater_than: i64,
        page_size: i64,
    ) -> Result<usize, AppError> {
        log::info!("📥 Importing GitHub page: id_greater_than={} page_size={}", id_greater_than, page_size);

        let users = self.source.list(id_greater_than, page_size).await?;
        Ok(self.save_many(users).await)
    }

    /// Imports at least `total_items` users matching `filter` (when GitHub has
    /// that many); returns how many were saved.
    pub async fn import_users_from_github_by_filter(
        &self,
        filter: &UserFilter,
        total_items: usize,
    ) -> Result<usize, AppError> {
        log::info!("📥 Importing {} GitHub users with filter {:?}", total_items, filter);

        let users = self.paginator.populate(filter, total_items).await?;
        Ok(self.save_many(users).await)
    }

    async fn save_many(&self, users: Vec<User>) -> usize {
        let total = users.len();
        let mut saved_items = 0;

        for user in &users {
            match self.users.create_or_update(user).await {
                Ok(outcome) if outcome.is_saved() => saved_items += 1,
                Ok(_) => log::warn!("⚠️  User {} was not saved", user.login),
                Err(e) => log::error!("❌ Error saving user {}: {}", user.login, e),
            }
        }

        log::info!("✅ Saved {}/{} users", saved_items, total);

        saved_items
    }
}
