// ==================== GITHUB USERS API ====================
// Cursor-based listing of GitHub users (`since` = last id seen) and the
// rate-limited multi-page population built on top of it.

use crate::{
    models::{GithubUser, User, UserFilter},
    utils::AppError,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_POPULATE_ATTEMPTS: u32 = 50;

/// A paginated source of users, ordered by ascending external id.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Lists at most `page_size` users whose id is greater than `id_greater_than`.
    async fn list(&self, id_greater_than: i64, page_size: i64) -> Result<Vec<User>, AppError>;
}

/// Clamps a requested page size: unset or out of range means the API maximum.
pub fn effective_page_size(page_size: i64) -> i64 {
    if page_size <= 0 || page_size > MAX_PAGE_SIZE {
        MAX_PAGE_SIZE
    } else {
        page_size
    }
}

pub fn effective_cursor(id_greater_than: i64) -> i64 {
    id_greater_than.max(0)
}

pub struct GitHubUserService {
    client: reqwest::Client,
    api_url: String,
    timeout: Duration,
}

impl GitHubUserService {
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn page_url(&self, id_greater_than: i64, page_size: i64) -> String {
        format!("{}?since={}&per_page={}", self.api_url, id_greater_than, page_size)
    }
}

#[async_trait]
impl UserSource for GitHubUserService {
    async fn list(&self, id_greater_than: i64, page_size: i64) -> Result<Vec<User>, AppError> {
        let since = effective_cursor(id_greater_than);
        let per_page = effective_page_size(page_size);
        let url = self.page_url(since, per_page);

        log::info!("🐙 Fetching GitHub users since={} per_page={}", since, per_page);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "github-import-service")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ Failed to reach GitHub Users API: {}", e);
                AppError::SourceUnavailable("Error consuming Github Users API".to_string())
            })?;

        if !response.status().is_success() {
            log::error!("❌ GitHub Users API error: {}", response.status());
            return Err(AppError::SourceUnavailable(format!(
                "Github Users API returned {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(|e| {
            AppError::SourceUnavailable(format!("Failed to read Github Users API response: {}", e))
        })?;

        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let github_users: Option<Vec<GithubUser>> = serde_json::from_str(&body).map_err(|e| {
            AppError::SourceUnavailable(format!("Failed to parse Github Users API response: {}", e))
        })?;

        let users: Vec<User> = github_users
            .unwrap_or_default()
            .into_iter()
            .map(User::from)
            .collect();

        log::info!("✅ Retrieved {} users from GitHub", users.len());

        Ok(users)
    }
}

/// Walks the source page by page until enough filtered users are collected.
pub struct GitHubUserPaginator {
    source: Arc<dyn UserSource>,
    page_delay: Duration,
    max_attempts: u32,
}

impl GitHubUserPaginator {
    pub fn new(source: Arc<dyn UserSource>, page_delay: Duration) -> Self {
        Self {
            source,
            page_delay,
            max_attempts: MAX_POPULATE_ATTEMPTS,
        }
    }

    /// One page (the API maximum) starting after `filter.id_greater_than`,
    /// filtered in memory.
    pub async fn list_by_filter(&self, filter: &UserFilter) -> Result<Vec<User>, AppError> {
        let page = self
            .source
            .list(filter.id_greater_than.unwrap_or(0), MAX_PAGE_SIZE)
            .await?;
        Ok(filter.apply(page))
    }

    /// Collects users matching `filter` until at least `total_items` are found,
    /// the source returns an empty page, or the attempt budget runs out.
    ///
    /// The result is not truncated and may exceed `total_items`. A fetch error
    /// aborts the whole run.
    pub async fn populate(&self, filter: &UserFilter, total_items: usize) -> Result<Vec<User>, AppError> {
        let mut cursor = filter.id_greater_than.map(|id| id.saturating_add(1)).unwrap_or(1);
        let mut attempts: u32 = 0;
        let mut results: Vec<User> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut last_page_empty = false;

        while results.len() < total_items && !last_page_empty && attempts < self.max_attempts {
            let page = self.source.list(cursor, MAX_PAGE_SIZE).await?;
            last_page_empty = page.is_empty();

            // The raw page drives the cursor, not the filtered subset
            if let Some(last) = page.last() {
                cursor = last.external_id;
            }

            let fetched = page.len();
            let matches: Vec<User> = filter
                .apply(page)
                .into_iter()
                .filter(|u| seen.insert(u.login.clone()))
                .collect();

            log::debug!(
                "📄 Page {}: {} fetched, {} matched, {} collected, next cursor {}",
                attempts + 1,
                fetched,
                matches.len(),
                results.len() + matches.len(),
                cursor
            );

            results.extend(matches);

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
            attempts += 1;
        }

        log::info!(
            "✅ Populated {} users from GitHub in {} page(s)",
            results.len(),
            attempts
        );

        Ok(results)
    }
}
