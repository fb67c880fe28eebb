use serde::{Deserialize, Serialize};

use super::User;

/// Predicate bundle applied to pages of GitHub users.
///
/// Every field is optional; the default value filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[serde(default)]
    pub only_admins: bool,
    #[serde(default)]
    pub only_with_avatar: bool,
    #[serde(default)]
    pub login_starts_with: Option<String>,
    /// Pagination starts strictly after this id.
    #[serde(default)]
    pub id_greater_than: Option<i64>,
}

impl UserFilter {
    /// Lower-cased, trimmed prefix, or `None` when blank.
    fn login_prefix(&self) -> Option<String> {
        self.login_starts_with
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, user: &User) -> bool {
        if self.only_admins && !user.is_admin {
            return false;
        }
        if self.only_with_avatar && !user.has_avatar() {
            return false;
        }
        match self.login_prefix() {
            Some(prefix) => user.login.to_lowercase().starts_with(&prefix),
            None => true,
        }
    }

    /// Keeps the users matching every active predicate, in their original order.
    pub fn apply(&self, users: Vec<User>) -> Vec<User> {
        users.into_iter().filter(|u| self.matches(u)).collect()
    }
}
