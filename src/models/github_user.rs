use serde::{Deserialize, Serialize};

use super::User;

/// Item of the GitHub `GET /users` response.
/// API reference: https://docs.github.com/rest/users/users#list-users
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GithubUser {
    pub login: String,
    pub id: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub site_admin: bool,
}

impl From<GithubUser> for User {
    fn from(g: GithubUser) -> Self {
        User::new(&g.login, g.id, g.avatar_url.as_deref(), g.site_admin)
    }
}
