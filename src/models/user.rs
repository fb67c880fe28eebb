use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Document of the "users" collection.
///
/// `login` is the natural key: imports reconcile on it, never on `githubId`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub login: String,
    #[serde(rename = "githubId", default)]
    pub external_id: i64,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "isSiteAdmin", default)]
    pub is_admin: bool,
}

impl User {
    pub fn new(login: &str, external_id: i64, avatar: Option<&str>, is_admin: bool) -> Self {
        Self {
            id: None,
            login: login.to_string(),
            external_id,
            avatar: avatar.map(|a| a.to_string()),
            is_admin,
        }
    }

    /// True when the user carries a non-empty avatar URL.
    pub fn has_avatar(&self) -> bool {
        self.avatar.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// Result of a create-or-update call.
///
/// `Created` and `Updated` count as saved, `NotSaved` means the update step
/// returned no document.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Created(User),
    Updated(User),
    NotSaved,
}

impl UpsertOutcome {
    pub fn is_saved(&self) -> bool {
        !matches!(self, UpsertOutcome::NotSaved)
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            UpsertOutcome::Created(user) | UpsertOutcome::Updated(user) => Some(user),
            UpsertOutcome::NotSaved => None,
        }
    }
}
