// ==================== USER PERSISTENCE ====================
// Create-or-update of GitHub users keyed by login.
// Lookup and write are separate calls: two concurrent imports of the same
// login may both insert.

use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::{UpsertOutcome, User},
    utils::AppError,
};
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use std::sync::Arc;

/// Key-lookup/save operations over the users collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError>;

    /// Sets `isSiteAdmin` and `avatar` on the record with this login and
    /// returns the updated record, if any.
    async fn update_profile(
        &self,
        login: &str,
        is_admin: bool,
        avatar: Option<&str>,
    ) -> Result<Option<User>, AppError>;

    async fn insert(&self, user: &User) -> Result<User, AppError>;

    /// Cheap reachability check used by `/health`.
    async fn ping(&self) -> Result<(), AppError>;
}

pub struct MongoUserStore {
    db: MongoDB,
}

impl MongoUserStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let collection = self.db.collection::<User>(USERS_COLLECTION);
        Ok(collection.find_one(doc! { "login": login }).await?)
    }

    async fn update_profile(
        &self,
        login: &str,
        is_admin: bool,
        avatar: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let collection = self.db.collection::<User>(USERS_COLLECTION);
        let updated = collection
            .find_one_and_update(
                doc! { "login": login },
                doc! { "$set": { "isSiteAdmin": is_admin, "avatar": avatar } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(updated)
    }

    async fn insert(&self, user: &User) -> Result<User, AppError> {
        let collection = self.db.collection::<User>(USERS_COLLECTION);
        let result = collection
            .insert_one(user)
            .await
            .map_err(|e| AppError::PersistenceFailure(format!("Failed to insert user {}: {}", user.login, e)))?;

        let mut inserted = user.clone();
        inserted.id = result.inserted_id.as_object_id();
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}

/// Idempotent persistence of a user.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_or_update(&self, user: &User) -> Result<UpsertOutcome, AppError>;
}

pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserService {
    /// Existing login: only `isSiteAdmin` and `avatar` change, the stored
    /// `login` and `githubId` are kept. Unknown login: the whole user is inserted.
    async fn create_or_update(&self, user: &User) -> Result<UpsertOutcome, AppError> {
        match self.store.find_by_login(&user.login).await? {
            Some(_) => {
                let updated = self
                    .store
                    .update_profile(&user.login, user.is_admin, user.avatar.as_deref())
                    .await?;
                match updated {
                    Some(saved) => {
                        log::debug!("🔄 Updated user {}", saved.login);
                        Ok(UpsertOutcome::Updated(saved))
                    }
                    None => {
                        log::warn!("⚠️  User {} disappeared before update", user.login);
                        Ok(UpsertOutcome::NotSaved)
                    }
                }
            }
            None => {
                let created = self.store.insert(user).await?;
                log::debug!("➕ Created user {}", created.login);
                Ok(UpsertOutcome::Created(created))
            }
        }
    }
}
