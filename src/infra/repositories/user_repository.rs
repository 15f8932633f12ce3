//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult, DbOperation};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// List all users, in storage order
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert a new user; the id is generated here
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply the sent fields to an existing user
    async fn update(&self, id: Uuid, data: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserRepository backed by SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::Retrieve, e))?;

        Ok(result.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::RetrieveMany, e))?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        // Uniqueness is enforced by the unique index on email; a
        // violation surfaces from the insert as DuplicateEmail.
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(data.name),
            email: Set(data.email),
            password: Set(data.password),
            role: Set(data.role.unwrap_or_default().to_string()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::Create, e))?;

        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, data: UpdateUser) -> AppResult<User> {
        // The lookup is reported as a retrieval failure, before the
        // not-found check.
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::Retrieve, e))?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = user.into();

        if let Some(name) = data.name {
            active.name = Set(name);
        }
        if let Some(email) = data.email {
            active.email = Set(email);
        }
        if let Some(password) = data.password {
            active.password = Set(password);
        }
        if let Some(role) = data.role {
            active.role = Set(role.to_string());
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::Update, e))?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::db(DbOperation::Delete, e))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
