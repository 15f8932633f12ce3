//! User service - Handles user-related business logic.
//!
//! Orchestrates the five user operations over the repository
//! abstraction. Handlers depend on this trait, never on SeaORM.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CreateUser, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user; email conflicts surface as DuplicateEmail
    async fn create_user(&self, data: CreateUser) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply a partial update to an existing user
    async fn update_user(&self, id: Uuid, data: UpdateUser) -> AppResult<User>;

    /// Permanently delete a user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, data: CreateUser) -> AppResult<User> {
        let user = self.repo.create(data).await?;
        tracing::info!(id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, id: Uuid, data: UpdateUser) -> AppResult<User> {
        let user = self.repo.update(id, data).await?;
        tracing::info!(id = %user.id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        tracing::info!(id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    use crate::domain::UserRole;
    use crate::errors::DbOperation;
    use crate::infra::MockUserRepository;

    fn test_user(id: Uuid) -> User {
        User {
            id,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: UserRole::User,
        }
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_user_returns_created_record() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().returning(|data| {
            Ok(User {
                id: Uuid::new_v4(),
                name: data.name,
                email: data.email,
                password: data.password,
                role: data.role.unwrap_or_default(),
            })
        });

        let result = service(repo)
            .create_user(CreateUser {
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
                password: "password123".to_string(),
                role: None,
            })
            .await
            .unwrap();

        assert_eq!(result.email, "test@example.com");
        assert_eq!(result.role, UserRole::User);
    }

    #[tokio::test]
    async fn create_user_propagates_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_| Err(AppError::DuplicateEmail));

        let result = service(repo)
            .create_user(CreateUser {
                name: "Test User".to_string(),
                email: "taken@example.com".to_string(),
                password: "password123".to_string(),
                role: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::DuplicateEmail));
    }

    #[tokio::test]
    async fn get_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(test_user(id))));

        let result = service(repo).get_user(user_id).await.unwrap();
        assert_eq!(result.id, user_id);
    }

    #[tokio::test]
    async fn get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn list_users_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![test_user(Uuid::new_v4()), test_user(Uuid::new_v4())]));

        let result = service(repo).list_users().await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn update_user_passes_partial_fields_through() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(|_, data| {
                data.name.as_deref() == Some("New Name")
                    && data.email.is_none()
                    && data.password.is_none()
                    && data.role.is_none()
            })
            .returning(|id, data| {
                let mut user = test_user(id);
                if let Some(name) = data.name {
                    user.name = name;
                }
                Ok(user)
            });

        let result = service(repo)
            .update_user(
                user_id,
                UpdateUser {
                    name: Some("New Name".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(result.name, "New Name");
        assert_eq!(result.email, "test@example.com");
    }

    #[tokio::test]
    async fn delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        assert!(service(repo).delete_user(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let result = service(repo).delete_user(Uuid::new_v4()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn persistence_failures_keep_operation_context() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| {
            Err(AppError::db(
                DbOperation::RetrieveMany,
                sea_orm::DbErr::Custom("timeout".to_string()),
            ))
        });

        let err = service(repo).list_users().await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Database {
                operation: DbOperation::RetrieveMany,
                ..
            }
        ));
    }
}
