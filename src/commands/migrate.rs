//! Migrate command - Manual control over the users schema.
//!
//! The serve command applies pending migrations on startup; this
//! command exists for operating on the schema without serving.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(migration_err)?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations to the users schema...");
            db.run_migrations().await.map_err(migration_err)?;
            tracing::info!("Users schema is up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back the last applied migration...");
            db.rollback_migration().await.map_err(migration_err)?;
            tracing::info!("Rollback complete");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(migration_err)? {
                let status = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping and recreating the users schema...");
            db.fresh_migrations().await.map_err(migration_err)?;
            tracing::info!("Users schema recreated from scratch");
        }
    }

    Ok(())
}

/// Migration failures are process-level and never reach HTTP
fn migration_err(e: DbErr) -> AppError {
    AppError::internal(format!("Migration command failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_failures_map_to_internal_with_detail() {
        let err = migration_err(DbErr::Custom("relation \"users\" is missing".to_string()));

        assert!(matches!(err, AppError::Internal(_)));
        let detail = format!("{:?}", err);
        assert!(detail.contains("Migration command failed"));
        assert!(detail.contains("relation \"users\" is missing"));
    }
}
