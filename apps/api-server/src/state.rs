//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use quill_infra::{PostgresPostRepository, database::connect};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    /// Which persistence backend is serving requests.
    pub storage: &'static str,
}

impl AppState {
    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: &'static str) -> Self {
        Self {
            posts: PostService::new(repo),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryPostRepository::new()), "memory")
    }

    /// Build the application state with appropriate implementations.
    #[cfg_attr(not(feature = "postgres"), allow(unused_variables))]
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let state = match &config.database {
            Some(db_config) => match connect(db_config).await {
                Ok(conn) => {
                    let migrated = if config.run_migrations {
                        Migrator::up(&conn, None).await
                    } else {
                        Ok(())
                    };

                    match migrated {
                        Ok(()) => Self::with_repository(
                            Arc::new(PostgresPostRepository::new(conn)),
                            "postgres",
                        ),
                        Err(e) => {
                            tracing::error!(
                                "Failed to run migrations: {}. Using in-memory fallback.",
                                e
                            );
                            Self::in_memory()
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let state = {
            tracing::info!("Running without postgres feature - using in-memory repository");
            Self::in_memory()
        };

        tracing::info!(storage = state.storage, "Application state initialized");

        state
    }
}
