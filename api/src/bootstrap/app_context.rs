use std::sync::Arc;

use crate::application::ports::task_repository::TaskRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::{Config, DataBackend};
use crate::infrastructure::db;
use crate::infrastructure::db::repositories::task_repository_sqlx::SqlxTaskRepository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::infrastructure::memory::MemoryStore;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    task_repo: Arc<dyn TaskRepository>,
}

impl AppServices {
    pub fn new(user_repo: Arc<dyn UserRepository>, task_repo: Arc<dyn TaskRepository>) -> Self {
        Self {
            user_repo,
            task_repo,
        }
    }

    /// Both ports served by one shared store.
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store)
    }

    /// Connects and migrates when the backend is Postgres.
    pub async fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        match cfg.data_backend {
            DataBackend::Memory => {
                tracing::warn!("memory_backend_enabled_data_is_not_persisted");
                Ok(Self::in_memory(MemoryStore::new()))
            }
            DataBackend::Postgres => {
                let pool =
                    db::connect_pool(&cfg.database_url, cfg.database_max_connections).await?;
                db::migrate(&pool).await?;
                tracing::info!(max_connections = cfg.database_max_connections, "database_ready");
                Ok(Self::new(
                    Arc::new(SqlxUserRepository::new(pool.clone())),
                    Arc::new(SqlxTaskRepository::new(pool)),
                ))
            }
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn task_repo(&self) -> Arc<dyn TaskRepository> {
        self.services.task_repo.clone()
    }
}
