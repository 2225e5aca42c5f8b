//! Server state — shared handles for all request handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared server state.
///
/// Cloned into every handler; all members are cheap shallow copies.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | pool | SqlitePool | SQLite connection pool |
/// | jwt_service | Arc<JwtService> | token generation/validation |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Database connection pool
    pub pool: SqlitePool,
    /// JWT service (shared ownership)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            pool,
            jwt_service,
        }
    }

    /// Initialize server state:
    /// 1. data directory structure
    /// 2. database (pool + migrations)
    /// 3. JWT service
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized — the server is
    /// useless without it.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_data_dir_structure()
            .expect("Failed to create data directory structure");

        let db_path = config.database_dir().join("pms.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(config.clone(), db_service.pool, jwt_service)
    }

    /// Database pool handle
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
