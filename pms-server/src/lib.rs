//! Hotel PMS backend
//!
//! Multi-tenant hotel property-management server: authentication,
//! hotel/room/manager administration, guest check-in/checkout, food
//! ordering, payments, expenses and pending-balance tracking over SQLite.
//!
//! # Module structure
//!
//! ```text
//! pms-server/src/
//! ├── core/      # configuration, state, server
//! ├── auth/      # JWT, argon2, hotel access resolver
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # pool, migrations, repositories
//! ├── ledger/    # money, pending balance, food pricing
//! └── utils/     # errors, logging, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____  __  ___ _____
   / __ \/  |/  / ___/
  / /_/ / /|_/ /\__ \
 / ____/ /  / /___/ /
/_/   /_/  /_//____/   hotel property management server
"#
    );
}

/// Set up the process environment: dotenv, logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
