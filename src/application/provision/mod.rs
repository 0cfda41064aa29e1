//! Provisioning operations
//!
//! Each step is an independent, best-effort sequence of remote commands.
//! Nothing is transactional: a failing step leaves earlier changes in place.

pub mod accounts;
pub mod database;
pub mod git;
pub mod layout;
pub mod packages;
pub mod supervisor;
pub mod system;
pub mod teardown;
pub mod tls;
pub mod web_server;

pub use accounts::{create_group, create_user};
pub use database::{create_db, drop_db, reset_db};
pub use git::{add_remote, setup_repository};
pub use layout::{fix_permissions, layout};
pub use packages::{install_certbot, install_dependencies};
pub use supervisor::{configure_supervisor, restart_services, supervisorctl, write_start_script};
pub use system::{check_language, update_system};
pub use teardown::teardown;
pub use tls::{ensure_certbot, letsencrypt, renew_certificates};
pub use web_server::configure_web_server;
