pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::management::ManagementClient;
pub use config::toml_config::DeployManifest;
pub use crate::core::{apply_hash::apply_backend_hash_to_backends, hosting::default_hosting_site};
pub use utils::error::{DeployError, Result};
