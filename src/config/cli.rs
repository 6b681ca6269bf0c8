use crate::adapters::management::DEFAULT_API_ORIGIN;
use crate::domain::ports::ProjectOptions;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "fn-deploy")]
#[command(about = "Change detection and hosting helpers for function deploys")]
pub struct CliConfig {
    /// Project id or alias to operate on
    #[arg(long, global = true, env = "FN_DEPLOY_PROJECT")]
    pub project: Option<String>,

    /// Explicit project id, takes precedence over --project
    #[arg(long, global = true)]
    pub project_id: Option<String>,

    #[arg(long, global = true, default_value = DEFAULT_API_ORIGIN)]
    pub api_origin: String,

    #[arg(long, global = true, env = "FN_DEPLOY_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the project's default hosting site
    HostingSite,
    /// Compute change-detection hashes for every endpoint in a manifest
    Hash {
        #[arg(long, default_value = "deploy.toml")]
        manifest: String,

        /// Deploy filters, e.g. `api,web:render`
        #[arg(long)]
        only: Option<String>,
    },
}

impl ProjectOptions for CliConfig {
    fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_origin", &self.api_origin)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        if let Command::Hash { manifest, .. } = &self.command {
            validate_non_empty_string("manifest", manifest)?;
        }
        Ok(())
    }
}
