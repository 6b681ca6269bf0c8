use anyhow::Context as _;
use clap::Parser;
use fn_deploy::core::filter::parse_only_selectors;
use fn_deploy::domain::model::{Backend, Context};
use fn_deploy::utils::{logger, validation::Validate};
use fn_deploy::{
    apply_backend_hash_to_backends, default_hosting_site, CliConfig, Command, DeployError,
    DeployManifest, ManagementClient,
};
use std::collections::BTreeMap;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config.command);

    if let Err(e) = run(config).await {
        match e.downcast_ref::<DeployError>() {
            Some(deploy_err) => {
                tracing::error!("❌ {}", deploy_err);
                eprintln!("❌ {}", deploy_err.user_friendly_message());
                eprintln!("💡 {}", deploy_err.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    match &config.command {
        Command::HostingSite => {
            let api = ManagementClient::new(
                config.api_origin.as_str(),
                Duration::from_secs(config.timeout_seconds),
            )?
            .with_access_token(config.access_token.clone());

            let site = default_hosting_site(&config, &api).await?;
            println!("{}", site);
        }
        Command::Hash { manifest, only } => {
            tracing::info!("📁 Loading manifest from: {}", manifest);
            let loaded = DeployManifest::from_file(manifest)
                .with_context(|| format!("Failed to load manifest '{}'", manifest))?;
            loaded.validate()?;

            let (mut backends, sources) = loaded.into_parts();
            let context = Context {
                filters: only.as_deref().map(parse_only_selectors),
                sources,
            };

            apply_backend_hash_to_backends(&mut backends, &context);
            tracing::info!("✅ Hashed {} codebase(s)", backends.len());
            println!("{}", serde_json::to_string_pretty(&hash_report(&backends))?);
        }
    }

    Ok(())
}

fn hash_report(
    backends: &BTreeMap<String, Backend>,
) -> BTreeMap<&str, BTreeMap<&str, Option<&str>>> {
    backends
        .iter()
        .map(|(codebase, backend)| {
            let hashes = backend
                .all_endpoints()
                .map(|e| (e.id.as_str(), e.hash.as_deref()))
                .collect();
            (codebase.as_str(), hashes)
        })
        .collect()
}
