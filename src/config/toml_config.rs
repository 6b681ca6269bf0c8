use crate::domain::model::{Backend, Endpoint, Platform, SecretEnvVar, SourceHashes};
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Deploy manifest describing the wanted backends, one table per codebase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeployManifest {
    #[serde(default)]
    pub codebases: BTreeMap<String, CodebaseConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodebaseConfig {
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    pub source: Option<SourceConfig>,
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub v1_hash: Option<String>,
    pub v2_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub id: String,
    pub platform: Platform,
    pub region: Option<String>,
    pub entry_point: Option<String>,
    #[serde(default)]
    pub secrets: Vec<SecretConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretConfig {
    pub key: String,
    pub secret: String,
    pub project_id: Option<String>,
    pub version: Option<String>,
}

impl DeployManifest {
    /// 從 TOML 檔案載入清單
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析清單
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DeployError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODE})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .expect("env var pattern is a valid regex");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Splits the manifest into wanted backends and per-codebase source hashes.
    pub fn into_parts(self) -> (BTreeMap<String, Backend>, BTreeMap<String, SourceHashes>) {
        let mut backends = BTreeMap::new();
        let mut sources = BTreeMap::new();

        for (codebase, config) in self.codebases {
            if let Some(source) = config.source {
                sources.insert(
                    codebase.clone(),
                    SourceHashes {
                        functions_source_v1_hash: source.v1_hash,
                        functions_source_v2_hash: source.v2_hash,
                    },
                );
            }

            let endpoints = config
                .endpoints
                .into_iter()
                .map(|e| {
                    let mut endpoint = Endpoint::new(e.id, e.platform);
                    if let Some(region) = e.region {
                        endpoint.region = region;
                    }
                    endpoint.entry_point = e.entry_point;
                    endpoint.secret_environment_variables = e
                        .secrets
                        .into_iter()
                        .map(|s| SecretEnvVar {
                            key: s.key,
                            secret: s.secret,
                            project_id: s.project_id,
                            version: s.version,
                        })
                        .collect();
                    endpoint
                })
                .collect();

            backends.insert(
                codebase,
                Backend {
                    environment_variables: config.environment,
                    endpoints,
                },
            );
        }

        (backends, sources)
    }
}

impl Validate for DeployManifest {
    fn validate(&self) -> Result<()> {
        for (codebase, config) in &self.codebases {
            validate_non_empty_string("codebases", codebase)?;

            let mut seen = HashSet::new();
            for endpoint in &config.endpoints {
                let field = format!("codebases.{}.endpoints.id", codebase);
                validate_non_empty_string(&field, &endpoint.id)?;
                if !seen.insert(endpoint.id.as_str()) {
                    return Err(DeployError::InvalidConfigValue {
                        field,
                        value: endpoint.id.clone(),
                        reason: "Duplicate endpoint id".to_string(),
                    });
                }
                for secret in &endpoint.secrets {
                    validate_non_empty_string(
                        &format!("codebases.{}.endpoints.{}.secrets", codebase, endpoint.id),
                        &secret.secret,
                    )?;
                }
            }
        }
        Ok(())
    }
}
