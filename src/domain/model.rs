use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Function platform generation an endpoint is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "gcfv1", alias = "v1")]
    V1,
    #[serde(rename = "gcfv2", alias = "v2")]
    V2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretEnvVar {
    pub key: String,
    pub secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// A single deployable function unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    #[serde(default = "default_region")]
    pub region: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,
    #[serde(default)]
    pub secret_environment_variables: Vec<SecretEnvVar>,
    /// Change-detection fingerprint. `None` forces an unconditional redeploy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

fn default_region() -> String {
    "us-central1".to_string()
}

impl Endpoint {
    pub fn new(id: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: id.into(),
            region: default_region(),
            platform,
            entry_point: None,
            secret_environment_variables: Vec::new(),
            hash: None,
        }
    }

    pub fn with_secret(mut self, key: &str, secret: &str, version: Option<&str>) -> Self {
        self.secret_environment_variables.push(SecretEnvVar {
            key: key.to_string(),
            secret: secret.to_string(),
            project_id: None,
            version: version.map(str::to_string),
        });
        self
    }
}

/// Everything one codebase wants deployed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backend {
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl Backend {
    pub fn all_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn all_endpoints_mut(&mut self) -> impl Iterator<Item = &mut Endpoint> {
        self.endpoints.iter_mut()
    }

    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}

/// Content hashes of a codebase's packaged source, one per platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceHashes {
    #[serde(default)]
    pub functions_source_v1_hash: Option<String>,
    #[serde(default)]
    pub functions_source_v2_hash: Option<String>,
}

impl SourceHashes {
    pub fn for_platform(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::V1 => self.functions_source_v1_hash.as_deref(),
            Platform::V2 => self.functions_source_v2_hash.as_deref(),
        }
    }
}

/// A deploy filter. No `id_chunks` (or an empty list) selects the whole codebase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointFilter {
    pub codebase: String,
    #[serde(default)]
    pub id_chunks: Option<Vec<String>>,
}

impl EndpointFilter {
    pub fn codebase(codebase: impl Into<String>) -> Self {
        Self {
            codebase: codebase.into(),
            id_chunks: None,
        }
    }

    pub fn endpoints<I, S>(codebase: impl Into<String>, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codebase: codebase.into(),
            id_chunks: Some(chunks.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_codebase_wide(&self) -> bool {
        self.id_chunks.as_ref().map_or(true, |chunks| chunks.is_empty())
    }
}

/// Inputs shared by a deploy run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub filters: Option<Vec<EndpointFilter>>,
    pub sources: BTreeMap<String, SourceHashes>,
}

impl Context {
    pub fn filters(&self) -> &[EndpointFilter] {
        self.filters.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultResources {
    #[serde(default)]
    pub hosting_site: Option<String>,
    #[serde(default)]
    pub realtime_database_instance: Option<String>,
    #[serde(default)]
    pub storage_bucket: Option<String>,
    #[serde(default)]
    pub location_id: Option<String>,
}

/// Project descriptor as returned by the management API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub project_id: String,
    #[serde(default)]
    pub project_number: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub resources: Option<DefaultResources>,
    #[serde(default)]
    pub state: Option<String>,
}

impl ProjectMetadata {
    pub fn hosting_site(&self) -> Option<&str> {
        self.resources
            .as_ref()
            .and_then(|r| r.hosting_site.as_deref())
            .filter(|site| !site.is_empty())
    }
}
