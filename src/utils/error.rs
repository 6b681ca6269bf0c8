use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(
        "No currently active project. Pass --project <id> or set FN_DEPLOY_PROJECT to choose one."
    )]
    MissingProjectId,

    #[error("Failed to get project {project_id}. Please make sure the project exists and your account has permission to access it. (HTTP {status}: {message})")]
    RemoteFetch {
        project_id: String,
        status: u16,
        message: String,
    },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl DeployError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeployError::MissingProjectId => "No project selected".to_string(),
            DeployError::RemoteFetch { project_id, status, .. } => {
                format!("Could not read project '{}' (HTTP {})", project_id, status)
            }
            DeployError::Api(_) => "Could not reach the management API".to_string(),
            DeployError::Io(e) => format!("File access failed: {}", e),
            DeployError::Serialization(e) => format!("Malformed JSON: {}", e),
            DeployError::ConfigValidation { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            DeployError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeployError::MissingProjectId => {
                "Run again with --project <id> or export FN_DEPLOY_PROJECT"
            }
            DeployError::RemoteFetch { status, .. } if *status == 401 || *status == 403 => {
                "Check that --access-token is valid and has access to the project"
            }
            DeployError::RemoteFetch { .. } => "Verify the project id and try again",
            DeployError::Api(_) => "Check network connectivity and --api-origin",
            DeployError::Io(_) => "Make sure the manifest path exists and is readable",
            DeployError::Serialization(_) => "Check the response or manifest contents",
            DeployError::ConfigValidation { .. } | DeployError::InvalidConfigValue { .. } => {
                "Fix the configuration and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
