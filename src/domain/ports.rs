use crate::domain::model::ProjectMetadata;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read access to the remote project management service.
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    async fn get_project(&self, project_id: &str) -> Result<ProjectMetadata>;
}

/// Command options that may carry a project selection.
pub trait ProjectOptions: Send + Sync {
    fn project(&self) -> Option<&str>;

    /// Takes precedence over `project` when set.
    fn project_id(&self) -> Option<&str> {
        None
    }
}
