use crate::domain::ports::ProjectOptions;
use crate::utils::error::{DeployError, Result};

/// Returns the selected project id, preferring an explicit `project_id`.
pub fn need_project_id<O: ProjectOptions + ?Sized>(options: &O) -> Result<String> {
    options
        .project_id()
        .into_iter()
        .chain(options.project())
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(DeployError::MissingProjectId)
}
