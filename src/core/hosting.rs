use crate::core::project::need_project_id;
use crate::domain::ports::{ProjectOptions, ProjectsApi};
use crate::utils::error::Result;

/// Resolves the default hosting site of the selected project.
///
/// Projects without a configured site fall back to the project id itself.
pub async fn default_hosting_site<O, A>(options: &O, api: &A) -> Result<String>
where
    O: ProjectOptions + ?Sized,
    A: ProjectsApi + ?Sized,
{
    let project_id = need_project_id(options)?;
    let project = api.get_project(&project_id).await?;

    match project.hosting_site() {
        Some(site) => Ok(site.to_string()),
        None => {
            tracing::debug!(
                "No default hosting site found for project: {}. Using projectId as hosting site name.",
                project_id
            );
            Ok(project_id)
        }
    }
}
