use crate::domain::model::ProjectMetadata;
use crate::domain::ports::ProjectsApi;
use crate::utils::error::{DeployError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_ORIGIN: &str = "https://firebase.googleapis.com";
const API_VERSION: &str = "v1beta1";

/// HTTP client for the project management API.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    client: Client,
    origin: String,
    access_token: Option<String>,
}

impl ManagementClient {
    pub fn new(origin: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }

    fn project_url(&self, project_id: &str) -> String {
        format!("{}/{}/projects/{}", self.origin, API_VERSION, project_id)
    }
}

#[async_trait]
impl ProjectsApi for ManagementClient {
    async fn get_project(&self, project_id: &str) -> Result<ProjectMetadata> {
        let url = self.project_url(project_id);
        tracing::debug!("Fetching project metadata from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Management API response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeployError::RemoteFetch {
                project_id: project_id.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> ManagementClient {
        ManagementClient::new(server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_project_decodes_metadata() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1beta1/projects/demo");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "projectId": "demo",
                    "projectNumber": "42",
                    "displayName": "Demo",
                    "name": "projects/demo",
                    "resources": { "hostingSite": "demo-site" },
                    "state": "ACTIVE"
                }));
        });

        let project = client(&server).get_project("demo").await.unwrap();

        mock.assert();
        assert_eq!(project.project_id, "demo");
        assert_eq!(project.project_number.as_deref(), Some("42"));
        assert_eq!(project.hosting_site(), Some("demo-site"));
    }

    #[tokio::test]
    async fn test_get_project_sends_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1beta1/projects/demo")
                .header("Authorization", "Bearer secret-token");
            then.status(200).json_body(serde_json::json!({ "projectId": "demo" }));
        });

        let api = client(&server).with_access_token(Some("secret-token".to_string()));
        api.get_project("demo").await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_get_project_maps_http_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1beta1/projects/missing");
            then.status(404).body("not found");
        });

        let err = client(&server).get_project("missing").await.unwrap_err();
        match err {
            DeployError::RemoteFetch {
                project_id,
                status,
                message,
            } => {
                assert_eq!(project_id, "missing");
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_project_url_trims_trailing_slash() {
        let api = ManagementClient::new("http://localhost:9000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.project_url("demo"),
            "http://localhost:9000/v1beta1/projects/demo"
        );
    }
}
