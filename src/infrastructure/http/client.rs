//! HTTP implementation of the platform API
//!
//! Blocking `reqwest` client with bearer authentication. Every response goes
//! through [`error_for_status`] so callers only see the `SolidError` taxonomy.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use super::envelope::{decode_build_log, decode_list, LogsEnvelope, RunEnvelope};
use crate::config::ClientConfig;
use crate::domain::entities::{
    BulkPushSummary, EnvValue, GlobalVariable, NewGlobalVariable, NewProject, NewSchedule,
    ProjectInfo, ProjectVariableMapping, RunInfo, Schedule, Webhook,
};
use crate::domain::ports::{MappingQuery, PlatformApi};
use crate::domain::services::{DeclarationPayload, LogPayload};
use crate::domain::value_objects::ResourceId;
use crate::error::{SolidError, SolidResult};

const API_PREFIX: &str = "/api/v1";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpPlatformApi {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpPlatformApi {
    pub fn new(config: &ClientConfig) -> SolidResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("solidactions-cli/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            // Bundle uploads and long builds must not be cut short
            .timeout(None)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        trace!(%method, %url, "request");
        self.client
            .request(method, url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
    }

    fn send(&self, request: RequestBuilder) -> SolidResult<Response> {
        error_for_status(request.send()?)
    }

    fn get_text(&self, path: &str, query: &[(&str, String)]) -> SolidResult<String> {
        let response = self.send(self.request(Method::GET, path).query(query))?;
        Ok(response.text()?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> SolidResult<T> {
        let body = self.get_text(path, &[])?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> SolidResult<Vec<T>> {
        decode_list(&self.get_text(path, query)?)
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> SolidResult<String> {
        let response = self.send(self.request(Method::POST, path).json(body))?;
        Ok(response.text()?)
    }

    fn delete(&self, path: &str) -> SolidResult<()> {
        self.send(self.request(Method::DELETE, path))?;
        Ok(())
    }
}

/// Map a non-success response onto the error taxonomy.
pub(crate) fn error_for_status(response: Response) -> SolidResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let path = response.url().path().to_string();
    let body = response.text().unwrap_or_default();
    debug!(status = status.as_u16(), %path, "request failed");
    Err(status_error(status, &path, &body))
}

fn status_error(status: StatusCode, path: &str, body: &str) -> SolidError {
    match status {
        StatusCode::UNAUTHORIZED => SolidError::Auth,
        StatusCode::NOT_FOUND => SolidError::not_found(path),
        StatusCode::UNPROCESSABLE_ENTITY => SolidError::RemoteValidation {
            message: validation_message(body),
        },
        other => SolidError::Remote {
            status: other.as_u16(),
            body: server_message(body).unwrap_or_else(|| body.to_string()),
        },
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn validation_message(body: &str) -> String {
    if let Some(message) = server_message(body) {
        return message;
    }
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("errors").cloned())
        .map(|errors| errors.to_string())
        .unwrap_or_else(|| body.to_string())
}

impl PlatformApi for HttpPlatformApi {
    fn get_project(&self, slug: &str) -> SolidResult<ProjectInfo> {
        self.get_json(&format!("/projects/{}", slug))
    }

    fn create_project(&self, project: &NewProject) -> SolidResult<ProjectInfo> {
        let body = self.post_json("/projects", project)?;
        if body.trim().is_empty() {
            return Ok(ProjectInfo::default());
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn upload_bundle(&self, slug: &str, bundle: &Path) -> SolidResult<()> {
        let form = multipart::Form::new().file("source", bundle)?;
        self.send(
            self.request(Method::POST, &format!("/projects/{}/deploy", slug))
                .multipart(form),
        )?;
        Ok(())
    }

    fn get_build_log(&self, slug: &str) -> SolidResult<Option<String>> {
        let body = self.get_text(&format!("/projects/{}/build-log", slug), &[])?;
        Ok(decode_build_log(&body))
    }

    fn download_source(&self, slug: &str) -> SolidResult<Vec<u8>> {
        let response = self.send(self.request(Method::GET, &format!("/projects/{}/source", slug)))?;
        Ok(response.bytes()?.to_vec())
    }

    fn list_variables(&self) -> SolidResult<Vec<GlobalVariable>> {
        self.get_list("/variables", &[])
    }

    fn create_variable(&self, variable: &NewGlobalVariable) -> SolidResult<()> {
        self.post_json("/variables", variable)?;
        Ok(())
    }

    fn delete_variable(&self, id: &ResourceId) -> SolidResult<()> {
        self.delete(&format!("/variables/{}", id))
    }

    fn list_mappings(
        &self,
        slug: &str,
        query: MappingQuery,
    ) -> SolidResult<Vec<ProjectVariableMapping>> {
        let mut params = Vec::new();
        if query.reveal {
            params.push(("reveal", "true".to_string()));
        }
        if query.resolve_oauth {
            params.push(("resolve_oauth", "true".to_string()));
        }
        self.get_list(&format!("/projects/{}/variable-mappings", slug), &params)
    }

    fn create_mapping(
        &self,
        slug: &str,
        project_key: &str,
        global_variable_id: &ResourceId,
    ) -> SolidResult<()> {
        let body = serde_json::json!({
            "project_key": project_key,
            "global_variable_id": global_variable_id,
        });
        self.post_json(&format!("/projects/{}/variable-mappings", slug), &body)?;
        Ok(())
    }

    fn delete_mapping(&self, slug: &str, id: &ResourceId) -> SolidResult<()> {
        self.delete(&format!("/projects/{}/variable-mappings/{}", slug, id))
    }

    fn push_env_values(&self, slug: &str, values: &[EnvValue]) -> SolidResult<BulkPushSummary> {
        let body = serde_json::json!({ "variables": values });
        let response =
            self.post_json(&format!("/projects/{}/variable-mappings/bulk", slug), &body)?;
        if response.trim().is_empty() {
            return Ok(BulkPushSummary::default());
        }
        Ok(serde_json::from_str(&response)?)
    }

    fn sync_declarations(
        &self,
        slug: &str,
        declarations: &[DeclarationPayload],
    ) -> SolidResult<()> {
        let body = serde_json::json!({ "declarations": declarations });
        self.post_json(
            &format!("/projects/{}/variable-mappings/sync-yaml", slug),
            &body,
        )?;
        Ok(())
    }

    fn trigger_run(
        &self,
        project: &str,
        workflow: &str,
        input: &serde_json::Value,
    ) -> SolidResult<RunInfo> {
        let body = serde_json::json!({ "input": input });
        let response = self.post_json(
            &format!("/projects/{}/workflows/{}/trigger", project, workflow),
            &body,
        )?;
        let envelope: RunEnvelope = serde_json::from_str(&response)?;
        Ok(envelope.into_run())
    }

    fn list_runs(&self, limit: u32, project: Option<&str>) -> SolidResult<Vec<RunInfo>> {
        let mut params = vec![("limit", limit.to_string())];
        if let Some(project) = project {
            params.push(("project", project.to_string()));
        }
        self.get_list("/runs", &params)
    }

    fn get_run(&self, id: &str) -> SolidResult<RunInfo> {
        let envelope: RunEnvelope = self.get_json(&format!("/runs/{}", id))?;
        Ok(envelope.into_run())
    }

    fn get_run_logs(&self, id: &str) -> SolidResult<LogPayload> {
        let body = self.get_text(&format!("/runs/{}/logs", id), &[])?;
        if body.trim().is_empty() {
            return Ok(LogPayload::default());
        }
        let envelope: LogsEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.logs.unwrap_or_default())
    }

    fn list_schedules(&self, slug: &str) -> SolidResult<Vec<Schedule>> {
        self.get_list(&format!("/projects/{}/schedules", slug), &[])
    }

    fn create_schedule(&self, slug: &str, schedule: &NewSchedule) -> SolidResult<()> {
        self.post_json(&format!("/projects/{}/schedules", slug), schedule)?;
        Ok(())
    }

    fn delete_schedule(&self, slug: &str, id: &str) -> SolidResult<()> {
        self.delete(&format!("/projects/{}/schedules/{}", slug, id))
    }

    fn list_webhooks(&self, slug: &str, show_secrets: bool) -> SolidResult<Vec<Webhook>> {
        let params = if show_secrets {
            vec![("show_secrets", "true".to_string())]
        } else {
            Vec::new()
        };
        self.get_list(&format!("/projects/{}/webhooks", slug), &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn api(server: &mockito::ServerGuard) -> HttpPlatformApi {
        HttpPlatformApi::new(&ClientConfig::new(server.url(), "sa_test")).unwrap()
    }

    #[test]
    fn sends_bearer_token_and_parses_project() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/projects/shop-dev")
            .match_header("authorization", "Bearer sa_test")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"slug":"shop-dev","status":"running","build_log":"step\n"}"#)
            .create();

        let project = api(&server).get_project("shop-dev").unwrap();
        assert_eq!(project.status.as_deref(), Some("running"));
        assert_eq!(project.build_log.as_deref(), Some("step\n"));
        mock.assert();
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/projects/a")
            .with_status(401)
            .create();
        server
            .mock("GET", "/api/v1/projects/b")
            .with_status(404)
            .create();
        server
            .mock("GET", "/api/v1/projects/c")
            .with_status(422)
            .with_body(r#"{"message":"slug taken"}"#)
            .create();
        server
            .mock("GET", "/api/v1/projects/d")
            .with_status(422)
            .with_body(r#"{"errors":{"cron":["invalid"]}}"#)
            .create();
        server
            .mock("GET", "/api/v1/projects/e")
            .with_status(500)
            .with_body("oops")
            .create();

        let api = api(&server);
        assert!(matches!(api.get_project("a"), Err(SolidError::Auth)));
        assert!(api.get_project("b").unwrap_err().is_not_found());
        match api.get_project("c") {
            Err(SolidError::RemoteValidation { message }) => assert_eq!(message, "slug taken"),
            other => panic!("unexpected {:?}", other),
        }
        match api.get_project("d") {
            Err(SolidError::RemoteValidation { message }) => {
                assert_eq!(message, r#"{"cron":["invalid"]}"#)
            }
            other => panic!("unexpected {:?}", other),
        }
        match api.get_project("e") {
            Err(SolidError::Remote { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn mapping_query_flags() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/projects/shop/variable-mappings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("reveal".into(), "true".into()),
                Matcher::UrlEncoded("resolve_oauth".into(), "true".into()),
            ]))
            .with_body(r#"[{"id":1,"env_name":"A","value":"1"}]"#)
            .create();

        let mappings = api(&server)
            .list_mappings(
                "shop",
                MappingQuery {
                    reveal: true,
                    resolve_oauth: true,
                },
            )
            .unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].env_name, "A");
        mock.assert();
    }

    #[test]
    fn bulk_push_body_and_summary() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/v1/projects/shop/variable-mappings/bulk")
            .match_body(Matcher::Json(serde_json::json!({
                "variables": [{"key": "DB_TOKEN", "value": "hunter2", "is_secret": true}]
            })))
            .with_body(r#"{"created":1,"updated":0}"#)
            .create();

        let summary = api(&server)
            .push_env_values(
                "shop",
                &[EnvValue {
                    key: "DB_TOKEN".into(),
                    value: "hunter2".into(),
                    is_secret: true,
                }],
            )
            .unwrap();
        assert_eq!(summary, BulkPushSummary { created: 1, updated: 0 });
        mock.assert();
    }

    #[test]
    fn upload_is_multipart_source_field() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("b.tar.gz");
        std::fs::write(&bundle, b"bytes").unwrap();

        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/v1/projects/shop/deploy")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data; boundary=.*".into()),
            )
            .match_body(Matcher::Regex("name=\"source\"".into()))
            .with_status(202)
            .create();

        api(&server).upload_bundle("shop", &bundle).unwrap();
        mock.assert();
    }

    #[test]
    fn trigger_run_accepts_wrapped_response() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/api/v1/projects/shop/workflows/nightly/trigger")
            .match_body(Matcher::Json(serde_json::json!({"input": {"n": 1}})))
            .with_body(r#"{"run":{"id":"r-1","status":"queued"}}"#)
            .create();

        let run = api(&server)
            .trigger_run("shop", "nightly", &serde_json::json!({"n": 1}))
            .unwrap();
        assert_eq!(run.id.as_str(), "r-1");
    }

    #[test]
    fn get_run_unwraps_either_shape() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/runs/9b1d")
            .with_body(r#"{"run":{"id":"9b1d","status":"running"}}"#)
            .create();
        server
            .mock("GET", "/api/v1/runs/42")
            .with_body(r#"{"id":42,"status":"completed"}"#)
            .create();

        let wrapped = api(&server).get_run("9b1d").unwrap();
        assert_eq!(wrapped.id.as_str(), "9b1d");
        assert_eq!(wrapped.status.as_deref(), Some("running"));

        let bare = api(&server).get_run("42").unwrap();
        assert_eq!(bare.id.as_str(), "42");
        assert_eq!(bare.status.as_deref(), Some("completed"));
    }

    #[test]
    fn run_logs_both_shapes() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/v1/runs/1/logs")
            .with_body(r#"{"logs":"hello\n"}"#)
            .create();
        server
            .mock("GET", "/api/v1/runs/2/logs")
            .with_body(r#"{"logs":[{"message":"m","stream":"stdout"}]}"#)
            .create();
        server
            .mock("GET", "/api/v1/runs/3/logs")
            .with_body(r#"{"logs":null}"#)
            .create();

        let api = api(&server);
        assert_eq!(
            api.get_run_logs("1").unwrap(),
            LogPayload::Raw("hello\n".into())
        );
        assert!(matches!(
            api.get_run_logs("2").unwrap(),
            LogPayload::Entries(ref e) if e.len() == 1
        ));
        assert!(api.get_run_logs("3").unwrap().is_empty());
    }

    #[test]
    fn list_runs_passes_limit_and_project() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/v1/runs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "5".into()),
                Matcher::UrlEncoded("project".into(), "shop".into()),
            ]))
            .with_body(r#"{"data":[{"id":1,"status":"completed"}]}"#)
            .create();

        let runs = api(&server).list_runs(5, Some("shop")).unwrap();
        assert_eq!(runs.len(), 1);
        mock.assert();
    }
}
