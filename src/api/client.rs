//! HTTP client for the project-tracking REST API.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::types::{
    Board, BoardDraft, Column, CreateColumnRequest, PositionUpdate, Task, TaskDraft,
    UpdateBoardRequest, UpdateColumnRequest, UpdateTaskRequest,
};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extract a human-readable message from a JSON error body.
///
/// Tries `message`, then `error`, then falls back to the raw body.
fn extract_error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(err) = json.get("error").and_then(|v| v.as_str()) {
            return err.to_string();
        }
    }
    body.to_string()
}

/// Client for the tasks/columns/boards REST endpoints.
///
/// Holds the base URL, the per-request timeout and the bearer token carried
/// on every authenticated request.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    /// Create an unauthenticated client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the bearer token, e.g. after login
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the bearer token, e.g. on logout
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// True when a token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a request with the timeout and bearer token applied
    pub(crate) fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url).timeout(self.timeout);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }

    /// Map an HTTP response to a `BoardError` based on status code
    pub(crate) async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        debug!(status = status_code, %message, "request rejected");

        match status_code {
            401 => Err(BoardError::Unauthorized(message)),
            422 => Err(BoardError::validation("request", message)),
            _ => Err(BoardError::api(status_code, message)),
        }
    }

    // -- Tasks --

    /// List tasks, optionally scoped to a project
    pub async fn list_tasks(&self, project_id: Option<&str>) -> Result<Vec<Task>> {
        let mut url = format!("{}/tasks", self.base_url);
        if let Some(project_id) = project_id {
            url.push_str(&format!("?projectId={}", urlencoding::encode(project_id)));
        }
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single task
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let url = format!("{}/tasks/{}", self.base_url, urlencoding::encode(id));
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let response = self.check_response(response).await.map_err(task_404(id))?;
        Ok(response.json().await?)
    }

    /// Create a task. The server assigns id and timestamps.
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let url = format!("{}/tasks", self.base_url);
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(draft)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Apply a partial update to a task, returning the server's full task
    pub async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> Result<Task> {
        let url = format!("{}/tasks/{}", self.base_url, urlencoding::encode(id));
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(request)
            .send()
            .await?;
        let response = self.check_response(response).await.map_err(task_404(id))?;
        Ok(response.json().await?)
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let url = format!("{}/tasks/{}", self.base_url, urlencoding::encode(id));
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        self.check_response(response).await.map_err(task_404(id))?;
        Ok(())
    }

    /// Batch-reposition tasks, returning the updated tasks
    pub async fn update_task_positions(&self, updates: &[PositionUpdate]) -> Result<Vec<Task>> {
        let url = format!("{}/tasks/batch-update-positions", self.base_url);
        let body = serde_json::json!({ "updates": updates });
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&body)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    // -- Columns --

    /// List columns, optionally scoped to a board
    pub async fn list_columns(&self, kanban_id: Option<&str>) -> Result<Vec<Column>> {
        let mut url = format!("{}/kanban-columns", self.base_url);
        if let Some(kanban_id) = kanban_id {
            url.push_str(&format!("?kanbanId={}", urlencoding::encode(kanban_id)));
        }
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Create a column
    pub async fn create_column(&self, request: &CreateColumnRequest) -> Result<Column> {
        let url = format!("{}/kanban-columns", self.base_url);
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(request)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Apply a partial update to a column
    pub async fn update_column(&self, id: &str, request: &UpdateColumnRequest) -> Result<Column> {
        let url = format!(
            "{}/kanban-columns/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(request)
            .send()
            .await?;
        let response = self
            .check_response(response)
            .await
            .map_err(column_404(id))?;
        Ok(response.json().await?)
    }

    /// Delete a column. The server cascades deletion of its tasks.
    pub async fn delete_column(&self, id: &str) -> Result<()> {
        let url = format!(
            "{}/kanban-columns/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        self.check_response(response).await.map_err(column_404(id))?;
        Ok(())
    }

    // -- Boards --

    /// List boards, optionally scoped to a project
    pub async fn list_boards(&self, project_id: Option<&str>) -> Result<Vec<Board>> {
        let mut url = format!("{}/kanbans", self.base_url);
        if let Some(project_id) = project_id {
            url.push_str(&format!("?projectId={}", urlencoding::encode(project_id)));
        }
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single board
    pub async fn get_board(&self, id: &str) -> Result<Board> {
        let url = format!("{}/kanbans/{}", self.base_url, urlencoding::encode(id));
        let response = self.request(reqwest::Method::GET, &url).send().await?;
        let response = self.check_response(response).await.map_err(board_404(id))?;
        Ok(response.json().await?)
    }

    /// Create a board
    pub async fn create_board(&self, draft: &BoardDraft) -> Result<Board> {
        let url = format!("{}/kanbans", self.base_url);
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(draft)
            .send()
            .await?;
        let response = self.check_response(response).await?;
        Ok(response.json().await?)
    }

    /// Apply a partial update to a board
    pub async fn update_board(&self, id: &str, request: &UpdateBoardRequest) -> Result<Board> {
        let url = format!("{}/kanbans/{}", self.base_url, urlencoding::encode(id));
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(request)
            .send()
            .await?;
        let response = self.check_response(response).await.map_err(board_404(id))?;
        Ok(response.json().await?)
    }

    /// Delete a board
    pub async fn delete_board(&self, id: &str) -> Result<()> {
        let url = format!("{}/kanbans/{}", self.base_url, urlencoding::encode(id));
        let response = self.request(reqwest::Method::DELETE, &url).send().await?;
        self.check_response(response).await.map_err(board_404(id))?;
        Ok(())
    }
}

fn task_404(id: &str) -> impl FnOnce(BoardError) -> BoardError + '_ {
    move |err| match err {
        BoardError::Api { status: 404, .. } => BoardError::TaskNotFound { id: id.to_string() },
        other => other,
    }
}

fn column_404(id: &str) -> impl FnOnce(BoardError) -> BoardError + '_ {
    move |err| match err {
        BoardError::Api { status: 404, .. } => BoardError::ColumnNotFound { id: id.to_string() },
        other => other,
    }
}

fn board_404(id: &str) -> impl FnOnce(BoardError) -> BoardError + '_ {
    move |err| match err {
        BoardError::Api { status: 404, .. } => BoardError::BoardNotFound { id: id.to_string() },
        other => other,
    }
}
