//! Fachada de Tasks

use validator::Validate;

use crate::client::ApiClient;
use crate::models::task::{Task, TaskId, TaskRequest};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct TaskApi {
    client: ApiClient,
}

impl TaskApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> AppResult<Vec<Task>> {
        self.client.get_data("/tasks", "tasks").await
    }

    pub async fn get(&self, id: TaskId) -> AppResult<Task> {
        self.client.get_data(&format!("/tasks/{}", id), "task").await
    }

    pub async fn create(&self, request: &TaskRequest) -> AppResult<Task> {
        request.validate()?;
        self.client.post_data("/tasks", request, "task").await
    }

    pub async fn update(&self, id: TaskId, request: &TaskRequest) -> AppResult<Task> {
        request.validate()?;
        self.client
            .put_data(&format!("/tasks/{}", id), request, "task")
            .await
    }

    pub async fn delete(&self, id: TaskId) -> AppResult<Option<String>> {
        self.client.delete(&format!("/tasks/{}", id)).await
    }
}
