//! Modelo de Task
//!
//! Tareas internas del equipo (CRUD simple bajo `/tasks`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::trip::optional_calendar_date;

pub type TaskId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, with = "optional_calendar_date")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Completed && self.due_date.map_or(false, |due| due < today)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub status: TaskStatus,

    #[serde(with = "optional_calendar_date", default)]
    pub due_date: Option<NaiveDate>,
}
