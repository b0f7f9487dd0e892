use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "TO_DO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO_DO" => Ok(TaskStatus::ToDo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            other => anyhow::bail!("unknown task status: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub task_status: Option<TaskStatus>,
    pub deadline: Option<NaiveDate>,
}

/// Editable task fields; used for both creation and full updates.
#[derive(Debug, Clone)]
pub struct TaskChanges {
    pub title: String,
    pub description: String,
    pub task_status: Option<TaskStatus>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub user_id: Option<i64>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering of task listings. Deadline ordering falls back to id on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    #[default]
    ById,
    ByDeadline(SortDirection),
}

impl TaskSort {
    pub fn new(sort: bool, direction: SortDirection) -> Self {
        if sort {
            TaskSort::ByDeadline(direction)
        } else {
            TaskSort::ById
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> std::cmp::Ordering {
        match self {
            TaskSort::ById => a.id.cmp(&b.id),
            TaskSort::ByDeadline(dir) => {
                // Same NULL placement as Postgres: last when ascending, first when descending.
                let by_deadline = match (a.deadline, b.deadline) {
                    (Some(x), Some(y)) => match dir {
                        SortDirection::Asc => x.cmp(&y),
                        SortDirection::Desc => y.cmp(&x),
                    },
                    (Some(_), None) => match dir {
                        SortDirection::Asc => std::cmp::Ordering::Less,
                        SortDirection::Desc => std::cmp::Ordering::Greater,
                    },
                    (None, Some(_)) => match dir {
                        SortDirection::Asc => std::cmp::Ordering::Greater,
                        SortDirection::Desc => std::cmp::Ordering::Less,
                    },
                    (None, None) => std::cmp::Ordering::Equal,
                };
                by_deadline.then(a.id.cmp(&b.id))
            }
        }
    }

    pub fn order_by_sql(&self) -> &'static str {
        match self {
            TaskSort::ById => "t.id ASC",
            TaskSort::ByDeadline(SortDirection::Asc) => "t.deadline ASC, t.id ASC",
            TaskSort::ByDeadline(SortDirection::Desc) => "t.deadline DESC, t.id ASC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignmentAction {
    Add,
    Remove,
}
