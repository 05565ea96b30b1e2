use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed-task counts keyed by ISO date (`YYYY-MM-DD`). Missing dates mean zero.
pub type DailyCount = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarResponse {
    #[serde(default)]
    pub counts: DailyCount,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Body of a successful `/api/login` or `/api/register` call.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub username: String,
}

/// A signed-in session: the user's name and the `Set-Cookie` values the backend
/// issued, to be handed on to the browser unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub username: String,
    pub cookies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Unknown values are treated as pending, matching the backend.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A validated title/description pair ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct TaskPayload<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Status,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl TaskSort {
    /// Parses `<field>_<order>`, e.g. `created_at_desc`. Unknown parts fall back to
    /// `created_at` and `desc` independently.
    pub fn parse(value: &str) -> Self {
        let (field, order) = value.trim().rsplit_once('_').unwrap_or((value, ""));
        let field = match field {
            "status" => SortField::Status,
            "title" => SortField::Title,
            _ => SortField::CreatedAt,
        };
        let order = match order {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        Self { field, order }
    }

    pub fn field_param(self) -> &'static str {
        match self.field {
            SortField::CreatedAt => "created_at",
            SortField::Status => "status",
            SortField::Title => "title",
        }
    }

    pub fn order_param(self) -> &'static str {
        match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn as_param(self) -> String {
        format!("{}_{}", self.field_param(), self.order_param())
    }
}
