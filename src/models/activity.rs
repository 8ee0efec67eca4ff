//! Visits, notes, requirement/complaint tickets and brand pros/cons.
//!
//! All of these hang off a store and are plain backend records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use super::Resource;

/// A logged field visit to a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Visit {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<i64>,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_id: Option<i64>,
    #[serde(
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub visit_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Resource for Visit {
    const PATH: &'static str = "visit";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Request body for `POST visit/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitRequest {
    pub store_id: i64,
    pub employee_id: i64,
    pub visit_date: DateTime<Utc>,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// A free-text note attached to a store or visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Note {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<i64>,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_id: Option<i64>,
    pub content: String,
    #[serde(
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Note {
    const PATH: &'static str = "notes";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Request body for `POST notes/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub store_id: i64,
    pub employee_id: i64,
    pub content: String,
}

/// Ticket kind carried by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Requirement,
    Complaint,
    #[serde(other)]
    Other,
}

/// A requirement or complaint raised for a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<i64>,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to_id: Option<i64>,
    #[serde(
        deserialize_with = "lenient::opt_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("complete" | "completed" | "closed" | "resolved")
        )
    }
}

impl Resource for Task {
    const PATH: &'static str = "task";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Request body for `POST task/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub task_type: TaskType,
    pub description: String,
    pub store_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Pros and cons of a brand as reported at a store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandProsCons {
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,
    #[serde(
        deserialize_with = "lenient::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub store_id: Option<i64>,
    pub brand_name: String,
    #[serde(deserialize_with = "lenient::list")]
    pub pros: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub cons: Vec<String>,
}

impl Resource for BrandProsCons {
    const PATH: &'static str = "brand-pros-cons";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Request body for `POST brand-pros-cons/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBrandProsConsRequest {
    pub store_id: i64,
    pub brand_name: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_tolerates_unknown_type() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "taskType": "ESCALATION",
            "description": "Shelf space",
            "status": "Completed"
        }))
        .unwrap();
        assert_eq!(task.task_type, Some(TaskType::Other));
        assert!(!task.is_open());
    }

    #[test]
    fn test_visit_date_formats() {
        let visit: Visit = serde_json::from_value(json!({
            "id": 1,
            "storeId": "8",
            "visitDate": "2024-06-01"
        }))
        .unwrap();
        assert_eq!(visit.store_id, Some(8));
        assert!(visit.visit_date.is_some());

        let visit: Visit =
            serde_json::from_value(json!({"id": 2, "visitDate": "not a date"})).unwrap();
        assert!(visit.visit_date.is_none());
    }

    #[test]
    fn test_brand_null_lists() {
        let brand: BrandProsCons = serde_json::from_value(json!({
            "id": 4,
            "brandName": "Acme",
            "pros": ["price"],
            "cons": null
        }))
        .unwrap();
        assert_eq!(brand.pros, vec!["price"]);
        assert!(brand.cons.is_empty());
    }
}
