//! Employee model matching the backend employee payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient::{self, id_from_value};
use super::role::{normalize_role, CategoryRole};

/// A person in the organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Role exactly as the backend sent it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub assigned_cities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub archived: bool,
}

/// Wire shape accepted for an employee object. Every field is optional and
/// a single `name` is split when first/last names are missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEmployee {
    id: Option<Value>,
    #[serde(deserialize_with = "lenient::opt_string")]
    first_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    last_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    role: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    city: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    assigned_cities: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    phone: Option<String>,
    #[serde(deserialize_with = "lenient::opt_bool")]
    archived: Option<bool>,
}

/// An employee may arrive as an object or as a bare id reference.
impl From<Value> for Employee {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) => match serde_json::from_value::<RawEmployee>(value) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    tracing::warn!("Malformed employee object: {}", e);
                    Employee::default()
                }
            },
            other => id_from_value(&other)
                .map(Employee::partial)
                .unwrap_or_default(),
        }
    }
}

impl From<RawEmployee> for Employee {
    fn from(raw: RawEmployee) -> Self {
        let (mut first_name, mut last_name) = (
            raw.first_name.unwrap_or_default(),
            raw.last_name.unwrap_or_default(),
        );
        if first_name.trim().is_empty() && last_name.trim().is_empty() {
            if let Some(name) = raw.name.as_deref() {
                let mut parts = name.trim().splitn(2, char::is_whitespace);
                first_name = parts.next().unwrap_or_default().to_string();
                last_name = parts.next().unwrap_or_default().trim().to_string();
            }
        }

        Self {
            id: raw.id.as_ref().and_then(id_from_value).unwrap_or_default(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            role: raw.role.filter(|r| !r.trim().is_empty()),
            city: raw.city,
            assigned_cities: raw.assigned_cities,
            email: raw.email,
            phone: raw.phone,
            archived: raw.archived.unwrap_or(false),
        }
    }
}

impl Employee {
    /// An employee known only by id, used when a reference cannot be
    /// resolved against the directory.
    pub fn partial(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Whether the backend supplied a usable id.
    pub fn has_id(&self) -> bool {
        self.id > 0
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Case-insensitive sort key: first name (falling back to last name),
    /// then last name.
    pub fn sort_key(&self) -> (String, String) {
        let primary = if self.first_name.is_empty() {
            &self.last_name
        } else {
            &self.first_name
        };
        (primary.to_lowercase(), self.last_name.to_lowercase())
    }

    pub fn category_role(&self) -> Option<CategoryRole> {
        self.role.as_deref().and_then(normalize_role)
    }
}

/// Request body for `POST employee-user/create`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request body for `PUT employee/edit`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEmployeeRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request body for `PUT employee/assignCity`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCityRequest {
    pub id: i64,
    pub assigned_cities: Vec<String>,
}

/// Request body for `PUT employee/delete`, which archives or restores.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEmployeeRequest {
    pub id: i64,
    pub archived: bool,
}

/// Request body for the attendance log written after an employee is created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceLogRequest {
    pub employee_id: i64,
    pub status: String,
}
