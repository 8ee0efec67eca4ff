//! REST client for the field operations backend.
//!
//! JSON over HTTP with a bearer token. Responses are accepted bare or wrapped
//! in a `{ "data": ... }` envelope.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ClientError;
use crate::models::{
    ArchiveEmployeeRequest, AssignCityRequest, AttendanceLogRequest, CreateEmployeeRequest,
    EditEmployeeRequest, Employee, HierarchyResponse, Resource, Team,
};

/// Endpoint paths, relative to the configured base URL.
pub mod endpoints {
    pub const EMPLOYEES: &str = "employee/getAll";
    pub const TEAMS_BY_EMPLOYEE: &str = "employee/team/getByEmployee";
    pub const TEAM_HIERARCHY: &str = "employee/team/hierarchy";
    pub const ARCHIVE_EMPLOYEE: &str = "employee/delete";
    pub const ASSIGN_CITY: &str = "employee/assignCity";
    pub const EDIT_EMPLOYEE: &str = "employee/edit";
    pub const CREATE_EMPLOYEE: &str = "employee-user/create";
    pub const ATTENDANCE_LOG: &str = "attendance/log";
}

/// Bearer-authenticated client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn send(&self, builder: RequestBuilder) -> Result<String, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Backend answered {}: {}", status, body);
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let body = self.send(builder).await?;
        decode_body(&body)
    }

    /// Like [`fetch`](Self::fetch) for lists; a `null` body is an empty list.
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, ClientError> {
        let items: Option<Vec<T>> = self.fetch(builder).await?;
        Ok(items.unwrap_or_default())
    }

    async fn fire(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        self.send(builder).await.map(|_| ())
    }

    // ---- Employees -------------------------------------------------------

    /// GET employee/getAll
    pub async fn list_employees(&self) -> Result<Vec<Employee>, ClientError> {
        self.fetch_list(self.request(Method::GET, endpoints::EMPLOYEES))
            .await
    }

    /// GET employee/team/getByEmployee?id=
    pub async fn teams_by_employee(&self, employee_id: i64) -> Result<Vec<Team>, ClientError> {
        self.fetch_list(
            self.request(Method::GET, endpoints::TEAMS_BY_EMPLOYEE)
                .query(&[("id", employee_id)]),
        )
        .await
    }

    /// GET employee/team/hierarchy
    pub async fn team_hierarchy(&self) -> Result<HierarchyResponse, ClientError> {
        let raw: Option<HierarchyResponse> = self
            .fetch(self.request(Method::GET, endpoints::TEAM_HIERARCHY))
            .await?;
        Ok(raw.unwrap_or_default())
    }

    /// PUT employee/delete - archive or restore an employee.
    pub async fn set_archived(&self, employee_id: i64, archived: bool) -> Result<(), ClientError> {
        let body = ArchiveEmployeeRequest {
            id: employee_id,
            archived,
        };
        self.fire(self.request(Method::PUT, endpoints::ARCHIVE_EMPLOYEE).json(&body))
            .await
    }

    /// PUT employee/assignCity
    pub async fn assign_cities(&self, request: &AssignCityRequest) -> Result<(), ClientError> {
        self.fire(self.request(Method::PUT, endpoints::ASSIGN_CITY).json(request))
            .await
    }

    /// PUT employee/edit
    pub async fn edit_employee(&self, request: &EditEmployeeRequest) -> Result<(), ClientError> {
        self.fire(self.request(Method::PUT, endpoints::EDIT_EMPLOYEE).json(request))
            .await
    }

    /// POST employee-user/create
    pub async fn create_employee(
        &self,
        request: &CreateEmployeeRequest,
    ) -> Result<Employee, ClientError> {
        if request.first_name.trim().is_empty() {
            return Err(ClientError::Validation("First name is required".to_string()));
        }
        if request.role.trim().is_empty() {
            return Err(ClientError::Validation("Role is required".to_string()));
        }

        self.fetch(self.request(Method::POST, endpoints::CREATE_EMPLOYEE).json(request))
            .await
    }

    /// POST attendance/log
    pub async fn log_attendance(&self, request: &AttendanceLogRequest) -> Result<(), ClientError> {
        self.fire(self.request(Method::POST, endpoints::ATTENDANCE_LOG).json(request))
            .await
    }

    // ---- Generic resources ----------------------------------------------

    /// GET {resource}/getAll
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        self.fetch_list(self.request(Method::GET, &format!("{}/getAll", R::PATH)))
            .await
    }

    /// GET {resource}/getByStore?storeId=
    pub async fn list_by_store<R: Resource>(&self, store_id: i64) -> Result<Vec<R>, ClientError> {
        self.fetch_list(
            self.request(Method::GET, &format!("{}/getByStore", R::PATH))
                .query(&[("storeId", store_id)]),
        )
        .await
    }

    /// GET {resource}/getById?id=
    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ClientError> {
        self.fetch(
            self.request(Method::GET, &format!("{}/getById", R::PATH))
                .query(&[("id", id)]),
        )
        .await
    }

    /// POST {resource}/create
    pub async fn create<R: Resource, B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<R, ClientError> {
        self.fetch(
            self.request(Method::POST, &format!("{}/create", R::PATH))
                .json(body),
        )
        .await
    }

    /// PUT {resource}/edit
    pub async fn update<R: Resource, B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> Result<R, ClientError> {
        self.fetch(
            self.request(Method::PUT, &format!("{}/edit", R::PATH))
                .json(body),
        )
        .await
    }

    /// DELETE {resource}/delete?id=
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ClientError> {
        self.fire(
            self.request(Method::DELETE, &format!("{}/delete", R::PATH))
                .query(&[("id", id)]),
        )
        .await
    }
}

/// Keys that may sit next to `data` in a response envelope.
const ENVELOPE_KEYS: &[&str] = &[
    "data",
    "success",
    "status",
    "message",
    "code",
    "error",
    "timestamp",
    "revisionId",
];

/// Whether `map` is a `{ "data": ... }` envelope rather than a record that
/// happens to carry a `data` field.
fn is_envelope(map: &serde_json::Map<String, Value>) -> bool {
    map.contains_key("data") && map.keys().all(|key| ENVELOPE_KEYS.contains(&key.as_str()))
}

/// Decode a response body, unwrapping a `{ "data": ... }` envelope.
/// An empty body decodes as JSON `null`.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let value: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body)?
    };

    let value = match value {
        Value::Object(mut map) if is_envelope(&map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };

    Ok(serde_json::from_value(value)?)
}
