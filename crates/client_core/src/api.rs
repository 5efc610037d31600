//! Remote employee collection: the request trait the grid talks to and its HTTP
//! implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{EmployeeId, EmployeeRecord},
    protocol::{
        join_ids, CreateEmployeesRequest, UpdateEmployeesRequest, CREATE_EMPLOYEES_PATH,
        DELETE_EMPLOYEES_PATH, EMPLOYEES_PATH, UPDATE_EMPLOYEES_PATH,
    },
};
use tracing::debug;
use url::Url;

use crate::error::ClientError;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait EmployeeApi: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, ClientError>;
    async fn create_employees(
        &self,
        employees: &CreateEmployeesRequest,
    ) -> Result<Vec<EmployeeRecord>, ClientError>;
    async fn update_employees(&self, employees: &UpdateEmployeesRequest)
        -> Result<(), ClientError>;
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), ClientError>;
    async fn delete_employees(&self, ids: &[EmployeeId]) -> Result<(), ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpEmployeeClient {
    http: Client,
    base_url: String,
}

impl HttpEmployeeClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::from_reqwest("client setup"))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Validates `raw` and strips trailing slashes so endpoint paths can be appended.
pub fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[async_trait]
impl EmployeeApi for HttpEmployeeClient {
    async fn list_employees(&self) -> Result<Vec<EmployeeRecord>, ClientError> {
        let map_err = || ClientError::from_reqwest("list employees");
        let employees: Vec<EmployeeRecord> = self
            .http
            .get(self.endpoint(EMPLOYEES_PATH))
            .send()
            .await
            .map_err(map_err())?
            .error_for_status()
            .map_err(map_err())?
            .json()
            .await
            .map_err(map_err())?;
        debug!(count = employees.len(), "fetched employees");
        Ok(employees)
    }

    async fn create_employees(
        &self,
        employees: &CreateEmployeesRequest,
    ) -> Result<Vec<EmployeeRecord>, ClientError> {
        let map_err = || ClientError::from_reqwest("create employees");
        let created: Vec<EmployeeRecord> = self
            .http
            .post(self.endpoint(CREATE_EMPLOYEES_PATH))
            .json(employees)
            .send()
            .await
            .map_err(map_err())?
            .error_for_status()
            .map_err(map_err())?
            .json()
            .await
            .map_err(map_err())?;
        debug!(count = created.len(), "created employees");
        Ok(created)
    }

    async fn update_employees(
        &self,
        employees: &UpdateEmployeesRequest,
    ) -> Result<(), ClientError> {
        let map_err = || ClientError::from_reqwest("update employees");
        self.http
            .put(self.endpoint(UPDATE_EMPLOYEES_PATH))
            .json(employees)
            .send()
            .await
            .map_err(map_err())?
            .error_for_status()
            .map_err(map_err())?;
        Ok(())
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), ClientError> {
        let map_err = || ClientError::from_reqwest("delete employee");
        self.http
            .delete(self.endpoint(&format!("{DELETE_EMPLOYEES_PATH}/{id}")))
            .send()
            .await
            .map_err(map_err())?
            .error_for_status()
            .map_err(map_err())?;
        Ok(())
    }

    async fn delete_employees(&self, ids: &[EmployeeId]) -> Result<(), ClientError> {
        let map_err = || ClientError::from_reqwest("delete employees");
        self.http
            .delete(self.endpoint(DELETE_EMPLOYEES_PATH))
            .query(&[("ids", join_ids(ids))])
            .send()
            .await
            .map_err(map_err())?
            .error_for_status()
            .map_err(map_err())?;
        Ok(())
    }
}
