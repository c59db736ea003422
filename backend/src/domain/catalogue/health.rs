//! Dependency health records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Service name reported for the catalogue process itself.
pub const CATALOGUE_SERVICE: &str = "catalogue";
/// Service name reported for the storage collaborator.
pub const CATALOGUE_STORE_SERVICE: &str = "catalogue-db";

/// Health of one checked component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "err")]
    Err,
}

impl HealthStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Err => "err",
        }
    }
}

/// One health observation, produced fresh for every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthRecord {
    service: String,
    status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    time: DateTime<Utc>,
}

impl HealthRecord {
    /// Healthy record for `service` observed at `time`.
    pub fn ok(service: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            status: HealthStatus::Ok,
            detail: None,
            time,
        }
    }

    /// Degraded record for `service` carrying the failure as detail.
    pub fn err(service: impl Into<String>, detail: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            service: service.into(),
            status: HealthStatus::Err,
            detail: Some(detail.into()),
            time,
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }
    pub fn status(&self) -> HealthStatus {
        self.status
    }
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }
}
