//! Liveness probe.

use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing every collection store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    pub fn healthy(timestamp: NaiveDateTime) -> Self {
        Self {
            status: HealthStatus::Healthy,
            timestamp,
            error: None,
        }
    }

    pub fn unhealthy(timestamp: NaiveDateTime, error: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            timestamp,
            error: Some(error.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn serializes_like_the_probe_endpoint() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 6)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let healthy = serde_json::to_value(HealthReport::healthy(at)).unwrap();
        assert_eq!(healthy["status"], "healthy");
        assert_eq!(healthy["timestamp"], "2024-03-06T08:00:00");
        assert!(healthy.get("error").is_none());

        let sick = serde_json::to_value(HealthReport::unhealthy(at, "orders unreadable")).unwrap();
        assert_eq!(sick["status"], "unhealthy");
        assert_eq!(sick["error"], "orders unreadable");
    }
}
