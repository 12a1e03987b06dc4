//! Response DTOs for the cohort tools API
//!
//! Envelopes and message bodies returned by the handlers.

use serde::Serialize;

use crate::models::{Cohort, PopulatedStudent, Student};

/// Body of `GET /api/cohorts/:id` and `PUT /api/cohorts/:id`
#[derive(Debug, Clone, Serialize)]
pub struct CohortEnvelope {
    pub cohort: Cohort,
}

/// Body of `GET /api/students/:id`
#[derive(Debug, Clone, Serialize)]
pub struct StudentEnvelope {
    pub student: PopulatedStudent,
}

/// Body of `PUT /api/students/:id`
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: Student,
}

/// Plain confirmation message, used by the delete endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Creates a new MessageResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Name of the connected database
    pub database: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(database: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            database: database.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Machine readable error kind
    pub error: &'static str,
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CohortFields;
    use crate::store::ObjectId;

    #[test]
    fn test_cohort_envelope_serialize() {
        let envelope = CohortEnvelope {
            cohort: Cohort {
                id: ObjectId::new(),
                fields: CohortFields::named("Web Dev Jan"),
            },
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["cohort"]["cohortName"], "Web Dev Jan");
    }

    #[test]
    fn test_message_response_serialize() {
        let resp = MessageResponse::new("Cohort deleted");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"message":"Cohort deleted"}"#);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy("cohort-tools-api");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("cohort-tools-api"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("not_found", "Cohort not found");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Cohort not found"));
    }
}
