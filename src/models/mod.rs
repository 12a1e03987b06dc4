//! Entity and DTO models for the cohort tools API
//!
//! Typed cohort and student records, their create payloads and partial
//! updates, field validation, and the response bodies.

pub mod cohort;
pub mod nullable;
pub mod responses;
pub mod student;
pub mod validation;

// Re-export commonly used types
pub use cohort::{Campus, Cohort, CohortFields, CohortPatch, Format, Program};
pub use nullable::Nullable;
pub use responses::{
    CohortEnvelope, ErrorResponse, HealthResponse, MessageResponse, StudentEnvelope, UserEnvelope,
};
pub use student::{Language, PopulatedStudent, Student, StudentFields, StudentPatch};
pub use validation::ValidationError;
