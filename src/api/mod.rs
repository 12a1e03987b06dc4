//! API Module
//!
//! HTTP handlers and routing for the cohort tools REST API.
//!
//! # Endpoints
//! - `GET /api/cohorts` - List cohorts
//! - `GET /api/cohorts/:id` - Get one cohort
//! - `POST /api/cohorts` - Create a cohort
//! - `PUT /api/cohorts/:id` - Update a cohort
//! - `DELETE /api/cohorts/:id` - Delete a cohort
//! - `GET /api/students` - List students, cohorts populated
//! - `GET /api/students/:id` - Get one student, cohort populated
//! - `GET /api/students/cohort/:cohortId` - Students of a cohort
//! - `POST /api/students` - Create a student
//! - `PUT /api/students/:id` - Update a student
//! - `DELETE /api/students/:id` - Delete a student
//! - `GET /health` - Health check endpoint

pub mod cohorts;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod students;

pub use handlers::{health_handler, AppState};
pub use routes::{create_app, create_router};
