//! # Sassmeter API
//!
//! HTTP front end for the quiz. Each session lives in memory; narrative
//! requests run in the background and land on the session when they finish.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/questions` - Question registry
//! - `POST /api/v1/sessions` - Create new session
//! - `GET /api/v1/sessions/{id}` - Session view
//! - `DELETE /api/v1/sessions/{id}` - Drop a session
//! - `POST /api/v1/sessions/{id}/start` - Leave the welcome screen
//! - `POST /api/v1/sessions/{id}/answer` - Commit an answer
//! - `POST /api/v1/sessions/{id}/rating` - Rate the last reaction
//! - `POST /api/v1/sessions/{id}/continue` - Next question or final report
//! - `POST /api/v1/sessions/{id}/restart` - Back to the welcome screen

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use config::*;
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use server::*;
pub use state::*;
