//! Backend test support utilities
//!
//! Shared by the backend's integration tests: idempotent logging setup and
//! RFC 7807 problem-details assertions that do not depend on backend types.

pub mod logging;
pub mod problem_details;
