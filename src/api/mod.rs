//! HTTP API module for the shift engine.
//!
//! This module provides the REST endpoints behind the quick-assign panel
//! (suggestions, live validation, break advice) and the weekly compliance
//! report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BreakAdviceRequest, CandidateRequest, ComplianceRequest, IntervalRequest, SuggestionsRequest,
    ValidateRequest,
};
pub use response::ApiError;
pub use state::AppState;
