//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for rosters, clock events,
//! student attendance, and the payroll approval workflow.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActorQuery, ApproveRequest, ClockRequest, ManualEntryRequest, NotifyAdminRequest,
    StudentCheckRequest,
};
pub use response::{ApiError, ApproveResponse, ClockResponse, NotifyResponse};
pub use state::AppState;
