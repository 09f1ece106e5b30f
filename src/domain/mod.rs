//! Backend data model, session state and navigation rules.

pub mod entities;
pub mod guard;
pub mod session;

pub use entities::{
    ApiResponse, AuthUser, BatchInfo, LoginResponse, ModelYear, TaxCalculatorPayload,
    TaxCalculatorResponse, VehicleValuation,
};
pub use guard::{GuardDecision, RouteGuard};
pub use session::Session;
