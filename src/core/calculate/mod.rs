//! Calculation orchestration
//!
//! - [`coordinator`] - convert → build → call → reconcile workflow
//! - [`reconcile`] - response parsing and failed-patient merging

pub mod coordinator;
pub mod reconcile;

pub use coordinator::CalculationCoordinator;
pub use reconcile::reconcile;
