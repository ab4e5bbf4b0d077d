//! Calculation service adapter
//!
//! Integration with the external calculation service over its fixed HTTP
//! contract: request assembly ([`request`]), the bounded network call
//! ([`client`]), and the response models ([`models`]). The service itself is
//! opaque; this adapter only shapes what goes over the wire and classifies
//! what comes back.

pub mod client;
pub mod models;
pub mod request;

pub use client::CalculationClient;
pub use models::CalculationOutcome;
pub use request::{build_request, BuiltRequest, CalculationRequest};
