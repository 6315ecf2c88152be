//! HTTP clients for the sibling services VitalSense reads from.
//!
//! The prediction endpoints can be fed inline data or a `patientId`; in the
//! latter case the api layer resolves the patient profile and vitals history
//! through the traits defined here. `HttpServiceClient` is the production
//! implementation; the `mock` feature provides canned in-memory clients for
//! tests and local development.

pub mod clients;
pub mod errors;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use clients::{HttpServiceClient, PatientClient, VitalsClient};
pub use errors::ClientError;
