//! Public API layer for the VitalSense ML service.
//!
//! Exposes the domain crate's risk scoring and vitals analytics over HTTP:
//! prediction endpoints under `/api/v1/predictions`, anomaly detection under
//! `/api/v1/anomalies`, the static model registry under `/api/v1/models`, and
//! health probes at `/health`.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
