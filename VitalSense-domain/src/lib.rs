// VitalSense Domain
// This crate contains the analytical core for the VitalSense ML service:
// condition risk scoring, vitals trend analysis and anomaly detection.

// Services that implement the analytical logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;
