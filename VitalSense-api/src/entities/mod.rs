// Public entities for the VitalSense API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Model registry entities
pub mod models;

// Risk prediction request/response schemas
pub mod predictions;

// Vitals trend and anomaly schemas
pub mod vitals;
