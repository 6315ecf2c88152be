//! Domain layer health check functionality.
//!
//! The analytical core is pure and stateless, so component health reduces
//! to whether the condition models are constructed and registered. The api
//! layer maps this onto its health endpoints.

use std::collections::HashMap;

use crate::services::scorers::{
    CardiovascularModel, CerebrovascularModel, MetabolicModel, RiskModel,
};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Get overall system health.
///
/// One component per condition model plus the vitals analyzer. Models are
/// value types constructed at startup; a registered model is a healthy one.
pub fn get_system_health() -> SystemHealth {
    let mut components = HashMap::new();

    for name in [
        CardiovascularModel.name(),
        MetabolicModel.name(),
        CerebrovascularModel.name(),
    ] {
        components.insert(
            format!("model:{}", name),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );
    }

    components.insert(
        "analyzer".to_string(),
        HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
    );

    let status = if components
        .values()
        .any(|c| c.status == ComponentStatus::Unhealthy)
    {
        SystemStatus::Unhealthy
    } else if components
        .values()
        .any(|c| c.status == ComponentStatus::Degraded)
    {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth { status, components }
}
