use tracing::warn;

/// Runtime configuration, read once at startup from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,

    /// Deployment environment label reported by the health endpoint
    pub app_env: String,

    /// Base URL of the patient service
    pub patient_service_url: String,

    /// Base URL of the vitals service
    pub vitals_service_url: String,

    /// Allowed CORS origins; empty means allow any
    pub cors_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            app_env: "development".to_string(),
            patient_service_url: "http://localhost:3002".to_string(),
            vitals_service_url: "http://localhost:3003".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("PORT is not a valid port number, using {}", defaults.port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            port,
            app_env: std::env::var("APP_ENV").unwrap_or(defaults.app_env),
            patient_service_url: std::env::var("PATIENT_SERVICE_URL")
                .unwrap_or(defaults.patient_service_url),
            vitals_service_url: std::env::var("VITALS_SERVICE_URL")
                .unwrap_or(defaults.vitals_service_url),
            cors_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_env, "development");
        assert_eq!(config.patient_service_url, "http://localhost:3002");
        assert_eq!(config.vitals_service_url, "http://localhost:3003");
        assert!(config.cors_origins.is_empty());
    }
}
