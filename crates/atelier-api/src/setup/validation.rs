//! Configuration validation
//!
//! Checks run at startup, before anything connects.

use anyhow::Result;
use atelier_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via CORS_ORIGINS."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.email_mx_check_enabled() && config.email_mx_timeout_ms() > 10_000 {
        tracing::warn!(
            timeout_ms = config.email_mx_timeout_ms(),
            "EMAIL_MX_TIMEOUT_MS is high - slow DNS will stall the contact form"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::ServerConfig;

    fn server_config() -> ServerConfig {
        ServerConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgresql://localhost/atelier".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn accepts_defaults() {
        let config = Config(Box::new(server_config()));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_zero_pool_size() {
        let mut server = server_config();
        server.db_max_connections = 0;
        assert!(validate_config(&Config(Box::new(server))).is_err());
    }

    #[test]
    fn rejects_wildcard_cors_in_production() {
        let mut server = server_config();
        server.environment = "production".to_string();
        server.cors_origins = vec!["*".to_string()];
        assert!(validate_config(&Config(Box::new(server))).is_err());
    }
}
