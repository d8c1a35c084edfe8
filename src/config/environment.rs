//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Context, Result};
use std::env;

/// Expiración por defecto del token: 7 días
pub const DEFAULT_JWT_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub public_api_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub storage_url: Option<String>,
    pub storage_service_key: Option<String>,
}

impl EnvironmentConfig {
    /// Leer la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        let jwt_expiration = match env::var("JWT_EXPIRY") {
            Ok(raw) => parse_expiry(&raw)
                .ok_or_else(|| anyhow!("JWT_EXPIRY '{}' is not a valid duration", raw))?,
            Err(_) => DEFAULT_JWT_EXPIRY_SECS,
        };

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let public_api_url = env::var("NEXT_PUBLIC_API_URL").ok().filter(|s| !s.is_empty());

        let mut cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(url) = &public_api_url {
            if !cors_origins.contains(url) {
                cors_origins.push(url.clone());
            }
        }

        Ok(Self {
            environment: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),
            port,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration,
            public_api_url,
            cors_origins,
            storage_url: env::var("STORAGE_URL").ok().filter(|s| !s.is_empty()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Interpreta duraciones como `7d`, `12h`, `30m`, `45s` o segundos sin sufijo
pub fn parse_expiry(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last()? {
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'm' => (&raw[..raw.len() - 1], 60),
        's' => (&raw[..raw.len() - 1], 1),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value: u64 = digits.trim().parse().ok()?;
    if value == 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expiry_units() {
        assert_eq!(parse_expiry("7d"), Some(DEFAULT_JWT_EXPIRY_SECS));
        assert_eq!(parse_expiry("12h"), Some(12 * 3600));
        assert_eq!(parse_expiry("30m"), Some(1800));
        assert_eq!(parse_expiry("45s"), Some(45));
        assert_eq!(parse_expiry("3600"), Some(3600));
    }

    #[test]
    fn test_parse_expiry_rejects_garbage() {
        assert_eq!(parse_expiry(""), None);
        assert_eq!(parse_expiry("0d"), None);
        assert_eq!(parse_expiry("7w"), None);
        assert_eq!(parse_expiry("d"), None);
        assert_eq!(parse_expiry("-5h"), None);
    }
}
