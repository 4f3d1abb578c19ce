use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub validity_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        // HS256 needs a key of at least the digest size
        if secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 bytes for HMAC-SHA256");
        }
        let validity_ms = std::env::var("JWT_VALIDITY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3_600_000);
        Ok(Self {
            database_url,
            jwt: JwtConfig {
                secret,
                validity_ms,
            },
        })
    }
}
