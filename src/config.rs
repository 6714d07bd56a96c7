use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Demo rows inserted at startup when enabled.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "userdesk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "userdesk-users".into()),
            ttl_minutes: clamp_ttl_minutes(parse_or("JWT_TTL_MINUTES", 60)),
            refresh_ttl_minutes: clamp_ttl_minutes(parse_or("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14)),
        };

        let seed = SeedConfig {
            enabled: parse_or("SEED_DEMO_USERS", false),
            password: std::env::var("SEED_PASSWORD").ok().filter(|p| !p.is_empty()),
        };
        if seed.enabled && seed.password.is_none() {
            anyhow::bail!("SEED_PASSWORD must be set when SEED_DEMO_USERS is enabled");
        }

        Ok(Self {
            database_url,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("APP_PORT", 8080),
            jwt,
            seed,
        })
    }
}

/// One year.
const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

fn clamp_ttl_minutes(minutes: i64) -> i64 {
    minutes.clamp(1, MAX_TTL_MINUTES)
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    parse_value(std::env::var(key).ok().as_deref(), default)
}

fn parse_value<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_value::<u16>(None, 8080), 8080);
        assert_eq!(parse_value::<u16>(Some("not-a-port"), 8080), 8080);
        assert_eq!(parse_value::<u16>(Some(" 3000 "), 8080), 3000);
    }

    #[test]
    fn ttl_minutes_are_kept_in_range() {
        assert_eq!(clamp_ttl_minutes(60), 60);
        assert_eq!(clamp_ttl_minutes(0), 1);
        assert_eq!(clamp_ttl_minutes(-5), 1);
        assert_eq!(clamp_ttl_minutes(i64::MAX), MAX_TTL_MINUTES);
    }

    #[test]
    fn parse_value_reads_bools() {
        assert!(parse_value(Some("true"), false));
        assert!(!parse_value(Some("false"), true));
        assert!(!parse_value(Some("yes"), false));
    }
}
