use std::env;
use std::time::Duration;

const DEFAULT_COUNTRIES_API_URL: &str = "https://restcountries.com/v3.1/all?fields=name,cca2";
const DEFAULT_CITIES_API_URL: &str = "https://countriesnow.space/api/v0.1/countries/cities";
const DEFAULT_UNIVERSITIES_API_URL: &str = "http://universities.hipolabs.com/search";

/// Runtime configuration, read once at startup after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub cors_origins: Vec<String>,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub cache_ttl: Duration,
    pub countries_url: String,
    pub cities_url: String,
    pub universities_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let port = parse_var("PORT", 4000u16)?;
        let expiry_days = parse_var("JWT_EXPIRY_DAYS", 7i64)?;
        let ttl_secs = parse_var("DIRECTORY_CACHE_TTL_SECS", 3600u64)?;
        let bcrypt_cost = parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            database_url: required_var("DATABASE_URL")?,
            auth: AuthConfig {
                jwt_secret: required_var("JWT_SECRET")?,
                jwt_expiry_days: expiry_days,
                bcrypt_cost,
            },
            cors_origins,
            directory: DirectoryConfig {
                cache_ttl: Duration::from_secs(ttl_secs),
                countries_url: env::var("COUNTRIES_API_URL")
                    .unwrap_or_else(|_| DEFAULT_COUNTRIES_API_URL.to_string()),
                cities_url: env::var("CITIES_API_URL")
                    .unwrap_or_else(|_| DEFAULT_CITIES_API_URL.to_string()),
                universities_url: env::var("UNIVERSITIES_API_URL")
                    .unwrap_or_else(|_| DEFAULT_UNIVERSITIES_API_URL.to_string()),
            },
        })
    }
}

fn required_var(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{} must be set", key))
}

fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: u16 = parse_var("EDUBRIDGE_TEST_UNSET_PORT", 4000).unwrap();
        assert_eq!(value, 4000);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("EDUBRIDGE_TEST_BAD_TTL", "soon");
        let value: Result<u64, _> = parse_var("EDUBRIDGE_TEST_BAD_TTL", 3600);
        assert!(value.is_err());
    }

    #[test]
    fn test_required_var_missing() {
        let err = required_var("EDUBRIDGE_TEST_MISSING_SECRET").unwrap_err();
        assert!(err.contains("must be set"));
    }
}
