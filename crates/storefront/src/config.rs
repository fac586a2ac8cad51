//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `RAZORPAY_KEY_ID` - Payment gateway key id (sent to the checkout widget)
//! - `RAZORPAY_KEY_SECRET` - Payment gateway secret (HMAC key, high entropy)
//! - `TWILIO_ACCOUNT_SID` - SMS provider account SID
//! - `TWILIO_AUTH_TOKEN` - SMS provider auth token (high entropy)
//! - `TWILIO_PHONE_NUMBER` - Sender phone number
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory for the registered user file (default: data)
//! - `CATALOG_SEED` - Seed for the generated catalog (default: 2009)
//! - `RAZORPAY_API_URL` - Gateway base URL (default: <https://api.razorpay.com/v1>)
//! - `TWILIO_API_URL` - SMS base URL (default: <https://api.twilio.com/2010-04-01>)
//! - `BUSINESS_NAME` - Name shown in the checkout widget (default: Nurvi Jewel)
//! - `WEBSITE_URL` - Public site linked from SMS messages (default: <https://nurvijewel.com>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

pub const DEFAULT_CATALOG_SEED: u64 = 2009;
pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Directory holding `nurvi-users.json`
    pub data_dir: PathBuf,
    /// Seed for the generated product catalog
    pub catalog_seed: u64,
    pub razorpay: RazorpayConfig,
    pub twilio: TwilioConfig,
    pub business: BusinessConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

/// Payment gateway credentials.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id, safe to hand to the browser widget
    pub key_id: String,
    /// Basic-auth password and signature key
    pub key_secret: SecretString,
    pub api_url: String,
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// SMS provider credentials.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    /// Sender number in E.164 form
    pub phone_number: String,
    pub api_url: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("phone_number", &self.phone_number)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Branding used in the checkout widget and customer messages.
#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub name: String,
    pub website_url: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Nurvi Jewel".to_string(),
            website_url: "https://nurvijewel.com".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_required_env("STOREFRONT_BASE_URL")?;
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", "data"));
        let catalog_seed = parse_env("CATALOG_SEED", &DEFAULT_CATALOG_SEED.to_string())?;

        let razorpay = RazorpayConfig::from_env()?;
        let twilio = TwilioConfig::from_env()?;
        let defaults = BusinessConfig::default();
        let business = BusinessConfig {
            name: get_env_or_default("BUSINESS_NAME", &defaults.name),
            website_url: get_env_or_default("WEBSITE_URL", &defaults.website_url),
        };

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            catalog_seed,
            razorpay,
            twilio,
            business,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Session cookies are marked `Secure` when served over https.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Path of the registered user file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("nurvi-users.json")
    }
}

impl RazorpayConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            key_id: get_required_env("RAZORPAY_KEY_ID")?,
            key_secret: get_validated_secret("RAZORPAY_KEY_SECRET")?,
            api_url: get_env_or_default("RAZORPAY_API_URL", DEFAULT_RAZORPAY_API_URL),
        })
    }
}

impl TwilioConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            account_sid: get_required_env("TWILIO_ACCOUNT_SID")?,
            auth_token: get_validated_secret("TWILIO_AUTH_TOKEN")?,
            phone_number: get_required_env("TWILIO_PHONE_NUMBER")?,
            api_url: get_env_or_default("TWILIO_API_URL", DEFAULT_TWILIO_API_URL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default string.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the credential issued by the provider."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            data_dir: PathBuf::from("data"),
            catalog_seed: DEFAULT_CATALOG_SEED,
            razorpay: RazorpayConfig {
                key_id: "rzp_test_key".to_string(),
                key_secret: SecretString::from("rzp_super_private_value"),
                api_url: DEFAULT_RAZORPAY_API_URL.to_string(),
            },
            twilio: TwilioConfig {
                account_sid: "AC123".to_string(),
                auth_token: SecretString::from("twilio_super_private_value"),
                phone_number: "+15005550006".to_string(),
                api_url: DEFAULT_TWILIO_API_URL.to_string(),
            },
            business: BusinessConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_vendor_placeholder_secret_rejected() {
        let result = validate_secret_strength("YOUR_KEY_SECRET", "RAZORPAY_KEY_SECRET");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));

        let result = validate_secret_strength("your_auth_token", "TWILIO_AUTH_TOKEN");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr_and_paths() {
        let config = sample_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert_eq!(config.users_path(), PathBuf::from("data/nurvi-users.json"));
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_config_debug_redacts_secrets() {
        let config = sample_config();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("rzp_test_key"));
        assert!(debug_output.contains("AC123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("rzp_super_private_value"));
        assert!(!debug_output.contains("twilio_super_private_value"));
    }
}
