use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Placeholder phone-number id shipped with the relay until a real sender is provisioned.
pub const PLACEHOLDER_PHONE_NUMBER_ID: &str = "YOUR_PHONE_NUMBER_ID";

const DEFAULT_WHATSAPP_API_BASE: &str = "https://graph.facebook.com/v17.0";
const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub platform: PlatformConfig,
    pub whatsapp: WhatsAppConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let platform = PlatformConfig {
            url: required("SUPABASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
        };

        let whatsapp = WhatsAppConfig {
            api_token: required("WHATSAPP_API_TOKEN")?,
            phone_number_id: env::var("WHATSAPP_PHONE_NUMBER_ID")
                .unwrap_or_else(|_| PLACEHOLDER_PHONE_NUMBER_ID.to_string()),
            api_base: env::var("WHATSAPP_API_BASE")
                .unwrap_or_else(|_| DEFAULT_WHATSAPP_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            default_country_code: env::var("NOTIFY_DEFAULT_COUNTRY_CODE")
                .unwrap_or_else(|_| DEFAULT_COUNTRY_CODE.to_string()),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            platform,
            whatsapp,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Hosted auth/data platform endpoint and the service credential used server-side.
#[derive(Clone)]
pub struct PlatformConfig {
    pub url: String,
    pub service_role_key: String,
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

/// Messaging provider settings for the notification relay.
#[derive(Clone)]
pub struct WhatsAppConfig {
    pub api_token: String,
    pub phone_number_id: String,
    pub api_base: String,
    pub default_country_code: String,
}

impl WhatsAppConfig {
    /// Send-message endpoint for the configured sender.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_base, self.phone_number_id)
    }

    pub fn uses_placeholder_sender(&self) -> bool {
        self.phone_number_id == PLACEHOLDER_PHONE_NUMBER_ID
    }
}

impl fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("api_token", &"<redacted>")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_base", &self.api_base)
            .field("default_country_code", &self.default_country_code)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar(name) => write!(f, "{name} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::MissingVar(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
