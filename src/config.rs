//! Server configuration module

use clap::{Args, Parser};

use crate::products::models::{ContentPolicy, DiscountPolicy};

/// Catalog API Server configuration
#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Product catalog JSON API server", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: ListenConfig,

    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(flatten)]
    pub catalog: CatalogConfig,
}

/// Listener settings.
#[derive(Debug, Args)]
pub struct ListenConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Where missing product content comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ContentDefault {
    /// Copy the title.
    Title,

    /// Use `--content-placeholder`.
    Placeholder,
}

/// Product behaviour settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Default for missing or empty product content (title, placeholder)
    #[arg(long, env = "CONTENT_DEFAULT", value_enum, default_value_t = ContentDefault::Title)]
    pub content_default: ContentDefault,

    /// Text used when `--content-default placeholder` is selected
    #[arg(long, env = "CONTENT_PLACEHOLDER", default_value = "No description provided.")]
    pub content_placeholder: String,

    /// Meaning of `my_discount` in product responses (sale-price, percentage)
    #[arg(long, env = "DISCOUNT_POLICY", value_enum, default_value_t = DiscountPolicy::SalePrice)]
    pub discount_policy: DiscountPolicy,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl CatalogConfig {
    #[must_use]
    pub fn content_policy(&self) -> ContentPolicy {
        match self.content_default {
            ContentDefault::Title => ContentPolicy::Title,
            ContentDefault::Placeholder => ContentPolicy::Placeholder(self.content_placeholder.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "catalog",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--log-format",
            "json",
            "--content-default",
            "placeholder",
            "--content-placeholder",
            "TBD",
            "--discount-policy",
            "percentage",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.catalog.content_policy(), ContentPolicy::Placeholder("TBD".to_owned()));
        assert_eq!(config.catalog.discount_policy, DiscountPolicy::Percentage);

        Ok(())
    }

    #[test]
    fn title_policy_ignores_placeholder_text() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "catalog",
            "--content-default",
            "title",
            "--content-placeholder",
            "unused",
        ])?;

        assert_eq!(config.catalog.content_policy(), ContentPolicy::Title);

        Ok(())
    }

    #[test]
    fn unknown_discount_policy_is_rejected() {
        let result = ServerConfig::try_parse_from(["catalog", "--discount-policy", "half-off"]);

        assert!(result.is_err(), "expected an invalid value error");
    }
}
