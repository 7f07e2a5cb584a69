//! Parser configuration and appender settings loaded from TOML

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::TemplateError;
use crate::parser::{ParsedTemplate, TemplateParser};

/// Errors that can occur when loading appender configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// What to do with a quoted literal that is still open at end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnterminatedPolicy {
    /// Copy the rest of the template through unchanged, like a plain literal
    #[default]
    Verbatim,
    /// Turn it into a placeholder when it holds a `%`, else copy it through
    Pattern,
    /// Fail with [`TemplateError::UnterminatedLiteral`]
    Reject,
}

/// Configuration options for template parsing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Handling of an unterminated final literal
    pub unterminated: UnterminatedPolicy,
}

impl ParserConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unterminated literal policy
    pub fn with_unterminated(mut self, policy: UnterminatedPolicy) -> Self {
        self.unterminated = policy;
        self
    }
}

/// Settings of a database appender that writes log events with a SQL template
#[derive(Debug, Clone, PartialEq)]
pub struct AppenderConfig {
    /// The SQL template, e.g. `INSERT INTO LOGS (MSG) VALUES ('%m')`
    pub sql: String,
    /// Parser options
    pub parser: ParserConfig,
}

/// TOML structure for deserializing appender settings
#[derive(Deserialize)]
struct TomlConfig {
    appender: TomlAppender,
    #[serde(default)]
    parser: ParserConfig,
}

#[derive(Deserialize)]
struct TomlAppender {
    sql: String,
}

impl AppenderConfig {
    /// Create a configuration for a template with default parser options
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parser: ParserConfig::default(),
        }
    }

    /// Set the parser options
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Load appender settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading appender config");
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load appender settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        Ok(AppenderConfig {
            sql: parsed.appender.sql,
            parser: parsed.parser,
        })
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser
    }

    /// Parse the configured SQL template with the configured options
    pub fn parse_template(&self) -> Result<ParsedTemplate, TemplateError> {
        TemplateParser::new(self.parser.clone()).parse(&self.sql)
    }
}
