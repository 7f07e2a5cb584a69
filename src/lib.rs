//! SQL Log Pattern - parameterize SQL templates for database log appenders
//!
//! A database appender is configured with an `INSERT` template whose quoted
//! literals mix constant SQL strings with log formatting patterns. This crate
//! splits such a template into a prepared-statement string, where every
//! pattern literal is replaced by `?`, and the list of pattern expressions to
//! render and bind for each log event.
//!
//! # Example
//!
//! ```rust
//! use sql_log_pattern::parse;
//!
//! let parsed = parse("INSERT INTO LOGS (APP, MSG) VALUES ('web', '%d %-5p %m')");
//! assert_eq!(parsed.parameterized_sql(), "INSERT INTO LOGS (APP, MSG) VALUES ('web', ?)");
//! assert_eq!(parsed.patterns(), ["%d %-5p %m"]);
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod parser;
pub mod report;

pub use binding::{BoundStatement, PatternLayout};
pub use config::{AppenderConfig, ConfigError, ParserConfig, UnterminatedPolicy};
pub use error::TemplateError;
pub use parser::{parse, ParsedTemplate, Segment, SegmentKind, TemplateParser, PLACEHOLDER};
