//! SQL Log Pattern CLI
//!
//! Usage:
//!   sql-log-pattern [OPTIONS] [FILE]
//!
//! Options:
//!   --sql <SQL>                  Template given inline
//!   -c, --config <FILE>          Appender config file (TOML format)
//!   --unterminated <POLICY>      verbatim, pattern or reject
//!   -f, --format <FORMAT>        text or toml
//!   --explain                    Label pattern literals in the template
//!   -v, --verbose                More log output (repeatable)
//!   -h, --help                   Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sql_log_pattern::{report, AppenderConfig, TemplateParser, UnterminatedPolicy};

#[derive(Parser)]
#[command(name = "sql-log-pattern")]
#[command(about = "Split a SQL log template into a prepared statement and its patterns")]
struct Cli {
    /// Template file (reads from stdin if no template is given otherwise)
    input: Option<PathBuf>,

    /// Template given inline
    #[arg(long, conflicts_with = "input")]
    sql: Option<String>,

    /// Appender config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handling of a literal left open at end of input
    #[arg(long, value_enum)]
    unterminated: Option<PolicyArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Label every pattern literal in the template on stderr
    #[arg(long)]
    explain: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    Verbatim,
    Pattern,
    Reject,
}

impl From<PolicyArg> for UnterminatedPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Verbatim => UnterminatedPolicy::Verbatim,
            PolicyArg::Pattern => UnterminatedPolicy::Pattern,
            PolicyArg::Reject => UnterminatedPolicy::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load config
    let config = match &cli.config {
        Some(path) => match AppenderConfig::from_file(path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let mut parser_config = config
        .as_ref()
        .map(|c| c.parser_config().clone())
        .unwrap_or_default();
    if let Some(policy) = cli.unterminated {
        parser_config = parser_config.with_unterminated(policy.into());
    }

    // Read template
    let (source, filename) = match (&cli.sql, &cli.input, &config) {
        (Some(sql), _, _) => (sql.clone(), "<sql>".to_string()),
        (None, Some(path), _) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        (None, None, Some(config)) => (config.sql.clone(), "appender.sql".to_string()),
        (None, None, None) => {
            if io::stdin().is_terminal() {
                eprintln!("Error: no template given (pass FILE, --sql, --config or pipe stdin)");
                std::process::exit(2);
            }
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let parsed = match TemplateParser::new(parser_config).parse(&source) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    if cli.explain {
        eprintln!("{}", report::explain(&parsed, &source, &filename));
    }

    match cli.format {
        Format::Text => print!("{}", report::to_text(&parsed)),
        Format::Toml => match report::to_toml(&parsed) {
            Ok(output) => print!("{}", output),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
