//! Single-pass scan that turns a SQL template into a parameterized statement
//!
//! Quoted literals whose content holds a `%` are log patterns: each one is
//! replaced by a `?` placeholder and its escape-resolved content is recorded
//! in placeholder order. Every other character, including plain literals and
//! their quotes, is copied through exactly as written.

use crate::config::{ParserConfig, UnterminatedPolicy};
use crate::error::TemplateError;
use crate::parser::lexer::{lex, Span, Token};

/// Prepared-statement placeholder emitted for each pattern literal
pub const PLACEHOLDER: char = '?';

/// Marker that makes a literal a pattern rather than a constant
const PATTERN_MARKER: char = '%';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// No `%`; copied through with its quotes
    Plain,
    /// Holds a `%`; replaced by a placeholder
    Pattern,
}

impl SegmentKind {
    /// Classify a literal by its escape-resolved content
    pub fn classify(content: &str) -> Self {
        if content.contains(PATTERN_MARKER) {
            SegmentKind::Pattern
        } else {
            SegmentKind::Plain
        }
    }
}

/// A single-quoted literal found in the template
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Byte range in the template, quotes included
    pub span: Span,
    /// Content with doubled quotes collapsed
    pub content: String,
    /// False for a literal still open at end of input
    pub terminated: bool,
}

/// Result of parsing a SQL template
///
/// Built once from a template and read-only afterwards. The i-th `?` in
/// [`parameterized_sql`](Self::parameterized_sql) corresponds to
/// `patterns()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTemplate {
    parameterized_sql: String,
    patterns: Vec<String>,
    segments: Vec<Segment>,
    unterminated: Option<Span>,
}

impl ParsedTemplate {
    /// Parse a template, copying an unterminated final literal through as written
    pub fn new(template: &str) -> Self {
        scan(template, UnterminatedPolicy::Verbatim)
    }

    /// The template with every pattern literal replaced by `?`
    pub fn parameterized_sql(&self) -> &str {
        &self.parameterized_sql
    }

    /// Pattern expressions in placeholder order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn placeholder_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the statement has anything to bind
    pub fn is_parameterized(&self) -> bool {
        !self.patterns.is_empty()
    }

    /// All quoted literals in the template, plain and pattern, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Span of a literal left open at end of input, if any
    pub fn unterminated_literal(&self) -> Option<&Span> {
        self.unterminated.as_ref()
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.parameterized_sql, self.patterns)
    }
}

/// Template parser with configurable handling of malformed quoting
#[derive(Debug, Clone, Default)]
pub struct TemplateParser {
    config: ParserConfig,
}

impl TemplateParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a template according to the configured policy
    ///
    /// Only [`UnterminatedPolicy::Reject`] can make this fail.
    pub fn parse(&self, template: &str) -> Result<ParsedTemplate, TemplateError> {
        let parsed = scan(template, self.config.unterminated);

        if self.config.unterminated == UnterminatedPolicy::Reject {
            if let Some(segment) = parsed.segments.iter().find(|s| !s.terminated) {
                return Err(TemplateError::UnterminatedLiteral {
                    span: segment.span.clone(),
                    content: segment.content.clone(),
                });
            }
        }

        Ok(parsed)
    }
}

/// Parse a SQL template with default options
///
/// Never fails: an unterminated final literal is copied through unchanged.
///
/// # Example
///
/// ```rust
/// use sql_log_pattern::parse;
///
/// let parsed = parse("INSERT INTO LOGS (LVL, MSG) VALUES ('%p', 'msg: %m')");
/// assert_eq!(parsed.parameterized_sql(), "INSERT INTO LOGS (LVL, MSG) VALUES (?, ?)");
/// assert_eq!(parsed.patterns(), ["%p", "msg: %m"]);
/// ```
pub fn parse(template: &str) -> ParsedTemplate {
    ParsedTemplate::new(template)
}

fn scan(input: &str, policy: UnterminatedPolicy) -> ParsedTemplate {
    let mut sql = String::with_capacity(input.len());
    let mut patterns = Vec::new();
    let mut segments = Vec::new();
    let mut unterminated = None;

    for (token, span) in lex(input) {
        let raw = &input[span.clone()];
        let (content, terminated) = match token {
            Token::Text => {
                sql.push_str(raw);
                continue;
            }
            Token::Literal(content) => (content, true),
            Token::Unterminated(content) => {
                tracing::warn!(
                    start = span.start,
                    ?policy,
                    "SQL template ends inside a string literal"
                );
                unterminated = Some(span.clone());
                (content, false)
            }
        };

        let kind = match SegmentKind::classify(&content) {
            SegmentKind::Pattern if terminated || policy == UnterminatedPolicy::Pattern => {
                SegmentKind::Pattern
            }
            _ => SegmentKind::Plain,
        };

        match kind {
            SegmentKind::Pattern => {
                sql.push(PLACEHOLDER);
                patterns.push(content.clone());
            }
            SegmentKind::Plain => sql.push_str(raw),
        }

        segments.push(Segment {
            kind,
            span,
            content,
            terminated,
        });
    }

    tracing::debug!(
        segments = segments.len(),
        placeholders = patterns.len(),
        "parsed SQL template"
    );

    ParsedTemplate {
        parameterized_sql: sql,
        patterns,
        segments,
        unterminated,
    }
}
