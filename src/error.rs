//! Error types for template parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

pub use crate::parser::lexer::Span;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// A quoted literal that runs to the end of the template
    #[error("unterminated string literal at {span:?}")]
    UnterminatedLiteral { span: Span, content: String },
}

impl TemplateError {
    /// Byte range of the offending text
    pub fn span(&self) -> &Span {
        match self {
            TemplateError::UnterminatedLiteral { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            TemplateError::UnterminatedLiteral { span, content } => {
                let note = if content.contains('%') {
                    "literal contains a pattern but has no closing quote"
                } else {
                    "literal has no closing quote"
                };

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message("Unterminated string literal")
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(note)
                            .with_color(Color::Red),
                    )
                    .with_help("close the literal with ' or double embedded quotes as ''")
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);
                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}
