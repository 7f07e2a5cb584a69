//! Parser for SQL log templates

pub mod lexer;
mod template;

pub use template::{parse, ParsedTemplate, Segment, SegmentKind, TemplateParser, PLACEHOLDER};
