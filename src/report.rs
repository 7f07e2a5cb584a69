//! Human-readable output for parsed templates

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Serialize;

use crate::parser::{ParsedTemplate, SegmentKind};

#[derive(Serialize)]
struct TomlSummary<'a> {
    parameterized_sql: &'a str,
    patterns: &'a [String],
}

/// Serialize the statement and its patterns as TOML
pub fn to_toml(parsed: &ParsedTemplate) -> Result<String, toml::ser::Error> {
    toml::to_string(&TomlSummary {
        parameterized_sql: parsed.parameterized_sql(),
        patterns: parsed.patterns(),
    })
}

/// Statement on the first line, then `N: pattern` per placeholder
pub fn to_text(parsed: &ParsedTemplate) -> String {
    let mut out = format!("{}\n", parsed.parameterized_sql());
    for (i, pattern) in parsed.patterns().iter().enumerate() {
        out.push_str(&format!("{}: {}\n", i + 1, pattern));
    }
    out
}

/// Ariadne report labelling every pattern literal with its placeholder index
pub fn explain(parsed: &ParsedTemplate, source: &str, filename: &str) -> String {
    let mut report = Report::build(ReportKind::Advice, filename, 0).with_message(format!(
        "{} placeholder(s) in template",
        parsed.placeholder_count()
    ));

    let patterns = parsed
        .segments()
        .iter()
        .filter(|s| s.kind == SegmentKind::Pattern);
    for (i, segment) in patterns.enumerate() {
        report = report.with_label(
            Label::new((filename, segment.span.clone()))
                .with_message(format!("placeholder {}", i + 1))
                .with_color(Color::Cyan),
        );
    }

    let mut buf = Vec::new();
    match report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
    {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => format!("Error writing report: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_to_toml() {
        let parsed = parse("VALUES ('%d', 'x', '%m')");
        let toml = to_toml(&parsed).unwrap();
        insta::assert_snapshot!(toml, @r###"
        parameterized_sql = "VALUES (?, 'x', ?)"
        patterns = ["%d", "%m"]
        "###);
    }

    #[test]
    fn test_to_toml_reads_back() {
        #[derive(serde::Deserialize)]
        struct Summary {
            parameterized_sql: String,
            patterns: Vec<String>,
        }

        let parsed = parse("VALUES ('it''s %m', \"quoted\")");
        let summary: Summary = toml::from_str(&to_toml(&parsed).unwrap()).unwrap();
        assert_eq!(summary.parameterized_sql, "VALUES (?, \"quoted\")");
        assert_eq!(summary.patterns, vec!["it's %m"]);
    }

    #[test]
    fn test_to_text() {
        let parsed = parse("VALUES ('%d', '%m')");
        assert_eq!(to_text(&parsed), "VALUES (?, ?)\n1: %d\n2: %m\n");
    }

    #[test]
    fn test_to_text_without_patterns() {
        assert_eq!(to_text(&parse("SELECT 1")), "SELECT 1\n");
    }

    #[test]
    fn test_explain_labels_placeholders() {
        let source = "VALUES ('%d', 'x', '%m')";
        let report = explain(&parse(source), source, "appender.sql");
        assert!(report.contains("2 placeholder(s) in template"));
        assert!(report.contains("placeholder 1"));
        assert!(report.contains("placeholder 2"));
        assert!(!report.contains("placeholder 3"));
    }
}
