//! Binding pattern values to a parsed statement
//!
//! Rendering a pattern against a log event is left to a [`PatternLayout`];
//! this module only pairs each rendered value with its placeholder.

use crate::parser::ParsedTemplate;

/// Renders a pattern expression such as `%d [%t] %m` against an event
pub trait PatternLayout<E: ?Sized> {
    fn format(&self, pattern: &str, event: &E) -> String;
}

impl<E: ?Sized, F> PatternLayout<E> for F
where
    F: Fn(&str, &E) -> String,
{
    fn format(&self, pattern: &str, event: &E) -> String {
        self(pattern, event)
    }
}

/// A parameterized statement with one rendered value per placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement<'a> {
    pub sql: &'a str,
    pub values: Vec<String>,
}

impl BoundStatement<'_> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values paired with their 1-based parameter index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (i + 1, value.as_str()))
    }
}

impl ParsedTemplate {
    /// Render every pattern against `event` in placeholder order
    pub fn bind<E, L>(&self, layout: &L, event: &E) -> BoundStatement<'_>
    where
        E: ?Sized,
        L: PatternLayout<E>,
    {
        BoundStatement {
            sql: self.parameterized_sql(),
            values: self
                .patterns()
                .iter()
                .map(|pattern| layout.format(pattern, event))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    struct Event {
        level: &'static str,
        message: &'static str,
    }

    /// Understands just enough of the pattern syntax for these tests
    struct TinyLayout;

    impl PatternLayout<Event> for TinyLayout {
        fn format(&self, pattern: &str, event: &Event) -> String {
            pattern
                .replace("%p", event.level)
                .replace("%m", event.message)
        }
    }

    #[test]
    fn test_bind_in_placeholder_order() {
        let parsed = parse("INSERT INTO LOGS (LVL, MSG) VALUES ('%p', 'it''s %m')");
        let event = Event {
            level: "WARN",
            message: "disk full",
        };
        let bound = parsed.bind(&TinyLayout, &event);
        assert_eq!(bound.sql, "INSERT INTO LOGS (LVL, MSG) VALUES (?, ?)");
        assert_eq!(bound.values, vec!["WARN", "it's disk full"]);
        assert_eq!(
            bound.iter().collect::<Vec<_>>(),
            vec![(1, "WARN"), (2, "it's disk full")]
        );
    }

    #[test]
    fn test_bind_with_closure() {
        let parsed = parse("VALUES ('%m', 'const')");
        let bound = parsed.bind(&|pattern: &str, event: &str| format!("{pattern}={event}"), "x");
        assert_eq!(bound.values, vec!["%m=x"]);
        assert_eq!(bound.len(), 1);
    }

    #[test]
    fn test_bind_without_patterns() {
        let parsed = parse("VALUES ('a', 'b')");
        let bound = parsed.bind(&TinyLayout, &Event { level: "", message: "" });
        assert!(bound.is_empty());
        assert_eq!(bound.sql, "VALUES ('a', 'b')");
    }
}
