//! Message templates.
//!
//! `FormattedState` is the usual state for structured logging: a template
//! with named `{Name}` holes plus positional values. It renders to text and
//! exposes each binding as a state entry keyed by the hole name.

use std::fmt;

use super::structured::{LogState, StateEntry, StateValue};

/// Key of the trailing entry that carries the raw template.
pub const ORIGINAL_FORMAT_KEY: &str = "{OriginalFormat}";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Hole { name: String, raw: String },
}

fn parse_template(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }
                if !closed {
                    // Unterminated hole: keep the text as written.
                    literal.push('{');
                    literal.push_str(&body);
                    break;
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let name = body
                    .split(|c: char| c == ',' || c == ':')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                segments.push(Segment::Hole {
                    name,
                    raw: format!("{{{}}}", body),
                });
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// A template plus its bound values.
///
/// ```
/// use scoped_test_log::logging::{FormattedState, LogState, StateValue};
///
/// let state = FormattedState::new("Order {OrderId} for {@Customer}", vec![
///     StateValue::from(17),
///     StateValue::from("ada"),
/// ]);
/// assert_eq!(state.to_string(), "Order 17 for ada");
/// assert_eq!(state.structure().unwrap()[1].key, "@Customer");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedState {
    template: String,
    segments: Vec<Segment>,
    entries: Vec<StateEntry>,
    bound: usize,
}

impl FormattedState {
    /// Values bind to holes in order. Surplus values are dropped; holes
    /// without a value render as written.
    pub fn new(template: impl Into<String>, values: Vec<StateValue>) -> Self {
        let template = template.into();
        let segments = parse_template(&template);

        let hole_names = segments.iter().filter_map(|s| match s {
            Segment::Hole { name, .. } => Some(name.clone()),
            Segment::Literal(_) => None,
        });

        let mut entries: Vec<StateEntry> = hole_names
            .zip(values)
            .map(|(key, value)| StateEntry { key, value })
            .collect();
        let bound = entries.len();
        entries.push(StateEntry::new(ORIGINAL_FORMAT_KEY, template.as_str()));

        Self {
            template,
            segments,
            entries,
            bound,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for FormattedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hole = 0;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Hole { raw, .. } => {
                    if hole < self.bound {
                        write!(f, "{}", self.entries[hole].value)?;
                    } else {
                        f.write_str(raw)?;
                    }
                    hole += 1;
                }
            }
        }
        Ok(())
    }
}

impl LogState for FormattedState {
    fn structure(&self) -> Option<&[StateEntry]> {
        Some(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_binds_positionally() {
        let state = FormattedState::new(
            "User {Name} logged in from {Ip}",
            vec!["ada".into(), "10.0.0.1".into()],
        );
        assert_eq!(state.to_string(), "User ada logged in from 10.0.0.1");
    }

    #[test]
    fn test_entries_keep_marker_and_original_format() {
        let state = FormattedState::new("Saved {@Order}", vec![StateValue::from(1i32)]);
        let entries = state.structure().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "@Order");
        assert_eq!(entries[1].key, ORIGINAL_FORMAT_KEY);
        assert_eq!(entries[1].value, StateValue::from("Saved {@Order}"));
    }

    #[test]
    fn test_format_suffix_is_not_part_of_name() {
        let state = FormattedState::new("Took {Elapsed:0.00}ms", vec![12.5f64.into()]);
        assert_eq!(state.structure().unwrap()[0].key, "Elapsed");
        assert_eq!(state.to_string(), "Took 12.5ms");
    }

    #[test]
    fn test_escaped_braces() {
        let state = FormattedState::new("{{literal}} {Value}", vec![1i32.into()]);
        assert_eq!(state.to_string(), "{literal} 1");
        assert_eq!(state.structure().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_value_leaves_hole() {
        let state = FormattedState::new("{A} and {B}", vec!["x".into()]);
        assert_eq!(state.to_string(), "x and {B}");
    }

    #[test]
    fn test_surplus_values_dropped() {
        let state = FormattedState::new("only {One}", vec![1i32.into(), 2i32.into()]);
        assert_eq!(state.to_string(), "only 1");
        assert_eq!(state.structure().unwrap().len(), 2);
    }

    #[test]
    fn test_unterminated_hole_is_literal() {
        let state = FormattedState::new("broken {Name", vec!["x".into()]);
        assert_eq!(state.to_string(), "broken {Name");
        assert_eq!(state.structure().unwrap().len(), 1);
    }
}
