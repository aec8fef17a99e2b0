//! Placeholder substitution for output templates.
//!
//! Supported forms: `${NAME}`, `$NAME` and shell-style `$1`..`$9`. `$$`
//! renders a literal `$`. Anything else starting with `$` is copied as-is.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unresolved variable: {name}")]
    Unresolved { name: String },
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find('$') {
        let at = offset + pos;
        let after = &template[at + 1..];

        // (length consumed after '$', placeholder or escaped dollar)
        let parsed: Option<(usize, Segment<'_>)> = if after.starts_with('$') {
            Some((1, Segment::Literal("$")))
        } else if let Some(body) = after.strip_prefix('{') {
            body.find('}').and_then(|end| {
                let name = &body[..end];
                (!name.is_empty() && name.chars().all(is_ident_char))
                    .then(|| (end + 2, Segment::Placeholder(name)))
            })
        } else {
            match after.chars().next() {
                Some(c) if c.is_ascii_digit() => Some((1, Segment::Placeholder(&after[..1]))),
                Some(c) if is_ident_start(c) => {
                    let end = after
                        .find(|c: char| !is_ident_char(c))
                        .unwrap_or(after.len());
                    Some((end, Segment::Placeholder(&after[..end])))
                }
                _ => None,
            }
        };

        match parsed {
            Some((consumed, segment)) => {
                if literal_start < at {
                    segments.push(Segment::Literal(&template[literal_start..at]));
                }
                segments.push(segment);
                offset = at + 1 + consumed;
                literal_start = offset;
            }
            None => {
                offset = at + 1;
            }
        }
        rest = &template[offset..];
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Names referenced by `template`, in first-use order, without duplicates.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for segment in parse(template) {
        if let Segment::Placeholder(name) = segment {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Substitutes every placeholder; unbound names render as the empty string.
pub fn render(template: &str, bindings: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in parse(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => match bindings.get(name) {
                Some(value) => out.push_str(value),
                None => tracing::debug!(placeholder = name, "placeholder unbound, rendering empty"),
            },
        }
    }
    out
}

/// Like [`render`], but fails on the first placeholder with no binding.
pub fn render_strict(
    template: &str,
    bindings: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    for segment in parse(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                let value = bindings.get(name).ok_or_else(|| TemplateError::Unresolved {
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_braced_and_bare() {
        let b = bindings(&[("VAR1", "staging"), ("VAR2", "eu-west")]);
        assert_eq!(
            render("env=${VAR1} region=$VAR2!", &b),
            "env=staging region=eu-west!"
        );
    }

    #[test]
    fn test_render_positional_digit() {
        let b = bindings(&[("1", "1.2.3")]);
        assert_eq!(render("Version: $1", &b), "Version: 1.2.3");
        // only one digit is consumed, like the shell
        assert_eq!(render("$12", &b), "1.2.32");
    }

    #[test]
    fn test_unbound_renders_empty() {
        assert_eq!(render("value=[${MISSING}]", &bindings(&[])), "value=[]");
    }

    #[test]
    fn test_escaped_dollar() {
        let b = bindings(&[("X", "y")]);
        assert_eq!(render("cost: $$5 and $${X}", &b), "cost: $5 and ${X}");
    }

    #[test]
    fn test_invalid_placeholders_kept_literally() {
        let b = bindings(&[("A", "a")]);
        assert_eq!(render("trailing $", &b), "trailing $");
        assert_eq!(render("unterminated ${A", &b), "unterminated ${A");
        assert_eq!(render("empty ${}", &b), "empty ${}");
        assert_eq!(render("space $ A", &b), "space $ A");
        assert_eq!(render("bad ${A-B} $A", &b), "bad ${A-B} a");
    }

    #[test]
    fn test_render_preserves_unicode() {
        let b = bindings(&[("NAME", "wörld")]);
        assert_eq!(render("héllo ${NAME} ✓", &b), "héllo wörld ✓");
    }

    #[test]
    fn test_render_strict_fails_on_unbound() {
        let b = bindings(&[("VAR1", "x")]);
        assert_eq!(render_strict("${VAR1}", &b).unwrap(), "x");
        assert_eq!(
            render_strict("${VAR1} ${VAR2}", &b).unwrap_err(),
            TemplateError::Unresolved {
                name: "VAR2".to_string()
            }
        );
    }

    #[test]
    fn test_placeholders_deduplicated_in_order() {
        assert_eq!(
            placeholders("$B ${A} $B $$C $1"),
            vec!["B".to_string(), "A".to_string(), "1".to_string()]
        );
    }
}
