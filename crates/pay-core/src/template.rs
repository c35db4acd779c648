//! # Templates
//!
//! Minimal `{placeholder}` interpolation for intent text, item descriptions
//! and URLs. `{{` and `}}` produce literal braces. Rendering fails with
//! `PaymentError::Configuration` on unknown placeholders, unbalanced braces,
//! or when a required placeholder is absent from the template.

use crate::error::{PaymentError, PaymentResult};

/// A named value substituted into a template
pub type TemplateVar<'a> = (&'a str, &'a str);

/// Render `template`, substituting `vars`.
///
/// Every name in `required` must occur in the template at least once.
pub fn render(template: &str, vars: &[TemplateVar<'_>], required: &[&str]) -> PaymentResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut seen: Vec<&str> = Vec::new();
    let mut chars = template.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let rest = &template[i + 1..];
                let end = rest.find('}').ok_or_else(|| {
                    malformed(template, "unclosed '{'")
                })?;
                let name = &rest[..end];
                let value = vars
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| malformed(template, &format!("unknown placeholder '{{{}}}'", name)))?;
                out.push_str(value);
                seen.push(name);
                // skip the name and the closing brace
                for _ in 0..=name.chars().count() {
                    chars.next();
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(malformed(template, "unmatched '}'"));
                }
            }
            _ => out.push(c),
        }
    }

    if let Some(missing) = required.iter().find(|name| !seen.contains(name)) {
        return Err(malformed(
            template,
            &format!("missing placeholder '{{{}}}'", missing),
        ));
    }

    Ok(out)
}

fn malformed(template: &str, reason: &str) -> PaymentError {
    PaymentError::Configuration(format!("Malformed template {:?}: {}", template, reason))
}
