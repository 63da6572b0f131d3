use serde::{Deserialize, Deserializer};
use validator::ValidationErrors;

/// Trims string fields and treats empty ones as absent, so that `required`
/// also rejects blank values.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty()))
}

/// Flattens validation errors into their messages, following the given
/// field order so responses are stable.
pub(crate) fn ordered_messages(errors: &ValidationErrors, fields: &[&str]) -> Vec<String> {
    let field_errors = errors.field_errors();
    let mut messages = Vec::new();

    for field in fields {
        for (name, errs) in &field_errors {
            let name: &str = name.as_ref();
            if name != *field {
                continue;
            }
            messages.extend(errs.iter().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), |m| m.to_string())
            }));
        }
    }

    messages
}
