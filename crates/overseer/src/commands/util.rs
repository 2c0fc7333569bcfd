//! Shared helpers for command handlers.

use crate::error::CliError;

/// `name (#id)`, falling back to whichever part is known.
pub fn printer_label(id: Option<u64>, name: Option<&str>) -> String {
    match (id, name) {
        (Some(id), Some(name)) => format!("{name} (#{id})"),
        (Some(id), None) => format!("#{id}"),
        (None, Some(name)) => name.to_owned(),
        (None, None) => "-".into(),
    }
}

/// Compact `key=value` summary of scalar attributes for table cells.
pub fn summarize(attributes: &serde_json::Map<String, serde_json::Value>) -> String {
    let parts: Vec<String> = attributes
        .iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::String(s) => Some(format!("{k}={s}")),
            serde_json::Value::Number(n) => Some(format!("{k}={n}")),
            serde_json::Value::Bool(b) => Some(format!("{k}={b}")),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        "-".into()
    } else {
        parts.join(", ")
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn labels() {
        assert_eq!(printer_label(Some(4), Some("Ender")), "Ender (#4)");
        assert_eq!(printer_label(Some(4), None), "#4");
        assert_eq!(printer_label(None, None), "-");
    }

    #[test]
    fn summary_skips_nested_values() {
        let attrs = json!({ "color": "red", "grams": 250, "meta": { "x": 1 } });
        let serde_json::Value::Object(map) = attrs else {
            unreachable!()
        };
        assert_eq!(summarize(&map), "color=red, grams=250");
    }
}
