//! Helpers for document formats and error labels.

use super::DocumentFormat;
use crate::ConfigError;
use serde_json::Value;
use shape_rs_schema::PathContext;
use std::path::Path;

/// Suffix that marks a root label; keys follow after a `.`.
const LABEL_SEPARATOR: &str = ":";
/// Separator between the locators of a layered load.
const LAYER_SEPARATOR: &str = "+";

/// Pick a format from the locator's extension; JSON unless it ends in `.json5`.
pub(super) fn detect_format(locator: &str) -> DocumentFormat {
    match Path::new(locator)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json5") => DocumentFormat::Json5,
        _ => DocumentFormat::Json,
    }
}

/// Parse document text into a config value tree.
pub(super) fn parse_document(contents: &str, format: DocumentFormat) -> Result<Value, ConfigError> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(contents)?),
        DocumentFormat::Json5 => Ok(json5::from_str(contents)?),
    }
}

/// Root path for values read from the given documents.
pub(super) fn document_path(locators: &[&str]) -> PathContext {
    PathContext::labeled(format!(
        "{}{LABEL_SEPARATOR}",
        locators.join(LAYER_SEPARATOR)
    ))
}

/// Root path used when no document exists and only schema defaults apply.
pub(super) fn placeholder_path(placeholder: &str) -> PathContext {
    PathContext::labeled(format!("{placeholder}{LABEL_SEPARATOR}"))
}
