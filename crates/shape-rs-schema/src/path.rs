//! Location tracking for validation errors.

use std::fmt;

/// Placeholder rendered for a context with neither label nor keys.
const ROOT_PATH: &str = "root";

/// Ordered key segments (outer to inner) plus an optional root label.
///
/// The label identifies where the value came from, e.g. `"app.json:"` for a
/// document or `"[schema]:"` when only schema defaults are involved. Label and
/// keys render joined by `.`, so a nested key reads `app.json:.server.port`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    label: Option<String>,
    keys: Vec<String>,
}

impl PathContext {
    /// Unlabeled, empty context.
    pub fn root() -> Self {
        Self::default()
    }

    /// Empty context rooted at `label`.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            keys: Vec::new(),
        }
    }

    /// Context one level deeper, under `key`.
    pub fn child(&self, key: &str) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key.to_string());
        Self {
            label: self.label.clone(),
            keys,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for PathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.label.iter().chain(&self.keys);
        let Some(first) = segments.next() else {
            return f.write_str(ROOT_PATH);
        };
        f.write_str(first)?;
        for segment in segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
