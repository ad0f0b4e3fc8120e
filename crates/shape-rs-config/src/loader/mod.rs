//! Config document loader.
//!
//! Acquires a document through a [`DocumentStore`], treats a missing
//! document as an absent config, parses what it finds and validates the
//! result against a schema. Error paths are rooted at the document locator,
//! or at a placeholder label when only schema defaults were involved.

mod merge;
mod store;
mod utils;


pub use store::{DocumentStore, FsDocumentStore};

use crate::ConfigError;
use log::{debug, info};
use serde_json::Value;
use shape_rs_schema::{PathContext, Schema, Validated, validate_at};

/// Root label used when no document was found.
pub const DEFAULT_PLACEHOLDER_LABEL: &str = "[schema]";

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Strict JSON.
    Json,
    /// JSON5 (comments, trailing commas, unquoted keys).
    Json5,
}

/// Options controlling how documents are parsed and labeled.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Root label for error paths when no document exists.
    pub placeholder_label: String,
    /// Forced document format; detected from the locator extension when unset.
    pub format: Option<DocumentFormat>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.to_string(),
            format: None,
        }
    }
}

impl LoaderOptions {
    /// Replace the placeholder root label.
    pub fn with_placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }

    /// Parse every document as `format` regardless of its locator.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Loads config documents from a store and validates them.
#[derive(Debug, Clone, Default)]
pub struct Loader<S = FsDocumentStore> {
    store: S,
    options: LoaderOptions,
}

impl<S: DocumentStore> Loader<S> {
    /// Create a loader over `store` with default options.
    pub fn new(store: S) -> Self {
        Self::with_options(store, LoaderOptions::default())
    }

    /// Create a loader over `store` with explicit options.
    pub fn with_options(store: S, options: LoaderOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the document at `locator` and validate it against `schema`.
    ///
    /// A missing document validates as an absent value, so schemas made of
    /// defaults succeed without any document. Read, decode and parse
    /// failures are returned unchanged.
    pub async fn open(&self, locator: &str, schema: &Schema) -> Result<Validated, ConfigError> {
        info!("opening config document: {locator}");
        let value = self.acquire(locator).await?;
        let path = match value {
            Some(_) => utils::document_path(&[locator]),
            None => self.placeholder_path(),
        };
        Ok(validate_at(value.as_ref(), schema, &path)?)
    }

    /// Read every document in `locators`, merge them in order (later wins)
    /// and validate the merged value against `schema`.
    ///
    /// Missing documents are skipped; when none exist the schema defaults
    /// apply as in [`Loader::open`].
    pub async fn open_layered<L: AsRef<str>>(
        &self,
        locators: &[L],
        schema: &Schema,
    ) -> Result<Validated, ConfigError> {
        info!("opening layered config ({} documents)", locators.len());
        let mut merged: Option<Value> = None;
        let mut found = Vec::new();
        for locator in locators {
            let locator = locator.as_ref();
            let Some(value) = self.acquire(locator).await? else {
                debug!("skipping missing layer: {locator}");
                continue;
            };
            match merged.as_mut() {
                Some(base) => merge::merge_documents(base, value),
                None => merged = Some(value),
            }
            found.push(locator);
        }
        debug!("merged {} of {} layers", found.len(), locators.len());

        let path = if found.is_empty() {
            self.placeholder_path()
        } else {
            utils::document_path(&found)
        };
        Ok(validate_at(merged.as_ref(), schema, &path)?)
    }

    /// Parse inline document `contents` and validate it, labeling error
    /// paths with `label`.
    pub fn open_str(
        &self,
        label: &str,
        contents: &str,
        schema: &Schema,
    ) -> Result<Validated, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let format = self
            .options
            .format
            .unwrap_or_else(|| utils::detect_format(label));
        let value = utils::parse_document(contents, format)?;
        Ok(validate_at(
            Some(&value),
            schema,
            &utils::document_path(&[label]),
        )?)
    }

    /// Read, decode and parse one document; `None` when it does not exist.
    async fn acquire(&self, locator: &str) -> Result<Option<Value>, ConfigError> {
        let Some(bytes) = self.store.read(locator).await? else {
            debug!("config document not found: {locator}");
            return Ok(None);
        };
        let contents = String::from_utf8(bytes)?;
        let format = self
            .options
            .format
            .unwrap_or_else(|| utils::detect_format(locator));
        debug!("parsing config document (locator={locator}, format={format:?})");
        utils::parse_document(&contents, format).map(Some)
    }

    fn placeholder_path(&self) -> PathContext {
        utils::placeholder_path(&self.options.placeholder_label)
    }
}

/// Parse document text in the given format.
pub fn parse_document(contents: &str, format: DocumentFormat) -> Result<Value, ConfigError> {
    utils::parse_document(contents, format)
}

/// Read the file at `locator` and validate it against `schema` with default
/// options.
pub async fn open(locator: &str, schema: &Schema) -> Result<Validated, ConfigError> {
    Loader::new(FsDocumentStore::new()).open(locator, schema).await
}
