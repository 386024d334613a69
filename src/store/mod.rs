//! Seam to the external record store.
//!
//! The persistence engine itself is an external collaborator. The CMS only
//! needs to search records by field equality, fetch a record by id, follow a
//! to-many children relation and read character-valued attributes, so that is
//! the whole surface expressed here.

pub mod filter;
pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use filter::{Condition, Filter, Op};
pub use memory::{InMemoryRecordStore, RecordData};

pub type RecordId = i64;

/// Semantic type of a field, as far as menu definitions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Character-valued field.
    Text,
    /// To-many relation to records of the same model.
    Children,
}

/// Field layout of a model, used to validate menu definitions at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    fields: HashMap<String, FieldKind>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldKind::Text);
        self
    }

    pub fn with_children(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into(), FieldKind::Children);
        self
    }

    pub fn kind(&self, field: &str) -> Option<FieldKind> {
        self.fields.get(field).copied()
    }
}

/// A reference whose target model is not fixed.
///
/// Carries the model name and the record id. An id of zero (or none at all)
/// means the reference does not point at a record and the plain URI field
/// should be used instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolymorphicRef {
    pub model: String,
    pub record_id: Option<RecordId>,
}

impl PolymorphicRef {
    pub fn new(model: impl Into<String>, record_id: Option<RecordId>) -> Self {
        Self {
            model: model.into(),
            record_id,
        }
    }

    /// The `(model, id)` pair, if this reference actually names a record.
    pub fn target(&self) -> Option<(&str, RecordId)> {
        match self.record_id {
            Some(id) if id != 0 => Some((self.model.as_str(), id)),
            _ => None,
        }
    }
}

/// Read-only view of one record.
pub trait Record: std::fmt::Debug + Send + Sync {
    fn id(&self) -> RecordId;

    fn model(&self) -> &str;

    /// Value of a character-valued field.
    fn text(&self, field: &str) -> Option<&str>;

    /// Ids held by a to-many relation field, in collection order.
    fn children_ids(&self, field: &str) -> Option<Vec<RecordId>>;

    /// Optional polymorphic reference carried by the record.
    fn reference(&self) -> Option<&PolymorphicRef> {
        None
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unknown model: {0}")]
    UnknownModel(String),

    #[error("record {model}:{id} not found")]
    RecordMissing { model: String, id: RecordId },

    #[error("field {field} missing on {model} record {id}")]
    MissingField {
        model: String,
        id: RecordId,
        field: String,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// The search / fetch primitives the CMS consumes.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records of `model` matching the filter conjunction, up to `limit`.
    async fn search(
        &self,
        model: &str,
        filter: &Filter,
        limit: Option<usize>,
    ) -> Result<Vec<Arc<dyn Record>>, StoreError>;

    /// Fetch one record by id.
    async fn get(&self, model: &str, id: RecordId)
        -> Result<Option<Arc<dyn Record>>, StoreError>;

    /// Resolve a record's children relation, preserving collection order.
    async fn children(
        &self,
        record: &dyn Record,
        field: &str,
    ) -> Result<Vec<Arc<dyn Record>>, StoreError>;

    /// Field layout of a model, if the backend knows it.
    fn schema(&self, model: &str) -> Option<ModelSchema>;
}
