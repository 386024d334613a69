use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::context::WebsiteId;
use crate::store::{FieldKind, ModelSchema};
use crate::utils::error::CmsError;

/// Configuration of one menu: which model to walk and which of its fields
/// serve as identifier, title, URI and children collection.
///
/// Created and edited by administrators; read-only to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    /// External lookup key, unique per website.
    pub unique_identifier: String,
    /// Owning website.
    pub website_id: WebsiteId,
    /// Inactive menus are kept but not served.
    pub active: bool,
    /// Record model the menu walks, e.g. a product category model.
    pub target_model: String,
    /// To-many field yielding a record's child records (same model).
    pub children_field: String,
    /// Character field used as the node link target.
    pub uri_field: String,
    /// Character field used as the node display label.
    pub title_field: String,
    /// Character field the root record is looked up by.
    pub identifier_field: String,
}

impl MenuDefinition {
    /// Check the named fields against the target model's layout.
    ///
    /// This runs at definition-save time; the resolver assumes a definition
    /// that already passed.
    pub fn validate(&self, schema: &ModelSchema) -> Result<(), CmsError> {
        for field in [&self.uri_field, &self.title_field, &self.identifier_field] {
            match schema.kind(field) {
                Some(FieldKind::Text) => {}
                Some(_) => {
                    return Err(CmsError::InvalidDefinition(format!(
                        "field {} on {} is not character-valued",
                        field, self.target_model
                    )))
                }
                None => {
                    return Err(CmsError::InvalidDefinition(format!(
                        "{} has no field {}",
                        self.target_model, field
                    )))
                }
            }
        }
        match schema.kind(&self.children_field) {
            Some(FieldKind::Children) => Ok(()),
            _ => Err(CmsError::InvalidDefinition(format!(
                "field {} on {} is not a children relation",
                self.children_field, self.target_model
            ))),
        }
    }
}

/// Per-installation table of menu definitions.
///
/// Populated by the admin layer at startup; the resolver only reads it.
#[derive(Default)]
pub struct MenuDefinitionRegistry {
    definitions: RwLock<Vec<MenuDefinition>>,
}

impl MenuDefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, enforcing `(unique_identifier, website)`
    /// uniqueness.
    pub fn insert(&self, definition: MenuDefinition) -> Result<(), CmsError> {
        let mut definitions = self.definitions.write();
        let duplicate = definitions.iter().any(|existing| {
            existing.unique_identifier == definition.unique_identifier
                && existing.website_id == definition.website_id
        });
        if duplicate {
            return Err(CmsError::DuplicateDefinition(definition.unique_identifier));
        }
        definitions.push(definition);
        Ok(())
    }

    /// Resolve `(unique_identifier, website)` to exactly one definition.
    ///
    /// Uniqueness is a stored invariant, but multiplicity is still treated as
    /// not-found rather than silently picking one.
    pub fn find(
        &self,
        unique_identifier: &str,
        website_id: WebsiteId,
    ) -> Result<MenuDefinition, CmsError> {
        let definitions = self.definitions.read();
        let mut matches = definitions.iter().filter(|definition| {
            definition.active
                && definition.unique_identifier == unique_identifier
                && definition.website_id == website_id
        });
        match (matches.next(), matches.next()) {
            (Some(definition), None) => Ok(definition.clone()),
            (Some(_), Some(_)) => {
                error!(
                    "Menu {} is ambiguous for website {}",
                    unique_identifier, website_id
                );
                Err(CmsError::DefinitionNotFound(unique_identifier.to_string()))
            }
            (None, _) => {
                error!("Menu {} could not be identified", unique_identifier);
                Err(CmsError::DefinitionNotFound(unique_identifier.to_string()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.read().is_empty()
    }

    /// Bypass the uniqueness check, for exercising the defensive lookup path.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&self, definition: MenuDefinition) {
        self.definitions.write().push(definition);
    }
}
