//! CMS link targets and the canonical-URL seam.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Builds the canonical URL of a record's render endpoint.
///
/// Owned by the routing layer; the menu resolver only consumes it when a
/// polymorphic reference points at a record. `None` means the model has no
/// registered render route.
pub trait UrlBuilder: Send + Sync {
    fn canonical_url(&self, model: &str, record: &dyn Record) -> Option<String>;
}

/// A model that may be offered as a reference target, with a display name
/// for the selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsLink {
    pub model: String,
    pub name: String,
    pub priority: i32,
}

impl CmsLink {
    pub const DEFAULT_PRIORITY: i32 = 5;

    pub fn new(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            priority: Self::DEFAULT_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Registered link targets, ordered by ascending priority.
#[derive(Default)]
pub struct LinkRegistry {
    links: RwLock<Vec<CmsLink>>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, link: CmsLink) {
        let mut links = self.links.write();
        links.push(link);
        links.sort_by_key(|link| link.priority);
    }

    pub fn links(&self) -> Vec<CmsLink> {
        self.links.read().clone()
    }

    /// `(model, display name)` pairs for reference selection widgets.
    pub fn choices(&self) -> Vec<(String, String)> {
        self.links
            .read()
            .iter()
            .map(|link| (link.model.clone(), link.name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_order_by_priority() {
        let registry = LinkRegistry::new();
        registry.register(CmsLink::new("article", "Article"));
        registry.register(CmsLink::new("category", "Category").with_priority(1));

        let choices = registry.choices();
        assert_eq!(choices[0].0, "category");
        assert_eq!(choices[1].0, "article");
    }

    #[test]
    fn default_priority_is_five() {
        assert_eq!(CmsLink::new("page", "Page").priority, 5);
    }
}
