use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::cache::{self, Cache};
use crate::config::MenuConfig;
use crate::context::RequestContext;
use crate::services::link::UrlBuilder;
use crate::services::menu::definition::{MenuDefinition, MenuDefinitionRegistry};
use crate::store::{Filter, Record, RecordId, RecordStore, StoreError};
use crate::utils::error::CmsError;

/// Namespace tag mixed into every menu cache key.
pub const CACHE_NAMESPACE: &str = "cms.menu.menu_for";

/// One node of a resolved menu tree. Plain serializable value; owned by the
/// cache entry that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub name: String,
    pub uri: String,
    pub children: Vec<MenuNode>,
}

/// Outcome of a resolve call: the materialized tree, or the raw root record
/// when the caller asked for the objectified form.
pub enum MenuResolution {
    Tree(MenuNode),
    Record(Arc<dyn Record>),
}

impl MenuResolution {
    pub fn tree(self) -> Option<MenuNode> {
        match self {
            MenuResolution::Tree(tree) => Some(tree),
            MenuResolution::Record(_) => None,
        }
    }

    pub fn record(self) -> Option<Arc<dyn Record>> {
        match self {
            MenuResolution::Tree(_) => None,
            MenuResolution::Record(record) => Some(record),
        }
    }
}

/// Materializes menu trees from a definition, the record store and the
/// request context, with a TTL cache in front.
///
/// All collaborators are injected so tests can substitute fakes.
pub struct MenuTreeResolver {
    registry: Arc<MenuDefinitionRegistry>,
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn Cache>,
    urls: Arc<dyn UrlBuilder>,
    config: MenuConfig,
}

impl MenuTreeResolver {
    pub fn new(
        registry: Arc<MenuDefinitionRegistry>,
        store: Arc<dyn RecordStore>,
        cache: Arc<dyn Cache>,
        urls: Arc<dyn UrlBuilder>,
        config: MenuConfig,
    ) -> Self {
        Self {
            registry,
            store,
            cache,
            urls,
            config,
        }
    }

    /// The `menu_for` template callable.
    ///
    /// Looks up the definition for `identifier` in the request's website,
    /// locates the root record whose identifier field equals `root_value`,
    /// and returns the materialized tree. With `objectified` the raw root
    /// record is returned instead, bypassing tree construction and caching.
    pub async fn resolve(
        &self,
        identifier: &str,
        root_value: &str,
        ctx: &RequestContext,
        objectified: bool,
    ) -> Result<MenuResolution, CmsError> {
        let definition = self.registry.find(identifier, ctx.website_id)?;
        let root = self.find_root(&definition, root_value).await?;

        if objectified {
            return Ok(MenuResolution::Record(root));
        }

        let tree = self.tree_for(&definition, root, root_value, ctx).await?;
        Ok(MenuResolution::Tree(tree))
    }

    /// Convenience wrapper returning the tree form.
    pub async fn menu_for(
        &self,
        identifier: &str,
        root_value: &str,
        ctx: &RequestContext,
    ) -> Result<MenuNode, CmsError> {
        let definition = self.registry.find(identifier, ctx.website_id)?;
        let root = self.find_root(&definition, root_value).await?;
        self.tree_for(&definition, root, root_value, ctx).await
    }

    /// Locate exactly one root record by identifier-field equality.
    ///
    /// Zero matches and multiple matches both fail: a missing root behind a
    /// valid definition is a data-integrity problem, not a client error.
    async fn find_root(
        &self,
        definition: &MenuDefinition,
        root_value: &str,
    ) -> Result<Arc<dyn Record>, CmsError> {
        let filter = Filter::new().eq(&definition.identifier_field, root_value);
        let records = self
            .store
            .search(&definition.target_model, &filter, Some(2))
            .await?;
        match records.as_slice() {
            [root] => Ok(root.clone()),
            other => {
                error!(
                    "Menu root {} could not be identified on {} ({} matches)",
                    root_value,
                    definition.target_model,
                    other.len()
                );
                Err(CmsError::RootNotFound(root_value.to_string()))
            }
        }
    }

    async fn tree_for(
        &self,
        definition: &MenuDefinition,
        root: Arc<dyn Record>,
        root_value: &str,
        ctx: &RequestContext,
    ) -> Result<MenuNode, CmsError> {
        let user_id = ctx.user_id.to_string();
        let key = cache::key_from_parts(&[
            &ctx.database,
            &user_id,
            &ctx.locale,
            &definition.unique_identifier,
            root_value,
            CACHE_NAMESPACE,
        ]);

        // Cache unavailability degrades to recomputation, never to failure.
        match self.cache.get(&key).await {
            Ok(Some(value)) => match serde_json::from_value::<MenuNode>(value) {
                Ok(tree) => {
                    debug!("Menu {} served from cache", definition.unique_identifier);
                    return Ok(tree);
                }
                Err(err) => {
                    warn!("Cached menu tree failed to deserialize, recomputing: {err}")
                }
            },
            Ok(None) => {}
            Err(err) => warn!("Menu cache read failed, computing without cache: {err}"),
        }

        let tree = self.generate_tree(definition, root).await?;

        match serde_json::to_value(&tree) {
            Ok(value) => {
                let ttl = Duration::from_secs(self.config.cache_ttl_seconds);
                if let Err(err) = self.cache.set(&key, value, ttl).await {
                    warn!("Menu cache write failed: {err}");
                }
            }
            Err(err) => warn!("Menu tree not cacheable: {err}"),
        }

        Ok(tree)
    }

    async fn generate_tree(
        &self,
        definition: &MenuDefinition,
        root: Arc<dyn Record>,
    ) -> Result<MenuNode, CmsError> {
        let mut path = Vec::new();
        self.walk(definition, root, &mut path).await
    }

    /// Depth-first walk of the children relation.
    ///
    /// `path` holds the record ids on the active recursion path. A child that
    /// is already on it means the external graph contains a cycle, which the
    /// naive recursion would otherwise chase forever.
    fn walk<'a>(
        &'a self,
        definition: &'a MenuDefinition,
        record: Arc<dyn Record>,
        path: &'a mut Vec<RecordId>,
    ) -> BoxFuture<'a, Result<MenuNode, CmsError>> {
        async move {
            if path.contains(&record.id()) {
                return Err(CmsError::CyclicMenuGraph {
                    model: record.model().to_string(),
                    id: record.id(),
                });
            }
            if path.len() >= self.config.max_depth {
                return Err(CmsError::MenuTreeTooDeep(self.config.max_depth));
            }

            let mut node = self.node_for(definition, record.as_ref()).await?;

            path.push(record.id());
            let children = self
                .store
                .children(record.as_ref(), &definition.children_field)
                .await?;
            for child in children {
                node.children.push(self.walk(definition, child, path).await?);
            }
            path.pop();

            Ok(node)
        }
        .boxed()
    }

    /// Title and URI of a single record.
    ///
    /// When the record carries a polymorphic reference naming a nonzero
    /// target id, the URI comes from that target's canonical render URL;
    /// otherwise the plain URI field is used.
    async fn node_for(
        &self,
        definition: &MenuDefinition,
        record: &dyn Record,
    ) -> Result<MenuNode, CmsError> {
        let name = self.text_field(record, &definition.title_field)?;

        let uri = match record.reference().and_then(|reference| reference.target()) {
            Some((model, id)) => match self.reference_uri(model, id).await? {
                Some(uri) => uri,
                None => {
                    warn!(
                        "Menu reference {}:{} has no resolvable URL, using {} instead",
                        model, id, definition.uri_field
                    );
                    self.text_field(record, &definition.uri_field)?
                }
            },
            None => self.text_field(record, &definition.uri_field)?,
        };

        Ok(MenuNode {
            name,
            uri,
            children: Vec::new(),
        })
    }

    /// Canonical URL of a referenced record, `None` when the target record or
    /// its render route is gone.
    async fn reference_uri(&self, model: &str, id: RecordId) -> Result<Option<String>, CmsError> {
        match self.store.get(model, id).await? {
            Some(target) => Ok(self.urls.canonical_url(model, target.as_ref())),
            None => Ok(None),
        }
    }

    fn text_field(&self, record: &dyn Record, field: &str) -> Result<String, CmsError> {
        record
            .text(field)
            .map(str::to_owned)
            .ok_or_else(|| {
                CmsError::Store(StoreError::MissingField {
                    model: record.model().to_string(),
                    id: record.id(),
                    field: field.to_string(),
                })
            })
    }
}
