use std::sync::Arc;

use crate::cache::Cache;
use crate::config::Settings;
use crate::context::RequestContext;
use crate::services::article::{ArticleCategory, ArticleService};
use crate::services::banner::{BannerCategory, BannerService};
use crate::services::link::{LinkRegistry, UrlBuilder};
use crate::services::menu::{MenuDefinitionRegistry, MenuResolution, MenuTreeResolver};
use crate::store::RecordStore;
use crate::utils::error::CmsError;

/// Shared CMS state: the definition registry, the resolver and the content
/// services behind `Arc`s, wired once at startup.
///
/// The async/sync methods on this type are the callables the template layer
/// registers in its rendering context.
#[derive(Clone)]
pub struct Cms {
    pub registry: Arc<MenuDefinitionRegistry>,
    pub resolver: Arc<MenuTreeResolver>,
    pub banners: Arc<BannerService>,
    pub articles: Arc<ArticleService>,
    pub links: Arc<LinkRegistry>,
    pub settings: Settings,
}

impl Cms {
    pub fn new(
        store: Arc<dyn RecordStore>,
        cache: Arc<dyn Cache>,
        urls: Arc<dyn UrlBuilder>,
        settings: Settings,
    ) -> Self {
        let registry = Arc::new(MenuDefinitionRegistry::new());
        let resolver = Arc::new(MenuTreeResolver::new(
            registry.clone(),
            store,
            cache,
            urls,
            settings.menu.clone(),
        ));
        Self {
            registry,
            resolver,
            banners: Arc::new(BannerService::new()),
            articles: Arc::new(ArticleService::new()),
            links: Arc::new(LinkRegistry::new()),
            settings,
        }
    }

    /// Template callable: resolve a menu tree (or the raw root record).
    pub async fn menu_for(
        &self,
        identifier: &str,
        root_value: &str,
        ctx: &RequestContext,
        objectified: bool,
    ) -> Result<MenuResolution, CmsError> {
        self.resolver
            .resolve(identifier, root_value, ctx, objectified)
            .await
    }

    /// Template callable: banner category by name.
    pub fn banner_category_for(
        &self,
        name: &str,
        ctx: &RequestContext,
        silent: bool,
    ) -> Result<Option<BannerCategory>, CmsError> {
        self.banners.category_for(name, ctx.website_id, silent)
    }

    /// Template callable: article category by unique name.
    pub fn article_category_for(
        &self,
        unique_name: &str,
        ctx: &RequestContext,
        silent: bool,
    ) -> Result<Option<ArticleCategory>, CmsError> {
        self.articles
            .category_for(unique_name, ctx.website_id, silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use crate::services::menu::MenuDefinition;
    use crate::store::{InMemoryRecordStore, ModelSchema, Record, RecordData};

    struct NoRoutes;

    impl UrlBuilder for NoRoutes {
        fn canonical_url(&self, _model: &str, _record: &dyn Record) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn wired_cms_resolves_menus_end_to_end() {
        let store = Arc::new(InMemoryRecordStore::new());
        store.define_model(
            "category",
            ModelSchema::new()
                .with_text("slug")
                .with_text("name")
                .with_children("subcategories"),
        );
        store.insert(
            RecordData::new("category", 1)
                .text("slug", "root")
                .text("name", "Root")
                .children("subcategories", vec![2]),
        );
        store.insert(
            RecordData::new("category", 2)
                .text("slug", "child")
                .text("name", "Child"),
        );

        let cms = Cms::new(
            store,
            Arc::new(InMemoryCache::new()),
            Arc::new(NoRoutes),
            Settings::default(),
        );
        cms.registry
            .insert(MenuDefinition {
                unique_identifier: "category_menu".to_string(),
                website_id: 1,
                active: true,
                target_model: "category".to_string(),
                children_field: "subcategories".to_string(),
                uri_field: "slug".to_string(),
                title_field: "name".to_string(),
                identifier_field: "slug".to_string(),
            })
            .unwrap();

        let ctx = RequestContext::new("main", 1, 7, "en");
        let tree = cms
            .menu_for("category_menu", "root", &ctx, false)
            .await
            .unwrap()
            .tree()
            .unwrap();
        assert_eq!(tree.name, "Root");
        assert_eq!(tree.children.len(), 1);

        // Content services share the same website scoping.
        assert!(cms.banner_category_for("sidebar", &ctx, true).unwrap().is_none());
        assert!(cms
            .article_category_for("news", &ctx, true)
            .unwrap()
            .is_none());
    }
}
