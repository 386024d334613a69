//! Article publishing.
//!
//! Articles hang off per-website categories and are addressed by URI.
//! Listings are sequence-ordered and sliced into fixed-size pages.

use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::context::WebsiteId;
use crate::utils::error::CmsError;

pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCategory {
    /// Unique per website; doubles as the category URI.
    pub unique_name: String,
    pub title: String,
    pub website_id: WebsiteId,
    pub active: bool,
    pub description: Option<String>,
    /// Banner category shown alongside the listing, if any.
    pub banner_category: Option<String>,
}

/// Key/value attribute attached to an article, e.g. a social profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub uri: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub sequence: i32,
    pub active: bool,
    pub published_on: Option<NaiveDate>,
    /// Banner shown with this article, overriding the category's.
    pub banner: Option<String>,
    #[serde(default)]
    pub attributes: Vec<ArticleAttribute>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl<T> Pagination<T> {
    pub fn pages(&self) -> usize {
        self.total.div_ceil(self.per_page.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Per-website article categories and articles.
#[derive(Default)]
pub struct ArticleService {
    categories: DashMap<(WebsiteId, String), ArticleCategory>,
    articles: RwLock<Vec<(WebsiteId, Article)>>,
}

impl ArticleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, category: ArticleCategory) {
        self.categories
            .insert((category.website_id, category.unique_name.clone()), category);
    }

    pub fn add_article(&self, website_id: WebsiteId, article: Article) {
        self.articles.write().push((website_id, article));
    }

    /// The `get_article_category` template callable.
    pub fn category_for(
        &self,
        unique_name: &str,
        website_id: WebsiteId,
        silent: bool,
    ) -> Result<Option<ArticleCategory>, CmsError> {
        match self.categories.get(&(website_id, unique_name.to_string())) {
            Some(category) => Ok(Some(category.clone())),
            None if silent => Ok(None),
            None => Err(CmsError::ArticleCategoryNotFound(unique_name.to_string())),
        }
    }

    /// Fetch one article by URI.
    pub fn article_for(&self, uri: &str, website_id: WebsiteId) -> Result<Article, CmsError> {
        self.articles
            .read()
            .iter()
            .find(|(site, article)| *site == website_id && article.uri == uri && article.active)
            .map(|(_, article)| article.clone())
            .ok_or_else(|| CmsError::ArticleNotFound(uri.to_string()))
    }

    /// Active articles of a category, sequence-ordered, sliced to `page`
    /// (1-based). Out-of-range pages come back empty with the total intact.
    pub fn articles_in(
        &self,
        category: &str,
        website_id: WebsiteId,
        page: usize,
        per_page: usize,
    ) -> Pagination<Article> {
        let mut matching: Vec<Article> = self
            .articles
            .read()
            .iter()
            .filter(|(site, article)| {
                *site == website_id && article.category == category && article.active
            })
            .map(|(_, article)| article.clone())
            .collect();
        matching.sort_by_key(|article| article.sequence);

        let total = matching.len();
        let page = page.max(1);
        let start = (page - 1).saturating_mul(per_page);
        let items = matching
            .into_iter()
            .skip(start)
            .take(per_page)
            .collect();

        Pagination {
            items,
            page,
            per_page,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(uri: &str, sequence: i32, active: bool) -> Article {
        Article {
            uri: uri.to_string(),
            title: uri.to_string(),
            content: "...".to_string(),
            category: "news".to_string(),
            sequence,
            active,
            published_on: NaiveDate::from_ymd_opt(2026, 3, 1),
            banner: None,
            attributes: Vec::new(),
        }
    }

    fn seeded() -> ArticleService {
        let service = ArticleService::new();
        service.add_category(ArticleCategory {
            unique_name: "news".to_string(),
            title: "News".to_string(),
            website_id: 1,
            active: true,
            description: None,
            banner_category: None,
        });
        for i in 1..=5 {
            service.add_article(1, article(&format!("post-{i}"), i, true));
        }
        service.add_article(1, article("draft", 0, false));
        service
    }

    #[test]
    fn listing_orders_by_sequence_and_skips_inactive() {
        let service = seeded();
        let page = service.articles_in("news", 1, 1, DEFAULT_PER_PAGE);
        assert_eq!(page.total, 5);
        let uris: Vec<&str> = page.items.iter().map(|a| a.uri.as_str()).collect();
        assert_eq!(uris, vec!["post-1", "post-2", "post-3", "post-4", "post-5"]);
    }

    #[test]
    fn pages_slice_correctly() {
        let service = seeded();
        let page = service.articles_in("news", 1, 2, 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.pages(), 3);
        assert!(page.has_next());
        assert!(page.has_prev());
        let uris: Vec<&str> = page.items.iter().map(|a| a.uri.as_str()).collect();
        assert_eq!(uris, vec!["post-3", "post-4"]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let service = seeded();
        let page = service.articles_in("news", 1, 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert!(!page.has_next());
    }

    #[test]
    fn article_lookup_is_website_scoped_and_active_only() {
        let service = seeded();
        assert!(service.article_for("post-1", 1).is_ok());
        assert!(matches!(
            service.article_for("post-1", 2),
            Err(CmsError::ArticleNotFound(_))
        ));
        assert!(matches!(
            service.article_for("draft", 1),
            Err(CmsError::ArticleNotFound(_))
        ));
    }

    #[test]
    fn article_carries_its_own_banner_and_attributes() {
        let service = seeded();
        let mut featured = article("featured", 9, true);
        featured.banner = Some("article-top".to_string());
        featured.attributes = vec![ArticleAttribute {
            name: "twitter".to_string(),
            value: "@example".to_string(),
        }];
        service.add_article(1, featured);

        let fetched = service.article_for("featured", 1).unwrap();
        assert_eq!(fetched.banner.as_deref(), Some("article-top"));
        assert_eq!(fetched.attributes.len(), 1);
        assert_eq!(fetched.attributes[0].name, "twitter");

        // Articles without one fall back to whatever the category shows.
        assert_eq!(service.article_for("post-1", 1).unwrap().banner, None);
    }

    #[test]
    fn category_lookup_mirrors_banner_semantics() {
        let service = seeded();
        assert!(service.category_for("news", 1, true).unwrap().is_some());
        assert!(service.category_for("sports", 1, true).unwrap().is_none());
        assert!(matches!(
            service.category_for("sports", 1, false),
            Err(CmsError::ArticleCategoryNotFound(_))
        ));
    }
}
