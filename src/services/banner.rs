//! Banner rotation.
//!
//! Banners live in per-website categories. Each banner is either a local
//! image (static URL already resolved by the static-file layer), a remote
//! image, or a raw custom-code snippet, and renders itself to HTML by plain
//! string substitution.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::context::WebsiteId;
use crate::utils::error::CmsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerState {
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BannerContent {
    /// Locally hosted image, URL pre-resolved.
    Image {
        url: String,
        click_url: String,
        alternative_text: String,
        width: u32,
        height: u32,
    },
    /// Image served from elsewhere.
    RemoteImage {
        url: String,
        click_url: String,
        alternative_text: String,
        width: u32,
        height: u32,
    },
    /// Raw markup, passed through untouched.
    CustomCode { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub name: String,
    pub sequence: i32,
    pub state: BannerState,
    pub content: BannerContent,
}

impl Banner {
    /// HTML snippet for this banner.
    pub fn html(&self) -> String {
        match &self.content {
            BannerContent::Image {
                url,
                click_url,
                alternative_text,
                width,
                height,
            }
            | BannerContent::RemoteImage {
                url,
                click_url,
                alternative_text,
                width,
                height,
            } => format!(
                r#"<a href="{click_url}"><img src="{url}" alt="{alternative_text}" width="{width}" height="{height}"/></a>"#
            ),
            BannerContent::CustomCode { code } => code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerCategory {
    pub name: String,
    pub website_id: WebsiteId,
    pub banners: Vec<Banner>,
}

impl BannerCategory {
    pub fn new(name: impl Into<String>, website_id: WebsiteId) -> Self {
        Self {
            name: name.into(),
            website_id,
            banners: Vec::new(),
        }
    }

    /// Published banners in sequence order.
    pub fn published_banners(&self) -> Vec<&Banner> {
        let mut published: Vec<&Banner> = self
            .banners
            .iter()
            .filter(|banner| banner.state == BannerState::Published)
            .collect();
        published.sort_by_key(|banner| banner.sequence);
        published
    }
}

/// Per-website banner categories.
#[derive(Default)]
pub struct BannerService {
    categories: DashMap<(WebsiteId, String), BannerCategory>,
}

impl BannerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, category: BannerCategory) {
        self.categories
            .insert((category.website_id, category.name.clone()), category);
    }

    pub fn add_banner(
        &self,
        website_id: WebsiteId,
        category_name: &str,
        banner: Banner,
    ) -> Result<(), CmsError> {
        match self
            .categories
            .get_mut(&(website_id, category_name.to_string()))
        {
            Some(mut category) => {
                category.banners.push(banner);
                Ok(())
            }
            None => Err(CmsError::BannerCategoryNotFound(category_name.to_string())),
        }
    }

    /// The `get_banner_category` template callable.
    ///
    /// Silent lookups yield `None` on a miss; non-silent ones error.
    pub fn category_for(
        &self,
        name: &str,
        website_id: WebsiteId,
        silent: bool,
    ) -> Result<Option<BannerCategory>, CmsError> {
        match self.categories.get(&(website_id, name.to_string())) {
            Some(category) => Ok(Some(category.clone())),
            None if silent => Ok(None),
            None => Err(CmsError::BannerCategoryNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_banner(name: &str, sequence: i32, state: BannerState) -> Banner {
        Banner {
            name: name.to_string(),
            sequence,
            state,
            content: BannerContent::RemoteImage {
                url: format!("https://cdn.example.com/{name}.png"),
                click_url: format!("/promo/{name}"),
                alternative_text: name.to_string(),
                width: 468,
                height: 60,
            },
        }
    }

    #[test]
    fn published_banners_filter_and_order() {
        let mut category = BannerCategory::new("sidebar", 1);
        category.banners = vec![
            image_banner("late", 20, BannerState::Published),
            image_banner("gone", 5, BannerState::Archived),
            image_banner("early", 10, BannerState::Published),
        ];

        let names: Vec<&str> = category
            .published_banners()
            .iter()
            .map(|banner| banner.name.as_str())
            .collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn image_html_substitutes_all_attributes() {
        let banner = Banner {
            name: "sale".to_string(),
            sequence: 1,
            state: BannerState::Published,
            content: BannerContent::Image {
                url: "/static/sale.png".to_string(),
                click_url: "/sale".to_string(),
                alternative_text: "Sale".to_string(),
                width: 728,
                height: 90,
            },
        };
        assert_eq!(
            banner.html(),
            r#"<a href="/sale"><img src="/static/sale.png" alt="Sale" width="728" height="90"/></a>"#
        );
    }

    #[test]
    fn custom_code_passes_through() {
        let banner = Banner {
            name: "script".to_string(),
            sequence: 1,
            state: BannerState::Published,
            content: BannerContent::CustomCode {
                code: "<div>ad</div>".to_string(),
            },
        };
        assert_eq!(banner.html(), "<div>ad</div>");
    }

    #[test]
    fn category_lookup_is_website_scoped() {
        let service = BannerService::new();
        service.add_category(BannerCategory::new("sidebar", 1));

        assert!(service.category_for("sidebar", 1, true).unwrap().is_some());
        assert!(service.category_for("sidebar", 2, true).unwrap().is_none());
        assert!(matches!(
            service.category_for("sidebar", 2, false),
            Err(CmsError::BannerCategoryNotFound(_))
        ));
    }

    #[test]
    fn add_banner_requires_an_existing_category() {
        let service = BannerService::new();
        service.add_category(BannerCategory::new("sidebar", 1));
        service
            .add_banner(1, "sidebar", image_banner("sale", 1, BannerState::Published))
            .unwrap();

        let err = service
            .add_banner(1, "footer", image_banner("sale", 1, BannerState::Published))
            .unwrap_err();
        assert!(matches!(err, CmsError::BannerCategoryNotFound(_)));
    }
}
