pub mod article;
pub mod banner;
pub mod link;
pub mod menu;

pub use article::ArticleService;
pub use banner::BannerService;
pub use link::{CmsLink, LinkRegistry, UrlBuilder};
pub use menu::{MenuDefinition, MenuDefinitionRegistry, MenuNode, MenuTreeResolver};
