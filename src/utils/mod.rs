pub mod error;
pub mod slug;

pub use error::CmsError;
pub use slug::slugify;
