//! Multi-tenant CMS extension built on top of an external record store.
//!
//! The centerpiece is the generic menu subsystem: a configured
//! [`services::menu::MenuDefinition`] names a record model and the fields that
//! act as identifier, title, URI and children collection, and the
//! [`services::menu::MenuTreeResolver`] materializes an arbitrary-depth tree of
//! display nodes from it, scoped per tenant, user and locale and cached with a
//! fixed TTL. Banner rotation and article publishing ride alongside.

pub mod cache;
pub mod config;
pub mod context;
pub mod logging;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

pub use state::Cms;
pub use utils::error::CmsError;
