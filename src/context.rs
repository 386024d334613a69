use serde::{Deserialize, Serialize};

/// Identifier of the website (tenant) a request is being served for.
pub type WebsiteId = i64;

/// Request-scoped tenant, user and locale information.
///
/// Tenant isolation is enforced purely by carrying these values into every
/// lookup filter and cache key. There is no per-tenant storage instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestContext {
    /// Database / schema identity of the installation.
    pub database: String,
    /// Website the request is scoped to.
    pub website_id: WebsiteId,
    /// Acting user.
    pub user_id: i64,
    /// Active locale tag, e.g. `en` or `de_DE`.
    pub locale: String,
}

impl RequestContext {
    pub fn new(
        database: impl Into<String>,
        website_id: WebsiteId,
        user_id: i64,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            website_id,
            user_id,
            locale: locale.into(),
        }
    }
}
