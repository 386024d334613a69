use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::{RecordId, StoreError};

/// Error taxonomy for the CMS layer.
///
/// A missing menu definition is a client-correctable condition (the template
/// asked for a menu that does not exist) and maps to 404. A missing root
/// record behind a valid definition means the configured feature points at
/// broken data and maps to 500, as do the defensive graph faults.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("menu definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("duplicate menu definition: {0}")]
    DuplicateDefinition(String),

    #[error("invalid menu definition: {0}")]
    InvalidDefinition(String),

    #[error("menu root record not found: {0}")]
    RootNotFound(String),

    #[error("cyclic menu graph at {model} record {id}")]
    CyclicMenuGraph { model: String, id: RecordId },

    #[error("menu tree exceeds depth limit of {0}")]
    MenuTreeTooDeep(usize),

    #[error("banner category not found: {0}")]
    BannerCategoryNotFound(String),

    #[error("article category not found: {0}")]
    ArticleCategoryNotFound(String),

    #[error("article not found: {0}")]
    ArticleNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            CmsError::DefinitionNotFound(_)
            | CmsError::BannerCategoryNotFound(_)
            | CmsError::ArticleCategoryNotFound(_)
            | CmsError::ArticleNotFound(_) => {
                tracing::warn!("Not found: {}", self);
                (StatusCode::NOT_FOUND, "NotFound")
            }
            CmsError::DuplicateDefinition(_) | CmsError::InvalidDefinition(_) => {
                tracing::warn!("Bad request: {}", self);
                (StatusCode::BAD_REQUEST, "BadRequest")
            }
            CmsError::RootNotFound(_)
            | CmsError::CyclicMenuGraph { .. }
            | CmsError::MenuTreeTooDeep(_)
            | CmsError::Store(_) => {
                tracing::error!("Internal error: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError")
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
