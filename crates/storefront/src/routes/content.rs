//! Static content route handlers.

use axum::Json;
use tracing::instrument;

use crate::content::{FAQ_ENTRIES, FaqEntry};

/// The storefront FAQ.
///
/// GET /api/content/faq
#[instrument]
pub async fn faq() -> Json<Vec<FaqEntry>> {
    Json(FAQ_ENTRIES.to_vec())
}
