use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::archive::ArchiveStore;

/// GET /api/digital_archive — relay every row of the archive collection.
///
/// A store failure is surfaced immediately as `{"error": <message>}` with
/// status 500; no retries, no partial results.
pub async fn list(store: web::Data<dyn ArchiveStore>) -> HttpResponse {
    match store.fetch_all() {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("digital_archive query failed: {e}");
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
