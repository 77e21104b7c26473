use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::db::DbPool;
use crate::errors::{AppError, render};
use crate::models::event;
use crate::templates_structs::EventsPageTemplate;
use crate::view::{EventListView, HttpEventSource};

/// GET /api/events — all event records as a JSON array.
///
/// Same contract shape as the archive endpoint: 200 with an array (empty
/// table gives `[]`), 500 with `{"error": <message>}` on store failure.
pub async fn api_list(pool: web::Data<DbPool>) -> HttpResponse {
    let result = pool
        .get()
        .map_err(|e| e.to_string())
        .and_then(|conn| event::find_all(&conn).map_err(|e| e.to_string()));
    match result {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(msg) => {
            log::error!("events query failed: {msg}");
            HttpResponse::InternalServerError().json(json!({ "error": msg }))
        }
    }
}

/// GET /events — run one load cycle of the event list view and render it.
pub async fn page(source: web::Data<HttpEventSource>) -> Result<HttpResponse, AppError> {
    let mut view = EventListView::new();
    view.load(source.get_ref()).await;

    let tmpl = EventsPageTemplate::from_view(&view);
    render(tmpl)
}
