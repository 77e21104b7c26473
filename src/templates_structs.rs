use askama::Template;

use crate::models::event::EventRecord;
use crate::view::EventListView;

/// Everything a single event card needs, derived once per record.
pub struct EventCard {
    pub title: String,
    pub badge_label: String,
    pub badge_class: &'static str,
    pub date_display: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub image_src: String,
    pub attendees: String,
}

impl EventCard {
    pub fn from_record(record: &EventRecord) -> Self {
        Self {
            title: record.title.clone(),
            badge_label: record.event_type.clone().unwrap_or_default(),
            badge_class: record.category().badge_class(),
            date_display: record.date_display(),
            time: record.time.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
            image_src: record.image_src().to_string(),
            attendees: record.attendees.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsPageTemplate {
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<EventCard>,
}

impl EventsPageTemplate {
    pub fn from_view(view: &EventListView) -> Self {
        Self {
            loading: view.is_loading(),
            error: view.error().map(str::to_string),
            cards: view.events().iter().map(EventCard::from_record).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_record() -> EventRecord {
        serde_json::from_str(
            r#"{"id":1,"title":"Losar Festival","date":"2025-02-10","time":"09:00",
                "location":"Main Hall","description":"New year celebration.","type":"Festival",
                "attendees":"500+ expected"}"#,
        )
        .expect("record")
    }

    #[test]
    fn card_derives_display_fields() {
        let card = EventCard::from_record(&card_record());
        assert_eq!(card.badge_class, "badge-festival");
        assert_eq!(card.badge_label, "Festival");
        assert_eq!(card.date_display, "Feb 10, 2025");
        assert_eq!(card.image_src, "/static/placeholder.svg");
        assert_eq!(card.attendees, "500+ expected");
    }

    #[test]
    fn page_renders_cards() {
        let tmpl = EventsPageTemplate {
            loading: false,
            error: None,
            cards: vec![EventCard::from_record(&card_record())],
        };
        let html = tmpl.render().expect("render");
        assert!(html.contains("Losar Festival"));
        assert!(html.contains("badge-festival"));
        assert!(html.contains("Feb 10, 2025"));
        assert!(html.contains("/static/placeholder.svg"));
        assert!(!html.contains("Loading events"));
    }

    #[test]
    fn page_renders_error_notice() {
        let tmpl = EventsPageTemplate {
            loading: false,
            error: Some("Failed to fetch events".to_string()),
            cards: vec![],
        };
        let html = tmpl.render().expect("render");
        assert!(html.contains("Failed to fetch events"));
    }
}
