use chrono::NaiveDate;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Image shown when a record supplies none.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// An event as it travels over the wire and sits in the events table.
///
/// Deserializing through this shape is the validation boundary: a response
/// body that does not match it is a parse failure, never a trusted value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Badge category derived from an event's free-text `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Festival,
    Religious,
    Cultural,
    Pilgrimage,
    Other,
}

impl EventCategory {
    /// Case-insensitive mapping; anything outside the four named
    /// categories (including absence) is `Other`.
    pub fn from_type(event_type: Option<&str>) -> Self {
        match event_type {
            Some(t) => match t.to_lowercase().as_str() {
                "festival" => EventCategory::Festival,
                "religious" => EventCategory::Religious,
                "cultural" => EventCategory::Cultural,
                "pilgrimage" => EventCategory::Pilgrimage,
                _ => EventCategory::Other,
            },
            None => EventCategory::Other,
        }
    }

    /// CSS class for the badge rendered on an event card.
    pub fn badge_class(self) -> &'static str {
        match self {
            EventCategory::Festival => "badge-festival",
            EventCategory::Religious => "badge-religious",
            EventCategory::Cultural => "badge-cultural",
            EventCategory::Pilgrimage => "badge-pilgrimage",
            EventCategory::Other => "badge-default",
        }
    }
}

impl EventRecord {
    pub fn category(&self) -> EventCategory {
        EventCategory::from_type(self.event_type.as_deref())
    }

    /// Source for the card image, falling back to the placeholder when the
    /// record carries no image or an empty string.
    pub fn image_src(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Short human-readable date ("Feb 10, 2025"). An unparseable date
    /// string is shown raw rather than dropped.
    pub fn date_display(&self) -> String {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(d) => d.format("%b %-d, %Y").to_string(),
            Err(_) => self.date.clone(),
        }
    }
}

/// Find all events, ordered by date.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<EventRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, date, time, location, description, image, type, attendees, status \
         FROM events ORDER BY date, id",
    )?;
    let events = stmt
        .query_map([], |row| {
            Ok(EventRecord {
                id: row.get("id")?,
                title: row.get("title")?,
                date: row.get("date")?,
                time: row.get("time")?,
                location: row.get("location")?,
                description: row.get("description")?,
                image: row.get("image")?,
                event_type: row.get("type")?,
                attendees: row.get("attendees")?,
                status: row.get("status")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}
