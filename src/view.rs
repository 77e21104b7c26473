//! Fetch-and-render lifecycle for the event list.
//!
//! One view instance owns one `{records, loading, error}` cell and walks a
//! single forward path per load cycle: Idle -> Loading -> Success | Failure.
//! A generation counter guards against a fetch result landing after the view
//! has been reset while the request was in flight.

use crate::models::event::EventRecord;

const FETCH_FAILED_MSG: &str = "Failed to fetch events";
const UNKNOWN_ERROR_MSG: &str = "Unknown error";

/// Raw outcome of a completed HTTP exchange, before the status check and
/// body parse. Kept dumb so sources stay trivial to stub.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that never produced a response (DNS, refused connection,
/// aborted transfer). May or may not carry a message.
#[derive(Debug, Clone)]
pub struct FetchError {
    pub message: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()) }
    }

    pub fn unknown() -> Self {
        Self { message: None }
    }
}

/// Where the view gets its JSON from. The real implementation talks HTTP;
/// tests substitute canned outcomes.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn fetch_events(&self) -> Result<FetchResponse, FetchError>;
}

/// `EventSource` that GETs a fixed endpoint URL.
pub struct HttpEventSource {
    client: reqwest::Client,
    url: String,
}

impl HttpEventSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into() }
    }
}

impl EventSource for HttpEventSource {
    async fn fetch_events(&self) -> Result<FetchResponse, FetchError> {
        let res = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;
        Ok(FetchResponse { status, body })
    }
}

/// Ties a fetch result to the load cycle that started it. Opaque so a
/// stale ticket cannot be forged or reused across resets.
#[derive(Debug)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct EventListView {
    events: Vec<EventRecord>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl EventListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter the Loading state and stamp a ticket for this cycle.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Apply a fetch outcome. A ticket from a cycle that was reset while
    /// the fetch was in flight is discarded, leaving the view untouched.
    ///
    /// The status check runs before the body parse so a non-OK error body
    /// is never mistaken for data. Every failure kind collapses into one
    /// user-visible message.
    pub fn apply(&mut self, ticket: LoadTicket, outcome: Result<FetchResponse, FetchError>) {
        if ticket.0 != self.generation {
            log::debug!("Discarding stale fetch result (generation {})", ticket.0);
            return;
        }
        self.loading = false;
        match outcome {
            Ok(res) if !res.ok() => {
                self.error = Some(FETCH_FAILED_MSG.to_string());
            }
            Ok(res) => match serde_json::from_str::<Vec<EventRecord>>(&res.body) {
                Ok(records) => self.events = records,
                Err(e) => self.error = Some(e.to_string()),
            },
            Err(e) => {
                self.error = Some(e.message.unwrap_or_else(|| UNKNOWN_ERROR_MSG.to_string()));
            }
        }
    }

    /// Run one full load cycle against a source.
    pub async fn load<S: EventSource>(&mut self, source: &S) {
        let ticket = self.begin_load();
        let outcome = source.fetch_events().await;
        self.apply(ticket, outcome);
    }

    /// Tear the view back down to Idle. Any fetch still in flight for a
    /// previous cycle will be discarded when its result arrives.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.error = None;
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        outcome: Result<FetchResponse, FetchError>,
    }

    impl EventSource for StubSource {
        async fn fetch_events(&self) -> Result<FetchResponse, FetchError> {
            self.outcome.clone()
        }
    }

    fn ok_source(status: u16, body: &str) -> StubSource {
        StubSource { outcome: Ok(FetchResponse { status, body: body.to_string() }) }
    }

    const ONE_EVENT: &str = r#"[{"id":1,"title":"Losar Festival","date":"2025-02-10","time":"09:00","location":"Main Hall","type":"Festival"}]"#;

    #[tokio::test]
    async fn load_success_stores_records() {
        let mut view = EventListView::new();
        view.load(&ok_source(200, ONE_EVENT)).await;

        assert!(!view.is_loading());
        assert_eq!(view.error(), None);
        assert_eq!(view.events().len(), 1);
        let ev = &view.events()[0];
        assert_eq!(ev.title, "Losar Festival");
        assert_eq!(ev.category().badge_class(), "badge-festival");
    }

    #[tokio::test]
    async fn non_ok_status_fails_before_parsing_body() {
        // A 500 with a well-formed array body must still fail.
        let mut view = EventListView::new();
        view.load(&ok_source(500, ONE_EVENT)).await;

        assert!(!view.is_loading());
        assert!(view.events().is_empty());
        assert_eq!(view.error(), Some("Failed to fetch events"));
    }

    #[tokio::test]
    async fn rejected_fetch_surfaces_its_message() {
        let mut view = EventListView::new();
        let source = StubSource { outcome: Err(FetchError::new("connection refused")) };
        view.load(&source).await;

        assert!(!view.is_loading());
        assert!(view.events().is_empty());
        assert_eq!(view.error(), Some("connection refused"));
    }

    #[tokio::test]
    async fn rejected_fetch_without_message_falls_back() {
        let mut view = EventListView::new();
        let source = StubSource { outcome: Err(FetchError::unknown()) };
        view.load(&source).await;

        assert_eq!(view.error(), Some("Unknown error"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_failure() {
        let mut view = EventListView::new();
        view.load(&ok_source(200, "{not json")).await;

        assert!(!view.is_loading());
        assert!(view.events().is_empty());
        assert!(view.error().is_some_and(|e| !e.is_empty()));
    }

    #[tokio::test]
    async fn empty_array_is_success() {
        let mut view = EventListView::new();
        view.load(&ok_source(200, "[]")).await;

        assert!(!view.is_loading());
        assert_eq!(view.error(), None);
        assert!(view.events().is_empty());
    }

    #[test]
    fn begin_load_enters_loading_and_clears_error() {
        let mut view = EventListView::new();
        let ticket = view.begin_load();
        view.apply(ticket, Err(FetchError::unknown()));
        assert!(view.error().is_some());

        let _ticket = view.begin_load();
        assert!(view.is_loading());
        assert_eq!(view.error(), None);
    }

    #[test]
    fn reset_during_flight_discards_late_result() {
        let mut view = EventListView::new();
        let ticket = view.begin_load();
        view.reset();
        view.apply(ticket, Ok(FetchResponse { status: 200, body: ONE_EVENT.to_string() }));

        assert!(view.events().is_empty());
        assert!(!view.is_loading());
        assert_eq!(view.error(), None);
    }

    #[test]
    fn only_the_current_cycle_applies() {
        let mut view = EventListView::new();
        let stale = view.begin_load();
        let current = view.begin_load();
        view.apply(stale, Ok(FetchResponse { status: 200, body: ONE_EVENT.to_string() }));
        assert!(view.events().is_empty());

        view.apply(current, Ok(FetchResponse { status: 200, body: ONE_EVENT.to_string() }));
        assert_eq!(view.events().len(), 1);
    }
}
