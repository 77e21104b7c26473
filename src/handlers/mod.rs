pub mod archive_handlers;
pub mod event_handlers;
