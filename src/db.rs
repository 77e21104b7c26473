use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

use crate::models::event::EventRecord;

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

const EVENTS_SEED: &str = include_str!("../data/seed/events.json");

pub fn init_pool(database_url: &str) -> DbPool {
    let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        Ok(())
    });
    Pool::builder()
        .max_size(8)
        .build(manager)
        .expect("Failed to create DB pool")
}

pub fn run_migrations(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");
    log::info!("Database migrations complete");
}

/// Seed the events and digital_archive tables from bundled data when empty,
/// so a fresh checkout serves a populated site.
pub fn seed(pool: &DbPool) {
    let conn = pool.get().expect("Failed to get DB connection for seeding");

    let event_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
        .expect("Failed to count events");
    if event_count == 0 {
        let records: Vec<EventRecord> =
            serde_json::from_str(EVENTS_SEED).unwrap_or_else(|e| panic!("Bad events seed JSON: {e}"));
        let inserted = records.len();
        for ev in &records {
            conn.execute(
                "INSERT INTO events (id, title, date, time, location, description, image, type, attendees, status) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    ev.id,
                    ev.title,
                    ev.date,
                    ev.time,
                    ev.location,
                    ev.description,
                    ev.image,
                    ev.event_type,
                    ev.attendees,
                    ev.status
                ],
            )
            .expect("Failed to insert seed event");
        }
        log::info!("Seeded {inserted} events");
    }

    let archive_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM digital_archive", [], |row| row.get(0))
        .expect("Failed to count archive rows");
    if archive_count == 0 {
        conn.execute_batch(
            "INSERT INTO digital_archive (title, category, description, year, media_url) VALUES \
                ('Thangka of Guru Rinpoche', 'painting', 'Silk applique thangka restored in 1998.', 1812, '/static/archive/thangka-guru.jpg'), \
                ('Kangyur woodblock folio', 'manuscript', 'Folio 214 of the monastery Kangyur set.', 1735, '/static/archive/kangyur-214.jpg'), \
                ('Cham dance mask', 'artifact', 'Papier-mache mask used in the winter cham.', 1902, '/static/archive/cham-mask.jpg');",
        )
        .expect("Failed to seed digital_archive");
        log::info!("Seeded digital_archive");
    }
}
