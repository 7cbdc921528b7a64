//! Database seeding from a YAML file.
//!
//! ```yaml
//! faqs:
//!   - question: How do I enroll?
//!     answer: Fill out the online form.
//!     category: admissions
//!     priority: 10
//! professors:
//!   - fullName: Ada Reyes
//!     position: Dean
//!     department: Engineering
//! facilities:
//!   - name: Main Library
//!     type: library
//!     location: Building A
//!     capacity: 120
//! events:
//!   - title: Career Workshop
//!     eventDate: 2026-05-05 09:00
//! ```

use grounded_core::{AppError, AppResult};
use rusqlite::{params, Connection};
use serde::Deserialize;
use std::path::Path;

/// Rows to insert, grouped by table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub faqs: Vec<SeedFaq>,
    pub professors: Vec<SeedProfessor>,
    pub facilities: Vec<SeedFacility>,
    pub events: Vec<SeedEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFaq {
    pub id: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedProfessor {
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedFacility {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    #[serde(default = "default_status")]
    pub status: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEvent {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub event_end_date: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub organizer: Option<String>,
    #[serde(default = "default_event_type")]
    pub event_type: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Rows written per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub faqs: usize,
    pub professors: usize,
    pub facilities: usize,
    pub events: usize,
}

fn default_active() -> bool {
    true
}

fn default_status() -> String {
    "active".to_string()
}

fn default_event_type() -> String {
    "event".to_string()
}

/// Read seed rows from a YAML file.
pub fn load_seed(path: &Path) -> AppResult<SeedData> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read seed file {:?}: {}", path, e))
    })?;

    serde_yaml::from_str(&contents)
        .map_err(|e| AppError::Knowledge(format!("Failed to parse seed file {:?}: {}", path, e)))
}

/// Insert `data` in one transaction.
///
/// Rows without an `id` get `<table>-<n>` from their position in the file,
/// and rows with an existing id are replaced, so seeding the same file twice
/// leaves one copy of each row.
pub fn seed_database(conn: &mut Connection, data: &SeedData) -> AppResult<SeedStats> {
    let failed = |table: &str, e: rusqlite::Error| {
        AppError::Knowledge(format!("Failed to seed {}: {}", table, e))
    };

    let tx = conn.transaction().map_err(|e| failed("database", e))?;

    for (i, faq) in data.faqs.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO faqs (id, question, answer, category, priority, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row_id(&faq.id, "faq", i),
                faq.question,
                faq.answer,
                faq.category,
                faq.priority,
                faq.active,
            ],
        )
        .map_err(|e| failed("faqs", e))?;
    }

    for (i, prof) in data.professors.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO professors (id, full_name, position, department, email, phone, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row_id(&prof.id, "professor", i),
                prof.full_name,
                prof.position,
                prof.department,
                prof.email,
                prof.phone,
                prof.description,
            ],
        )
        .map_err(|e| failed("professors", e))?;
    }

    for (i, fac) in data.facilities.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO facilities (id, name, type, location, capacity, status, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                row_id(&fac.id, "facility", i),
                fac.name,
                fac.kind,
                fac.location,
                fac.capacity,
                fac.status,
                fac.description,
            ],
        )
        .map_err(|e| failed("facilities", e))?;
    }

    for (i, event) in data.events.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO events (id, title, description, event_date, event_end_date, location, department, organizer, event_type, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                row_id(&event.id, "event", i),
                event.title,
                event.description,
                event.event_date,
                event.event_end_date,
                event.location,
                event.department,
                event.organizer,
                event.event_type,
                event.active,
            ],
        )
        .map_err(|e| failed("events", e))?;
    }

    tx.commit().map_err(|e| failed("database", e))?;

    let stats = SeedStats {
        faqs: data.faqs.len(),
        professors: data.professors.len(),
        facilities: data.facilities.len(),
        events: data.events.len(),
    };
    tracing::info!("Seeded database: {:?}", stats);
    Ok(stats)
}

fn row_id(id: &Option<String>, prefix: &str, position: usize) -> String {
    match id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None => format!("{}-{}", prefix, position + 1),
    }
}
