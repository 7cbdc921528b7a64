//! SQLite-backed row source.

use crate::source::{EventRow, FacilityRow, FaqRow, ProfessorRow, RowSource};
use grounded_core::{AppError, AppResult};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use std::path::Path;

/// Reads topic rows from the kiosk's SQLite database.
pub struct SqliteRowSource {
    conn: Connection,
}

impl SqliteRowSource {
    /// Open an existing database read-only.
    ///
    /// A missing or unopenable file is reported as `IndexUnavailable`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if !db_path.exists() {
            return Err(AppError::IndexUnavailable(format!(
                "Database not found: {:?}",
                db_path
            )));
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            AppError::IndexUnavailable(format!("Failed to open database {:?}: {}", db_path, e))
        })?;

        tracing::debug!("Opened SQLite row source at {:?}", db_path);
        Ok(Self { conn })
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Run a query and map every row, reporting failures as `IndexUnavailable`.
    fn query_rows<T, F>(&self, table: &str, sql: &str, params: &[String], map: F) -> AppResult<Vec<T>>
    where
        F: Fn(&Row<'_>) -> rusqlite::Result<T>,
    {
        let unavailable =
            |e: rusqlite::Error| AppError::IndexUnavailable(format!("Failed to query {}: {}", table, e));

        let mut stmt = self.conn.prepare(sql).map_err(unavailable)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| map(row))
            .map_err(unavailable)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(unavailable)?;

        tracing::debug!("Loaded {} rows from {}", rows.len(), table);
        Ok(rows)
    }
}

impl RowSource for SqliteRowSource {
    fn faqs(&self, categories: &[&str]) -> AppResult<Vec<FaqRow>> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=categories.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT question, answer, category FROM faqs \
             WHERE LOWER(category) IN ({}) AND is_active = 1 \
             ORDER BY priority DESC, rowid",
            placeholders
        );
        let params: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();

        self.query_rows("faqs", &sql, &params, |row| {
            Ok(FaqRow {
                question: text_at(row, 0)?,
                answer: text_at(row, 1)?,
                category: text_at(row, 2)?,
            })
        })
    }

    fn professors(&self) -> AppResult<Vec<ProfessorRow>> {
        self.query_rows(
            "professors",
            "SELECT full_name, position, department, email, phone, description \
             FROM professors ORDER BY rowid",
            &[],
            |row| {
                Ok(ProfessorRow {
                    full_name: text_at(row, 0)?,
                    position: text_at(row, 1)?,
                    department: text_at(row, 2)?,
                    email: text_at(row, 3)?,
                    phone: text_at(row, 4)?,
                    description: text_at(row, 5)?,
                })
            },
        )
    }

    fn facilities(&self) -> AppResult<Vec<FacilityRow>> {
        self.query_rows(
            "facilities",
            "SELECT name, type, location, capacity, description FROM facilities \
             WHERE LOWER(status) = 'active' ORDER BY rowid",
            &[],
            |row| {
                Ok(FacilityRow {
                    name: text_at(row, 0)?,
                    kind: text_at(row, 1)?,
                    location: text_at(row, 2)?,
                    capacity: int_at(row, 3)?,
                    description: text_at(row, 4)?,
                })
            },
        )
    }

    fn events(&self) -> AppResult<Vec<EventRow>> {
        self.query_rows(
            "events",
            "SELECT title, description, event_date, event_end_date, location, department, organizer \
             FROM events WHERE is_active = 1 ORDER BY event_date, rowid",
            &[],
            |row| {
                Ok(EventRow {
                    title: text_at(row, 0)?,
                    description: text_at(row, 1)?,
                    event_date: text_at(row, 2)?,
                    event_end_date: text_at(row, 3)?,
                    location: text_at(row, 4)?,
                    department: text_at(row, 5)?,
                    organizer: text_at(row, 6)?,
                })
            },
        )
    }
}

/// Read any column type as text; NULL becomes `None`.
fn text_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

/// Read an integer column; unparseable values become `None`.
fn int_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) => Some(f as i64),
        ValueRef::Text(t) => String::from_utf8_lossy(t).trim().parse().ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

/// Open `db_path` for writing, creating the file and its tables when missing.
pub fn create_database(db_path: &Path) -> AppResult<Connection> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path).map_err(|e| {
        AppError::Knowledge(format!("Failed to create database {:?}: {}", db_path, e))
    })?;
    init_schema(&conn)?;

    tracing::info!("Database ready at {:?}", db_path);
    Ok(conn)
}

/// Create the kiosk tables if they do not exist.
///
/// Content columns are nullable; the index tolerates incomplete rows.
pub fn init_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS faqs (
            id TEXT PRIMARY KEY,
            question TEXT,
            answer TEXT,
            category TEXT,
            priority INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS professors (
            id TEXT PRIMARY KEY,
            full_name TEXT,
            position TEXT,
            department TEXT,
            email TEXT,
            phone TEXT,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS facilities (
            id TEXT PRIMARY KEY,
            name TEXT,
            type TEXT,
            location TEXT,
            capacity INTEGER,
            status TEXT NOT NULL DEFAULT 'active',
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            title TEXT,
            description TEXT,
            event_date TEXT,
            event_end_date TEXT,
            location TEXT,
            department TEXT,
            organizer TEXT,
            event_type TEXT NOT NULL DEFAULT 'event',
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_faqs_category ON faqs(category);
        CREATE INDEX IF NOT EXISTS idx_events_date ON events(event_date);
        "#,
    )
    .map_err(|e| AppError::Knowledge(format!("Failed to create tables: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::KnowledgeIndex;
    use crate::topic::TopicId;
    use rusqlite::params;
    use tempfile::TempDir;

    fn seeded_db(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("school.db");
        let conn = Connection::open(&path).unwrap();
        init_schema(&conn).unwrap();

        let faqs = [
            ("f1", "How do I enroll?", "Fill out the form at the registrar.", "admissions", 0, 1),
            ("f2", "Entrance exam?", "The entrance exam is every Saturday.", "Enrollment", 5, 1),
            ("f3", "Old policy?", "Retired answer.", "admissions", 9, 0),
            ("f4", "Scholarships?", "Academic scholarships cover 50% of tuition.", "scholarships", 0, 1),
            ("f5", "Where is the school?", "Westmead is in Batangas City.", "general", 0, 1),
            ("f6", "Parking?", "Parking is free.", "campus", 0, 1),
        ];
        for (id, q, a, cat, priority, active) in faqs {
            conn.execute(
                "INSERT INTO faqs (id, question, answer, category, priority, is_active) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, q, a, cat, priority, active],
            )
            .unwrap();
        }

        conn.execute(
            "INSERT INTO professors (id, full_name, position, department, email) VALUES ('p1', 'Ada Reyes', 'Dean', 'Engineering', 'ada@westmead.edu')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO professors (id, full_name, position, department) VALUES ('p2', 'Ben Cruz', NULL, 'Mathematics')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO facilities (id, name, type, location, capacity, status) VALUES ('l1', 'Main Library', 'library', 'Building A', '120', 'Active')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO facilities (id, name, type, location, status) VALUES ('l2', 'Old Gym', 'gym', 'Annex', 'closed')",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO events (id, title, description, event_date, location, is_active) VALUES ('e2', 'Science Fair', 'Student projects', '2026-06-01 10:00:00', 'Gym', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO events (id, title, description, event_date, location, organizer, is_active) VALUES ('e1', 'Career Workshop', 'Resume clinic', '2026-05-05 09:00:00', 'Hall B', 'Guidance Office', 1)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO events (id, title, description, event_date, is_active) VALUES ('e3', 'Cancelled Gala', 'No longer happening', '2026-04-01', 0)",
            [],
        )
        .unwrap();

        path
    }

    #[test]
    fn test_faq_filters_and_priority_order() {
        let temp = TempDir::new().unwrap();
        let source = SqliteRowSource::open(&seeded_db(temp.path())).unwrap();

        let rows = source.faqs(&["admissions", "enrollment"]).unwrap();
        let answers: Vec<_> = rows.iter().filter_map(|r| r.answer.as_deref()).collect();
        assert_eq!(
            answers,
            vec![
                "The entrance exam is every Saturday.",
                "Fill out the form at the registrar."
            ]
        );

        assert!(source.faqs(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_facility_status_and_text_capacity() {
        let temp = TempDir::new().unwrap();
        let source = SqliteRowSource::open(&seeded_db(temp.path())).unwrap();

        let rows = source.facilities().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Main Library"));
        assert_eq!(rows[0].capacity, Some(120));
    }

    #[test]
    fn test_events_active_and_date_ordered() {
        let temp = TempDir::new().unwrap();
        let source = SqliteRowSource::open(&seeded_db(temp.path())).unwrap();

        let titles: Vec<_> = source
            .events()
            .unwrap()
            .into_iter()
            .filter_map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Career Workshop", "Science Fair"]);
    }

    #[test]
    fn test_build_index_from_sqlite() {
        let temp = TempDir::new().unwrap();
        let source = SqliteRowSource::open(&seeded_db(temp.path())).unwrap();
        let index = KnowledgeIndex::build(&source).unwrap();

        assert_eq!(index.topics().len(), 6);

        let faculty = index.topic(TopicId::Faculty).unwrap();
        assert_eq!(
            faculty.evidence(),
            &[
                "Ada Reyes is the Dean in Engineering. Contact: ada@westmead.edu.".to_string(),
                "Ben Cruz is the staff member in Mathematics.".to_string(),
            ]
        );

        let general = index.topic(TopicId::General).unwrap();
        assert_eq!(general.evidence(), &["Westmead is in Batangas City.".to_string()]);

        // "campus" FAQs belong to no topic
        assert!(index
            .topics()
            .iter()
            .flat_map(|t| t.evidence())
            .all(|e| e != "Parking is free."));
    }

    #[test]
    fn test_mistyped_columns_degrade() {
        let temp = TempDir::new().unwrap();
        let path = seeded_db(temp.path());
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO facilities (id, name, type, location, capacity, status) VALUES ('l3', 'Chapel', 'hall', 'East Wing', 'large', 'active')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO events (id, title, event_date, location, is_active) VALUES ('e4', 'Recognition Day', 20260610, 7, 1)",
            [],
        )
        .unwrap();
        drop(conn);

        let source = SqliteRowSource::open(&path).unwrap();
        let facilities = source.facilities().unwrap();
        let chapel = facilities
            .iter()
            .find(|f| f.name.as_deref() == Some("Chapel"))
            .unwrap();
        assert_eq!(chapel.capacity, None);

        let events = source.events().unwrap();
        let recognition = events
            .iter()
            .find(|e| e.title.as_deref() == Some("Recognition Day"))
            .unwrap();
        assert_eq!(recognition.event_date.as_deref(), Some("20260610"));
        assert_eq!(recognition.location.as_deref(), Some("7"));

        let index = KnowledgeIndex::build(&source).unwrap();
        assert!(index
            .topic(TopicId::Facilities)
            .unwrap()
            .evidence()
            .contains(&"Chapel is a hall located at East Wing.".to_string()));
    }

    #[test]
    fn test_create_database_makes_file_and_tables() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("kiosk").join("school.db");

        let conn = create_database(&path).unwrap();
        drop(conn);
        assert!(path.exists());

        let index = KnowledgeIndex::build(&SqliteRowSource::open(&path).unwrap()).unwrap();
        assert_eq!(index.evidence_count(), 0);

        // Existing tables are left alone
        create_database(&path).unwrap();
    }

    #[test]
    fn test_missing_database_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let err = SqliteRowSource::open(&temp.path().join("absent.db"))
            .err()
            .unwrap();
        assert!(err.is_index_unavailable());
    }

    #[test]
    fn test_missing_tables_fail_the_build() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        let source = SqliteRowSource::open(&path).unwrap();
        let err = KnowledgeIndex::build(&source).unwrap_err();
        assert!(err.is_index_unavailable());
    }
}
