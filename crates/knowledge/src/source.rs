//! Row source: the relational store as seen by the knowledge index.
//!
//! Every field is optional. The store's content is taken as-is, and a row
//! with missing values must still turn into evidence instead of failing the
//! load.

use grounded_core::AppResult;
use serde::{Deserialize, Serialize};

/// An active FAQ entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqRow {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
}

/// A faculty member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorRow {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

/// An active campus facility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRow {
    pub name: Option<String>,
    /// Facility type (library, gym, laboratory, ...)
    pub kind: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub description: Option<String>,
}

/// An active school event or announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub event_end_date: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub organizer: Option<String>,
}

/// The four logical queries the knowledge index needs from the store.
///
/// Implementations apply the activity filters themselves (active FAQs,
/// facilities with status `active`, active events) and return rows in a
/// stable order. Any `Err` is treated as "store unreachable" and aborts the
/// index build.
pub trait RowSource {
    /// Active FAQs whose category is one of `categories` (case-insensitive).
    fn faqs(&self, categories: &[&str]) -> AppResult<Vec<FaqRow>>;

    /// All faculty members.
    fn professors(&self) -> AppResult<Vec<ProfessorRow>>;

    /// Active facilities.
    fn facilities(&self) -> AppResult<Vec<FacilityRow>>;

    /// Active events, earliest first.
    fn events(&self) -> AppResult<Vec<EventRow>>;
}
