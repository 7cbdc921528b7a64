//! Evidence templates: one human-readable sentence per source row.
//!
//! Optional fields add a clause only when they hold non-blank text. Missing
//! required fields fall back to a neutral placeholder so every row yields a
//! non-empty sentence.

use crate::source::{EventRow, FacilityRow, FaqRow, ProfessorRow};

/// Render an FAQ row: its answer, verbatim.
pub fn render_faq(row: &FaqRow) -> String {
    if let Some(answer) = present(&row.answer) {
        return answer.to_string();
    }

    match present(&row.question) {
        Some(question) => format!("No answer is recorded for: {}", question),
        None => "No answer is recorded for this question.".to_string(),
    }
}

/// Render a faculty member.
///
/// `Ada Reyes is the Dean in Engineering. Contact: ada@school.edu. Phone: 555-0100. Teaches robotics.`
pub fn render_professor(row: &ProfessorRow) -> String {
    let mut sentence = Sentence::new(format!(
        "{} is the {} in {}.",
        required(&row.full_name, "An unnamed faculty member"),
        required(&row.position, "staff member"),
        required(&row.department, "an unspecified department"),
    ));

    sentence.labeled("Contact", present(&row.email));
    sentence.labeled("Phone", present(&row.phone));
    sentence.free(present(&row.description));
    sentence.finish()
}

/// Render a facility.
///
/// `Main Library is a library located at Building A. Capacity: 120. Open until 8 PM.`
pub fn render_facility(row: &FacilityRow) -> String {
    let kind = required(&row.kind, "facility");
    let mut sentence = Sentence::new(format!(
        "{} is {} {} located at {}.",
        required(&row.name, "An unnamed facility"),
        indefinite_article(kind),
        kind,
        required(&row.location, "an unspecified location"),
    ));

    let capacity = row.capacity.filter(|c| *c > 0).map(|c| c.to_string());
    sentence.labeled("Capacity", capacity.as_deref());
    sentence.free(present(&row.description));
    sentence.finish()
}

/// Render an event.
///
/// `Career Workshop: Resume clinic. Date: 2026-05-05 09:00. Location: Hall B. Organized by: Guidance Office.`
pub fn render_event(row: &EventRow) -> String {
    let title = required(&row.title, "Untitled event");
    let lead = match present(&row.description) {
        Some(description) => format!("{}: {}", title, description),
        None => title.to_string(),
    };

    let mut sentence = Sentence::new(lead);
    sentence.close();
    sentence.labeled("Date", present(&row.event_date));
    sentence.labeled("Until", present(&row.event_end_date));
    sentence.labeled("Location", present(&row.location));
    sentence.labeled("Department", present(&row.department));
    sentence.labeled("Organized by", present(&row.organizer));
    sentence.finish()
}

/// Trimmed, non-blank field value.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    present(value).unwrap_or(fallback)
}

fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Accumulates clauses, closing each sentence before the next one starts.
struct Sentence {
    text: String,
}

impl Sentence {
    fn new(lead: String) -> Self {
        Self {
            text: lead.trim().to_string(),
        }
    }

    /// Append `Label: value.` when `value` is present.
    fn labeled(&mut self, label: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.close();
            self.text.push_str(&format!(" {}: {}", label, value));
            self.close();
        }
    }

    /// Append free text as-is when present.
    fn free(&mut self, value: Option<&str>) {
        if let Some(value) = value {
            self.close();
            self.text.push(' ');
            self.text.push_str(value);
        }
    }

    fn close(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with(|c: char| matches!(c, '.' | '!' | '?')) {
            self.text.push('.');
        }
    }

    fn finish(self) -> String {
        self.text
    }
}
