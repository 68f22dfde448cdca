//! Result formatting for people listings
//!
//! Two renderings of the same listing: a preformatted text block and a structured
//! list the HTML view iterates over. Both are pure and numbered from 1.

use crate::person::Person;
use serde::Serialize;

/// Placeholder shown for a person with no known works
pub const NO_WORKS_PLACEHOLDER: &str = "No famous works listed.";

/// One person in the structured rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonCard {
    pub position: usize,
    pub name: String,
    pub department: String,
    pub works: Vec<WorkLine>,
}

impl PersonCard {
    pub fn has_works(&self) -> bool {
        !self.works.is_empty()
    }
}

/// One known work in the structured rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkLine {
    pub position: usize,
    pub title: String,
    pub media: String,
    pub released: Option<String>,
}

impl WorkLine {
    /// Release date, or an empty string when unknown
    pub fn release_label(&self) -> &str {
        self.released.as_deref().unwrap_or_default()
    }
}

/// Render people as the text block shown in the results panel
pub fn format_text(people: &[Person]) -> String {
    let mut out = String::new();

    for (index, person) in people.iter().enumerate() {
        out.push_str(&format!("Person {}:\n", index + 1));
        out.push_str(&format!("Name: {}\n", person.name));
        out.push_str(&format!("Known for: {}\n", person.known_for_department));

        if person.known_for.is_empty() {
            out.push_str(NO_WORKS_PLACEHOLDER);
            out.push('\n');
        } else {
            out.push_str("Famous works:\n");
            for (work_index, work) in person.known_for.iter().enumerate() {
                out.push_str(&format!(
                    "  {}. {} ({})",
                    work_index + 1,
                    work.display_title(),
                    work.media_type
                ));
                if let Some(date) = work.display_date() {
                    out.push_str(&format!(" - Released: {}", date));
                }
                out.push('\n');
            }
        }

        out.push('\n');
    }

    out
}

/// Render people as a list of cards
pub fn format_cards(people: &[Person]) -> Vec<PersonCard> {
    people
        .iter()
        .enumerate()
        .map(|(index, person)| PersonCard {
            position: index + 1,
            name: person.name.clone(),
            department: person.known_for_department.clone(),
            works: person
                .known_for
                .iter()
                .enumerate()
                .map(|(work_index, work)| WorkLine {
                    position: work_index + 1,
                    title: work.display_title().to_string(),
                    media: work.media_type.to_string(),
                    released: work.display_date().map(str::to_string),
                })
                .collect(),
        })
        .collect()
}
