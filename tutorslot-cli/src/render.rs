//! TUI rendering for tutorslot types.
//!
//! Extension traits that add colored terminal rendering to tutorslot-core
//! types using owo_colors, plus a `CalendarView` that prints occurrences.

use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use tutorslot_core::view::CalendarView;
use tutorslot_core::{Applied, Occurrence, ToggleAction, WeekdayCalendar, WeekdayKey};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ToggleAction {
    fn render(&self) -> String {
        match self {
            ToggleAction::Added => "+".green().to_string(),
            ToggleAction::Removed => "-".red().to_string(),
            ToggleAction::Ignored => "·".dimmed().to_string(),
        }
    }
}

impl Render for WeekdayKey {
    fn render(&self) -> String {
        let name = format!("{:<10}", capitalize(self.as_str()));
        if self.is_weekend() {
            name.dimmed().to_string()
        } else {
            name.bold().to_string()
        }
    }
}

impl Render for WeekdayCalendar {
    fn render(&self) -> String {
        if self.is_empty() {
            return "No availability set".dimmed().to_string();
        }

        self.iter()
            .map(|(day, slots)| {
                let labels = if slots.is_empty() {
                    "-".dimmed().to_string()
                } else {
                    slots
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                format!("{} {}", day.render(), labels)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One-line summary of a mutation, with its save warning if any.
pub fn render_applied(applied: &Applied<ToggleAction>, day: WeekdayKey, time: &str) -> String {
    let line = match applied.value {
        ToggleAction::Ignored => format!("{} {} {} unchanged", applied.value.render(), day, time)
            .dimmed()
            .to_string(),
        action => format!("{} {} {} {}", action.render(), day, time, action),
    };

    match &applied.warning {
        Some(warning) => format!("{}\n{}", line, warning.to_string().yellow()),
        None => line,
    }
}

/// Keeps the latest rendering of occurrences, grouped by day, for printing.
pub struct TerminalView {
    today: NaiveDate,
    screen: String,
}

impl TerminalView {
    pub fn new() -> Self {
        TerminalView {
            today: Local::now().date_naive(),
            screen: String::new(),
        }
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarView for TerminalView {
    fn render_events(&mut self, occurrences: &[Occurrence]) {
        self.screen = render_occurrences(occurrences, self.today);
    }
}

pub fn render_occurrences(occurrences: &[Occurrence], today: NaiveDate) -> String {
    if occurrences.is_empty() {
        return "No upcoming slots".dimmed().to_string();
    }

    let mut lines = Vec::new();
    let mut current_date: Option<NaiveDate> = None;

    for occurrence in occurrences {
        if current_date != Some(occurrence.date) {
            if current_date.is_some() {
                lines.push(String::new());
            }
            lines.push(format_date_label(occurrence.date, today).bold().to_string());
            current_date = Some(occurrence.date);
        }

        lines.push(format!(
            "  {}–{}",
            occurrence.start.format("%H:%M"),
            occurrence.end.format("%H:%M")
        ));
    }

    lines.join("\n")
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutorslot_core::TimeSlot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date_label() {
        let today = date(2025, 3, 17);
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(date(2025, 3, 18), today), "Tomorrow");
        assert_eq!(format_date_label(date(2025, 3, 19), today), "Wed Mar 19");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("monday"), "Monday");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_render_occurrences_groups_by_day() {
        let today = date(2025, 3, 17);
        let slot = |label: &str| TimeSlot::parse(label).unwrap();
        let occurrences = vec![
            Occurrence::new(WeekdayKey::Monday, slot("09:00"), today),
            Occurrence::new(WeekdayKey::Monday, slot("10:30"), today),
            Occurrence::new(WeekdayKey::Wednesday, slot("14:00"), date(2025, 3, 19)),
        ];

        let output = render_occurrences(&occurrences, today);
        assert!(output.contains("Today"));
        assert!(output.contains("09:00–10:00"));
        assert!(output.contains("10:30–11:30"));
        assert!(output.contains("Wed Mar 19"));
        assert_eq!(output.matches("Today").count(), 1);
    }

    #[test]
    fn test_terminal_view_default_starts_blank() {
        let mut view = TerminalView::default();
        assert!(view.screen().is_empty());

        view.render_events(&[]);
        assert!(view.screen().contains("No upcoming slots"));
    }

    #[test]
    fn test_render_occurrences_empty() {
        let output = render_occurrences(&[], date(2025, 3, 17));
        assert!(output.contains("No upcoming slots"));
    }
}
