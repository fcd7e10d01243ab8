//! Terminal rendering for events and the month grid.
//!
//! Extension traits that add colored output to eventcal-core types using
//! owo_colors.

use chrono::{Local, NaiveDate, NaiveDateTime};
use eventcal_core::grid::{DayCell, MonthGrid};
use eventcal_core::{Event, Frequency, Weekday};
use owo_colors::OwoColorize;

/// Width of one day column in the month view
const CELL_WIDTH: usize = 14;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// One-line summary used by the list view
impl Render for Event {
    fn render(&self) -> String {
        let time = format!("{:>7}", self.start_date.format("%H:%M"));
        let badge = if self.is_recurring {
            let label = self
                .frequency
                .as_ref()
                .map(|f| f.as_str().to_lowercase())
                .unwrap_or_else(|| "recurring".to_string());
            format!(" ↻ {}", label).blue().to_string()
        } else {
            String::new()
        };
        let id = format!("#{}", self.id);

        format!("{} {}{} {}", time, self.title.bold(), badge, id.dimmed())
    }
}

/// Multi-line detail view
pub trait RenderDetail {
    fn render_detail(&self) -> String;
}

impl RenderDetail for Event {
    fn render_detail(&self) -> String {
        let mut lines = Vec::new();

        let mut heading = self.title.bold().to_string();
        if self.is_recurring {
            heading.push_str(&format!("  {}", "Recurring Event".blue()));
        }
        lines.push(heading);

        let description = self
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided");
        lines.push(description.dimmed().to_string());
        lines.push(String::new());

        lines.push(format!("{} {}", "Start:".dimmed(), format_timestamp(&self.start_date)));
        lines.push(format!("{} {}", "End:  ".dimmed(), format_timestamp(&self.end_date)));

        if self.is_recurring {
            lines.push(String::new());
            lines.push("Recurrence Details".bold().to_string());

            let frequency = self
                .frequency
                .as_ref()
                .map(frequency_label)
                .unwrap_or_else(|| "Not set".to_string());
            lines.push(format!("  {} {}", "Frequency:".dimmed(), frequency));

            if !self.days_of_week.is_empty() {
                let days: Vec<&str> = self.days_of_week.iter().map(Weekday::label).collect();
                lines.push(format!("  {} {}", "Days:".dimmed(), days.join(", ")));
            }

            if let Some(end) = &self.recurrence_end {
                lines.push(format!(
                    "  {} {}",
                    "Ends:".dimmed(),
                    end.format("%b %-d, %Y")
                ));
            }
        }

        lines.join("\n")
    }
}

/// "Daily", or the raw value for frequencies we do not know
fn frequency_label(frequency: &Frequency) -> String {
    match frequency {
        Frequency::Daily => "Daily".to_string(),
        Frequency::Weekly => "Weekly".to_string(),
        Frequency::Monthly => "Monthly".to_string(),
        Frequency::Unrecognized(raw) => format!("{raw} (unsupported)"),
    }
}

/// e.g. "Mar 10, 2024 09:30"
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%b %-d, %Y %H:%M").to_string()
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25 2026")
pub fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        format!("{:<width$}", text)
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Lines of one cell: day number, up to `limit` titles, then "+N more"
fn cell_lines(cell: &DayCell, limit: usize, today: NaiveDate) -> Vec<String> {
    let day = fit(&cell.date.format("%-d").to_string(), CELL_WIDTH);
    let day = if cell.date == today {
        day.bold().underline().to_string()
    } else if cell.is_same_month {
        day.bold().to_string()
    } else {
        day.dimmed().to_string()
    };

    let mut lines = vec![day];

    for event in cell.visible(limit) {
        let title = fit(&event.title, CELL_WIDTH);
        if cell.is_same_month {
            lines.push(title.cyan().to_string());
        } else {
            lines.push(title.dimmed().to_string());
        }
    }

    let hidden = cell.overflow(limit);
    if hidden > 0 {
        lines.push(fit(&format!("+{} more", hidden), CELL_WIDTH).dimmed().to_string());
    }

    lines
}

/// Render the month as a 7-column table, Sunday first.
pub fn render_month(grid: &MonthGrid, limit: usize) -> String {
    let today = Local::now().date_naive();
    let separator = "─".repeat((CELL_WIDTH + 1) * 7);

    let mut out = Vec::new();
    out.push(grid.month.title().bold().to_string());
    out.push(
        Weekday::ALL
            .iter()
            .map(|d| fit(d.short_label(), CELL_WIDTH).dimmed().to_string())
            .collect::<Vec<_>>()
            .join(" "),
    );

    for week in grid.weeks() {
        out.push(separator.dimmed().to_string());

        let columns: Vec<Vec<String>> = week.iter().map(|c| cell_lines(c, limit, today)).collect();
        let height = columns.iter().map(Vec::len).max().unwrap_or(1);
        let blank = " ".repeat(CELL_WIDTH);

        for row in 0..height {
            let line: Vec<&str> = columns
                .iter()
                .map(|col| col.get(row).map(String::as_str).unwrap_or(&blank))
                .collect();
            out.push(line.join(" ").trim_end().to_string());
        }
    }

    out.join("\n")
}
