use anyhow::Result;
use chrono::Local;
use eventcal_core::date_range::parse_month;
use eventcal_core::grid::{DEFAULT_VISIBLE_EVENTS, build_month_grid};
use eventcal_core::recurrence::ExpandOptions;

use crate::client::Client;
use crate::render::render_month;

/// Fetch every event and lay out the month locally.
pub async fn run(client: &Client, month: Option<&str>, options: &ExpandOptions) -> Result<()> {
    let current_month = match month {
        Some(raw) => parse_month(raw)?.start,
        None => Local::now().date_naive(),
    };

    let events = client.list_events().await?;
    let grid = build_month_grid(current_month, &events, options);

    tracing::debug!(
        cells = grid.cells.len(),
        events = events.len(),
        "built month grid"
    );

    println!("{}", render_month(&grid, DEFAULT_VISIBLE_EVENTS));
    Ok(())
}
