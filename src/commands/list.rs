use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::{Render, format_date_label};

pub async fn run(client: &Client) -> Result<()> {
    let events = client.list_events().await?;

    if events.is_empty() {
        println!("{}", "No events yet".dimmed());
        println!("{}", "Start by creating your first event with `eventcal new`".dimmed());
        return Ok(());
    }

    // Events arrive in start order; group them by day
    let mut current_date = None;

    for event in &events {
        let date = event.start_day();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date).bold());
            current_date = Some(date);
        }

        println!("  {}", event.render());
    }

    Ok(())
}
