use anyhow::Result;
use dialoguer::Confirm;
use eventcal_core::EventId;
use owo_colors::OwoColorize;

use crate::client::Client;

pub async fn run(client: &Client, id: EventId, yes: bool) -> Result<()> {
    let event = client.get_event(id).await?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete \"{}\"? This cannot be undone",
                event.title
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    client.delete_event(id).await?;

    println!("{}", "Event deleted successfully".green());
    Ok(())
}
