use anyhow::Result;
use eventcal_core::EventId;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::commands::EventArgs;
use crate::render::RenderDetail;

/// Fetch the event, overlay the given flags and send back the full record.
pub async fn run(client: &Client, id: EventId, args: EventArgs) -> Result<()> {
    let current = client.get_event(id).await?;

    let mut input = current.to_input();
    args.apply_to(&mut input)?;

    if input == current.to_input() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    input.validate()?;

    let event = client.update_event(id, &input).await?;

    println!("{}", "Event updated successfully".green());
    println!("{}", event.render_detail());
    Ok(())
}
