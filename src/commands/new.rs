use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::commands::EventArgs;
use crate::render::Render;

pub async fn run(client: &Client, args: EventArgs) -> Result<()> {
    let input = args.into_new_input()?;

    // Same checks the server runs, reported before the round trip
    input.validate()?;

    let event = client.create_event(&input).await?;

    println!("{} {}", "Event created successfully!".green(), event.render());
    Ok(())
}
