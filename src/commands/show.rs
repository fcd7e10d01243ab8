use anyhow::Result;
use eventcal_core::EventId;

use crate::client::Client;
use crate::render::RenderDetail;

pub async fn run(client: &Client, id: EventId) -> Result<()> {
    let event = client.get_event(id).await?;
    println!("{}", event.render_detail());
    Ok(())
}
