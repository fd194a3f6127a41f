//! Check command handler

use anyhow::Result;
use colored::*;
use wms_client::WmsClient;

/// Verify the server and print its state
pub async fn handle_check(client: &WmsClient) -> Result<()> {
    let info = client.verify_service().await?;

    println!(
        "{} {} ({})",
        "Server is ready:".green().bold(),
        client.base_url(),
        info.status.as_deref().unwrap_or_default()
    );

    Ok(())
}
