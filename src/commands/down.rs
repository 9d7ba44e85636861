use anyhow::{bail, Result};
use colored::Colorize;

use crate::config::CONTAINER_NAME;
use crate::engine::Engine;

pub(crate) async fn run(engine: &dyn Engine) -> Result<()> {
    match engine.container_running(CONTAINER_NAME).await {
        Ok(true) => {
            engine.stop_container(CONTAINER_NAME).await?;
            println!("{} Sandbox stopped.", "✓".green());
        }
        Ok(false) => {
            println!("{} Sandbox is not running.", "ℹ".blue());
        }
        Err(e) if e.is_unavailable() => {
            bail!("{e}\nStart the Docker daemon and try again.");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
