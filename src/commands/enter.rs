use anyhow::Result;
use colored::Colorize;

use crate::config::CONTAINER_NAME;
use crate::engine::Engine;

pub(crate) async fn run(engine: &dyn Engine) -> Result<()> {
    println!(
        "{} Opening /bin/bash in the {} container; exit to return.",
        "▶".cyan(),
        CONTAINER_NAME.cyan()
    );
    engine
        .exec_interactive(CONTAINER_NAME, &["/bin/bash".to_string()])
        .await?;
    Ok(())
}
