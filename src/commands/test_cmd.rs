//! Smoke checks against a running sandbox.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{ALGOD_PORT, CONTAINER_NAME, DATA_MOUNT, KMD_PORT};
use crate::engine::Engine;

pub(crate) async fn run(engine: &dyn Engine) -> Result<()> {
    let checks: [&[&str]; 2] = [
        &["goal", "node", "status", "-d", DATA_MOUNT],
        &["goal", "version", "-v", "-d", DATA_MOUNT],
    ];

    for check in checks {
        println!("{} {}", ">".dimmed(), check.join(" ").dimmed());
        let cmd = Vec::from_iter(check.iter().map(|s| s.to_string()));
        let output = engine
            .exec_capture(CONTAINER_NAME, &cmd)
            .await
            .context("Smoke check failed. Is the sandbox up? Try `sandbox up`.")?;
        print!("{output}");
        println!();
    }

    println!("algod REST endpoint:  http://localhost:{ALGOD_PORT}");
    println!("kmd REST endpoint:    http://localhost:{KMD_PORT}");
    Ok(())
}
