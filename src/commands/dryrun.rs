use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config::{CONTAINER_NAME, DATA_MOUNT};
use crate::engine::Engine;

/// Copy a transaction file into the container's data directory, then ask
/// the node to dry-run it. Whether the file is a well-formed transaction is
/// entirely `goal`'s problem.
pub(crate) async fn run(engine: &dyn Engine, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Transaction file not found: {}", file.display());
    }
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Transaction file has no usable name: {}", file.display()))?;

    engine.copy_into(CONTAINER_NAME, file, DATA_MOUNT).await?;

    let output = engine
        .exec_capture(CONTAINER_NAME, &dryrun_command(name))
        .await?;
    print!("{output}");
    Ok(())
}

fn dryrun_command(file_name: &str) -> Vec<String> {
    Vec::from(
        [
            "goal",
            "clerk",
            "dryrun",
            "-t",
            &format!("{DATA_MOUNT}/{file_name}"),
            "-d",
            DATA_MOUNT,
        ]
        .map(String::from),
    )
}
