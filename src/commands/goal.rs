use anyhow::Result;

use crate::config::{CONTAINER_NAME, DATA_MOUNT};
use crate::engine::Engine;

/// Forward arbitrary arguments to the in-container `goal` binary.
///
/// No validation happens here; whatever `goal` thinks of the arguments
/// surfaces as its own error output.
pub(crate) async fn run(engine: &dyn Engine, args: &[String]) -> Result<()> {
    engine
        .exec_interactive(CONTAINER_NAME, &goal_command(args))
        .await?;
    Ok(())
}

fn goal_command(args: &[String]) -> Vec<String> {
    let mut cmd = Vec::with_capacity(args.len() + 3);
    cmd.push("goal".to_string());
    cmd.extend_from_slice(args);
    cmd.push("-d".to_string());
    cmd.push(DATA_MOUNT.to_string());
    cmd
}
