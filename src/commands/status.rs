use anyhow::{Context, Result};

use crate::config::{CONTAINER_NAME, DATA_MOUNT};
use crate::engine::Engine;

/// The fixed status invocation, shared with the bootstrap smoke check.
pub(crate) fn goal_status_args() -> Vec<String> {
    Vec::from(["goal", "node", "status", "-d", DATA_MOUNT].map(String::from))
}

pub(crate) async fn run(engine: &dyn Engine) -> Result<()> {
    let output = engine
        .exec_capture(CONTAINER_NAME, &goal_status_args())
        .await
        .context("Could not query node status. Is the sandbox up? Try `sandbox up`.")?;
    print!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;

    #[test]
    fn test_status_args_target_the_data_mount() {
        let args = goal_status_args();
        assert_eq!(args[..3], ["goal", "node", "status"]);
        assert_eq!(args[4], "/opt/data");
    }

    #[tokio::test]
    async fn test_status_forwards_one_exec() {
        let mock = MockEngine::new();
        run(&mock).await.unwrap();
        assert_eq!(
            mock.calls(),
            vec!["exec sandbox goal node status -d /opt/data"]
        );
    }
}
