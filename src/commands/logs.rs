use anyhow::Result;

use crate::config::{CONTAINER_NAME, DATA_MOUNT};
use crate::engine::Engine;

/// Follow the node log: `carpenter` renders the event stream by default,
/// `raw` tails the log file as-is.
pub(crate) async fn run(engine: &dyn Engine, raw: bool) -> Result<()> {
    let cmd = log_command(raw);
    engine.exec_interactive(CONTAINER_NAME, &cmd).await?;
    Ok(())
}

fn log_command(raw: bool) -> Vec<String> {
    if raw {
        Vec::from(["tail", "-f", "/opt/data/node.log"].map(String::from))
    } else {
        Vec::from(["carpenter", "-d", DATA_MOUNT, "-c"].map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;

    #[test]
    fn test_default_uses_carpenter() {
        assert_eq!(log_command(false)[0], "carpenter");
    }

    #[test]
    fn test_raw_tails_node_log() {
        let cmd = log_command(true);
        assert_eq!(cmd[0], "tail");
        assert_eq!(cmd[2], "/opt/data/node.log");
    }

    #[tokio::test]
    async fn test_logs_attach_interactively() {
        let mock = MockEngine::new();
        run(&mock, true).await.unwrap();
        assert!(mock.called("exec-it sandbox tail"));
    }
}
