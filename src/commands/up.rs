//! Bring the environment to the running state.
//!
//! The only stateful logic in the tool: validate the data directory against
//! the network marker, then resume, repair, or bootstrap. Destructive repair
//! always goes through a confirmation gate, and reset-and-retry is a bounded
//! loop with at most one automatic retry.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

use crate::config::{service_ports, Network, CONTAINER_NAME, DATA_DIR, DATA_MOUNT, VOLUME_NAME};
use crate::engine::{Engine, EngineResult};
use crate::marker::{self, MarkerState};
use crate::prompt;

use super::{bootstrap, clean};

/// Fresh environments with no requested network get this one.
const DEFAULT_NETWORK: Network = Network::Testnet;

/// Everything `up` needs, threaded explicitly instead of process globals.
pub(crate) struct UpOptions {
    /// Explicitly requested network, or "whatever is configured".
    pub network: Option<Network>,
    /// Seed new environments from a snapshot when one is available.
    pub use_snapshot: bool,
    /// Local data directory owning the marker file.
    pub data_dir: PathBuf,
}

pub(crate) async fn run(
    engine: &dyn Engine,
    network: Option<Network>,
    skip_snapshot: bool,
) -> Result<()> {
    let opts = UpOptions {
        network,
        use_snapshot: !skip_snapshot,
        data_dir: PathBuf::from(DATA_DIR),
    };
    ensure_running(engine, &opts, &mut prompt::confirm).await
}

/// The decision procedure: resume, repair, or bootstrap.
///
/// `confirm` is injected so tests can script answers; every destructive
/// branch runs through it before touching anything.
pub(crate) async fn ensure_running<C>(
    engine: &dyn Engine,
    opts: &UpOptions,
    confirm: &mut C,
) -> Result<()>
where
    C: FnMut(&str, bool) -> Result<bool>,
{
    if let Err(e) = engine.ping().await {
        // Engine unreachable is fatal and never retried.
        if e.is_unavailable() {
            bail!("{e}\nStart the Docker daemon and try again.");
        }
        return Err(e.into());
    }

    let mut retried = false;
    // Network recorded before a reset, so the retry can rebuild the same
    // environment when none was requested explicitly.
    let mut remembered: Option<Network> = None;

    loop {
        if !opts.data_dir.exists() {
            let network = opts.network.or(remembered).unwrap_or(DEFAULT_NETWORK);
            return bootstrap::run(engine, network, opts.use_snapshot, &opts.data_dir).await;
        }

        let recorded = match marker::read(&opts.data_dir) {
            MarkerState::Recorded(recorded) => recorded,
            MarkerState::Missing | MarkerState::Unreadable => {
                println!(
                    "{} The data directory has no usable network marker.",
                    "!".red()
                );
                if !confirm("Reset the corrupt environment and reinitialize?", true)? {
                    bail!("Aborted; the data directory was left untouched");
                }
                clean::reset(engine, &opts.data_dir).await?;
                continue;
            }
        };

        if let Some(requested) = opts.network {
            if requested != recorded {
                // Also taken when the marker is stale and no container
                // exists: never switch networks without an explicit go-ahead.
                let question = format!(
                    "Environment is initialized for {recorded} but {requested} was requested. \
                     Reset and reinitialize?"
                );
                if !confirm(&question, false)? {
                    bail!("Aborted; environment is still configured for {recorded}");
                }
                clean::reset(engine, &opts.data_dir).await?;
                continue;
            }
        }

        let network = opts.network.unwrap_or(recorded);
        match resume(engine, network).await {
            Ok(()) => {
                println!("{} Sandbox is running ({network}).", "✓".green());
                return Ok(());
            }
            Err(e) if e.is_unavailable() => {
                bail!("{e}\nStart the Docker daemon and try again.");
            }
            Err(e) if !retried => {
                warn!("Resume failed: {e}");
                println!("{} Starting the existing sandbox failed: {e}", "!".red());
                if !confirm("Reset the environment and try once more?", true)? {
                    bail!("Aborted after a failed start; environment left as-is");
                }
                remembered = Some(network);
                clean::reset(engine, &opts.data_dir).await?;
                retried = true;
            }
            Err(e) => {
                return Err(e).context("Sandbox failed to start after a reset");
            }
        }
    }
}

/// Start-if-stopped, or relaunch if the container was removed out-of-band.
async fn resume(engine: &dyn Engine, network: Network) -> EngineResult<()> {
    if engine.container_exists(CONTAINER_NAME).await? {
        if engine.container_running(CONTAINER_NAME).await? {
            return Ok(());
        }
        engine.start_container(CONTAINER_NAME).await
    } else {
        engine
            .run_detached(
                CONTAINER_NAME,
                &network.image_tag(),
                &service_ports(),
                VOLUME_NAME,
                DATA_MOUNT,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::MockEngine;
    use tempfile::{tempdir, TempDir};

    fn opts(dir: &TempDir, network: Option<Network>) -> UpOptions {
        UpOptions {
            network,
            use_snapshot: false,
            data_dir: dir.path().join("data"),
        }
    }

    fn initialized(dir: &TempDir, network: Network) -> PathBuf {
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        marker::write(&data_dir, network).unwrap();
        data_dir
    }

    fn always(answer: bool) -> impl FnMut(&str, bool) -> Result<bool> {
        move |_, _| Ok(answer)
    }

    fn never_asked() -> impl FnMut(&str, bool) -> Result<bool> {
        |question, _| panic!("unexpected prompt: {question}")
    }

    #[tokio::test]
    async fn test_fresh_environment_bootstraps_requested_network() {
        let dir = tempdir().unwrap();
        let mock = MockEngine::new();
        let opts = opts(&dir, Some(Network::Mainnet));

        ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap();

        assert_eq!(
            marker::read(&opts.data_dir),
            MarkerState::Recorded(Network::Mainnet)
        );
        assert!(mock.container_running("sandbox").await.unwrap());
    }

    #[tokio::test]
    async fn test_fresh_environment_defaults_to_testnet() {
        let dir = tempdir().unwrap();
        let mock = MockEngine::new();
        let opts = opts(&dir, None);

        ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap();

        assert_eq!(
            marker::read(&opts.data_dir),
            MarkerState::Recorded(Network::Testnet)
        );
    }

    #[tokio::test]
    async fn test_engine_unavailable_is_fatal_and_prompts_nothing() {
        let dir = tempdir().unwrap();
        let mock = MockEngine {
            unavailable: true,
            ..MockEngine::new()
        };
        let opts = opts(&dir, Some(Network::Testnet));

        let err = ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("not available"));
    }

    #[tokio::test]
    async fn test_resume_starts_stopped_container() {
        let dir = tempdir().unwrap();
        initialized(&dir, Network::Testnet);
        let mock = MockEngine::with_stopped_container("sandbox");
        let opts = opts(&dir, None);

        ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap();

        assert!(mock.called("start sandbox"));
        assert!(mock.container_running("sandbox").await.unwrap());
    }

    #[tokio::test]
    async fn test_resume_relaunches_when_container_was_removed() {
        let dir = tempdir().unwrap();
        initialized(&dir, Network::Betanet);
        let mock = MockEngine::new();
        let opts = opts(&dir, None);

        ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap();

        // Relaunched from the beta-channel image recorded in the marker.
        assert!(mock.called("run sandbox algorand-sandbox:beta"));
    }

    #[tokio::test]
    async fn test_missing_marker_prompts_before_reset() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        let mock = MockEngine::new();
        let opts = opts(&dir, Some(Network::Testnet));

        let mut asked = Vec::new();
        let mut confirm = |q: &str, _d: bool| {
            asked.push(q.to_string());
            Ok(false)
        };
        let err = ensure_running(&mock, &opts, &mut confirm)
            .await
            .unwrap_err();

        assert_eq!(asked.len(), 1);
        assert!(err.to_string().contains("untouched"));
        // Declining left the directory alone and started nothing.
        assert!(data_dir.exists());
        assert!(!mock.called("run"));
    }

    #[tokio::test]
    async fn test_missing_marker_confirmed_reset_reinitializes() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        let mock = MockEngine::new();
        let opts = opts(&dir, Some(Network::Testnet));

        ensure_running(&mock, &opts, &mut always(true))
            .await
            .unwrap();

        assert_eq!(
            marker::read(&data_dir),
            MarkerState::Recorded(Network::Testnet)
        );
        assert!(mock.container_running("sandbox").await.unwrap());
    }

    #[tokio::test]
    async fn test_network_mismatch_decline_keeps_marker() {
        let dir = tempdir().unwrap();
        let data_dir = initialized(&dir, Network::Mainnet);
        let mock = MockEngine::with_stopped_container("sandbox");
        let opts = opts(&dir, Some(Network::Testnet));

        let err = ensure_running(&mock, &opts, &mut always(false))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("mainnet"));
        assert_eq!(
            marker::read(&data_dir),
            MarkerState::Recorded(Network::Mainnet)
        );
        assert!(mock.container_exists("sandbox").await.unwrap());
    }

    #[tokio::test]
    async fn test_network_mismatch_confirmed_switches_networks() {
        let dir = tempdir().unwrap();
        let data_dir = initialized(&dir, Network::Mainnet);
        let mock = MockEngine::with_stopped_container("sandbox");
        let opts = opts(&dir, Some(Network::Testnet));

        ensure_running(&mock, &opts, &mut always(true))
            .await
            .unwrap();

        assert_eq!(
            marker::read(&data_dir),
            MarkerState::Recorded(Network::Testnet)
        );
    }

    #[tokio::test]
    async fn test_network_mismatch_without_container_still_prompts() {
        let dir = tempdir().unwrap();
        let data_dir = initialized(&dir, Network::Mainnet);
        let mock = MockEngine::new();
        let opts = opts(&dir, Some(Network::Testnet));

        let err = ensure_running(&mock, &opts, &mut always(false))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("still configured"));
        assert_eq!(
            marker::read(&data_dir),
            MarkerState::Recorded(Network::Mainnet)
        );
    }

    #[tokio::test]
    async fn test_matching_network_resumes_without_prompting() {
        let dir = tempdir().unwrap();
        initialized(&dir, Network::Mainnet);
        let mock = MockEngine::with_stopped_container("sandbox");
        let opts = opts(&dir, Some(Network::Mainnet));

        ensure_running(&mock, &opts, &mut never_asked())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_start_resets_and_retries_once() {
        let dir = tempdir().unwrap();
        initialized(&dir, Network::Testnet);
        // Start fails, but a rebuilt environment launches fine.
        let mock = MockEngine::with_stopped_container("sandbox");
        let mock = MockEngine {
            fail_start: true,
            containers: mock.containers,
            ..MockEngine::new()
        };
        let opts = opts(&dir, None);

        ensure_running(&mock, &opts, &mut always(true))
            .await
            .unwrap();

        // Reset happened, then the bootstrap rebuilt the testnet marker.
        assert!(mock.called("rm sandbox"));
        assert_eq!(
            marker::read(&opts.data_dir),
            MarkerState::Recorded(Network::Testnet)
        );
        assert!(mock.container_running("sandbox").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_start_decline_leaves_environment() {
        let dir = tempdir().unwrap();
        let data_dir = initialized(&dir, Network::Testnet);
        let mock = MockEngine::with_stopped_container("sandbox");
        let mock = MockEngine {
            fail_start: true,
            containers: mock.containers,
            ..MockEngine::new()
        };
        let opts = opts(&dir, None);

        let err = ensure_running(&mock, &opts, &mut always(false))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Aborted"));
        assert!(data_dir.exists());
    }

    #[tokio::test]
    async fn test_persistent_fault_is_not_retried_forever() {
        let dir = tempdir().unwrap();
        initialized(&dir, Network::Testnet);
        // Both resume and relaunch keep failing.
        let mock = MockEngine::with_stopped_container("sandbox");
        let mock = MockEngine {
            fail_start: true,
            fail_run: true,
            containers: mock.containers,
            ..MockEngine::new()
        };
        let opts = opts(&dir, None);

        let mut prompts = 0;
        let mut confirm = |_: &str, _: bool| {
            prompts += 1;
            Ok(true)
        };
        let result = ensure_running(&mock, &opts, &mut confirm).await;

        assert!(result.is_err());
        // One repair attempt, not an unbounded loop.
        assert_eq!(prompts, 1);
    }
}
