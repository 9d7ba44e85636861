//! Docker CLI adapter.
//!
//! All engine operations shell out to the `docker` binary; there is no
//! daemon-socket client. Interactive sub-commands (shell entry, log tails)
//! need a real TTY, which `docker exec -it` with inherited stdio provides.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::{Engine, EngineError, EngineResult};

/// Drives the container engine through its command-line interface.
#[derive(Debug, Default, Clone)]
pub(crate) struct DockerEngine;

impl DockerEngine {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Runs `docker <args>` and captures output, classifying failures.
    async fn output(&self, args: &[&str]) -> EngineResult<std::process::Output> {
        let rendered = render(args);
        debug!("Running: {}", rendered);

        let output = Command::new("docker")
            .args(args)
            .output()
            .await
            .map_err(spawn_error)?;

        if output.status.success() {
            Ok(output)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(classify(&rendered, stderr))
        }
    }

    /// Runs `docker <args>` with the caller's terminal attached.
    async fn passthrough(&self, args: &[&str]) -> EngineResult<()> {
        let rendered = render(args);
        debug!("Running (attached): {}", rendered);

        let status = Command::new("docker")
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(spawn_error)?;

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::command_failed(
                rendered,
                format!("exit status {}", status.code().unwrap_or(-1)),
            ))
        }
    }
}

fn render(args: &[&str]) -> String {
    format!("docker {}", args.join(" "))
}

fn spawn_error(e: std::io::Error) -> EngineError {
    if e.kind() == std::io::ErrorKind::NotFound {
        EngineError::unavailable("the `docker` binary was not found on PATH")
    } else {
        EngineError::unavailable(format!("failed to invoke docker: {e}"))
    }
}

/// A non-zero docker exit means either "the daemon is gone" or "this one
/// command failed"; the daemon case is fatal upstream so it gets its own
/// variant.
fn classify(command: &str, stderr: String) -> EngineError {
    let lowered = stderr.to_lowercase();
    if lowered.contains("cannot connect to the docker daemon")
        || lowered.contains("is the docker daemon running")
    {
        EngineError::unavailable(stderr)
    } else {
        EngineError::command_failed(command, stderr)
    }
}

#[async_trait]
impl Engine for DockerEngine {
    async fn ping(&self) -> EngineResult<()> {
        self.output(&["info", "--format", "{{.ServerVersion}}"])
            .await?;
        Ok(())
    }

    async fn build_image(&self, context: &Path, tag: &str, channel: &str) -> EngineResult<()> {
        let context = context.to_string_lossy();
        let channel_arg = format!("CHANNEL={channel}");
        // Build output streams straight to the terminal.
        self.passthrough(&["build", "--build-arg", &channel_arg, "-t", tag, &context])
            .await
    }

    async fn container_exists(&self, name: &str) -> EngineResult<bool> {
        let filter = format!("name=^/{name}$");
        let output = self
            .output(&["ps", "-a", "--filter", &filter, "--format", "{{.Names}}"])
            .await?;
        Ok(matches_name(&output.stdout, name))
    }

    async fn container_running(&self, name: &str) -> EngineResult<bool> {
        let filter = format!("name=^/{name}$");
        let output = self
            .output(&["ps", "--filter", &filter, "--format", "{{.Names}}"])
            .await?;
        Ok(matches_name(&output.stdout, name))
    }

    async fn start_container(&self, name: &str) -> EngineResult<()> {
        self.output(&["start", name]).await?;
        Ok(())
    }

    async fn stop_container(&self, name: &str) -> EngineResult<()> {
        self.output(&["stop", name]).await?;
        Ok(())
    }

    async fn remove_container(&self, name: &str) -> EngineResult<()> {
        self.output(&["rm", "-f", name]).await?;
        Ok(())
    }

    async fn run_detached(
        &self,
        name: &str,
        image: &str,
        ports: &[(u16, u16)],
        volume: &str,
        mount: &str,
    ) -> EngineResult<()> {
        let mut args: Vec<String> = vec!["run".into(), "-d".into(), "--name".into(), name.into()];
        for (host, container) in ports {
            args.push("-p".into());
            args.push(format!("{host}:{container}"));
        }
        args.push("-v".into());
        args.push(format!("{volume}:{mount}"));
        args.push(image.into());

        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.output(&args).await?;
        Ok(())
    }

    async fn create_container(
        &self,
        name: &str,
        image: &str,
        volume: &str,
        mount: &str,
    ) -> EngineResult<()> {
        let bind = format!("{volume}:{mount}");
        self.output(&["create", "--name", name, "-v", &bind, image])
            .await?;
        Ok(())
    }

    async fn copy_into(&self, container: &str, src: &Path, dest: &str) -> EngineResult<()> {
        let src = src.to_string_lossy();
        let target = format!("{container}:{dest}");
        self.output(&["cp", &src, &target]).await?;
        Ok(())
    }

    async fn exec_capture(&self, container: &str, cmd: &[String]) -> EngineResult<String> {
        let mut args = vec!["exec", container];
        args.extend(cmd.iter().map(String::as_str));
        let output = self.output(&args).await?;
        Ok(merge_streams(&output.stdout, &output.stderr))
    }

    async fn exec_interactive(&self, container: &str, cmd: &[String]) -> EngineResult<()> {
        let mut args = vec!["exec", "-it", container];
        args.extend(cmd.iter().map(String::as_str));
        self.passthrough(&args).await
    }

    async fn list_images(&self, repository: &str) -> EngineResult<Vec<String>> {
        let output = self.output(&["images", repository, "-q"]).await?;
        let mut ids: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn remove_image(&self, id: &str) -> EngineResult<()> {
        self.output(&["rmi", "-f", id]).await?;
        Ok(())
    }

    async fn prune_dangling_images(&self) -> EngineResult<()> {
        self.output(&["image", "prune", "-f"]).await?;
        Ok(())
    }

    async fn volume_exists(&self, name: &str) -> EngineResult<bool> {
        match self.output(&["volume", "inspect", name]).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unavailable() => Err(e),
            Err(_) => Ok(false),
        }
    }

    async fn remove_volume(&self, name: &str) -> EngineResult<()> {
        self.output(&["volume", "rm", name]).await?;
        Ok(())
    }
}

// `goal` writes some diagnostics to stderr even when it succeeds; captured
// execs surface both streams.
fn merge_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let mut merged = String::from_utf8_lossy(stdout).to_string();
    merged.push_str(&String::from_utf8_lossy(stderr));
    merged
}

fn matches_name(stdout: &[u8], name: &str) -> bool {
    String::from_utf8_lossy(stdout)
        .lines()
        .any(|line| line.trim() == name)
}
