//! Capability interface over the container engine.
//!
//! The sandbox never talks to Docker directly from command handlers; it goes
//! through the [`Engine`] trait so the lifecycle decision procedure can be
//! exercised against a scripted fake. [`DockerEngine`] is the real adapter,
//! driving the docker CLI.

mod docker;
mod error;
pub(crate) mod mock;

pub(crate) use docker::DockerEngine;
pub(crate) use error::{EngineError, EngineResult};

use async_trait::async_trait;
use std::path::Path;

/// Container engine operations the sandbox relies on.
///
/// Each method maps to one external invocation; implementations are expected
/// to be blocking-from-the-caller's-perspective (awaited to completion) and
/// to report engine unreachability as [`EngineError::Unavailable`].
#[async_trait]
pub(crate) trait Engine: Send + Sync {
    /// Checks that the engine daemon is reachable.
    async fn ping(&self) -> EngineResult<()>;

    /// Builds an image from `context`, tagged `tag`, for a release channel.
    async fn build_image(&self, context: &Path, tag: &str, channel: &str) -> EngineResult<()>;

    /// Whether a container with this name exists, running or stopped.
    async fn container_exists(&self, name: &str) -> EngineResult<bool>;

    /// Whether a container with this name is currently running.
    async fn container_running(&self, name: &str) -> EngineResult<bool>;

    /// Starts a stopped container.
    async fn start_container(&self, name: &str) -> EngineResult<()>;

    /// Stops a running container.
    async fn stop_container(&self, name: &str) -> EngineResult<()>;

    /// Force-removes a container.
    async fn remove_container(&self, name: &str) -> EngineResult<()>;

    /// Runs the long-lived container detached, publishing `ports`
    /// (host, container) and attaching `volume` at `mount`.
    async fn run_detached(
        &self,
        name: &str,
        image: &str,
        ports: &[(u16, u16)],
        volume: &str,
        mount: &str,
    ) -> EngineResult<()>;

    /// Creates (without starting) a container with `volume` at `mount`.
    /// Used only to materialize the named volume.
    async fn create_container(
        &self,
        name: &str,
        image: &str,
        volume: &str,
        mount: &str,
    ) -> EngineResult<()>;

    /// Copies a local file or directory tree into a container path.
    async fn copy_into(&self, container: &str, src: &Path, dest: &str) -> EngineResult<()>;

    /// Executes a command in a running container, capturing stdout.
    async fn exec_capture(&self, container: &str, cmd: &[String]) -> EngineResult<String>;

    /// Executes a command in a running container with the caller's terminal
    /// attached (interactive TTY).
    async fn exec_interactive(&self, container: &str, cmd: &[String]) -> EngineResult<()>;

    /// Lists image IDs under a repository name.
    async fn list_images(&self, repository: &str) -> EngineResult<Vec<String>>;

    /// Force-removes an image by ID.
    async fn remove_image(&self, id: &str) -> EngineResult<()>;

    /// Removes dangling (unreferenced) images.
    async fn prune_dangling_images(&self) -> EngineResult<()>;

    /// Whether a named volume exists.
    async fn volume_exists(&self, name: &str) -> EngineResult<bool>;

    /// Removes a named volume.
    async fn remove_volume(&self, name: &str) -> EngineResult<()>;
}
