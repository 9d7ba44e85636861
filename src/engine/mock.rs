//! Scripted engine fake for exercising the lifecycle without Docker.

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use super::{Engine, EngineError, EngineResult};

/// In-memory engine double.
///
/// Tracks containers/volumes/images in hash sets, records every call, and
/// fails on demand so tests can drive the lifecycle controller down its
/// fatal, recoverable, and confirm-gated paths.
#[derive(Debug, Default)]
#[allow(dead_code)] // Test double; only exercised from unit tests
pub(crate) struct MockEngine {
    /// Every engine call, rendered as a short string.
    pub calls: Mutex<Vec<String>>,
    /// When set, every call fails as if the daemon were unreachable.
    pub unavailable: bool,
    /// When set, `start_container` fails with a command error.
    pub fail_start: bool,
    /// When set, `run_detached` fails with a command error.
    pub fail_run: bool,
    /// When set, `build_image` fails with a command error.
    pub fail_build: bool,
    /// Containers that exist (running or stopped).
    pub containers: Mutex<HashSet<String>>,
    /// Subset of containers currently running.
    pub running: Mutex<HashSet<String>>,
    /// Named volumes that exist.
    pub volumes: Mutex<HashSet<String>>,
    /// Image IDs returned by `list_images`.
    pub images: Mutex<Vec<String>>,
    /// Canned stdout for `exec_capture`.
    pub exec_output: String,
}

#[allow(dead_code)] // Test double; only exercised from unit tests
impl MockEngine {
    pub(crate) fn new() -> Self {
        Self {
            exec_output: "Last committed block: 0".to_string(),
            ..Self::default()
        }
    }

    /// A mock with an existing, stopped `name` container.
    pub(crate) fn with_stopped_container(name: &str) -> Self {
        let mock = Self::new();
        mock.containers.lock().unwrap().insert(name.to_string());
        mock
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn called(&self, prefix: &str) -> bool {
        self.calls()
            .iter()
            .any(|call| call.starts_with(prefix))
    }

    fn log(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn gate(&self) -> EngineResult<()> {
        if self.unavailable {
            Err(EngineError::unavailable("mock daemon is down"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn ping(&self) -> EngineResult<()> {
        self.log("ping");
        self.gate()
    }

    async fn build_image(&self, _context: &Path, tag: &str, channel: &str) -> EngineResult<()> {
        self.log(format!("build {tag} {channel}"));
        self.gate()?;
        if self.fail_build {
            return Err(EngineError::command_failed("docker build", "mock failure"));
        }
        Ok(())
    }

    async fn container_exists(&self, name: &str) -> EngineResult<bool> {
        self.log(format!("exists {name}"));
        self.gate()?;
        Ok(self.containers.lock().unwrap().contains(name))
    }

    async fn container_running(&self, name: &str) -> EngineResult<bool> {
        self.log(format!("running {name}"));
        self.gate()?;
        Ok(self.running.lock().unwrap().contains(name))
    }

    async fn start_container(&self, name: &str) -> EngineResult<()> {
        self.log(format!("start {name}"));
        self.gate()?;
        if self.fail_start {
            return Err(EngineError::command_failed("docker start", "mock failure"));
        }
        self.running.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn stop_container(&self, name: &str) -> EngineResult<()> {
        self.log(format!("stop {name}"));
        self.gate()?;
        self.running.lock().unwrap().remove(name);
        Ok(())
    }

    async fn remove_container(&self, name: &str) -> EngineResult<()> {
        self.log(format!("rm {name}"));
        self.gate()?;
        self.running.lock().unwrap().remove(name);
        self.containers.lock().unwrap().remove(name);
        Ok(())
    }

    async fn run_detached(
        &self,
        name: &str,
        image: &str,
        _ports: &[(u16, u16)],
        _volume: &str,
        _mount: &str,
    ) -> EngineResult<()> {
        self.log(format!("run {name} {image}"));
        self.gate()?;
        if self.fail_run {
            return Err(EngineError::command_failed("docker run", "mock failure"));
        }
        self.containers.lock().unwrap().insert(name.to_string());
        self.running.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    async fn create_container(
        &self,
        name: &str,
        image: &str,
        volume: &str,
        _mount: &str,
    ) -> EngineResult<()> {
        self.log(format!("create {name} {image}"));
        self.gate()?;
        self.containers.lock().unwrap().insert(name.to_string());
        self.volumes.lock().unwrap().insert(volume.to_string());
        Ok(())
    }

    async fn copy_into(&self, container: &str, src: &Path, dest: &str) -> EngineResult<()> {
        self.log(format!("cp {} {container}:{dest}", src.display()));
        self.gate()
    }

    async fn exec_capture(&self, container: &str, cmd: &[String]) -> EngineResult<String> {
        self.log(format!("exec {container} {}", cmd.join(" ")));
        self.gate()?;
        Ok(self.exec_output.clone())
    }

    async fn exec_interactive(&self, container: &str, cmd: &[String]) -> EngineResult<()> {
        self.log(format!("exec-it {container} {}", cmd.join(" ")));
        self.gate()
    }

    async fn list_images(&self, repository: &str) -> EngineResult<Vec<String>> {
        self.log(format!("images {repository}"));
        self.gate()?;
        Ok(self.images.lock().unwrap().clone())
    }

    async fn remove_image(&self, id: &str) -> EngineResult<()> {
        self.log(format!("rmi {id}"));
        self.gate()?;
        self.images.lock().unwrap().retain(|i| i != id);
        Ok(())
    }

    async fn prune_dangling_images(&self) -> EngineResult<()> {
        self.log("prune");
        self.gate()
    }

    async fn volume_exists(&self, name: &str) -> EngineResult<bool> {
        self.log(format!("volume-exists {name}"));
        self.gate()?;
        Ok(self.volumes.lock().unwrap().contains(name))
    }

    async fn remove_volume(&self, name: &str) -> EngineResult<()> {
        self.log(format!("volume-rm {name}"));
        self.gate()?;
        self.volumes.lock().unwrap().remove(name);
        Ok(())
    }
}
