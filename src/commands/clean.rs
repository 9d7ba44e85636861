//! Tear the whole environment down: container, images, volume, data directory.
//!
//! Engine-side steps are best-effort since the resources may never have been
//! created; only the local data directory removal is allowed to fail the
//! command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::{CONTAINER_NAME, DATA_DIR, IMAGE_REPO, VOLUME_NAME};
use crate::engine::Engine;

pub(crate) async fn run(engine: &dyn Engine) -> Result<()> {
    reset(engine, Path::new(DATA_DIR)).await?;
    println!("{} Sandbox environment removed.", "✓".green());
    Ok(())
}

/// Destructive reset shared with the lifecycle controller's repair path.
pub(crate) async fn reset(engine: &dyn Engine, data_dir: &Path) -> Result<()> {
    if let Err(e) = engine.stop_container(CONTAINER_NAME).await {
        debug!("Stop skipped: {e}");
    }
    if let Err(e) = engine.remove_container(CONTAINER_NAME).await {
        debug!("Container removal skipped: {e}");
    }

    match engine.list_images(IMAGE_REPO).await {
        Ok(ids) => {
            for id in ids {
                if let Err(e) = engine.remove_image(&id).await {
                    warn!("Failed to remove image {id}: {e}");
                }
            }
        }
        Err(e) => warn!("Failed to list sandbox images: {e}"),
    }
    if let Err(e) = engine.prune_dangling_images().await {
        warn!("Failed to prune dangling images: {e}");
    }

    match engine.volume_exists(VOLUME_NAME).await {
        Ok(true) => {
            if let Err(e) = engine.remove_volume(VOLUME_NAME).await {
                warn!("Failed to remove volume {VOLUME_NAME}: {e}");
            }
        }
        Ok(false) => {}
        Err(e) => warn!("Failed to inspect volume {VOLUME_NAME}: {e}"),
    }

    if data_dir.exists() {
        std::fs::remove_dir_all(data_dir)
            .with_context(|| format!("Failed to delete {}", data_dir.display()))?;
    }

    Ok(())
}
