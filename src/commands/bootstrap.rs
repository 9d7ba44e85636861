//! First-time environment construction.
//!
//! Builds the channel image, populates the local data directory (optionally
//! seeded from a chain snapshot), materializes the named volume through a
//! throwaway container, records the network marker, and launches the node.
//! Every step fails fast; a partial environment is repaired by the next
//! `up` invocation.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::{service_ports, Network, CONTAINER_NAME, DATA_MOUNT, KMD_DIR, VOLUME_NAME};
use crate::engine::Engine;
use crate::{marker, snapshot, templates};

use super::status;

/// Give algod a moment to come up before the smoke check.
const STATUS_DELAY: Duration = Duration::from_secs(1);

pub(crate) async fn run(
    engine: &dyn Engine,
    network: Network,
    use_snapshot: bool,
    data_dir: &Path,
) -> Result<()> {
    let profile = network.profile();
    let tag = network.image_tag();

    println!(
        "\n{} Bootstrapping a {} sandbox ({} channel)...",
        "▶".cyan(),
        network.to_string().cyan().bold(),
        profile.channel
    );

    build_image(engine, &tag, profile.channel).await?;

    // First-time-only branch: a surviving data directory means the volume
    // was already seeded, so only the launch below is repeated.
    if !data_dir.exists() {
        populate_data_dir(network, use_snapshot, data_dir).await?;
        materialize_volume(engine, &tag, data_dir).await?;
        marker::write(data_dir, network)?;
    }

    info!("Starting container {}", CONTAINER_NAME);
    engine
        .run_detached(
            CONTAINER_NAME,
            &tag,
            &service_ports(),
            VOLUME_NAME,
            DATA_MOUNT,
        )
        .await?;

    tokio::time::sleep(STATUS_DELAY).await;
    let output = engine
        .exec_capture(CONTAINER_NAME, &status::goal_status_args())
        .await?;
    print!("{output}");

    println!(
        "{} Sandbox is up; algod on port 4001, kmd on port 4002.",
        "✓".green()
    );
    Ok(())
}

/// Build the node image, tagged deterministically by channel.
///
/// The Dockerfile is embedded in the binary, so it is staged into a
/// temporary build context first.
async fn build_image(engine: &dyn Engine, tag: &str, channel: &str) -> Result<()> {
    info!("Building image {}", tag);
    let context = tempfile::tempdir().context("Failed to create image build context")?;
    std::fs::write(context.path().join("Dockerfile"), templates::DOCKERFILE)
        .context("Failed to stage Dockerfile")?;
    engine.build_image(context.path(), tag, channel).await?;
    Ok(())
}

/// Create and fill the local data directory for one network.
async fn populate_data_dir(network: Network, use_snapshot: bool, data_dir: &Path) -> Result<()> {
    let profile = network.profile();

    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    if use_snapshot {
        snapshot::seed(profile.snapshot_url, data_dir, profile.genesis_version).await?;
    } else {
        info!("Snapshot seeding skipped; syncing from genesis");
    }

    let config = templates::node_config(profile.config_template).with_context(|| {
        format!(
            "No bundled config template named {}",
            profile.config_template
        )
    })?;
    write_file(data_dir, "config.json", config)?;
    write_file(data_dir, "algod.token", templates::ALGOD_TOKEN)?;
    write_file(data_dir, "genesis.json", templates::genesis(network))?;

    let kmd_dir = data_dir.join(KMD_DIR);
    std::fs::create_dir_all(&kmd_dir)
        .with_context(|| format!("Failed to create {}", kmd_dir.display()))?;
    write_file(&kmd_dir, "kmd_config.json", templates::KMD_CONFIG)?;
    write_file(&kmd_dir, "kmd.token", templates::KMD_TOKEN)?;
    // Key material lives here; kmd refuses world-readable directories.
    restrict_permissions(&kmd_dir)?;

    Ok(())
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(unix)]
fn restrict_permissions(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o700))
        .with_context(|| format!("Failed to restrict permissions on {}", dir.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_dir: &Path) -> Result<()> {
    Ok(())
}

/// Copy the populated data directory into the named volume.
///
/// The volume only exists once a container references it, so a throwaway
/// container is created, filled via copy, and discarded.
async fn materialize_volume(engine: &dyn Engine, image: &str, data_dir: &Path) -> Result<()> {
    let id = uuid::Uuid::new_v4().simple().to_string();
    let seed_name = format!("{CONTAINER_NAME}-seed-{}", &id[..8]);
    debug!("Materializing volume {} via {}", VOLUME_NAME, seed_name);

    engine
        .create_container(&seed_name, image, VOLUME_NAME, DATA_MOUNT)
        .await?;

    // `data/.` copies the directory contents rather than the directory.
    let copied = engine
        .copy_into(&seed_name, &data_dir.join("."), DATA_MOUNT)
        .await;
    let _ = engine.remove_container(&seed_name).await;
    copied?;

    Ok(())
}
