//! Chain snapshot download and extraction.
//!
//! New environments can skip syncing from genesis by seeding the data
//! directory from a pre-packaged `.tar.gz` of existing chain data. The
//! archive contents are opaque; they are unpacked as-is into a
//! genesis-version-named subdirectory and the archive is deleted afterward.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use futures_util::StreamExt;
use std::fs::File;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::info;

const ARCHIVE_NAME: &str = "snapshot.tar.gz";

/// Download a snapshot and unpack it into `data_dir/<genesis_version>/`.
pub(crate) async fn seed(url: &str, data_dir: &Path, genesis_version: &str) -> Result<()> {
    let archive = data_dir.join(ARCHIVE_NAME);

    info!("Downloading snapshot from {}", url);
    download(url, &archive).await?;

    let dest = data_dir.join(genesis_version);
    info!("Extracting snapshot into {}", dest.display());
    extract(&archive, &dest)?;

    std::fs::remove_file(&archive)
        .with_context(|| format!("Failed to remove snapshot archive: {}", archive.display()))?;

    Ok(())
}

/// Stream a URL to a local file.
async fn download(url: &str, dest: &Path) -> Result<()> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to request snapshot: {url}"))?
        .error_for_status()
        .with_context(|| format!("Snapshot server rejected the request: {url}"))?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Snapshot download interrupted")?;
        file.write_all(&chunk)
            .await
            .context("Failed to write snapshot archive")?;
    }
    file.flush().await.context("Failed to flush snapshot archive")?;

    Ok(())
}

/// Unpack a `.tar.gz` archive into `dest`, creating it first.
fn extract(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    let file = File::open(archive)
        .with_context(|| format!("Failed to open snapshot archive: {}", archive.display()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.unpack(dest)
        .with_context(|| format!("Failed to extract snapshot into {}", dest.display()))?;

    Ok(())
}
