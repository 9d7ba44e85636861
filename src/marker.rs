use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

use crate::config::Network;

const MARKER_FILE: &str = "network";

/// What the data directory's network marker says about the environment.
///
/// The marker is the only on-disk state this tool owns: a plain-text file
/// recording which network the environment was initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerState {
    /// No marker file; the data directory is corrupt or half-initialized.
    Missing,
    /// Marker present and names a supported network.
    Recorded(Network),
    /// Marker present but unreadable, or naming no known network.
    Unreadable,
}

/// Read the marker file from a data directory.
pub(crate) fn read(data_dir: &Path) -> MarkerState {
    let path = data_dir.join(MARKER_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => match content.trim().parse::<Network>() {
            Ok(network) => MarkerState::Recorded(network),
            Err(_) => MarkerState::Unreadable,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => MarkerState::Missing,
        Err(_) => MarkerState::Unreadable,
    }
}

/// Record the network an environment was initialized for.
///
/// Written last during bootstrap, so a present marker implies the
/// environment's files were fully populated.
pub(crate) fn write(data_dir: &Path, network: Network) -> Result<()> {
    let path = data_dir.join(MARKER_FILE);
    fs::write(&path, format!("{network}\n"))
        .with_context(|| format!("Failed to write network marker: {}", path.display()))
}
