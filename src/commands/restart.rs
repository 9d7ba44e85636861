use anyhow::Result;

use crate::engine::Engine;

use super::{down, up};

/// Stop the container, then bring the environment back up using whatever
/// network the marker file records.
pub(crate) async fn run(engine: &dyn Engine, skip_snapshot: bool) -> Result<()> {
    down::run(engine).await?;
    up::run(engine, None, skip_snapshot).await
}
