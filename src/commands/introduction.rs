use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::{ALGOD_PORT, DATA_DIR, KMD_DIR, KMD_PORT};
use crate::templates;

pub(crate) async fn run() -> Result<()> {
    let data_dir = Path::new(DATA_DIR);
    // Prefer the tokens actually seeded into the environment; fall back to
    // the bundled defaults so the walkthrough works before a first `up`.
    let algod_token = read_token(&data_dir.join("algod.token"), templates::ALGOD_TOKEN);
    let kmd_token = read_token(
        &data_dir.join(KMD_DIR).join("kmd.token"),
        templates::KMD_TOKEN,
    );

    println!("\n{}", "━".repeat(60).dimmed());
    println!("{}", "   Welcome to the Algorand sandbox!".yellow().bold());
    println!("{}", "━".repeat(60).dimmed());
    println!("\nThe node exposes two REST APIs on localhost, each gated by a bearer token:");
    println!("\n  {}  http://localhost:{}", "algod".cyan().bold(), ALGOD_PORT);
    println!("  token: {}", algod_token.dimmed());
    println!("\n  {}    http://localhost:{}", "kmd".cyan().bold(), KMD_PORT);
    println!("  token: {}", kmd_token.dimmed());
    println!("\nTry it:");
    println!(
        "  {}",
        format!(
            "curl http://localhost:{ALGOD_PORT}/v2/status -H \"X-Algo-API-Token: {algod_token}\""
        )
        .green()
    );
    println!(
        "\nOther useful commands: {}, {}, {}.",
        "sandbox status".green(),
        "sandbox logs".green(),
        "sandbox enter".green()
    );
    println!("{}", "━".repeat(60).dimmed());
    Ok(())
}

fn read_token(path: &Path, fallback: &str) -> String {
    std::fs::read_to_string(path)
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|_| fallback.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_token_prefers_seeded_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("algod.token");
        std::fs::write(&path, "deadbeef\n").unwrap();
        assert_eq!(read_token(&path, "fallback"), "deadbeef");
    }

    #[test]
    fn test_read_token_falls_back_to_bundled() {
        let dir = tempdir().unwrap();
        assert_eq!(read_token(&dir.path().join("missing"), "fallback"), "fallback");
    }
}
