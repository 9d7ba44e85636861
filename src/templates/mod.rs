//! Embedded files seeded into new environments.

use crate::config::Network;

/// Image build recipe; `CHANNEL` selects the node release channel.
pub(crate) const DOCKERFILE: &str = include_str!("Dockerfile");

/// API token for the algod REST endpoint.
pub(crate) const ALGOD_TOKEN: &str = include_str!("algod.token");

/// API token for the kmd REST endpoint.
pub(crate) const KMD_TOKEN: &str = include_str!("kmd.token");

/// Key manager daemon configuration.
pub(crate) const KMD_CONFIG: &str = include_str!("kmd_config.json");

const CONFIG_STABLE: &str = include_str!("config.stable.json");
const CONFIG_BETA: &str = include_str!("config.beta.json");

/// Node configuration for a profile's config variant.
pub(crate) fn node_config(template: &str) -> Option<&'static str> {
    match template {
        "config.stable.json" => Some(CONFIG_STABLE),
        "config.beta.json" => Some(CONFIG_BETA),
        _ => None,
    }
}

/// Genesis file for a network.
pub(crate) fn genesis(network: Network) -> &'static str {
    match network {
        Network::Mainnet => include_str!("genesis.mainnet.json"),
        Network::Testnet => include_str!("genesis.testnet.json"),
        Network::Betanet => include_str!("genesis.betanet.json"),
    }
}
