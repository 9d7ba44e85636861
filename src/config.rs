//! Supported networks and their fixed parameters.
//!
//! Everything the sandbox needs to know about a network is compiled in:
//! release channel, genesis version tag, config template, and the snapshot
//! source used to seed chain data. Nothing here is persisted except the
//! network name, which ends up in the `data/network` marker file.

use clap::ValueEnum;

/// Name of the long-lived node container.
pub(crate) const CONTAINER_NAME: &str = "sandbox";

/// Image repository; the full tag is `algorand-sandbox:<channel>`.
pub(crate) const IMAGE_REPO: &str = "algorand-sandbox";

/// Named volume backing the node's data directory.
pub(crate) const VOLUME_NAME: &str = "algorand-sandbox-data";

/// Local directory mirroring/seeding the data volume.
pub(crate) const DATA_DIR: &str = "data";

/// Mount point of the data volume inside the container.
pub(crate) const DATA_MOUNT: &str = "/opt/data";

/// Published algod REST port (status, transactions).
pub(crate) const ALGOD_PORT: u16 = 4001;

/// Published kmd REST port (wallet management).
pub(crate) const KMD_PORT: u16 = 4002;

/// Subdirectory holding key-management credentials; gets mode 0700.
pub(crate) const KMD_DIR: &str = "kmd-v0.5";

/// Supported Algorand networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Network {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// The beta-channel test network.
    Betanet,
}

/// Fixed parameters associated with one network.
pub(crate) struct NetworkProfile {
    /// Release channel selecting the node build.
    pub channel: &'static str,
    /// Genesis version tag; also names the snapshot subdirectory.
    pub genesis_version: &'static str,
    /// Bundled node config template for this network.
    pub config_template: &'static str,
    /// Where to fetch pre-synced chain data for seeding.
    pub snapshot_url: &'static str,
}

const MAINNET: NetworkProfile = NetworkProfile {
    channel: "stable",
    genesis_version: "mainnet-v1.0",
    config_template: "config.stable.json",
    snapshot_url:
        "https://algorand-snapshots.s3.us-east-1.amazonaws.com/network/mainnet-v1.0/latest.tar.gz",
};

const TESTNET: NetworkProfile = NetworkProfile {
    channel: "stable",
    genesis_version: "testnet-v1.0",
    config_template: "config.stable.json",
    snapshot_url:
        "https://algorand-snapshots.s3.us-east-1.amazonaws.com/network/testnet-v1.0/latest.tar.gz",
};

const BETANET: NetworkProfile = NetworkProfile {
    channel: "beta",
    genesis_version: "betanet-v1.0",
    config_template: "config.beta.json",
    snapshot_url:
        "https://algorand-snapshots.s3.us-east-1.amazonaws.com/network/betanet-v1.0/latest.tar.gz",
};

impl Network {
    /// Returns the fixed profile for this network.
    pub(crate) fn profile(self) -> &'static NetworkProfile {
        match self {
            Self::Mainnet => &MAINNET,
            Self::Testnet => &TESTNET,
            Self::Betanet => &BETANET,
        }
    }

    /// Image tag for this network's release channel.
    pub(crate) fn image_tag(self) -> String {
        format!("{}:{}", IMAGE_REPO, self.profile().channel)
    }
}

/// (host, container) port pairs published by the node container.
pub(crate) fn service_ports() -> [(u16, u16); 2] {
    [(ALGOD_PORT, ALGOD_PORT), (KMD_PORT, KMD_PORT)]
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Betanet => write!(f, "betanet"),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "betanet" => Ok(Self::Betanet),
            _ => anyhow::bail!("Unknown network: '{s}'. Supported: mainnet, testnet, betanet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display() {
        assert_eq!(format!("{}", Network::Mainnet), "mainnet");
        assert_eq!(format!("{}", Network::Testnet), "testnet");
        assert_eq!(format!("{}", Network::Betanet), "betanet");
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("BETANET".parse::<Network>().unwrap(), Network::Betanet);
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_channels() {
        assert_eq!(Network::Mainnet.profile().channel, "stable");
        assert_eq!(Network::Testnet.profile().channel, "stable");
        assert_eq!(Network::Betanet.profile().channel, "beta");
    }

    #[test]
    fn test_image_tags() {
        assert_eq!(Network::Testnet.image_tag(), "algorand-sandbox:stable");
        assert_eq!(Network::Betanet.image_tag(), "algorand-sandbox:beta");
    }

    #[test]
    fn test_genesis_version_matches_network() {
        for network in [Network::Mainnet, Network::Testnet, Network::Betanet] {
            assert!(network
                .profile()
                .genesis_version
                .starts_with(&network.to_string()));
        }
    }

    #[test]
    fn test_every_network_has_a_snapshot_url() {
        for network in [Network::Mainnet, Network::Testnet, Network::Betanet] {
            let profile = network.profile();
            let url = profile.snapshot_url;
            assert!(url.starts_with("https://"));
            assert!(url.contains(profile.genesis_version));
        }
    }
}
