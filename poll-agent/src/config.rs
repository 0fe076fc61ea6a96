use log::{info, warn};

pub const DEFAULT_CANISTER_ID: &str = "uxrrr-q7777-77774-qaaaq-cai";
pub const LOCAL_HOST: &str = "http://localhost:4943";
pub const IC_HOST: &str = "https://ic0.app";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Local replica; needs its root key fetched before the first call.
    Local,
    /// Public Internet Computer.
    Ic,
}

impl Network {
    pub fn default_host(self) -> &'static str {
        match self {
            Network::Local => LOCAL_HOST,
            Network::Ic => IC_HOST,
        }
    }

    pub fn fetches_root_key(self) -> bool {
        self == Network::Local
    }

    fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Network::Local
        } else {
            Network::Ic
        }
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Network::Local),
            "ic" | "mainnet" => Ok(Network::Ic),
            other => Err(format!("unknown network '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub canister_id: String,
    pub network: Network,
    pub host: String,
}

impl ServiceConfig {
    /// Runtime environment first, then values baked in at build time.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| {
            std::env::var(key).ok().or_else(|| build_time(key).map(str::to_string))
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let canister_id = var("POLL_CANISTER_ID").unwrap_or_else(|| {
            info!("POLL_CANISTER_ID not set, using default: {DEFAULT_CANISTER_ID}");
            DEFAULT_CANISTER_ID.to_string()
        });

        let network = match var("POLL_NETWORK").map(|v| v.parse::<Network>()) {
            Some(Ok(n)) => n,
            Some(Err(e)) => {
                warn!("Invalid POLL_NETWORK value: {e}");
                Network::build_default()
            }
            None => Network::build_default(),
        };

        let host = var("POLL_HOST").unwrap_or_else(|| network.default_host().to_string());

        Self {
            canister_id,
            network,
            host,
        }
    }
}

fn build_time(key: &str) -> Option<&'static str> {
    match key {
        "POLL_CANISTER_ID" => option_env!("POLL_CANISTER_ID"),
        "POLL_NETWORK" => option_env!("POLL_NETWORK"),
        "POLL_HOST" => option_env!("POLL_HOST"),
        _ => None,
    }
}
