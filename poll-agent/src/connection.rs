use crate::config::{Network, ServiceConfig};
use crate::decode;
use candid::{Encode, Principal};
use ic_agent::Agent;
use poll_core::{PollId, PollService, RawPoll, ServiceError, VoteOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("invalid canister id '{id}': {reason}")]
    CanisterId { id: String, reason: String },

    #[error("cannot build agent for {host}: {reason}")]
    Agent { host: String, reason: String },
}

/// The poll canister reached through one shared `ic_agent::Agent`.
pub struct IcPollService {
    agent: Agent,
    canister_id: Principal,
    network: Network,
    root_key_ready: AtomicBool,
}

/// Builds the connection handle. Nothing goes over the wire until the first
/// call, which also performs the local root-key fetch if needed.
pub fn connect(config: &ServiceConfig) -> Result<IcPollService, ConnectError> {
    let canister_id =
        Principal::from_text(&config.canister_id).map_err(|e| ConnectError::CanisterId {
            id: config.canister_id.clone(),
            reason: e.to_string(),
        })?;
    let agent = Agent::builder()
        .with_url(config.host.clone())
        .build()
        .map_err(|e| ConnectError::Agent {
            host: config.host.clone(),
            reason: e.to_string(),
        })?;

    log::info!(
        "poll canister {} via {} ({:?})",
        canister_id,
        config.host,
        config.network
    );
    Ok(IcPollService {
        agent,
        canister_id,
        network: config.network,
        root_key_ready: AtomicBool::new(!config.network.fetches_root_key()),
    })
}

fn transport(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Transport(e.to_string())
}

fn encode_err(e: candid::Error) -> ServiceError {
    ServiceError::Malformed(format!("cannot encode arguments: {e}"))
}

impl IcPollService {
    pub fn canister_id(&self) -> Principal {
        self.canister_id
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Local replicas sign with a development root key that must be trusted
    /// first. A failed fetch is retried on the next call.
    async fn bootstrap(&self) {
        if self.root_key_ready.load(Ordering::Acquire) {
            return;
        }
        log::info!("fetching root key for local development");
        match self.agent.fetch_root_key().await {
            Ok(()) => self.root_key_ready.store(true, Ordering::Release),
            Err(e) => log::warn!("unable to fetch root key, is the local replica running? {e}"),
        }
    }

    async fn query(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, ServiceError> {
        self.bootstrap().await;
        self.agent
            .query(&self.canister_id, method)
            .with_arg(arg)
            .call()
            .await
            .map_err(transport)
    }

    async fn update(&self, method: &str, arg: Vec<u8>) -> Result<Vec<u8>, ServiceError> {
        self.bootstrap().await;
        self.agent
            .update(&self.canister_id, method)
            .with_arg(arg)
            .call_and_wait()
            .await
            .map_err(transport)
    }
}

impl PollService for IcPollService {
    async fn create_poll(&self, question: &str, options: &[String]) -> Result<u64, ServiceError> {
        let question = question.to_string();
        let options = options.to_vec();
        let arg = Encode!(&question, &options).map_err(encode_err)?;
        let reply = self.update("create_poll", arg).await?;
        decode::decode_poll_id(&reply)
    }

    async fn get_polls(&self) -> Result<Vec<RawPoll>, ServiceError> {
        let arg = Encode!().map_err(encode_err)?;
        let reply = self.query("get_polls", arg).await?;
        decode::decode_polls(&reply)
    }

    async fn get_poll(&self, id: PollId) -> Result<Option<RawPoll>, ServiceError> {
        let arg = Encode!(&id.0).map_err(encode_err)?;
        let reply = self.query("get_poll", arg).await?;
        decode::decode_optional_poll(&reply)
    }

    async fn vote(&self, id: PollId, option_index: u64) -> Result<VoteOutcome, ServiceError> {
        let arg = Encode!(&id.0, &option_index).map_err(encode_err)?;
        let reply = self.update("vote", arg).await?;
        decode::decode_vote_outcome(&reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(canister_id: &str, network: Network) -> ServiceConfig {
        ServiceConfig {
            canister_id: canister_id.into(),
            network,
            host: network.default_host().into(),
        }
    }

    #[test]
    fn rejects_bad_canister_id() {
        let err = connect(&config("not a principal", Network::Local))
            .err()
            .expect("should fail");
        assert!(matches!(err, ConnectError::CanisterId { .. }));
    }

    #[test]
    fn mainnet_skips_root_key() {
        let service = connect(&config(crate::config::DEFAULT_CANISTER_ID, Network::Ic)).expect("connect");
        assert!(service.root_key_ready.load(Ordering::Acquire));
        assert_eq!(service.canister_id().to_text(), crate::config::DEFAULT_CANISTER_ID);

        let local = connect(&config(crate::config::DEFAULT_CANISTER_ID, Network::Local)).expect("connect");
        assert!(!local.root_key_ready.load(Ordering::Acquire));
    }
}
