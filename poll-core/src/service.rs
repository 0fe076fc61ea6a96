use crate::error::{PollError, ServiceError};
use crate::poll::{Poll, PollId, VoteResult};
use crate::validate::validate_draft;
use crate::wire::{normalize_poll, RawPoll};
use std::sync::atomic::{AtomicU64, Ordering};

/// Tagged reply of the remote `vote` method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteOutcome {
    Ok,
    Err(String),
}

/// The four remote operations of the poll canister.
///
/// Futures are not required to be `Send`; in the browser everything runs on
/// one thread.
#[allow(async_fn_in_trait)]
pub trait PollService {
    async fn create_poll(&self, question: &str, options: &[String]) -> Result<u64, ServiceError>;
    async fn get_polls(&self) -> Result<Vec<RawPoll>, ServiceError>;
    async fn get_poll(&self, id: PollId) -> Result<Option<RawPoll>, ServiceError>;
    async fn vote(&self, id: PollId, option_index: u64) -> Result<VoteOutcome, ServiceError>;
}

/// Boundary between components and the service. Owns validation,
/// normalization and error wrapping; holds no poll state.
pub struct PollAdapter<S> {
    service: S,
    anomalies: AtomicU64,
}

impl<S: PollService> PollAdapter<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            anomalies: AtomicU64::new(0),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Reply-shape anomalies seen so far (unknown tally encodings, length
    /// mismatches).
    pub fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    pub async fn create_poll(&self, question: &str, options: &[String]) -> Result<PollId, PollError> {
        let draft = validate_draft(question, options)?;
        log::debug!(
            "create_poll: {:?} with {} options",
            draft.question,
            draft.options.len()
        );

        match self.service.create_poll(&draft.question, &draft.options).await {
            Ok(id) => {
                log::info!("poll #{id} created");
                Ok(PollId(id))
            }
            Err(e) => {
                log::error!("create_poll failed: {e}");
                Err(PollError::Remote(format!("Failed to create poll: {e}")))
            }
        }
    }

    pub async fn get_polls(&self) -> Result<Vec<Poll>, PollError> {
        let raws = self.service.get_polls().await.map_err(|e| {
            log::error!("get_polls failed: {e}");
            PollError::Remote(format!("Failed to fetch polls: {e}"))
        })?;
        let polls: Vec<Poll> = raws.into_iter().map(|raw| self.normalize(raw)).collect();
        log::debug!("get_polls: {} polls", polls.len());
        Ok(polls)
    }

    pub async fn get_poll(&self, id: PollId) -> Result<Poll, PollError> {
        match self.service.get_poll(id).await {
            Ok(Some(raw)) => Ok(self.normalize(raw)),
            Ok(None) => Err(PollError::NotFound(id)),
            Err(e) => {
                log::error!("get_poll #{id} failed: {e}");
                Err(PollError::Remote(format!("Failed to get poll: {e}")))
            }
        }
    }

    /// Never fails: every error path resolves to `VoteResult::Failure`.
    pub async fn vote(&self, id: PollId, option_index: u64) -> VoteResult {
        log::debug!("vote: poll #{id} option {option_index}");
        match self.service.vote(id, option_index).await {
            Ok(VoteOutcome::Ok) => VoteResult::Success,
            Ok(VoteOutcome::Err(msg)) => {
                log::warn!("vote on poll #{id} rejected: {msg}");
                VoteResult::failure(msg)
            }
            Err(e) => {
                log::error!("vote on poll #{id} failed: {e}");
                VoteResult::failure(e.to_string())
            }
        }
    }

    fn normalize(&self, raw: RawPoll) -> Poll {
        let (poll, anomalies) = normalize_poll(raw);
        for anomaly in &anomalies {
            log::warn!("{anomaly}");
        }
        self.anomalies
            .fetch_add(anomalies.len() as u64, Ordering::Relaxed);
        poll
    }
}
