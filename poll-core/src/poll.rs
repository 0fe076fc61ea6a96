use serde::Serialize;
use std::fmt;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

/// Identifier assigned by the poll service. Kept as a full `u64` end to end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PollId(pub u64);

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PollId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Normalized read model. `votes.len() == options.len()` always holds.
/// Serializes as a flat record with a numeric `id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub votes: Vec<u64>,
    pub voters: Vec<String>,
}

impl Poll {
    pub fn total_votes(&self) -> u64 {
        self.votes.iter().sum()
    }

    pub fn votes_for(&self, option_index: usize) -> u64 {
        self.votes.get(option_index).copied().unwrap_or(0)
    }
}

/// A validated question and option list, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreatePollResult {
    Created(PollId),
    Failed(String),
}

impl CreatePollResult {
    pub fn success(&self) -> bool {
        matches!(self, CreatePollResult::Created(_))
    }

    pub fn poll_id(&self) -> Option<PollId> {
        match self {
            CreatePollResult::Created(id) => Some(*id),
            CreatePollResult::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CreatePollResult::Created(_) => None,
            CreatePollResult::Failed(msg) => Some(msg),
        }
    }
}

impl<E: fmt::Display> From<Result<PollId, E>> for CreatePollResult {
    fn from(result: Result<PollId, E>) -> Self {
        match result {
            Ok(id) => CreatePollResult::Created(id),
            Err(e) => CreatePollResult::Failed(e.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteResult {
    Success,
    Failure { error: String },
}

impl VoteResult {
    pub fn failure(error: impl Into<String>) -> Self {
        VoteResult::Failure {
            error: error.into(),
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, VoteResult::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            VoteResult::Success => None,
            VoteResult::Failure { error } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_missing_indexes() {
        let poll = Poll {
            id: PollId(3),
            question: "q".into(),
            options: vec!["a".into(), "b".into()],
            votes: vec![2, 5],
            voters: vec![],
        };
        assert_eq!(poll.total_votes(), 7);
        assert_eq!(poll.votes_for(1), 5);
        assert_eq!(poll.votes_for(9), 0);
    }

    #[test]
    fn create_result_from_result() {
        let ok: CreatePollResult = Ok::<_, String>(PollId(u64::MAX)).into();
        assert_eq!(ok.poll_id(), Some(PollId(u64::MAX)));
        assert!(ok.error().is_none());

        let failed: CreatePollResult = Err::<PollId, _>("boom".to_string()).into();
        assert!(!failed.success());
        assert_eq!(failed.error(), Some("boom"));
    }

    #[test]
    fn poll_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PollId(18_446_744_073_709_551_615)).unwrap();
        assert_eq!(json, "18446744073709551615");
    }

    #[test]
    fn poll_serializes_as_flat_record() {
        let poll = Poll {
            id: PollId(7),
            question: "Pick a color".into(),
            options: vec!["Red".into(), "Blue".into()],
            votes: vec![0, 1],
            voters: vec!["me".into()],
        };
        let value = serde_json::to_value(&poll).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 7,
                "question": "Pick a color",
                "options": ["Red", "Blue"],
                "votes": [0, 1],
                "voters": ["me"],
            })
        );
    }
}
