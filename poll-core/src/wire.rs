//! Reply shapes as they arrive from the poll service, and their normalization
//! into [`Poll`].

use crate::poll::{Poll, PollId};

/// How a poll's vote tallies were encoded on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VotesWire {
    Missing,
    /// Plain sequence of non-negative integers.
    Sequence(Vec<u64>),
    /// Packed little-endian `u64` words.
    Packed(Vec<u8>),
    /// Anything else; `kind` names what was seen.
    Unrecognized { kind: String },
}

/// One poll record before normalization. Absent fields stay `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPoll {
    pub id: u64,
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub votes: VotesWire,
    pub voters: Option<Vec<String>>,
}

impl RawPoll {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            question: None,
            options: None,
            votes: VotesWire::Missing,
            voters: None,
        }
    }
}

/// Something normalization had to paper over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeAnomaly {
    UnknownVotesShape { poll: PollId, kind: String },
    LengthMismatch { poll: PollId, options: usize, votes: usize },
}

impl std::fmt::Display for ShapeAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeAnomaly::UnknownVotesShape { poll, kind } => {
                write!(f, "poll #{poll}: unknown votes shape '{kind}'")
            }
            ShapeAnomaly::LengthMismatch {
                poll,
                options,
                votes,
            } => write!(
                f,
                "poll #{poll}: {options} options but {votes} tallies, dropping both"
            ),
        }
    }
}

/// Turns any tally encoding into a plain sequence.
pub fn normalize_votes(wire: &VotesWire) -> Result<Vec<u64>, String> {
    match wire {
        VotesWire::Missing => Ok(Vec::new()),
        VotesWire::Sequence(values) => Ok(values.clone()),
        VotesWire::Packed(bytes) => {
            if bytes.len() % 8 != 0 {
                return Err(format!("packed tallies of {} bytes", bytes.len()));
            }
            Ok(bytes
                .chunks_exact(8)
                .map(|word| {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(word);
                    u64::from_le_bytes(buf)
                })
                .collect())
        }
        VotesWire::Unrecognized { kind } => Err(kind.clone()),
    }
}

pub fn normalize_poll(raw: RawPoll) -> (Poll, Vec<ShapeAnomaly>) {
    let id = PollId(raw.id);
    let mut anomalies = Vec::new();

    let mut votes = match normalize_votes(&raw.votes) {
        Ok(v) => v,
        Err(kind) => {
            anomalies.push(ShapeAnomaly::UnknownVotesShape { poll: id, kind });
            Vec::new()
        }
    };
    let mut options = raw.options.unwrap_or_default();

    if votes.len() != options.len() {
        anomalies.push(ShapeAnomaly::LengthMismatch {
            poll: id,
            options: options.len(),
            votes: votes.len(),
        });
        options.clear();
        votes.clear();
    }

    let poll = Poll {
        id,
        question: raw.question.unwrap_or_default(),
        options,
        votes,
        voters: raw.voters.unwrap_or_default(),
    };
    (poll, anomalies)
}
