pub mod card;
pub mod error;
pub mod form;
pub mod list;
pub mod notice;
pub mod poll;
pub mod service;
pub mod validate;
pub mod wire;

pub use error::{PollError, ServiceError};
pub use poll::{CreatePollResult, Poll, PollDraft, PollId, VoteResult, MAX_OPTIONS, MIN_OPTIONS};
pub use service::{PollAdapter, PollService, VoteOutcome};
pub use wire::{RawPoll, VotesWire};
