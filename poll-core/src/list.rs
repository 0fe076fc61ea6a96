use crate::error::PollError;
use crate::notice::Notice;
use crate::poll::{Poll, VoteResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connectivity {
    Connected,
    Offline,
}

/// Which message an empty list shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyState {
    NoPolls,
    Offline,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::NoPolls => "Be the first to create a poll and start gathering opinions!",
            EmptyState::Offline => "Connect to your DFX network to see polls",
        }
    }
}

/// Refresh controller for the poll list. Every fetch replaces the whole
/// collection; overlapping fetches are not cancelled and the last reply to
/// land wins, even if it was issued earlier.
#[derive(Clone, Debug)]
pub struct PollListState {
    polls: Vec<Poll>,
    connectivity: Connectivity,
    in_flight: usize,
    issued: u64,
    adopted: Option<FetchTicket>,
    generation: u64,
    trigger: Option<u64>,
}

impl Default for PollListState {
    fn default() -> Self {
        Self::new()
    }
}

impl PollListState {
    pub fn new() -> Self {
        Self {
            polls: Vec::new(),
            connectivity: Connectivity::Connected,
            in_flight: 0,
            issued: 0,
            adopted: None,
            generation: 0,
            trigger: None,
        }
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn is_connected(&self) -> bool {
        self.connectivity == Connectivity::Connected
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Bumped by every applied reply. Cards keyed on it are rebuilt, which
    /// resets their vote latch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a fetch when the parent's counter differs from the last one seen
    /// (always on first sight).
    pub fn sync_trigger(&mut self, trigger: u64) -> Option<FetchTicket> {
        if self.trigger == Some(trigger) {
            return None;
        }
        self.trigger = Some(trigger);
        Some(self.begin_fetch())
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.in_flight += 1;
        FetchTicket(self.issued)
    }

    pub fn apply(&mut self, ticket: FetchTicket, result: Result<Vec<Poll>, PollError>) -> Notice {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.adopted.is_some_and(|seen| seen > ticket) {
            log::warn!(
                "poll list reply {} landed after newer reply {}; adopting it anyway",
                ticket.0,
                self.adopted.map(|t| t.0).unwrap_or_default()
            );
        }
        self.adopted = Some(ticket);
        self.generation += 1;

        match result {
            Ok(polls) => {
                self.connectivity = Connectivity::Connected;
                let notice = if polls.is_empty() {
                    Notice::info("No polls found")
                } else {
                    Notice::success(format!("Loaded {} polls successfully", polls.len()))
                };
                self.polls = polls;
                notice
            }
            Err(e) => {
                log::error!("poll list fetch failed: {e}");
                self.connectivity = Connectivity::Offline;
                self.polls.clear();
                Notice::error("Failed to load polls - check your connection")
            }
        }
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.polls.is_empty() {
            return None;
        }
        Some(match self.connectivity {
            Connectivity::Connected => EmptyState::NoPolls,
            Connectivity::Offline => EmptyState::Offline,
        })
    }
}

/// Notice for a card's vote outcome, and whether the list should re-fetch.
pub fn vote_notice(result: &VoteResult) -> (Notice, bool) {
    match result.error() {
        None => (Notice::success("Vote submitted successfully!"), true),
        Some(msg) if msg.trim().is_empty() => (Notice::error("Failed to vote"), false),
        Some(msg) => (Notice::error(msg), false),
    }
}

pub fn refreshing_notice() -> Notice {
    Notice::info("Refreshing polls...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::poll::PollId;

    fn poll(id: u64) -> Poll {
        Poll {
            id: PollId(id),
            question: format!("q{id}"),
            options: vec!["a".into(), "b".into()],
            votes: vec![0, 0],
            voters: vec![],
        }
    }

    #[test]
    fn trigger_change_starts_fetch() {
        let mut state = PollListState::new();
        assert!(state.sync_trigger(0).is_some());
        assert!(state.sync_trigger(0).is_none());
        assert!(state.sync_trigger(1).is_some());
        assert!(state.is_loading());
    }

    #[test]
    fn failure_is_distinct_from_zero_polls() {
        let mut offline = PollListState::new();
        let t = offline.begin_fetch();
        let notice = offline.apply(t, Err(PollError::Remote("down".into())));
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(!offline.is_connected());
        assert_eq!(offline.empty_state(), Some(EmptyState::Offline));

        let mut empty = PollListState::new();
        let t = empty.begin_fetch();
        assert_eq!(empty.apply(t, Ok(vec![])), Notice::info("No polls found"));
        assert!(empty.is_connected());
        assert_eq!(empty.empty_state(), Some(EmptyState::NoPolls));

        assert_eq!(offline.polls(), empty.polls());
        assert_ne!(offline.connectivity(), empty.connectivity());
    }

    #[test]
    fn fetch_replaces_collection() {
        let mut state = PollListState::new();
        let t = state.begin_fetch();
        state.apply(t, Ok(vec![poll(0), poll(1)]));
        let t = state.begin_fetch();
        let notice = state.apply(t, Ok(vec![poll(1)]));
        assert_eq!(notice, Notice::success("Loaded 1 polls successfully"));
        assert_eq!(state.polls(), &[poll(1)]);
        assert_eq!(state.empty_state(), None);
        assert_eq!(state.generation(), 2);
    }

    #[test]
    fn failure_after_success_clears_polls() {
        let mut state = PollListState::new();
        let t = state.begin_fetch();
        state.apply(t, Ok(vec![poll(0)]));
        let t = state.begin_fetch();
        state.apply(t, Err(PollError::Remote("down".into())));
        assert!(state.polls().is_empty());
        assert!(!state.is_connected());
    }

    #[test]
    fn late_reply_from_older_fetch_wins() {
        let mut state = PollListState::new();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();
        state.apply(newer, Ok(vec![poll(0), poll(1)]));
        assert!(state.is_loading());
        state.apply(older, Ok(vec![poll(0)]));
        assert!(!state.is_loading());
        assert_eq!(state.polls(), &[poll(0)]);
    }

    #[test]
    fn vote_notices() {
        assert_eq!(
            vote_notice(&VoteResult::Success),
            (Notice::success("Vote submitted successfully!"), true)
        );
        assert_eq!(
            vote_notice(&VoteResult::failure("Already voted")),
            (Notice::error("Already voted"), false)
        );
        assert_eq!(
            vote_notice(&VoteResult::failure("")),
            (Notice::error("Failed to vote"), false)
        );
    }
}
