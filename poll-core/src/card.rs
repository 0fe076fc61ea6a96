use crate::poll::{Poll, VoteResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    Unvoted,
    Voting { option: usize },
    Voted { option: usize },
}

/// One option row as the card renders it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRow {
    pub index: usize,
    pub label: String,
    pub votes: u64,
    pub percentage: u32,
    pub selected: bool,
}

/// Per-instance single-vote latch. Client-side only; the service decides
/// whether a vote actually counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollCard {
    poll: Poll,
    state: CardState,
}

impl PollCard {
    pub fn new(poll: Poll) -> Self {
        Self {
            poll,
            state: CardState::Unvoted,
        }
    }

    pub fn poll(&self) -> &Poll {
        &self.poll
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_voting(&self) -> bool {
        matches!(self.state, CardState::Voting { .. })
    }

    pub fn has_voted(&self) -> bool {
        matches!(self.state, CardState::Voted { .. })
    }

    pub fn controls_disabled(&self) -> bool {
        self.state != CardState::Unvoted
    }

    pub fn selected(&self) -> Option<usize> {
        match self.state {
            CardState::Voted { option } => Some(option),
            _ => None,
        }
    }

    /// Returns the option to send, or `None` if the card is not accepting
    /// votes or the index is out of range.
    pub fn begin_vote(&mut self, option: usize) -> Option<usize> {
        if self.state != CardState::Unvoted || option >= self.poll.options.len() {
            return None;
        }
        self.state = CardState::Voting { option };
        Some(option)
    }

    pub fn finish_vote(&mut self, result: &VoteResult) {
        let CardState::Voting { option } = self.state else {
            return;
        };
        self.state = if result.success() {
            CardState::Voted { option }
        } else {
            CardState::Unvoted
        };
    }

    pub fn total_votes(&self) -> u64 {
        self.poll.total_votes()
    }

    pub fn rows(&self) -> Vec<OptionRow> {
        let total = self.total_votes();
        let selected = self.selected();
        self.poll
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let votes = self.poll.votes_for(index);
                OptionRow {
                    index,
                    label: label.clone(),
                    votes,
                    percentage: percentage(votes, total),
                    selected: selected == Some(index),
                }
            })
            .collect()
    }
}

/// Share of `total`, rounded half up. Zero when nobody has voted.
pub fn percentage(votes: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = (u128::from(votes) * 200 + u128::from(total)) / (2 * u128::from(total));
    scaled.min(100) as u32
}

pub fn plural_votes(count: u64) -> String {
    if count == 1 {
        "1 vote".to_string()
    } else {
        format!("{count} votes")
    }
}
