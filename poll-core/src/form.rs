use crate::error::PollError;
use crate::poll::{CreatePollResult, PollDraft, MAX_OPTIONS, MIN_OPTIONS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

/// What `begin_submit` decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitStep {
    /// Validated; the form is now submitting and the draft should be sent.
    Send(PollDraft),
    /// Local validation failed; still editing.
    Rejected(PollError),
    /// A submission is already in flight.
    Busy,
}

/// Create-poll form: question, 2 to 6 option rows, and a submit latch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollForm {
    question: String,
    options: Vec<String>,
    phase: FormPhase,
}

impl Default for PollForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PollForm {
    pub fn new() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            phase: FormPhase::Editing,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn set_question(&mut self, value: impl Into<String>) {
        if !self.is_submitting() {
            self.question = value.into();
        }
    }

    pub fn set_option(&mut self, index: usize, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        if let Some(slot) = self.options.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn can_add_option(&self) -> bool {
        !self.is_submitting() && self.options.len() < MAX_OPTIONS
    }

    pub fn can_remove_option(&self) -> bool {
        !self.is_submitting() && self.options.len() > MIN_OPTIONS
    }

    pub fn add_option(&mut self) -> bool {
        if !self.can_add_option() {
            return false;
        }
        self.options.push(String::new());
        true
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        if !self.can_remove_option() || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    fn filled_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Blank rows are dropped; what remains must have at least two entries.
    pub fn validate(&self) -> Result<PollDraft, PollError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(PollError::validation("Question is required"));
        }
        let options = self.filled_options();
        if options.len() < MIN_OPTIONS {
            return Err(PollError::validation(format!(
                "At least {MIN_OPTIONS} options are required"
            )));
        }
        Ok(PollDraft {
            question: question.to_string(),
            options,
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.validate().is_ok()
    }

    pub fn begin_submit(&mut self) -> SubmitStep {
        if self.is_submitting() {
            return SubmitStep::Busy;
        }
        match self.validate() {
            Ok(draft) => {
                self.phase = FormPhase::Submitting;
                SubmitStep::Send(draft)
            }
            Err(e) => SubmitStep::Rejected(e),
        }
    }

    /// Back to editing. Fields reset only when the poll was created.
    pub fn finish_submit(&mut self, result: &CreatePollResult) {
        if !self.is_submitting() {
            return;
        }
        if result.success() {
            *self = Self::new();
        } else {
            self.phase = FormPhase::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::PollId;

    fn filled(question: &str, options: &[&str]) -> PollForm {
        let mut form = PollForm::new();
        form.set_question(question);
        while form.options().len() < options.len() {
            form.add_option();
        }
        for (i, o) in options.iter().enumerate() {
            form.set_option(i, *o);
        }
        form
    }

    #[test]
    fn starts_with_two_empty_options() {
        let form = PollForm::new();
        assert_eq!(form.question(), "");
        assert_eq!(form.options(), &[String::new(), String::new()]);
        assert!(!form.can_submit());
        assert!(!form.can_remove_option());
    }

    #[test]
    fn option_rows_stay_between_two_and_six() {
        let mut form = PollForm::new();
        for _ in 0..10 {
            form.add_option();
        }
        assert_eq!(form.options().len(), MAX_OPTIONS);
        for _ in 0..10 {
            form.remove_option(0);
        }
        assert_eq!(form.options().len(), MIN_OPTIONS);
    }

    #[test]
    fn blank_rows_are_dropped_from_the_draft() {
        let mut form = filled("Best editor?", &["vim", " ", "emacs"]);
        match form.begin_submit() {
            SubmitStep::Send(draft) => {
                assert_eq!(draft.options, vec!["vim".to_string(), "emacs".to_string()])
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(form.is_submitting());
    }

    #[test]
    fn validation_failure_keeps_editing() {
        let mut form = filled("Only one?", &["yes", ""]);
        assert!(matches!(form.begin_submit(), SubmitStep::Rejected(e) if e.is_validation()));
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn second_submit_is_a_no_op() {
        let mut form = filled("q", &["a", "b"]);
        assert!(matches!(form.begin_submit(), SubmitStep::Send(_)));
        assert_eq!(form.begin_submit(), SubmitStep::Busy);
        form.set_question("changed");
        assert_eq!(form.question(), "q");
    }

    #[test]
    fn success_resets_failure_preserves() {
        let mut form = filled("q", &["a", "b", "c"]);
        form.begin_submit();
        form.finish_submit(&CreatePollResult::Failed("offline".into()));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.options().len(), 3);
        assert_eq!(form.question(), "q");

        form.begin_submit();
        form.finish_submit(&CreatePollResult::Created(PollId(1)));
        assert_eq!(form, PollForm::new());
    }
}
