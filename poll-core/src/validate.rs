use crate::error::PollError;
use crate::poll::{PollDraft, MAX_OPTIONS, MIN_OPTIONS};

/// Checks a create request as the adapter receives it. Every option must be
/// non-blank; nothing is filtered out here.
pub fn validate_draft(question: &str, options: &[String]) -> Result<PollDraft, PollError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(PollError::validation("Question is required"));
    }
    if options.len() < MIN_OPTIONS {
        return Err(PollError::validation(format!(
            "At least {MIN_OPTIONS} options are required"
        )));
    }
    if options.len() > MAX_OPTIONS {
        return Err(PollError::validation(format!(
            "At most {MAX_OPTIONS} options are allowed"
        )));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(PollError::validation("All options must be non-empty"));
    }

    Ok(PollDraft {
        question: question.to_string(),
        options: options.iter().map(|o| o.trim().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trims_question_and_options() {
        let draft = validate_draft("  Pick a color ", &opts(&[" Red", "Blue  "])).unwrap();
        assert_eq!(draft.question, "Pick a color");
        assert_eq!(draft.options, opts(&["Red", "Blue"]));
    }

    #[test]
    fn rejects_blank_question() {
        let err = validate_draft(" \t", &opts(&["a", "b"])).unwrap_err();
        assert_eq!(err, PollError::Validation("Question is required".into()));
    }

    #[test]
    fn rejects_option_counts_out_of_range() {
        assert!(validate_draft("q", &opts(&["a"])).unwrap_err().is_validation());
        assert!(validate_draft("q", &opts(&["a", "b", "c", "d", "e", "f", "g"]))
            .unwrap_err()
            .is_validation());
        assert!(validate_draft("q", &opts(&["a", "b", "c", "d", "e", "f"])).is_ok());
    }

    #[test]
    fn rejects_blank_option() {
        let err = validate_draft("q", &opts(&["a", "  "])).unwrap_err();
        assert_eq!(err.to_string(), "All options must be non-empty");
    }
}
