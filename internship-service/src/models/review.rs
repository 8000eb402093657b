use super::ReplyLanguage;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const APPROVED_MARKER: &str = "APPROVED";
pub const NOT_APPROVED_MARKER: &str = "NOT_APPROVED";

/// Feedback used when the model gave a verdict and nothing else.
pub const EMPTY_FEEDBACK: &str = "No detailed feedback.";

/// Code submitted by an intern for review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CodeReviewRequest {
    pub project_id: String,
    pub project_title: String,
    pub project_description: String,
    #[validate(length(max = 200000, message = "code must be at most 200000 characters"))]
    pub code: String,
    /// Programming language of `code`, free-form.
    pub language: String,
    #[serde(default)]
    pub language_hint: Option<ReplyLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub feedback: String,
    pub approved: bool,
}

impl ReviewResult {
    /// Extracts the verdict and feedback from the reviewer's raw reply.
    ///
    /// `NOT_APPROVED` contains `APPROVED`, so approval requires the absence of
    /// the former as well as the presence of the latter. A trailing line that
    /// is only a marker is stripped from the feedback.
    pub fn from_model_text(raw: &str) -> Self {
        let text = raw.trim();
        let upper = text.to_uppercase();
        let approved = !upper.contains(NOT_APPROVED_MARKER) && upper.contains(APPROVED_MARKER);

        let lines: Vec<&str> = text.split('\n').collect();
        let verdict_line = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .filter(|&index| is_marker(lines[index]));

        let feedback = match verdict_line {
            Some(index) => lines[..index].join("\n").trim().to_string(),
            None => text.to_string(),
        };

        Self {
            feedback: if feedback.is_empty() {
                EMPTY_FEEDBACK.to_string()
            } else {
                feedback
            },
            approved,
        }
    }
}

fn is_marker(line: &str) -> bool {
    let line = line.trim().to_uppercase();
    line == APPROVED_MARKER || line == NOT_APPROVED_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_verdict_is_stripped_from_feedback() {
        let result = ReviewResult::from_model_text("Looks fine.\nAPPROVED");
        assert!(result.approved);
        assert_eq!(result.feedback, "Looks fine.");
    }

    #[test]
    fn not_approved_is_never_read_as_approved() {
        let result = ReviewResult::from_model_text("Needs fixes.\nNOT_APPROVED");
        assert!(!result.approved);
        assert_eq!(result.feedback, "Needs fixes.");
    }

    #[test]
    fn reply_without_verdict_keeps_full_text() {
        let result = ReviewResult::from_model_text("Some generic comment.");
        assert!(!result.approved);
        assert_eq!(result.feedback, "Some generic comment.");
    }

    #[test]
    fn marker_line_is_case_insensitive_and_trimmed() {
        let result =
            ReviewResult::from_model_text("  Solid work.\n\nGood naming.\n   approved  \n");
        assert!(result.approved);
        assert_eq!(result.feedback, "Solid work.\n\nGood naming.");
    }

    #[test]
    fn bare_verdict_gets_placeholder_feedback() {
        let result = ReviewResult::from_model_text("NOT_APPROVED");
        assert!(!result.approved);
        assert_eq!(result.feedback, EMPTY_FEEDBACK);
    }

    #[test]
    fn empty_reply_gets_placeholder_feedback() {
        let result = ReviewResult::from_model_text("   ");
        assert!(!result.approved);
        assert_eq!(result.feedback, EMPTY_FEEDBACK);
    }

    #[test]
    fn inline_marker_decides_verdict_but_stays_in_feedback() {
        let result = ReviewResult::from_model_text("Verdict: APPROVED with minor nits.");
        assert!(result.approved);
        assert_eq!(result.feedback, "Verdict: APPROVED with minor nits.");
    }

    #[test]
    fn any_not_approved_mention_blocks_approval() {
        let result = ReviewResult::from_model_text("Was NOT_APPROVED before, now fixed.\nAPPROVED");
        assert!(!result.approved);
        assert_eq!(result.feedback, "Was NOT_APPROVED before, now fixed.");
    }

    #[test]
    fn language_hint_defaults_to_none() {
        let req: CodeReviewRequest = serde_json::from_str(
            r#"{"project_id":"p","project_title":"t","project_description":"d","code":"x","language":"rust"}"#,
        )
        .unwrap();
        assert_eq!(req.language_hint, None);
    }
}
