//! Prompt construction for the simulated client and the code reviewer.
//!
//! Caller-supplied text is substituted verbatim. Both builders are pure and
//! deterministic.

use crate::models::{CodeReviewRequest, ProjectChatRequest, ReplyLanguage};

/// Cue that asks the model to continue as the client.
const ASSISTANT_CUE: &str = "Assistant:";

const REVIEW_CLOSING: &str = "Provide feedback and end with APPROVED or NOT_APPROVED.";

/// Builds the role-play prompt: persona instructions, the transcript, then the
/// continuation cue, separated by blank lines.
pub fn build_customer_prompt(req: &ProjectChatRequest) -> String {
    let mut parts = Vec::with_capacity(req.messages.len() + 2);
    parts.push(customer_system_prompt(req));
    parts.extend(
        req.messages
            .iter()
            .map(|m| format!("{}: {}", m.role.label(), m.content)),
    );
    parts.push(ASSISTANT_CUE.to_string());
    parts.join("\n\n")
}

fn customer_system_prompt(req: &ProjectChatRequest) -> String {
    match req.language {
        ReplyLanguage::Ar => format!(
            "أنت عميل محاكى في مشروع تدريب داخلي افتراضي. تجسد شخصية: {persona}. مزاجك: {mood}.\n\
             المشروع: {title}\n\
             الوصف: {description}\n\
             \n\
             أجب دائماً بالعربية، بصفة هذا العميل. كن واقعياً في التعامل (متطلب، غامض، أو ودود حسب المزاج). لا تكسر الشخصية.",
            persona = req.client_persona,
            mood = req.client_mood,
            title = req.project_title,
            description = req.project_description,
        ),
        ReplyLanguage::En => format!(
            "You are a simulated client in a virtual internship. Persona: {persona}. Mood: {mood}.\n\
             Project: {title}\n\
             Description: {description}\n\
             \n\
             Always answer in English as this client. Be realistic (demanding, vague, or friendly depending on mood). Stay in character.",
            persona = req.client_persona,
            mood = req.client_mood,
            title = req.project_title,
            description = req.project_description,
        ),
    }
}

/// Builds the reviewer prompt with the submitted code in a fenced block
/// tagged with its language.
pub fn build_review_prompt(req: &CodeReviewRequest) -> String {
    format!(
        "{system}\n\nCode to review (language: {language}):\n\n```{language}\n{code}\n```\n\n{closing}",
        system = review_system_prompt(req),
        language = req.language,
        code = req.code,
        closing = REVIEW_CLOSING,
    )
}

fn review_system_prompt(req: &CodeReviewRequest) -> String {
    let hint = match req.language_hint {
        Some(ReplyLanguage::Ar) => "Respond in Arabic when possible.",
        _ => "Respond in English.",
    };

    format!(
        "You are an experienced developer reviewing intern code for this project:\n\
         Title: {title}\n\
         Description: {description}\n\
         \n\
         Review the code for correctness, clarity, and fit to the project. Be constructive. {hint}\n\
         \n\
         Reply with a short feedback paragraph, then conclude with exactly one line: APPROVED or NOT_APPROVED.",
        title = req.project_title,
        description = req.project_description,
        hint = hint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMessage, ChatRole};

    fn chat_request(language: ReplyLanguage) -> ProjectChatRequest {
        ProjectChatRequest {
            project_id: "p-42".to_string(),
            project_title: "Bakery website".to_string(),
            project_description: "Online ordering for a small bakery".to_string(),
            client_persona: "Owner of a family bakery".to_string(),
            client_mood: "skeptical".to_string(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::User,
                    content: "Hi, I started on the menu page.".to_string(),
                },
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: "Where are the prices?".to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: "Adding them now.".to_string(),
                },
            ],
            language,
        }
    }

    fn review_request(hint: Option<ReplyLanguage>) -> CodeReviewRequest {
        CodeReviewRequest {
            project_id: "p-42".to_string(),
            project_title: "Bakery website".to_string(),
            project_description: "Online ordering for a small bakery".to_string(),
            code: "fn main() {\n    println!(\"{}\", \"<b>hi</b>\");\n}".to_string(),
            language: "rust".to_string(),
            language_hint: hint,
        }
    }

    #[test]
    fn customer_prompt_embeds_persona_and_mood() {
        let prompt = build_customer_prompt(&chat_request(ReplyLanguage::En));
        assert!(prompt.starts_with("You are a simulated client in a virtual internship."));
        assert!(prompt.contains("Persona: Owner of a family bakery."));
        assert!(prompt.contains("Mood: skeptical."));
        assert!(prompt.contains("Project: Bakery website\n"));
        assert!(prompt.contains("Always answer in English"));
    }

    #[test]
    fn customer_prompt_keeps_transcript_order_and_ends_with_cue() {
        let prompt = build_customer_prompt(&chat_request(ReplyLanguage::En));
        let expected_tail = "Stay in character.\n\n\
             User: Hi, I started on the menu page.\n\n\
             Assistant: Where are the prices?\n\n\
             User: Adding them now.\n\n\
             Assistant:";
        assert!(prompt.ends_with(expected_tail), "{}", prompt);
    }

    #[test]
    fn arabic_template_is_selected_by_language() {
        let prompt = build_customer_prompt(&chat_request(ReplyLanguage::Ar));
        assert!(prompt.starts_with("أنت عميل محاكى"));
        assert!(prompt.contains("Owner of a family bakery"));
        assert!(prompt.contains("skeptical"));
        assert!(!prompt.contains("Always answer in English"));
        assert!(prompt.ends_with("\n\nAssistant:"));
    }

    #[test]
    fn empty_conversation_is_system_prompt_plus_cue() {
        let mut req = chat_request(ReplyLanguage::En);
        req.messages.clear();
        let prompt = build_customer_prompt(&req);
        assert!(prompt.ends_with("Stay in character.\n\nAssistant:"));
    }

    #[test]
    fn customer_prompt_is_deterministic() {
        let req = chat_request(ReplyLanguage::Ar);
        assert_eq!(build_customer_prompt(&req), build_customer_prompt(&req));
    }

    #[test]
    fn review_prompt_fences_code_verbatim_with_language_tag() {
        let req = review_request(None);
        let prompt = build_review_prompt(&req);
        let fenced = format!("```rust\n{}\n```", req.code);
        assert!(prompt.contains(&fenced), "{}", prompt);
        assert!(prompt.contains("Code to review (language: rust):"));
        assert!(prompt.ends_with("end with APPROVED or NOT_APPROVED."));
    }

    #[test]
    fn review_prompt_names_project_and_verdict_format() {
        let prompt = build_review_prompt(&review_request(None));
        assert!(prompt.contains("Title: Bakery website\n"));
        assert!(prompt.contains("Description: Online ordering for a small bakery\n"));
        assert!(prompt.contains("exactly one line: APPROVED or NOT_APPROVED."));
    }

    #[test]
    fn review_language_follows_hint() {
        let arabic = build_review_prompt(&review_request(Some(ReplyLanguage::Ar)));
        assert!(arabic.contains("Respond in Arabic when possible."));

        let english = build_review_prompt(&review_request(Some(ReplyLanguage::En)));
        assert!(english.contains("Respond in English."));

        let unspecified = build_review_prompt(&review_request(None));
        assert!(unspecified.contains("Respond in English."));
    }
}
