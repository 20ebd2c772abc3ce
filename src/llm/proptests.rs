//! Property-based tests for the chat completions translation layer
//!
//! - Turn order and content survive translation to the wire format
//! - A response is accepted only if its first choice carries content

use super::openai::{OpenAIChoice, OpenAIMessage, OpenAIResponse, OpenAIService};
use super::types::{Role, Turn};
use super::LlmErrorKind;
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::System), Just(Role::User), Just(Role::Assistant)]
}

fn arb_turn() -> impl Strategy<Value = Turn> {
    (arb_role(), "[a-zA-Z0-9 _.!?,'\n]{0,80}").prop_map(|(role, content)| Turn::new(role, content))
}

fn choice(content: Option<String>) -> OpenAIChoice {
    OpenAIChoice {
        message: Some(OpenAIMessage {
            role: "assistant".to_string(),
            content,
        }),
    }
}

proptest! {
    #[test]
    fn translation_preserves_order_and_content(turns in proptest::collection::vec(arb_turn(), 1..12)) {
        let wire: Vec<OpenAIMessage> = turns.iter().map(OpenAIService::translate_turn).collect();

        prop_assert_eq!(wire.len(), turns.len());
        for (sent, turn) in wire.iter().zip(&turns) {
            prop_assert_eq!(sent.role.as_str(), turn.role.as_str());
            prop_assert_eq!(sent.content.as_deref(), Some(turn.content.as_str()));
        }
    }

    #[test]
    fn first_choice_wins(replies in proptest::collection::vec("[a-zA-Z0-9 ]{0,40}", 1..5)) {
        let resp = OpenAIResponse {
            choices: replies.iter().cloned().map(|r| choice(Some(r))).collect(),
            usage: None,
        };

        let normalized = OpenAIService::normalize_response(resp).unwrap();
        prop_assert_eq!(&normalized.reply, &replies[0]);
    }

    #[test]
    fn first_choice_without_content_is_rejected(rest in proptest::collection::vec("[a-z]{1,10}", 0..4)) {
        let mut choices = vec![choice(None)];
        choices.extend(rest.into_iter().map(|r| choice(Some(r))));
        let resp = OpenAIResponse { choices, usage: None };

        let err = OpenAIService::normalize_response(resp).unwrap_err();
        prop_assert_eq!(err.kind, LlmErrorKind::MalformedResponse);
    }
}
