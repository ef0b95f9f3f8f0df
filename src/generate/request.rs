//! Chat-completion request construction.

use crate::config::PromptCatalog;
use crate::domain::{ChatMessage, ChatRequest, GenerationMode, MessageOrder};

/// Builds one request per source file from the prompt catalog.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    order: MessageOrder,
    prompts: PromptCatalog,
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>, prompts: PromptCatalog) -> Self {
        Self { model: model.into(), order: MessageOrder::default(), prompts }
    }

    pub fn order(mut self, order: MessageOrder) -> Self {
        self.order = order;
        self
    }

    /// Assemble the request for `source` in `mode`. Empty prompts are sent as-is.
    pub fn build(&self, mode: GenerationMode, source: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: ordered_messages(self.order, self.prompts.prompt_for(mode), source),
            temperature: mode.temperature(),
            max_tokens: mode.max_tokens(),
        }
    }
}

/// One instruction and one payload, in the requested order.
pub fn ordered_messages(order: MessageOrder, prompt: &str, source: &str) -> Vec<ChatMessage> {
    let payload = ChatMessage::user(source);
    let instruction = ChatMessage::system(prompt);
    match order {
        MessageOrder::UserFirst => vec![payload, instruction],
        MessageOrder::SystemFirst => vec![instruction, payload],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use serde_json::json;

    fn catalog() -> PromptCatalog {
        PromptCatalog { markdown: "md".into(), inline: "inline".into(), starlight: "star".into() }
    }

    #[test]
    fn user_message_precedes_system_prompt() {
        let builder = RequestBuilder::new("codestral-latest", catalog());
        for mode in [GenerationMode::Markdown, GenerationMode::Inline, GenerationMode::Starlight] {
            let request = builder.build(mode, "package main");
            assert_eq!(request.messages.len(), 2);
            assert_eq!(request.messages[0].role, Role::User);
            assert_eq!(request.messages[0].content, "package main");
            assert_eq!(request.messages[1].role, Role::System);
            assert_eq!(request.messages[1].content, catalog().prompt_for(mode));
        }
    }

    #[test]
    fn system_first_swaps_order() {
        let builder =
            RequestBuilder::new("codestral-latest", catalog()).order(MessageOrder::SystemFirst);
        let request = builder.build(GenerationMode::Inline, "fn main() {}");
        assert_eq!(request.messages[0], ChatMessage::system("inline"));
        assert_eq!(request.messages[1], ChatMessage::user("fn main() {}"));
    }

    #[test]
    fn budgets_follow_mode() {
        let builder = RequestBuilder::new("m", catalog());
        let md = builder.build(GenerationMode::Markdown, "");
        let star = builder.build(GenerationMode::Starlight, "");
        assert_eq!(md.max_tokens, 100_000);
        assert_eq!(star.max_tokens, 10_000);
        assert_eq!(md.temperature, 0.5);
    }

    #[test]
    fn empty_prompt_passes_through() {
        let prompts = PromptCatalog { markdown: String::new(), ..catalog() };
        let request = RequestBuilder::new("m", prompts).build(GenerationMode::Markdown, "x");
        assert_eq!(request.messages[1].content, "");
    }

    #[test]
    fn wire_shape() {
        let request = RequestBuilder::new("codestral-latest", catalog())
            .build(GenerationMode::Starlight, "code");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "codestral-latest",
                "messages": [
                    {"role": "user", "content": "code"},
                    {"role": "system", "content": "star"}
                ],
                "temperature": 0.5,
                "max_tokens": 10000
            })
        );
    }
}
