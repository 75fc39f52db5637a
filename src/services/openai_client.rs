use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::domain::CompletionResponse;

const RESEARCH_MODEL: &str = "gpt-3.5-turbo";
const MESSAGING_MODEL: &str = "gpt-4-turbo-preview";

const RESEARCH_MAX_TOKENS: u32 = 200;
const MESSAGING_MAX_TOKENS: u32 = 500;

const TEMPERATURE: f32 = 0.2;

const RESEARCH_SYSTEM_PROMPT: &str =
    "You are a research assistant. Extract information precisely according to instructions.";
const MESSAGING_SYSTEM_PROMPT: &str =
    "You are an expert at writing natural, personalized outreach messages.";

// Appended to every system prompt so misses come back as a single
// classifiable token instead of free-form apologies.
const REFUSAL_INSTRUCTION: &str =
    "If you cannot fulfill the request or find the required information, you MUST respond with only the word: NO";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn extract(&self, prompt: &str, content: &str) -> CompletionResponse;
}

#[async_trait]
pub trait Personalizer: Send + Sync {
    async fn personalize(&self, prompt: &str) -> CompletionResponse;
}

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

impl Default for OpenaiClient {
    fn default() -> Self {
        OpenaiClient {
            client: Client::new(),
        }
    }
}

impl OpenaiClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        OpenaiClient {
            client: Client::with_config(config),
        }
    }

    async fn request_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> anyhow::Result<String> {
        let system_prompt = format!("{}\n{}", system_prompt, REFUSAL_INSTRUCTION);

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()?
                    .into(),
            ])
            .max_tokens(max_tokens)
            .temperature(TEMPERATURE)
            .build()?;

        let response = self.client.chat().create(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("No choices in Openai response"))
    }

    async fn get_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
        max_tokens: u32,
    ) -> CompletionResponse {
        match self
            .request_completion(system_prompt, user_prompt, model, max_tokens)
            .await
        {
            Ok(text) => classify_completion(&text),
            Err(e) => {
                log::error!("Openai request failed: {:?}", e);
                CompletionResponse::Error(e.to_string())
            }
        }
    }
}

#[async_trait]
impl Summarizer for OpenaiClient {
    async fn extract(&self, prompt: &str, content: &str) -> CompletionResponse {
        let user_prompt = format!("{}\n\nContent:\n---\n{}\n---", prompt, content);
        self.get_completion(
            RESEARCH_SYSTEM_PROMPT,
            &user_prompt,
            RESEARCH_MODEL,
            RESEARCH_MAX_TOKENS,
        )
        .await
    }
}

#[async_trait]
impl Personalizer for OpenaiClient {
    async fn personalize(&self, prompt: &str) -> CompletionResponse {
        self.get_completion(
            MESSAGING_SYSTEM_PROMPT,
            prompt,
            MESSAGING_MODEL,
            MESSAGING_MAX_TOKENS,
        )
        .await
    }
}

/// Sorts a raw completion into text, refusal or error. A reply of `NO`
/// (alone or as a `NO:` prefix, any case) is the model following the refusal
/// instruction. Accepted text has double quotes stripped.
pub fn classify_completion(raw: &str) -> CompletionResponse {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CompletionResponse::Error("Empty completion from model".to_string());
    }

    let upper = trimmed.to_uppercase();
    if upper == "NO" || upper.starts_with("NO:") {
        return CompletionResponse::Refusal;
    }

    CompletionResponse::Text(trimmed.replace('"', "").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::classify_completion;
    use crate::domain::CompletionResponse;

    #[test]
    fn bare_no_is_a_refusal() {
        assert_eq!(classify_completion("NO"), CompletionResponse::Refusal);
        assert_eq!(classify_completion("  no  "), CompletionResponse::Refusal);
    }

    #[test]
    fn no_prefix_is_a_refusal() {
        assert_eq!(
            classify_completion("NO: the content does not mention any funding round."),
            CompletionResponse::Refusal
        );
        assert_eq!(
            classify_completion("No: nothing relevant found"),
            CompletionResponse::Refusal
        );
    }

    #[test]
    fn text_starting_with_no_is_not_a_refusal() {
        assert_eq!(
            classify_completion("Nokia announced a new robotics division last quarter."),
            CompletionResponse::Text(
                "Nokia announced a new robotics division last quarter.".to_string()
            )
        );
    }

    #[test]
    fn accepted_text_is_trimmed_and_unquoted() {
        assert_eq!(
            classify_completion("  \"Acme raised a $12M Series A in March.\"  "),
            CompletionResponse::Text("Acme raised a $12M Series A in March.".to_string())
        );
    }

    #[test]
    fn empty_completion_is_an_error() {
        assert!(matches!(
            classify_completion("   "),
            CompletionResponse::Error(_)
        ));
    }
}
