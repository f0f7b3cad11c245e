//! OpenAI-compatible chat-completion wire types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Some providers report failures in a 200 body
    pub error: Option<ChatCompletionError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionError {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the top choice, if any
    pub fn into_top_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}
