//! OpenAI client configuration and the production `ChatModel` implementation.

use crate::agent::{tool_definitions, ChatMessage, ChatModel, ChatOutcome};
use crate::capability::Capability;
use crate::conversation::ToolCall;
use crate::error::{GranskeError, Result};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with configured timeout.
///
/// Uses a 5-minute timeout by default to prevent hung API calls.
pub fn create_client() -> Client<OpenAIConfig> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    Client::with_config(OpenAIConfig::default()).with_http_client(http_client)
}

/// `ChatModel` backed by the OpenAI chat completions API.
pub struct OpenAiChat {
    client: Client<OpenAIConfig>,
}

impl OpenAiChat {
    pub fn new() -> Self {
        Self {
            client: create_client(),
        }
    }
}

impl Default for OpenAiChat {
    fn default() -> Self {
        Self::new()
    }
}

fn to_request_message(message: ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let message = match message {
        ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| GranskeError::Agent(e.to_string()))?
            .into(),
        ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| GranskeError::Agent(e.to_string()))?
            .into(),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(content) = content {
                builder.content(content);
            }
            if !tool_calls.is_empty() {
                builder.tool_calls(
                    tool_calls
                        .into_iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id,
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name,
                                arguments: call.arguments.to_string(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            builder
                .build()
                .map_err(|e| GranskeError::Agent(e.to_string()))?
                .into()
        }
        ChatMessage::Tool { call_id, content } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(call_id)
            .content(content)
            .build()
            .map_err(|e| GranskeError::Agent(e.to_string()))?
            .into(),
    };
    Ok(message)
}

fn from_response_call(call: &ChatCompletionMessageToolCall) -> ToolCall {
    // Arguments that fail to parse are kept raw; the capability layer will
    // surface the problem as an in-band error result.
    let arguments = serde_json::from_str(&call.function.arguments)
        .unwrap_or_else(|_| serde_json::Value::String(call.function.arguments.clone()));
    ToolCall {
        id: call.id.clone(),
        name: call.function.name.clone(),
        arguments,
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(
        &self,
        model: &str,
        temperature: f32,
        messages: Vec<ChatMessage>,
        capabilities: &[Capability],
    ) -> Result<ChatOutcome> {
        let messages = messages
            .into_iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .temperature(temperature)
            .messages(messages)
            .tools(tool_definitions(capabilities))
            .build()
            .map_err(|e| GranskeError::Agent(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GranskeError::OpenAI(format!("chat completion failed: {}", e)))?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| GranskeError::Agent("No response from model".to_string()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(from_response_call)
            .collect();

        Ok(ChatOutcome {
            content: choice.message.content.clone(),
            tool_calls,
        })
    }
}
