use super::prompt::{build_analysis_prompt, SYSTEM_PROMPT};
use super::types::{
    parse_analysis, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ClassifierError,
    ContentAnalysis, ResponseFormat,
};
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.1,
            max_tokens: 1500,
            timeout: Duration::from_secs(90),
        }
    }
}

impl ClassifierConfig {
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// Sends transcripts to a chat completion endpoint and parses the analysis.
pub struct ClassifierClient {
    client: Client,
    config: ClassifierConfig,
}

impl ClassifierClient {
    pub fn new(mut config: ClassifierConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        config.api_key = config.api_key.filter(|k| !k.trim().is_empty());

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn build_request<'a>(
        &'a self,
        transcript: &str,
        video_title: &str,
        channel_name: &str,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_analysis_prompt(transcript, video_title, channel_name),
                },
            ],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    pub async fn classify(
        &self,
        transcript: &str,
        video_title: &str,
        channel_name: &str,
    ) -> Result<ContentAnalysis, ClassifierError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ClassifierError::NotConfigured)?;
        let request = self.build_request(transcript, video_title, channel_name);

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Upstream { status, body });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ClassifierError::MalformedResponse("completion has no message content".to_string())
            })?;

        log::debug!("Classification response: {}", content);
        parse_analysis(&content)
    }
}
