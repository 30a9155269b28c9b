// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::settings::{is_present, AiSettings};
use crate::domain::services::insight_service::InsightGenerator;
use crate::domain::services::prompt_builder::SYSTEM_INSTRUCTION;

static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_-]*\s*").expect("fence regex is valid"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*```\s*$").expect("fence regex is valid"));

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    fn from_body(body: &Value) -> Self {
        let read = |key: &str| body["usage"][key].as_u64().unwrap_or(0) as u32;
        Self {
            prompt_tokens: read("prompt_tokens"),
            completion_tokens: read("completion_tokens"),
            total_tokens: read("total_tokens"),
        }
    }
}

/// 单个提供商调用失败的原因
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider {0} has no API key configured")]
    NotConfigured(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("response contains no message content")]
    MissingContent,

    #[error("message content rejected: {0}")]
    InvalidContent(String),
}

impl ProviderError {
    /// 请求成功但内容无法解析/校验
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::InvalidContent(_))
    }

    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// 一次补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

/// 提供商返回的、已去除代码围栏并解析为JSON的内容
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: Value,
    pub usage: TokenUsage,
}

/// 聊天补全提供商
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// 提供商名称，例如 `openai`
    fn name(&self) -> &str;

    fn model(&self) -> &str;

    /// 是否配置了API密钥
    fn is_configured(&self) -> bool;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError>;
}

/// OpenAI 兼容的 `/chat/completions` 客户端
///
/// OpenAI 与 OpenRouter 共用此实现，区别仅在于基础URL、模型和附加请求头
pub struct ChatCompletionProvider {
    name: String,
    api_key: Option<String>,
    model: String,
    api_base_url: String,
    temperature: f32,
    extra_headers: Vec<(String, String)>,
    client: reqwest::Client,
}

impl ChatCompletionProvider {
    pub fn new_with_config(name: &str, api_key: Option<String>, model: String, api_base_url: String) -> Self {
        Self {
            name: name.to_string(),
            api_key,
            model,
            api_base_url,
            temperature: 0.3,
            extra_headers: Vec::new(),
            client: reqwest::Client::new(),
        }
    }

    /// OpenAI 提供商
    pub fn openai(settings: &AiSettings) -> Self {
        Self::new_with_config(
            "openai",
            settings.openai_api_key.clone(),
            settings.openai_model.clone(),
            settings.openai_base_url.clone(),
        )
        .with_temperature(settings.temperature)
    }

    /// OpenRouter 提供商，附带 `HTTP-Referer` 与 `X-Title`
    pub fn openrouter(settings: &AiSettings) -> Self {
        Self::new_with_config(
            "openrouter",
            settings.openrouter_api_key.clone(),
            settings.openrouter_model.clone(),
            settings.openrouter_base_url.clone(),
        )
        .with_temperature(settings.temperature)
        .with_header("HTTP-Referer", &settings.site_url)
        .with_header("X-Title", &settings.app_title)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.extra_headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[async_trait]
impl LlmProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        is_present(&self.api_key)
    }

    /// 调用 `/chat/completions` 并解析消息内容
    ///
    /// # 错误
    /// * 未配置密钥、网络错误、超时、非2xx状态
    /// * 响应体不是JSON或缺少 `choices[0].message.content`
    /// * 去除代码围栏后内容不是JSON
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ProviderError::NotConfigured(self.name.clone()))?;

        let request_body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": request.prompt}
            ],
            "max_tokens": request.max_tokens,
            "temperature": self.temperature
        });

        let url = format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'));
        let mut builder = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .timeout(request.timeout)
            .json(&request_body);
        for (name, value) in &self.extra_headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, request.timeout))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, request.timeout))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate(&text, 500),
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| ProviderError::InvalidBody(e.to_string()))?;
        let usage = TokenUsage::from_body(&body);

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(ProviderError::MissingContent)?;

        let content = serde_json::from_str::<Value>(&strip_code_fences(content))
            .map_err(|e| ProviderError::InvalidContent(e.to_string()))?;

        Ok(Completion { content, usage })
    }
}

/// 去除模型输出外层的 Markdown 代码围栏
pub fn strip_code_fences(content: &str) -> String {
    let trimmed = content.trim();
    let without_open = FENCE_OPEN.replace(trimmed, "");
    FENCE_CLOSE.replace(&without_open, "").trim().to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 提供商链成功结果
#[derive(Debug, Clone)]
pub struct ChainSuccess<T> {
    pub value: T,
    pub provider: String,
    pub model: String,
    pub usage: TokenUsage,
}

/// 所有提供商均失败
#[derive(Error, Debug)]
#[error("all AI providers failed after {} attempt(s)", .attempts.len())]
pub struct ChainFailure {
    /// (提供商名称, 失败原因)
    pub attempts: Vec<(String, ProviderError)>,
}

impl ChainFailure {
    /// 每次尝试都在内容阶段失败
    pub fn is_parse_failure(&self) -> bool {
        !self.attempts.is_empty() && self.attempts.iter().all(|(_, e)| e.is_content_error())
    }
}

/// 有序的提供商回退链
///
/// 每个已配置的提供商最多调用一次；任何失败（包括解码失败）都会转向下一个
pub struct ProviderChain {
    providers: Vec<Arc<dyn LlmProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        Self { providers }
    }

    /// 首选提供商在前，另一个在后
    pub fn from_settings(settings: &AiSettings) -> Self {
        let openai: Arc<dyn LlmProvider> = Arc::new(ChatCompletionProvider::openai(settings));
        let openrouter: Arc<dyn LlmProvider> = Arc::new(ChatCompletionProvider::openrouter(settings));

        let providers = if settings.default_provider.eq_ignore_ascii_case("openrouter") {
            vec![openrouter, openai]
        } else {
            vec![openai, openrouter]
        };

        Self::new(providers)
    }

    pub fn providers(&self) -> &[Arc<dyn LlmProvider>] {
        &self.providers
    }

    pub fn has_configured_provider(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }

    /// 依次调用提供商，直到某个返回的内容通过 `decode`
    pub async fn complete_with<T, F>(
        &self,
        request: &CompletionRequest,
        decode: F,
    ) -> Result<ChainSuccess<T>, ChainFailure>
    where
        F: Fn(Value) -> Result<T, String>,
    {
        let mut attempts = Vec::new();

        for provider in &self.providers {
            if !provider.is_configured() {
                debug!("Skipping provider {}: no API key", provider.name());
                continue;
            }

            let outcome = match provider.complete(request).await {
                Ok(completion) => decode(completion.content)
                    .map(|value| (value, completion.usage))
                    .map_err(ProviderError::InvalidContent),
                Err(e) => Err(e),
            };

            match outcome {
                Ok((value, usage)) => {
                    info!(
                        provider = provider.name(),
                        model = provider.model(),
                        total_tokens = usage.total_tokens,
                        estimated_cost_usd =
                            InsightGenerator::estimate_api_cost(usage.total_tokens, provider.model()),
                        "AI provider call succeeded"
                    );
                    return Ok(ChainSuccess {
                        value,
                        provider: provider.name().to_string(),
                        model: provider.model().to_string(),
                        usage,
                    });
                }
                Err(e) => {
                    warn!("AI provider {} failed: {}", provider.name(), e);
                    metrics::counter!("llm_provider_failures_total", "provider" => provider.name().to_string())
                        .increment(1);
                    attempts.push((provider.name().to_string(), e));
                }
            }
        }

        Err(ChainFailure { attempts })
    }
}
