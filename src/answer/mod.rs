//! Answer generation for the game
//! Builds prompts, calls the resolved provider and degrades to a canned answer

pub mod fallback;
pub mod post_process;
pub mod prompts;

use crate::providers::{AdapterFactory, GenerationResult, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const AI_CONFIDENCE: f32 = 0.85;
pub const FALLBACK_CONFIDENCE: f32 = 0.5;
pub const MAX_QUESTION_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Obvious,
    #[default]
    Normal,
    Deceptive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub personality: Personality,
}

impl AnswerRequest {
    /// Question must hold between 1 and 500 characters.
    pub fn validate(&self) -> Result<(), String> {
        let len = self.question.chars().count();
        if len == 0 {
            return Err("question must not be empty".to_string());
        }
        if len > MAX_QUESTION_CHARS {
            return Err(format!("question must be at most {MAX_QUESTION_CHARS} characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
    pub confidence: f32,
    pub tokens_used: u32,
}

impl AnswerResponse {
    fn fallback(personality: Personality) -> Self {
        Self {
            answer: fallback::fallback_answer(personality),
            confidence: FALLBACK_CONFIDENCE,
            tokens_used: 0,
        }
    }
}

#[derive(Clone)]
pub struct AnswerService {
    factory: AdapterFactory,
}

impl AnswerService {
    pub fn new(factory: AdapterFactory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &AdapterFactory {
        &self.factory
    }

    /// Always produces an answer; provider failures turn into a canned reply.
    pub async fn answer(&self, request: &AnswerRequest, provider: Option<&str>) -> AnswerResponse {
        let personality = request.personality;
        debug!(?personality, difficulty = ?request.difficulty, provider, "generating answer");
        match self.generate(request, provider).await {
            Ok(result) => {
                let answer = post_process::post_process(&result.answer, personality);
                if answer.is_empty() {
                    warn!("answer was empty after post-processing, using fallback");
                    return AnswerResponse::fallback(personality);
                }
                AnswerResponse {
                    answer,
                    confidence: AI_CONFIDENCE,
                    tokens_used: result.tokens_used,
                }
            }
            Err(err) => {
                warn!(error = %err, "AI generation failed, using fallback");
                AnswerResponse::fallback(personality)
            }
        }
    }

    async fn generate(
        &self,
        request: &AnswerRequest,
        provider: Option<&str>,
    ) -> Result<GenerationResult, ProviderError> {
        let adapter = self.factory.resolve(provider)?;
        let personality = request.personality;

        adapter
            .generate(
                prompts::system_prompt(personality),
                &prompts::user_prompt(&request.question, personality),
                prompts::temperature(personality),
            )
            .await
    }
}
