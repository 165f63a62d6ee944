//! Itinerary generation pipeline
//!
//! Turns `(category, destination, timeline, user story)` into an ordered
//! challenge list plus one encouragement string ("boarding pass"):
//!
//! ```text
//! BUILD_PROMPT -> CALL_REMOTE -> {success: PARSE -> {ok: DONE(remote), fail: DONE(fallback)},
//!                                 fail: DONE(fallback)}
//! ```
//!
//! Generation never fails: any remote or parse error is absorbed and the
//! deterministic per-category fallback is returned instead. Callers always
//! receive a non-empty challenge list.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::domain::{Category, TaskSpec};
use crate::llm::{CompletionRequest, LlmClient, Message};

mod fallback;
mod prompts;

pub use fallback::fallback_itinerary;
pub use prompts::{PromptContext, PromptLibrary, SYSTEM_PROMPT};

/// Which path produced an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItinerarySource {
    /// Parsed from the remote model's response
    Remote,
    /// Deterministic local synthesis
    Fallback,
}

/// One generated challenge, post-processed and ready to materialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// Sequential identifier: challenge_1, challenge_2, ...
    pub id: String,
    pub title: String,
    pub description: String,
    /// Estimated-duration label, free text
    pub estimated_time: String,
    /// Only the first challenge starts unlocked
    pub unlocked: bool,
    pub completed: bool,
}

/// Result of a generation: ordered challenges plus the boarding pass
#[derive(Debug, Clone)]
pub struct Itinerary {
    pub challenges: Vec<Challenge>,
    pub boarding_pass: String,
    pub source: ItinerarySource,
}

impl Itinerary {
    /// Convert challenges into task specs for the progression engine
    pub fn task_specs(&self) -> Vec<TaskSpec> {
        self.challenges
            .iter()
            .map(|c| TaskSpec::new(&c.title, &c.description, &c.estimated_time))
            .collect()
    }
}

/// Inputs to one generation
#[derive(Debug, Clone)]
pub struct ItineraryRequest {
    pub category: Category,
    pub destination: String,
    pub timeline: String,
    pub user_story: String,
}

/// Expected inner payload from the remote model
#[derive(Debug, Deserialize)]
struct ItineraryPayload {
    challenges: Vec<ChallengePayload>,
    #[serde(rename = "boardingPass")]
    boarding_pass: String,
}

#[derive(Debug, Deserialize)]
struct ChallengePayload {
    title: String,
    description: String,
    #[serde(rename = "estimatedTime")]
    estimated_time: String,
}

/// Assign sequential ids and unlock flags to either path's output
pub(crate) fn post_process(
    steps: Vec<(String, String, String)>,
    boarding_pass: String,
    source: ItinerarySource,
) -> Itinerary {
    let challenges = steps
        .into_iter()
        .enumerate()
        .map(|(idx, (title, description, estimated_time))| Challenge {
            id: format!("challenge_{}", idx + 1),
            title,
            description,
            estimated_time,
            unlocked: idx == 0,
            completed: false,
        })
        .collect();

    Itinerary {
        challenges,
        boarding_pass,
        source,
    }
}

/// Strip an optional Markdown code fence from a model payload.
///
/// If the text starts with a fence, slice from the first `{` to the last
/// `}`; otherwise return the trimmed text unchanged.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Parse the model's text payload into the expected shape
fn parse_payload(text: &str) -> Result<ItineraryPayload, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

/// Generates challenge itineraries via the remote model, falling back to
/// deterministic synthesis on any failure
pub struct ItineraryGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLibrary,
    max_tokens: u32,
}

impl ItineraryGenerator {
    /// Create a generator with its collaborators injected
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLibrary, config: &GeneratorConfig) -> Self {
        Self {
            llm,
            prompts,
            max_tokens: config.max_tokens,
        }
    }

    /// Generate an itinerary. Infallible: every outcome is a non-empty
    /// challenge list with an encouragement string.
    ///
    /// Each invocation is independent; identical inputs may yield different
    /// remote results but always identical fallback results.
    pub async fn generate(&self, request: &ItineraryRequest) -> Itinerary {
        debug!(category = %request.category, destination = %request.destination, "generate: called");

        let context = PromptContext {
            destination: request.destination.clone(),
            timeline: request.timeline.clone(),
            user_story: request.user_story.clone(),
        };

        let prompt = match self.prompts.render(request.category, &context) {
            Ok(p) => p,
            Err(e) => {
                warn!(category = %request.category, error = %e, "generate: prompt render failed, using fallback");
                return fallback_itinerary(request.category);
            }
        };

        let completion = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            messages: vec![Message::user(prompt)],
            max_tokens: self.max_tokens,
        };

        let response = match self.llm.complete(completion).await {
            Ok(r) => r,
            Err(e) => {
                warn!(category = %request.category, error = %e, "generate: remote call failed, using fallback");
                return fallback_itinerary(request.category);
            }
        };

        let Some(text) = response.content else {
            warn!(category = %request.category, "generate: empty response content, using fallback");
            return fallback_itinerary(request.category);
        };

        match parse_payload(&text) {
            Ok(payload) if !payload.challenges.is_empty() => {
                info!(
                    category = %request.category,
                    challenge_count = payload.challenges.len(),
                    "generate: remote itinerary parsed"
                );
                let steps = payload
                    .challenges
                    .into_iter()
                    .map(|c| (c.title, c.description, c.estimated_time))
                    .collect();
                post_process(steps, payload.boarding_pass, ItinerarySource::Remote)
            }
            Ok(_) => {
                warn!(category = %request.category, "generate: remote returned zero challenges, using fallback");
                fallback_itinerary(request.category)
            }
            Err(e) => {
                warn!(category = %request.category, error = %e, "generate: parse failed, using fallback");
                fallback_itinerary(request.category)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use crate::llm::{CompletionResponse, LlmError};

    const WELL_FORMED: &str = r#"{
        "challenges": [
            {"title": "Pick dates", "description": "Choose a window.", "estimatedTime": "10 min"},
            {"title": "Set budget", "description": "Write a number.", "estimatedTime": "20 min"},
            {"title": "Read a guide", "description": "One good one.", "estimatedTime": "30 min"}
        ],
        "boardingPass": "You're on your way!"
    }"#;

    fn request() -> ItineraryRequest {
        ItineraryRequest {
            category: Category::Travel,
            destination: "Iceland".to_string(),
            timeline: "6 months".to_string(),
            user_story: "Northern lights".to_string(),
        }
    }

    fn generator(llm: MockLlmClient) -> ItineraryGenerator {
        ItineraryGenerator::new(
            Arc::new(llm),
            PromptLibrary::embedded_only(),
            &crate::config::GeneratorConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_remote_success() {
        let generator = generator(MockLlmClient::always_text(WELL_FORMED));
        let itinerary = generator.generate(&request()).await;

        assert_eq!(itinerary.source, ItinerarySource::Remote);
        assert_eq!(itinerary.challenges.len(), 3);
        assert_eq!(itinerary.boarding_pass, "You're on your way!");
        assert_eq!(itinerary.challenges[0].id, "challenge_1");
        assert!(itinerary.challenges[0].unlocked);
        assert!(!itinerary.challenges[1].unlocked);
        assert!(!itinerary.challenges[2].unlocked);
    }

    #[tokio::test]
    async fn test_fenced_payload_parses_same_as_bare() {
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        let bare = generator(MockLlmClient::always_text(WELL_FORMED))
            .generate(&request())
            .await;
        let wrapped = generator(MockLlmClient::always_text(fenced)).generate(&request()).await;

        assert_eq!(bare.challenges, wrapped.challenges);
        assert_eq!(bare.boarding_pass, wrapped.boarding_pass);
        assert_eq!(wrapped.source, ItinerarySource::Remote);
    }

    #[tokio::test]
    async fn test_api_error_falls_back() {
        let generator = generator(MockLlmClient::new(vec![Err(LlmError::ApiError {
            status: 503,
            message: "overloaded".to_string(),
        })]));
        let itinerary = generator.generate(&request()).await;

        assert_eq!(itinerary.source, ItinerarySource::Fallback);
        assert_eq!(itinerary.challenges.len(), 7);
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let generator = generator(MockLlmClient::always_text("I'd be happy to help plan your trip!"));
        let itinerary = generator.generate(&request()).await;
        assert_eq!(itinerary.source, ItinerarySource::Fallback);
    }

    #[tokio::test]
    async fn test_schema_mismatch_falls_back() {
        // Valid JSON, wrong shape
        let generator = generator(MockLlmClient::always_text(r#"{"steps": [], "message": "hi"}"#));
        let itinerary = generator.generate(&request()).await;
        assert_eq!(itinerary.source, ItinerarySource::Fallback);
    }

    #[tokio::test]
    async fn test_empty_challenge_list_falls_back() {
        let generator = generator(MockLlmClient::always_text(
            r#"{"challenges": [], "boardingPass": "hello"}"#,
        ));
        let itinerary = generator.generate(&request()).await;
        assert_eq!(itinerary.source, ItinerarySource::Fallback);
        assert_eq!(itinerary.challenges.len(), 7);
    }

    #[tokio::test]
    async fn test_empty_content_falls_back() {
        let generator = generator(MockLlmClient::new(vec![Ok(CompletionResponse {
            content: None,
            stop_reason: crate::llm::StopReason::EndTurn,
            usage: Default::default(),
        })]));
        let itinerary = generator.generate(&request()).await;
        assert_eq!(itinerary.source, ItinerarySource::Fallback);
    }

    #[tokio::test]
    async fn test_fallback_for_every_category_under_failure() {
        for category in Category::ALL {
            let generator = generator(MockLlmClient::always_failing());
            let itinerary = generator
                .generate(&ItineraryRequest {
                    category,
                    destination: "anywhere".to_string(),
                    timeline: "soon".to_string(),
                    user_story: String::new(),
                })
                .await;

            assert_eq!(itinerary.source, ItinerarySource::Fallback, "{}", category);
            assert_eq!(itinerary.challenges.len(), 7, "{}", category);
            assert!(itinerary.challenges[0].unlocked, "{}", category);
            assert!(itinerary.challenges[1..].iter().all(|c| !c.unlocked), "{}", category);
            assert!(!itinerary.boarding_pass.is_empty(), "{}", category);
        }
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        // Fence with no braces is left alone for the parser to reject
        assert_eq!(strip_code_fence("```\nnot json\n```"), "```\nnot json\n```");
    }

    #[test]
    fn test_task_specs_conversion() {
        let itinerary = fallback_itinerary(Category::Growth);
        let specs = itinerary.task_specs();
        assert_eq!(specs.len(), 7);
        assert_eq!(specs[0].title, itinerary.challenges[0].title);
        assert_eq!(specs[0].duration, itinerary.challenges[0].estimated_time);
    }
}
