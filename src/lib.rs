//! Wayfarer - goal progression engine with daily challenges
//!
//! Wayfarer turns a personal goal into an ordered sequence of small daily
//! tasks and walks the user through them one at a time. Tasks unlock
//! sequentially, completions are per-calendar-day and idempotent, and
//! consecutive active days build per-goal and global streaks.
//!
//! # Core Concepts
//!
//! - **Sequential gating**: per goal, at most one task is unlocked and
//!   incomplete at any time
//! - **One-way unlock**: a task never re-locks, even if the completion that
//!   unlocked it is removed
//! - **Explicit calendar**: "today" is always a parameter, never a hidden
//!   clock read
//! - **Generation never fails**: if the remote model is unreachable or
//!   returns garbage, a deterministic per-category fallback itinerary is
//!   used instead
//!
//! # Modules
//!
//! - [`domain`] - Goal, DailyTask, Category, and ID generation
//! - [`engine`] - Progression state machine (completion, unlock, streaks)
//! - [`generator`] - Itinerary generation pipeline with fallback
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`store`] - Persistence gateway trait and in-memory implementation
//! - [`streak`] - Pure streak advancement
//! - [`config`] - Configuration types and loading

pub mod config;
pub mod domain;
pub mod engine;
pub mod generator;
pub mod llm;
pub mod store;
pub mod streak;

// Re-export commonly used types
pub use config::{Config, GeneratorConfig, LlmConfig};
pub use domain::{Category, DailyTask, Goal, TaskSpec};
pub use engine::{CompletionOutcome, CreateGoalRequest, EngineError, ProgressionEngine};
pub use generator::{Itinerary, ItineraryGenerator, ItineraryRequest, ItinerarySource, fallback_itinerary};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError, create_client};
pub use store::{GoalFilter, GoalStore, MemoryStore, StorageError};
pub use streak::StreakState;
