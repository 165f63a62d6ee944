//! Category prompt templates
//!
//! One handlebars template per category, embedded in the binary with an
//! optional file-override directory ({name}.pmt). The templates are data:
//! adding a category means adding a template and a fallback table, not
//! touching the generation state machine.
//!
//! The shared system prompt pins the output contract; the per-category
//! template carries the tone rules and the user's inputs.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::domain::Category;

/// Output-shape rules shared by every category
pub const SYSTEM_PROMPT: &str = r#"You are a coach who breaks a personal goal into exactly 7 small, concrete daily challenges.

Respond with strict JSON only - no prose before or after, no Markdown fences. The JSON must match exactly:

{
  "challenges": [
    {"title": "...", "description": "...", "estimatedTime": "..."}
  ],
  "boardingPass": "..."
}

Rules:
- Exactly 7 challenges, ordered from easiest first step to the final push
- Each title is 3-6 words, each description is 1-2 sentences of concrete instruction
- estimatedTime is a short label like "5 min", "20 min", "1 hour"
- boardingPass is one short encouraging sentence addressed to the user
"#;

const TRAVEL: &str = r#"Create a 7-step itinerary for someone preparing to travel to {{destination}} within {{timeline}}.

Their own words about why this trip matters:
{{user_story}}

Tone: adventurous and warm, like a well-traveled friend. Use travel language (itinerary, route, departure). First steps should be research and budgeting; later steps bookings and packing. The boardingPass should read like a boarding-pass stamp for their adventure.
"#;

const CAREER: &str = r#"Create a 7-step plan for someone working toward this career goal: {{destination}}, within {{timeline}}.

Their own words about why this matters:
{{user_story}}

Tone: direct and confident, like a trusted mentor. Early steps should clarify the target and audit current skills; later steps should be visible actions (conversations, applications, deliverables). The boardingPass should sound like a vote of confidence from someone who has seen them work.
"#;

const FINANCE: &str = r#"Create a 7-step plan for someone working toward this financial goal: {{destination}}, within {{timeline}}.

Their own words about why this matters:
{{user_story}}

Tone: calm and practical, never preachy about money. Early steps should measure the current situation; middle steps cut or automate; the last step locks the habit in. Use concrete numbers where the inputs allow. The boardingPass should make the goal feel safely within reach.
"#;

const GROWTH: &str = r#"Create a 7-step plan for someone pursuing this personal growth goal: {{destination}}, within {{timeline}}.

Their own words about why this matters:
{{user_story}}

Tone: encouraging and patient. Steps should be tiny and repeatable - the point is momentum, not intensity. Each step should take under 30 minutes. The boardingPass should celebrate starting, not finishing.
"#;

const RELATIONSHIP: &str = r#"Create a 7-step plan for someone nurturing this relationship goal: {{destination}}, within {{timeline}}.

Their own words about why this matters:
{{user_story}}

Tone: gentle and sincere, never clinical. Steps should be small gestures and honest conversations, spread across the timeline. Avoid grand expensive gestures. The boardingPass should feel like a note from someone who believes in the relationship.
"#;

/// Get the embedded template for a category
fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "itinerary-travel" => Some(TRAVEL),
        "itinerary-career" => Some(CAREER),
        "itinerary-finance" => Some(FINANCE),
        "itinerary-growth" => Some(GROWTH),
        "itinerary-relationship" => Some(RELATIONSHIP),
        _ => None,
    }
}

/// Context for rendering category templates
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    /// Free-text destination
    pub destination: String,
    /// Free-text timeline label
    pub timeline: String,
    /// The user's motivation, in their own words
    pub user_story: String,
}

/// Loads and renders category prompt templates
pub struct PromptLibrary {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Optional override directory ({name}.pmt files)
    override_dir: Option<PathBuf>,
}

impl PromptLibrary {
    /// Create a library with an optional override directory
    pub fn new(override_dir: Option<impl AsRef<Path>>) -> Self {
        let override_dir = override_dir.map(|d| d.as_ref().to_path_buf()).filter(|d| d.exists());
        Self {
            hbs: Handlebars::new(),
            override_dir,
        }
    }

    /// A library that only uses embedded templates
    pub fn embedded_only() -> Self {
        Self {
            hbs: Handlebars::new(),
            override_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks the override directory first, then embedded templates.
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
        }

        if let Some(content) = get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render the template for a category with the given context
    pub fn render(&self, category: Category, context: &PromptContext) -> Result<String> {
        let template = self.load_template(category.template_name())?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", category.template_name(), e))
    }
}
