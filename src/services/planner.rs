//! Plan generation client for the hosted messages API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{AiClient, PlanGenerator, ServiceError};
use crate::domain::ai::{ProjectInput, ResearchResult};
use crate::domain::{Level, Milestone, OperatingProcedure, ProjectPlan, Risk};

const API_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct PlanClient {
    http: AiClient,
    url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl PlanClient {
    pub fn new(
        http: AiClient,
        url: &str,
        api_key: Option<String>,
        model: &str,
        max_tokens: u32,
    ) -> Self {
        Self {
            http,
            url: url.to_string(),
            api_key,
            model: model.to_string(),
            max_tokens,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

impl MessagesResponse {
    /// Text of the first content block, empty when it is not text.
    fn first_text(self) -> String {
        self.content
            .into_iter()
            .next()
            .filter(|block| block.kind == "text")
            .and_then(|block| block.text)
            .unwrap_or_default()
    }
}

// ============================================================================
// Prompt and response handling
// ============================================================================

pub fn build_prompt(input: &ProjectInput, research: &ResearchResult) -> String {
    format!(
        r#"You are an expert project manager and strategic planner. Your task is to create a detailed project plan based on the following input and research.

PROJECT INFORMATION:
Title: {title}
Description: {description}
Desired Outcome: {outcome}
Selected Strategy: {strategy}

RESEARCH INFORMATION:
{research}

Based on this information, create a comprehensive project plan that includes:
1. A clear overview of the project
2. Specific objectives
3. Key milestones with estimated durations
4. Required resources
5. Potential risks and mitigation strategies
6. Standard operating procedures with step-by-step instructions
7. Recommendations for successful implementation

Format the response as a structured JSON object with the following fields:
- title: string
- description: string
- strategy: string (one of: 'agile', 'waterfall', 'lean', 'sixSigma', 'kanban', 'scrum', 'prince2', 'pmi', 'custom')
- overview: string
- objectives: string[]
- keyMilestones: Array of {{title: string, description: string, estimatedDuration: string}}
- resources: string[]
- risks: Array of {{description: string, mitigation: string, impact: 'low' | 'medium' | 'high', probability: 'low' | 'medium' | 'high'}}
- standardOperatingProcedures: Array of {{title: string, steps: string[]}}
- recommendations: string[]

Ensure the plan is practical, actionable, and tailored to the specific project and strategy."#,
        title = input.title,
        description = input.description,
        outcome = input.outcome,
        strategy = input.selected_strategy.as_str(),
        research = research.content,
    )
}

/// Locate the JSON object in a model reply.
///
/// A fenced ```json block wins; otherwise the span from the first `{` to the
/// last `}` is taken.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            let candidate = body[..end].trim();
            if !candidate.is_empty() {
                return Some(candidate);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_plan(text: &str) -> Result<ProjectPlan, ServiceError> {
    let json = extract_json(text)
        .ok_or_else(|| ServiceError::Parse("no JSON object in plan response".to_string()))?;

    let mut plan: ProjectPlan =
        serde_json::from_str(json).map_err(|e| ServiceError::Parse(e.to_string()))?;
    // The store assigns plan ids.
    plan.id = None;
    Ok(plan)
}

#[async_trait]
impl PlanGenerator for PlanClient {
    #[instrument(skip(self, input, research), fields(title = %input.title))]
    async fn generate_plan(
        &self,
        input: &ProjectInput,
        research: &ResearchResult,
        request_id: Option<&str>,
    ) -> Result<ProjectPlan, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ServiceError::MissingCredential("Plan"))?;

        let req = self
            .http
            .post(&self.url, request_id)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION);

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: build_prompt(input, research),
            }],
        };

        let response: MessagesResponse = self.http.send_json(req, &body).await?;
        let text = response.first_text();
        debug!(chars = text.len(), "Plan response received");

        parse_plan(&text)
    }
}

/// Illustrative plan used when generation fails.
pub fn placeholder_plan(input: &ProjectInput) -> ProjectPlan {
    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    ProjectPlan {
        id: None,
        title: input.title.clone(),
        description: input.description.clone(),
        strategy: input.selected_strategy,
        overview: "This is a placeholder for the project overview. A generated overview was \
                   unavailable for this request."
            .to_string(),
        objectives: strings(&[
            "Objective 1: Complete project planning",
            "Objective 2: Implement core features",
            "Objective 3: Test and validate",
        ]),
        key_milestones: vec![
            Milestone {
                title: "Project Kickoff".to_string(),
                description: "Initial meeting to align on project goals and approach".to_string(),
                estimated_duration: "1 week".to_string(),
            },
            Milestone {
                title: "MVP Development".to_string(),
                description: "Development of minimum viable product".to_string(),
                estimated_duration: "4 weeks".to_string(),
            },
        ],
        resources: strings(&["Project Manager", "Development Team", "QA Engineer"]),
        risks: vec![Risk {
            description: "Scope creep".to_string(),
            mitigation: "Regular scope reviews and change management process".to_string(),
            impact: Level::High,
            probability: Level::Medium,
        }],
        standard_operating_procedures: vec![OperatingProcedure {
            title: "Daily Stand-up".to_string(),
            steps: strings(&[
                "Team meets for 15 minutes each morning",
                "Each member shares progress, plans, and blockers",
                "Project manager notes any issues requiring follow-up",
            ]),
        }],
        recommendations: strings(&[
            "Implement regular stakeholder reviews",
            "Maintain detailed documentation",
        ]),
    }
}
