//! Payloads exchanged with the research and plan-generation services.

use serde::{Deserialize, Serialize};

use super::projects::{NewAttachment, ProjectPlan};
use super::strategies::StrategyType;

/// What the user describes when asking for a plan
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub outcome: String,
    pub selected_strategy: StrategyType,
    /// Plan sets to attach and analyze once the project exists
    #[serde(default)]
    pub plan_set_files: Vec<NewAttachment>,
}

impl ProjectInput {
    /// Field length limits of the project form.
    pub fn validate(&self) -> Result<(), String> {
        check_len("title", &self.title, 3, 100)?;
        check_len("description", &self.description, 10, 500)?;
        check_len("outcome", &self.outcome, 10, 1000)?;
        Ok(())
    }

    /// Query sent to the research service.
    pub fn research_query(&self) -> String {
        format!(
            "{}: {} with the goal of {} using {} methodology",
            self.title,
            self.description,
            self.outcome,
            self.selected_strategy.as_str()
        )
    }
}

fn check_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), String> {
    let len = value.trim().chars().count();
    if len < min {
        return Err(format!("{} must be at least {} characters", field, min));
    }
    if len > max {
        return Err(format!("{} must be at most {} characters", field, max));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchSource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub query: String,
    pub content: String,
    pub sources: Vec<ResearchSource>,
    /// Set when the service failed and placeholder content was substituted
    #[serde(default)]
    pub fallback: bool,
}

/// Plan returned by the generator, or the illustrative default
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    pub plan: ProjectPlan,
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProjectInput {
        ProjectInput {
            title: "Roof Retrofit".to_string(),
            description: "Retrofit the warehouse roof with panels".to_string(),
            outcome: "Cut the energy bill in half".to_string(),
            selected_strategy: StrategyType::Waterfall,
            plan_set_files: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_form_limits() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_title() {
        let mut input = input();
        input.title = "ab".to_string();

        let err = input.validate().unwrap_err();
        assert!(err.contains("title"));
    }

    #[test]
    fn test_research_query_mentions_methodology() {
        assert_eq!(
            input().research_query(),
            "Roof Retrofit: Retrofit the warehouse roof with panels with the goal of \
             Cut the energy bill in half using waterfall methodology"
        );
    }
}
