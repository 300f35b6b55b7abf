//! Service layer modules for external integrations.
//!
//! Research and plan generation call hosted AI services; plan-set analysis
//! reads equipment out of uploaded plan sets. Each collaborator sits behind a
//! trait so the application state can hold a fake in tests. Failures of the
//! AI services never reach the user as errors: the `*_or_placeholder`
//! helpers substitute illustrative content and flag it as a fallback.

pub mod ai_client;
pub mod plan_set;
pub mod planner;
pub mod research;

pub use ai_client::AiClient;
pub use plan_set::{installation_instructions, CatalogAnalyzer};
pub use planner::PlanClient;
pub use research::ResearchClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ai::{PlanOutcome, ProjectInput, ResearchResult};
use crate::domain::{EquipmentItem, ProjectPlan};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} API key is not configured")]
    MissingCredential(&'static str),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid service response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn research(
        &self,
        query: &str,
        request_id: Option<&str>,
    ) -> Result<ResearchResult, ServiceError>;
}

#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn generate_plan(
        &self,
        input: &ProjectInput,
        research: &ResearchResult,
        request_id: Option<&str>,
    ) -> Result<ProjectPlan, ServiceError>;
}

/// Extracts equipment from a plan set document
#[async_trait]
pub trait PlanSetAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<Vec<EquipmentItem>, ServiceError>;
}

/// Runs research, substituting placeholder content on any failure.
pub async fn research_or_placeholder(
    provider: &dyn ResearchProvider,
    query: &str,
    request_id: Option<&str>,
) -> ResearchResult {
    match provider.research(query, request_id).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, request_id = ?request_id, "Research failed - using placeholder content");
            research::placeholder(query)
        }
    }
}

/// Generates a plan, substituting the illustrative default plan on any failure.
pub async fn plan_or_placeholder(
    generator: &dyn PlanGenerator,
    input: &ProjectInput,
    research: &ResearchResult,
    request_id: Option<&str>,
) -> PlanOutcome {
    match generator.generate_plan(input, research, request_id).await {
        Ok(plan) => PlanOutcome {
            plan,
            fallback: false,
        },
        Err(e) => {
            tracing::warn!(error = %e, request_id = ?request_id, "Plan generation failed - using placeholder plan");
            PlanOutcome {
                plan: planner::placeholder_plan(input),
                fallback: true,
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Deterministic collaborators for tests.

    use super::*;
    use crate::domain::ai::ResearchSource;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Research provider that either echoes the query or always fails
    #[derive(Default)]
    pub struct FakeResearch {
        pub fail: bool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl ResearchProvider for FakeResearch {
        async fn research(
            &self,
            query: &str,
            _request_id: Option<&str>,
        ) -> Result<ResearchResult, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ServiceError::MissingCredential("Research"));
            }
            Ok(ResearchResult {
                query: query.to_string(),
                content: format!("Findings about {}", query),
                sources: vec![ResearchSource {
                    title: "Field guide".to_string(),
                    url: "https://example.com/guide".to_string(),
                }],
                fallback: false,
            })
        }
    }

    /// Plan generator that builds a small plan from its inputs, or fails
    #[derive(Default)]
    pub struct FakePlanner {
        pub fail: bool,
    }

    #[async_trait]
    impl PlanGenerator for FakePlanner {
        async fn generate_plan(
            &self,
            input: &ProjectInput,
            research: &ResearchResult,
            _request_id: Option<&str>,
        ) -> Result<ProjectPlan, ServiceError> {
            if self.fail {
                return Err(ServiceError::Parse("no JSON object".to_string()));
            }
            let mut plan = planner::placeholder_plan(input);
            plan.overview = research.content.clone();
            Ok(plan)
        }
    }

    /// Analyzer returning a fixed equipment list
    pub struct FakeAnalyzer {
        pub items: Vec<EquipmentItem>,
        pub fail: bool,
    }

    impl FakeAnalyzer {
        pub fn with_inverter() -> Self {
            Self {
                items: vec![EquipmentItem {
                    id: Uuid::new_v4(),
                    name: "Inverter".to_string(),
                    manufacturer: "SMA".to_string(),
                    model: Some("SB-7.7".to_string()),
                    quantity: 1,
                    specifications: None,
                    installation_url: None,
                }],
                fail: false,
            }
        }
    }

    #[async_trait]
    impl PlanSetAnalyzer for FakeAnalyzer {
        async fn analyze(&self, _url: &str) -> Result<Vec<EquipmentItem>, ServiceError> {
            if self.fail {
                return Err(ServiceError::Parse("unreadable plan set".to_string()));
            }
            Ok(self.items.clone())
        }
    }
}
