//! Project-management strategies
//!
//! The strategy tag is descriptive metadata on a project and the key into a
//! static reference table.

use serde::{Deserialize, Serialize};

/// Strategy type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StrategyType {
    Agile,
    Waterfall,
    Lean,
    SixSigma,
    Kanban,
    Scrum,
    Prince2,
    Pmi,
    Custom,
}

impl StrategyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agile => "agile",
            Self::Waterfall => "waterfall",
            Self::Lean => "lean",
            Self::SixSigma => "sixSigma",
            Self::Kanban => "kanban",
            Self::Scrum => "scrum",
            Self::Prince2 => "prince2",
            Self::Pmi => "pmi",
            Self::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        STRATEGIES
            .iter()
            .map(|option| option.id)
            .find(|id| id.as_str() == s)
    }

    /// Keywords used to score a free-text description against this strategy.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Agile => &["software", "flexible", "iterative", "adapt", "evolving"],
            Self::Waterfall => &["sequential", "regulated", "compliance", "documentation", "fixed"],
            Self::Lean => &["efficiency", "waste", "streamline", "optimize", "continuous improvement"],
            Self::SixSigma => &["quality", "defect", "variation", "data", "measure"],
            Self::Kanban => &["workflow", "visualize", "continuous", "flow", "support"],
            Self::Scrum => &["sprint", "product owner", "backlog", "team", "incremental"],
            Self::Prince2 => &["governance", "stage", "board", "business case", "government"],
            Self::Pmi => &["standard", "knowledge area", "process group", "portfolio", "program"],
            Self::Custom => &[],
        }
    }
}

/// Reference entry describing a strategy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOption {
    pub id: StrategyType,
    pub name: &'static str,
    pub description: &'static str,
    pub best_for: &'static [&'static str],
    pub not_recommended_for: &'static [&'static str],
}

pub static STRATEGIES: [StrategyOption; 9] = [
    StrategyOption {
        id: StrategyType::Agile,
        name: "Agile",
        description: "An iterative approach that delivers value through small, incremental changes and adapts to evolving requirements.",
        best_for: &[
            "Projects with evolving requirements",
            "Software development",
            "Projects requiring frequent stakeholder feedback",
            "Teams that need flexibility",
        ],
        not_recommended_for: &[
            "Projects with fixed requirements and deadlines",
            "Large teams with complex coordination needs",
            "Projects requiring extensive documentation upfront",
        ],
    },
    StrategyOption {
        id: StrategyType::Waterfall,
        name: "Waterfall",
        description: "A linear, sequential approach where each phase must be completed before the next begins.",
        best_for: &[
            "Projects with well-defined requirements",
            "Projects with fixed scope and timeline",
            "Regulatory or compliance-heavy projects",
            "Projects requiring extensive documentation",
        ],
        not_recommended_for: &[
            "Projects with changing requirements",
            "Projects needing quick delivery",
            "Innovative or exploratory projects",
        ],
    },
    StrategyOption {
        id: StrategyType::Lean,
        name: "Lean",
        description: "Focuses on maximizing value while minimizing waste through continuous improvement.",
        best_for: &[
            "Manufacturing processes",
            "Process improvement initiatives",
            "Projects with resource constraints",
            "Organizations seeking efficiency",
        ],
        not_recommended_for: &[
            "Projects requiring extensive planning upfront",
            "Projects with high regulatory requirements",
            "Projects where quality is prioritized over efficiency",
        ],
    },
    StrategyOption {
        id: StrategyType::SixSigma,
        name: "Six Sigma",
        description: "A data-driven methodology focused on eliminating defects and reducing variation in processes.",
        best_for: &[
            "Quality improvement initiatives",
            "Manufacturing processes",
            "Process standardization",
            "Organizations with established data collection",
        ],
        not_recommended_for: &[
            "Creative or innovative projects",
            "Projects with limited data available",
            "Small-scale projects",
        ],
    },
    StrategyOption {
        id: StrategyType::Kanban,
        name: "Kanban",
        description: "A visual workflow management method that helps teams visualize work, limit work-in-progress, and maximize efficiency.",
        best_for: &[
            "Support and maintenance work",
            "Teams with varying priorities",
            "Projects requiring continuous delivery",
            "Teams transitioning from traditional to agile methods",
        ],
        not_recommended_for: &[
            "Projects with fixed deadlines and deliverables",
            "Complex projects requiring detailed planning",
            "Projects with many dependencies",
        ],
    },
    StrategyOption {
        id: StrategyType::Scrum,
        name: "Scrum",
        description: "An agile framework that emphasizes teamwork, accountability, and iterative progress toward well-defined goals.",
        best_for: &[
            "Software development",
            "Product development",
            "Teams with dedicated resources",
            "Projects requiring regular stakeholder feedback",
        ],
        not_recommended_for: &[
            "Projects with frequently changing team members",
            "Projects requiring extensive documentation",
            "Teams unable to commit to regular meetings",
        ],
    },
    StrategyOption {
        id: StrategyType::Prince2,
        name: "PRINCE2",
        description: "A structured project management method focusing on organization, management, and control.",
        best_for: &[
            "Large-scale projects",
            "Government and public sector projects",
            "Projects requiring strict governance",
            "Multi-stakeholder projects",
        ],
        not_recommended_for: &[
            "Small projects with simple requirements",
            "Projects needing agility and quick adaptation",
            "Teams with limited project management experience",
        ],
    },
    StrategyOption {
        id: StrategyType::Pmi,
        name: "PMI/PMBOK",
        description: "A comprehensive set of best practices, standards, and guidelines for project management.",
        best_for: &[
            "Complex, large-scale projects",
            "Projects requiring standardized processes",
            "Organizations with mature project management practices",
            "Projects with significant risk management needs",
        ],
        not_recommended_for: &[
            "Small, simple projects",
            "Projects with tight timelines",
            "Teams new to formal project management",
        ],
    },
    StrategyOption {
        id: StrategyType::Custom,
        name: "Custom Approach",
        description: "A tailored approach combining elements from different methodologies to meet specific project needs.",
        best_for: &[
            "Unique or innovative projects",
            "Organizations with specific requirements",
            "Teams with experienced project managers",
            "Projects that don't fit traditional methodologies",
        ],
        not_recommended_for: &[
            "Teams lacking project management experience",
            "Projects requiring standardized processes",
            "Organizations with strict methodology requirements",
        ],
    },
];

pub fn strategy_by_id(id: StrategyType) -> &'static StrategyOption {
    // The table holds exactly one entry per variant in declaration order.
    &STRATEGIES[id as usize]
}

/// Top three strategies for a free-text description, scored by keyword hits.
///
/// `custom` never scores; ties keep table order.
pub fn recommended_strategies(description: &str) -> Vec<&'static StrategyOption> {
    let text = description.to_lowercase();

    let mut scored: Vec<(usize, &'static StrategyOption)> = STRATEGIES
        .iter()
        .map(|option| {
            let score = option
                .id
                .keywords()
                .iter()
                .filter(|keyword| text.contains(*keyword))
                .count();
            (score, option)
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(3).map(|(_, option)| option).collect()
}
