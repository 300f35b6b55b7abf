//! Demo projects loaded at startup

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    Address, ClientInfo, Project, SolarProject, SolarProjectStatus, SolarProjectType,
    StrategyType,
};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}

fn project(
    title: &str,
    description: &str,
    desired_outcome: &str,
    strategy: StrategyType,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Project {
    Project {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        desired_outcome: desired_outcome.to_string(),
        strategy,
        created_at,
        updated_at,
        plan: None,
        attachments: Vec::new(),
        equipment: None,
        bill_of_materials: None,
    }
}

pub fn projects() -> Vec<Project> {
    vec![
        project(
            "Market Expansion Strategy",
            "Develop a comprehensive strategy to expand our market presence in the APAC region.",
            "Increase market share by 15% within 12 months",
            StrategyType::Agile,
            date(2023, 1, 15),
            date(2023, 1, 20),
        ),
        project(
            "Product Launch Campaign",
            "Create a marketing campaign for our new product line launching in Q3.",
            "Achieve 10,000 sales in the first month post-launch",
            StrategyType::Kanban,
            date(2023, 2, 10),
            date(2023, 2, 15),
        ),
    ]
}

pub fn solar_projects() -> Vec<SolarProject> {
    vec![SolarProject {
        id: Uuid::new_v4(),
        title: "Residential Solar Installation - Johnson Family".to_string(),
        description: "Installation of a 10kW solar system for the Johnson family residence"
            .to_string(),
        kind: SolarProjectType::Residential,
        system_size: 10.0,
        start_date: date(2023, 6, 1),
        estimated_completion: date(2023, 6, 15),
        status: SolarProjectStatus::InProgress,
        client: ClientInfo {
            name: "Johnson Family".to_string(),
            email: "john.johnson@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: Address {
                street: "123 Sunshine Ave".to_string(),
                city: "Solar City".to_string(),
                state: "CA".to_string(),
                zip_code: "94000".to_string(),
            },
        },
        tasks: Vec::new(),
        plan_set_images: Vec::new(),
        daily_updates: Vec::new(),
        documents: Vec::new(),
        created_at: date(2023, 5, 15),
        updated_at: date(2023, 5, 15),
    }]
}
