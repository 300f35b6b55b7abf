//! Derived views computed from store contents. Nothing here is stored.

use serde::Serialize;

use crate::domain::{EquipmentItem, InstallationSection, SolarTask, SolarTaskStatus};

pub const SOLAR_PANEL: &str = "Solar Panel";
pub const INVERTER: &str = "Inverter";

/// Quantity totals over an equipment list
///
/// Items are classified by exact, case-sensitive name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterialsSummary {
    pub total_panels: u64,
    pub total_inverters: u64,
    pub additional_items: u64,
}

pub fn bill_of_materials_summary(items: &[EquipmentItem]) -> BillOfMaterialsSummary {
    items
        .iter()
        .fold(BillOfMaterialsSummary::default(), |mut summary, item| {
            let quantity = u64::from(item.quantity);
            match item.name.as_str() {
                SOLAR_PANEL => summary.total_panels += quantity,
                INVERTER => summary.total_inverters += quantity,
                _ => summary.additional_items += quantity,
            }
            summary
        })
}

/// Rounded percentage, 0 when there is nothing to count.
fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

fn completed_count<'a>(tasks: impl Iterator<Item = &'a SolarTask>) -> (usize, usize) {
    tasks.fold((0, 0), |(done, total), task| {
        let done = done + usize::from(task.status == SolarTaskStatus::Completed);
        (done, total + 1)
    })
}

pub fn progress_percentage(tasks: &[SolarTask]) -> u8 {
    let (completed, total) = completed_count(tasks.iter());
    percentage(completed, total)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub section: InstallationSection,
    pub label: &'static str,
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

pub fn section_progress(tasks: &[SolarTask], section: InstallationSection) -> SectionProgress {
    let (completed, total) = completed_count(tasks.iter().filter(|t| t.section == section));
    SectionProgress {
        section,
        label: section.label(),
        completed,
        total,
        percentage: percentage(completed, total),
    }
}

pub fn all_section_progress(tasks: &[SolarTask]) -> Vec<SectionProgress> {
    InstallationSection::ALL
        .iter()
        .map(|section| section_progress(tasks, *section))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn task_counts(tasks: &[SolarTask]) -> TaskCounts {
    tasks.iter().fold(TaskCounts::default(), |mut counts, task| {
        counts.total += 1;
        match task.status {
            SolarTaskStatus::NotStarted => counts.not_started += 1,
            SolarTaskStatus::InProgress => counts.in_progress += 1,
            SolarTaskStatus::Completed => counts.completed += 1,
        }
        counts
    })
}

/// Overall and per-phase progress of a solar project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub percentage: u8,
    pub counts: TaskCounts,
    pub sections: Vec<SectionProgress>,
}

pub fn project_progress(tasks: &[SolarTask]) -> ProjectProgress {
    ProjectProgress {
        percentage: progress_percentage(tasks),
        counts: task_counts(tasks),
        sections: all_section_progress(tasks),
    }
}

/// CSV export of an equipment list.
///
/// Every cell is quoted with embedded quotes doubled; specifications are
/// flattened to `key: value` pairs joined by `; `.
pub fn bill_of_materials_csv(items: &[EquipmentItem]) -> String {
    fn quote(cell: &str) -> String {
        format!("\"{}\"", cell.replace('"', "\"\""))
    }

    let mut lines = vec!["Name,Manufacturer,Model,Quantity,Specifications".to_string()];
    for item in items {
        let specs = item
            .specifications
            .as_ref()
            .map(|specs| {
                specs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .unwrap_or_default();

        let quantity = item.quantity.to_string();
        let row = [
            item.name.as_str(),
            item.manufacturer.as_str(),
            item.model.as_deref().unwrap_or(""),
            quantity.as_str(),
            specs.as_str(),
        ]
        .iter()
        .map(|cell| quote(cell))
        .collect::<Vec<_>>()
        .join(",");
        lines.push(row);
    }
    lines.join("\n")
}

/// Download name for a project's CSV: whitespace runs become `_`, and
/// characters that cannot appear in a quoted header parameter are dropped.
pub fn bill_of_materials_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 8);
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_graphic() && c != '"' && c != '\\' {
            name.push(c);
        }
    }
    name.push_str("_BOM.csv");
    name
}
