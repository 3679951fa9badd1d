use anyhow::{Context, Result};
use chrono::NaiveDate;
use orgchart::{
    BuildReport, ChartNode, Employee, HierarchyBuilder, Normalizer, filter_forest,
    group_by_department,
};
use platform_tabular::{InputFormat, read_csv_with, read_json_rows};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;

/// Decode and normalize an import file's contents.
pub fn load_employees(
    config: &AppConfig,
    text: &str,
    format: InputFormat,
) -> Result<Vec<Employee>> {
    let rows = match format {
        InputFormat::Csv => read_csv_with(text, config.csv_delimiter),
        InputFormat::Json => read_json_rows(text),
    }
    .context("failed to decode import file")?;
    let employees = Normalizer::new(config.id_strategy).normalize_rows(&rows);
    info!(rows = rows.len(), "normalized import rows");
    Ok(employees)
}

pub fn build_tree(employees: &[Employee], filter: Option<&str>) -> (Vec<ChartNode>, BuildReport) {
    let (forest, report) = HierarchyBuilder::new().build(employees);
    info!(
        valid = report.valid,
        roots = report.roots,
        dropped = report.dropped_invalid + report.dropped_duplicates,
        cycles_broken = report.cycles_broken,
        "built org chart"
    );
    match filter {
        Some(query) => (filter_forest(&forest, query), report),
        None => (forest, report),
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub label: String,
    pub headcount: usize,
    pub active: usize,
    pub on_vacation: usize,
}

pub fn summarize_departments(
    employees: &[Employee],
    fallback: &str,
    today: NaiveDate,
) -> Vec<DepartmentSummary> {
    let valid: Vec<Employee> = employees.iter().filter(|e| e.is_valid()).cloned().collect();
    group_by_department(&valid, fallback)
        .into_iter()
        .map(|group| DepartmentSummary {
            headcount: group.members.len(),
            active: group.members.iter().filter(|e| e.is_active).count(),
            on_vacation: group
                .members
                .iter()
                .filter(|e| e.is_on_vacation(today))
                .count(),
            label: group.label,
        })
        .collect()
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("failed to serialize output")
}
