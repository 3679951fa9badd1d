use std::collections::BTreeMap;

use serde::Serialize;

use crate::employee::Employee;

/// Label for records whose department is unset.
pub const DEFAULT_DEPARTMENT_LABEL: &str = "Sem Departamento";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DepartmentGroup<'a> {
    pub label: String,
    pub members: Vec<&'a Employee>,
}

/// Group records by department, sorted by label. Members keep input order and
/// unset departments share `fallback`.
pub fn group_by_department<'a>(
    employees: &'a [Employee],
    fallback: &str,
) -> Vec<DepartmentGroup<'a>> {
    let mut groups: BTreeMap<&str, Vec<&'a Employee>> = BTreeMap::new();
    for emp in employees {
        let label = emp
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(fallback);
        groups.entry(label).or_default().push(emp);
    }
    groups
        .into_iter()
        .map(|(label, members)| DepartmentGroup {
            label: label.to_string(),
            members,
        })
        .collect()
}
