use crate::employee::{ChartNode, Employee};
use crate::hierarchy::count_subordinates;

/// Live filter over a built chart: keep nodes whose name, role or department
/// contain `query` (case-insensitive), together with their ancestors.
/// Subordinate counts are recomputed for the pruned forest. A blank query
/// matches every node, so the forest comes back unchanged.
pub fn filter_forest(forest: &[ChartNode], query: &str) -> Vec<ChartNode> {
    let needle = query.trim().to_lowercase();
    forest
        .iter()
        .filter_map(|node| prune(node, &needle))
        .collect()
}

/// Post-order rebuild of `root` with an explicit stack. Results of finished
/// subtrees sit on `done` in sibling order until their parent collects them.
fn prune(root: &ChartNode, needle: &str) -> Option<ChartNode> {
    let mut stack: Vec<(&ChartNode, bool)> = vec![(root, false)];
    let mut done: Vec<Option<ChartNode>> = Vec::new();
    while let Some((node, expanded)) = stack.pop() {
        if !expanded {
            stack.push((node, true));
            stack.extend(node.children.iter().rev().map(|c| (c, false)));
            continue;
        }
        let first = done.len() - node.children.len();
        let children: Vec<ChartNode> = done.drain(first..).flatten().collect();
        if children.is_empty() && !matches(&node.employee, needle) {
            done.push(None);
            continue;
        }
        let total_subordinates = count_subordinates(&children);
        done.push(Some(ChartNode {
            employee: node.employee.clone(),
            children,
            total_subordinates,
        }));
    }
    done.pop().flatten()
}

fn matches(employee: &Employee, needle: &str) -> bool {
    [
        Some(employee.name.as_str()),
        Some(employee.role.as_str()),
        employee.department.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|text| text.to_lowercase().contains(needle))
}
