//! Forest construction from flat employee records.
//!
//! The builder is total: invalid records are dropped, dangling and
//! self-referencing parents make roots, and an edge that would close a cycle
//! is cut by promoting the record being processed to a root. Which edge of a
//! cycle gets cut depends on input order.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::employee::{ChartNode, Employee};

/// Counters describing what a build did with its input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub valid: usize,
    pub dropped_invalid: usize,
    pub dropped_duplicates: usize,
    pub dangling_parents: usize,
    pub self_references: usize,
    pub cycles_broken: usize,
    pub roots: usize,
}

#[derive(Clone, Debug, Default)]
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, employees: &[Employee]) -> (Vec<ChartNode>, BuildReport) {
        let mut report = BuildReport::default();
        let links = link(employees, &mut report);
        let forest = assemble(links);
        report.roots = forest.len();
        debug!(?report, "org chart forest built");
        (forest, report)
    }
}

/// Build the forest and discard the report.
pub fn build_forest(employees: &[Employee]) -> Vec<ChartNode> {
    HierarchyBuilder::new().build(employees).0
}

/// Parent/child structure over valid records, by position in `records`.
struct Links<'a> {
    records: Vec<&'a Employee>,
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

fn link<'a>(employees: &'a [Employee], report: &mut BuildReport) -> Links<'a> {
    let mut records: Vec<&Employee> = Vec::with_capacity(employees.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(employees.len());
    for emp in employees {
        if !emp.is_valid() {
            report.dropped_invalid += 1;
            continue;
        }
        if index.contains_key(emp.id.as_str()) {
            debug!(id = %emp.id, "dropping record with duplicate id");
            report.dropped_duplicates += 1;
            continue;
        }
        index.insert(emp.id.as_str(), records.len());
        records.push(emp);
    }
    report.valid = records.len();

    let mut roots = Vec::new();
    let mut children = vec![Vec::new(); records.len()];
    let mut root_of: Vec<usize> = (0..records.len()).collect();

    for (pos, &emp) in records.iter().enumerate() {
        let child_id = emp.id.as_str();
        let parent_id = match emp.parent_id.as_deref().filter(|p| !p.is_empty()) {
            None => {
                roots.push(pos);
                continue;
            }
            Some(parent_id) => parent_id,
        };
        let Some(&parent_pos) = index.get(parent_id) else {
            debug!(id = child_id, parent_id, "superior not found, placing at root");
            report.dangling_parents += 1;
            roots.push(pos);
            continue;
        };
        if parent_id == child_id {
            report.self_references += 1;
            roots.push(pos);
            continue;
        }
        if closes_cycle(&mut root_of, parent_pos, pos) {
            debug!(id = child_id, parent_id, "superior chain loops back, placing at root");
            report.cycles_broken += 1;
            roots.push(pos);
            continue;
        }
        children[parent_pos].push(pos);
        root_of[pos] = parent_pos;
    }

    Links {
        records,
        roots,
        children,
    }
}

/// Whether `child` is already an ancestor of `parent` among the edges kept so far.
///
/// `child` has no superior yet when it is processed, so it is an ancestor of
/// `parent` exactly when it is the root of `parent`'s current tree. `root_of`
/// is a union-find over kept edges with path halving, which keeps long chains
/// near-linear instead of walking every ancestor per record.
fn closes_cycle(root_of: &mut [usize], parent: usize, child: usize) -> bool {
    let mut cursor = parent;
    while root_of[cursor] != cursor {
        root_of[cursor] = root_of[root_of[cursor]];
        cursor = root_of[cursor];
    }
    cursor == child
}

/// Materialize nodes bottom-up without recursion so deep chains stay off the call stack.
fn assemble(links: Links<'_>) -> Vec<ChartNode> {
    let Links {
        records,
        roots,
        children,
    } = links;
    let mut built: Vec<Option<ChartNode>> = vec![None; records.len()];

    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&r| (r, false)).collect();
    while let Some((pos, expanded)) = stack.pop() {
        if !expanded {
            stack.push((pos, true));
            stack.extend(children[pos].iter().rev().map(|&c| (c, false)));
            continue;
        }
        let mut node = ChartNode::new(records[pos].clone());
        node.children = children[pos]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        node.total_subordinates = count_subordinates(&node.children);
        built[pos] = Some(node);
    }

    roots.into_iter().filter_map(|r| built[r].take()).collect()
}

pub(crate) fn count_subordinates(children: &[ChartNode]) -> usize {
    children
        .iter()
        .map(|child| child.total_subordinates + 1)
        .sum()
}

/// Records that may become the superior of `id` without closing a cycle:
/// every valid record except `id` itself and its descendants in the built chart.
pub fn superior_candidates<'a>(employees: &'a [Employee], id: &str) -> Vec<&'a Employee> {
    let forest = build_forest(employees);
    let excluded: HashSet<String> = forest
        .iter()
        .flat_map(ChartNode::walk)
        .find(|node| node.id() == id)
        .map(|node| node.walk().map(|n| n.id().to_string()).collect())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    employees
        .iter()
        .filter(|emp| emp.is_valid() && emp.id != id && !excluded.contains(&emp.id))
        .filter(|emp| seen.insert(emp.id.clone()))
        .collect()
}
