//! Organizational hierarchy rollup.
//!
//! LEVELS (fixed, four below the root):
//!   1. department
//!   2. sub-department
//!   3. role
//!   4. designation (leaf, no children)
//!
//! RULES:
//!   - Only working employees are counted.
//!   - A node's count is the sum of its children's counts.
//!   - Siblings are ordered by descending count, ties by ascending name.
//!   - Designation grouping is never applied to the tree itself, only to
//!     the flattened role table built from it.

use crate::{
    config::GroupingRule,
    employee::{Dimension, EmployeeRecord},
    grouping::{group_designations, DesignationCount, DesignationGroup},
    types::{headcount_order, Headcount},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LEVELS: [Dimension; 4] = [
    Dimension::Department,
    Dimension::SubDepartment,
    Dimension::Role,
    Dimension::Designation,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    pub count: Headcount,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn leaf(name: &str, count: Headcount) -> Self {
        Self {
            name: name.into(),
            count,
            children: Vec::new(),
        }
    }

    /// Levels in this subtree, counting the node itself.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// True when every non-leaf node in the subtree equals the sum of
    /// its children.
    pub fn is_additive(&self) -> bool {
        if self.children.is_empty() {
            return true;
        }
        let sum: Headcount = self.children.iter().map(|c| c.count).sum();
        sum == self.count && self.children.iter().all(|c| c.is_additive())
    }

    /// Descend by child names. An empty path returns `self`.
    pub fn find(&self, path: &[&str]) -> Option<&HierarchyNode> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self
                .children
                .iter()
                .find(|c| c.name == *head)
                .and_then(|c| c.find(rest)),
        }
    }
}

/// Build the department forest from a roster snapshot.
/// Empty input yields an empty forest.
pub fn aggregate(records: &[EmployeeRecord]) -> Vec<HierarchyNode> {
    let working: Vec<&EmployeeRecord> = records.iter().filter(|r| r.is_working()).collect();
    let departments = build_level(&working, 0);
    log::debug!(
        "hierarchy: {} departments from {} working records",
        departments.len(),
        working.len()
    );
    departments
}

fn build_level(records: &[&EmployeeRecord], depth: usize) -> Vec<HierarchyNode> {
    let Some(&dimension) = LEVELS.get(depth) else {
        return Vec::new();
    };

    let mut groups: BTreeMap<&str, Vec<&EmployeeRecord>> = BTreeMap::new();
    for &record in records {
        groups.entry(record.field(dimension)).or_default().push(record);
    }

    let mut nodes: Vec<HierarchyNode> = groups
        .into_iter()
        .map(|(name, members)| HierarchyNode {
            name: name.to_string(),
            count: members.len() as Headcount,
            children: build_level(&members, depth + 1),
        })
        .collect();
    nodes.sort_by(|a, b| headcount_order(a.count, &a.name, b.count, &b.name));
    nodes
}

/// Headcount across a department forest.
pub fn total(departments: &[HierarchyNode]) -> Headcount {
    departments.iter().map(|d| d.count).sum()
}

/// Find a node by full or partial path starting at the department level.
pub fn find_path<'a>(departments: &'a [HierarchyNode], path: &[&str]) -> Option<&'a HierarchyNode> {
    let (head, rest) = path.split_first()?;
    departments.iter().find(|d| d.name == *head)?.find(rest)
}

/// One leaf of the tree with its full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyPath {
    pub department: String,
    pub sub_department: String,
    pub role: String,
    pub designation: String,
    pub count: Headcount,
}

/// Every designation leaf, in tree order.
pub fn flatten(departments: &[HierarchyNode]) -> Vec<HierarchyPath> {
    let mut rows = Vec::new();
    for dept in departments {
        for sub in &dept.children {
            for role in &sub.children {
                for designation in &role.children {
                    rows.push(HierarchyPath {
                        department: dept.name.clone(),
                        sub_department: sub.name.clone(),
                        role: role.name.clone(),
                        designation: designation.name.clone(),
                        count: designation.count,
                    });
                }
            }
        }
    }
    rows
}

/// Per-role display row: the role's designations after grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBreakdown {
    pub department: String,
    pub sub_department: String,
    pub role: String,
    pub total: Headcount,
    pub designations: Vec<DesignationGroup>,
}

/// Flatten the tree to one row per role, applying the grouping rules to
/// each role's designations. Row order follows the tree.
pub fn role_breakdown(departments: &[HierarchyNode], rules: &[GroupingRule]) -> Vec<RoleBreakdown> {
    let mut rows = Vec::new();
    for dept in departments {
        for sub in &dept.children {
            for role in &sub.children {
                let counts: Vec<DesignationCount> = role
                    .children
                    .iter()
                    .map(|d| DesignationCount::new(&d.name, d.count))
                    .collect();
                rows.push(RoleBreakdown {
                    department: dept.name.clone(),
                    sub_department: sub.name.clone(),
                    role: role.name.clone(),
                    total: role.count,
                    designations: group_designations(&counts, rules),
                });
            }
        }
    }
    rows
}
