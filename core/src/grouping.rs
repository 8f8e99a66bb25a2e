//! Designation display grouping.
//!
//! A grouping rule collapses a fixed set of sibling designations into one
//! synthetic entry, but only when every member of the rule is present.
//! Grouping changes presentation granularity only: the sum of counts
//! before and after is identical.

use crate::{
    config::GroupingRule,
    types::{headcount_order, Headcount},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationCount {
    pub designation: String,
    pub count: Headcount,
}

impl DesignationCount {
    pub fn new(designation: &str, count: Headcount) -> Self {
        Self {
            designation: designation.into(),
            count,
        }
    }
}

/// One row of a grouped designation table. For a synthetic entry
/// `designation` holds the joined label and `members` the raw rows it
/// replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignationGroup {
    pub designation: String,
    pub count: Headcount,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<DesignationCount>,
}

impl DesignationGroup {
    pub fn single(row: DesignationCount) -> Self {
        Self {
            designation: row.designation,
            count: row.count,
            is_group: false,
            members: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.designation
    }
}

/// Apply every rule to a set of sibling designation counts and return the
/// display rows sorted by descending count.
///
/// Duplicate designations in `counts` are merged first. Rules are applied
/// in order; a designation consumed by one rule is not seen by later ones.
/// A member with a zero count still counts as present.
pub fn group_designations(
    counts: &[DesignationCount],
    rules: &[GroupingRule],
) -> Vec<DesignationGroup> {
    let mut remaining = merge_duplicates(counts);
    let mut rows = Vec::with_capacity(remaining.len());

    for rule in rules {
        let all_present = rule
            .members
            .iter()
            .all(|m| remaining.iter().any(|r| &r.designation == m));
        if !all_present {
            continue;
        }

        // Pull members out in rule order so the label follows it.
        let mut members = Vec::with_capacity(rule.members.len());
        for name in &rule.members {
            if let Some(pos) = remaining.iter().position(|r| &r.designation == name) {
                members.push(remaining.remove(pos));
            }
        }
        log::debug!("grouping: rule '{}' collapsed {} designations", rule.name, members.len());
        rows.push(synthetic_entry(&members, &rule.separator));
    }

    rows.extend(remaining.into_iter().map(DesignationGroup::single));
    rows.sort_by(|a, b| headcount_order(a.count, &a.designation, b.count, &b.designation));
    rows
}

fn synthetic_entry(members: &[DesignationCount], separator: &str) -> DesignationGroup {
    let label = members
        .iter()
        .map(|m| format!("{}({})", m.designation, m.count))
        .collect::<Vec<_>>()
        .join(separator);
    DesignationGroup {
        designation: label,
        count: members.iter().map(|m| m.count).sum(),
        is_group: true,
        members: members.to_vec(),
    }
}

fn merge_duplicates(counts: &[DesignationCount]) -> Vec<DesignationCount> {
    let mut merged: Vec<DesignationCount> = Vec::with_capacity(counts.len());
    for row in counts {
        match merged.iter_mut().find(|m| m.designation == row.designation) {
            Some(existing) => existing.count += row.count,
            None => merged.push(row.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_merged_before_grouping() {
        let counts = vec![
            DesignationCount::new("Store Keeper", 2),
            DesignationCount::new("Store Keeper", 3),
        ];
        let rows = group_designations(&counts, &[]);
        assert_eq!(rows, vec![DesignationGroup::single(DesignationCount::new("Store Keeper", 5))]);
    }

    #[test]
    fn zero_count_member_still_triggers_group() {
        let counts = vec![
            DesignationCount::new("Workshop Technician", 4),
            DesignationCount::new("Senior Workshop Technician", 0),
            DesignationCount::new("Associate Workshop Technician", 1),
        ];
        let rows = group_designations(&counts, &[GroupingRule::workshop_technicians()]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_group);
        assert_eq!(rows[0].count, 5);
    }
}
