//! Flat breakdown tables over a roster snapshot.
//!
//! All tables count working employees only and sort rows by descending
//! count, ties by ascending name.

use crate::{
    config::GroupingRule,
    employee::{Dimension, EmployeeRecord},
    grouping::{group_designations, DesignationCount, DesignationGroup},
    types::{headcount_order, Headcount},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub name: String,
    pub count: Headcount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCount {
    pub cluster_name: String,
    pub employee_count: Headcount,
}

fn count_by<'a, I>(records: I, dimension: Dimension) -> Vec<CountRow>
where
    I: IntoIterator<Item = &'a EmployeeRecord>,
{
    let mut counts: BTreeMap<&str, Headcount> = BTreeMap::new();
    for record in records.into_iter().filter(|r| r.is_working()) {
        *counts.entry(record.field(dimension)).or_default() += 1;
    }
    let mut rows: Vec<CountRow> = counts
        .into_iter()
        .map(|(name, count)| CountRow {
            name: name.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| headcount_order(a.count, &a.name, b.count, &b.name));
    rows
}

/// Headcount per distinct value of one dimension.
pub fn breakdown_by(dimension: Dimension, records: &[EmployeeRecord]) -> Vec<CountRow> {
    count_by(records, dimension)
}

/// Clusters per city. Cities are keyed alphabetically; clusters within a
/// city are ordered by descending headcount.
pub fn city_cluster_breakdown(records: &[EmployeeRecord]) -> BTreeMap<String, Vec<ClusterCount>> {
    let mut by_city: BTreeMap<&str, Vec<&EmployeeRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_working()) {
        by_city.entry(record.city.as_str()).or_default().push(record);
    }

    by_city
        .into_iter()
        .map(|(city, members)| {
            let clusters = count_by(members, Dimension::Cluster)
                .into_iter()
                .map(|row| ClusterCount {
                    cluster_name: row.name,
                    employee_count: row.count,
                })
                .collect();
            (city.to_string(), clusters)
        })
        .collect()
}

/// Grouped designation table for one value of a scope dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationBreakdown {
    pub scope: Dimension,
    pub value: String,
    pub groups: Vec<DesignationGroup>,
}

impl DesignationBreakdown {
    /// Always recomputed from the rows; equals the number of working
    /// records in scope.
    pub fn total(&self) -> Headcount {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Filter to `scope == value`, count designations, then apply the
/// grouping rules.
pub fn designation_breakdown_for(
    scope: Dimension,
    value: &str,
    records: &[EmployeeRecord],
    rules: &[GroupingRule],
) -> DesignationBreakdown {
    let in_scope = records.iter().filter(|r| r.field(scope) == value);
    let counts: Vec<DesignationCount> = count_by(in_scope, Dimension::Designation)
        .into_iter()
        .map(|row| DesignationCount {
            designation: row.name,
            count: row.count,
        })
        .collect();

    DesignationBreakdown {
        scope,
        value: value.to_string(),
        groups: group_designations(&counts, rules),
    }
}

/// One grouped designation table per distinct scope value, largest first.
pub fn designation_breakdowns(
    scope: Dimension,
    records: &[EmployeeRecord],
    rules: &[GroupingRule],
) -> Vec<DesignationBreakdown> {
    count_by(records, scope)
        .into_iter()
        .map(|row| designation_breakdown_for(scope, &row.name, records, rules))
        .collect()
}
