//! Report builder: one pass from a normalized roster snapshot to every
//! derived table the dashboard renders.
//!
//! PIPELINE ORDER (fixed):
//!   1. Filter         (explicit RosterFilter, never ambient state)
//!   2. Hierarchy      (department → sub-department → role → designation)
//!   3. Role table     (grouped designations per role)
//!   4. Location       (city/cluster table, grouped designations per city and cluster)
//!   5. Finance        (cost-centre and business-unit tables)
//!   6. RH             (allocation table per seed, entitlement per employee)
//!
//! RULES:
//!   - Every step reads only the filtered snapshot and the config.
//!   - Rejected inputs are reported, never fatal.

use crate::{
    breakdown::{
        breakdown_by, city_cluster_breakdown, designation_breakdowns, ClusterCount, CountRow,
        DesignationBreakdown,
    },
    config::OrgConfig,
    employee::{Dimension, EmployeeRecord, NormalizedRoster, RosterFilter},
    hierarchy::{aggregate, role_breakdown, total, HierarchyNode, RoleBreakdown},
    proration::{build_allocations, AllocationTable, RhAllocation},
    types::{Headcount, RhDays, Year},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RhEntitlement {
    pub employee_code: Option<String>,
    pub city: String,
    pub date_of_joining: NaiveDate,
    pub days: RhDays,
}

/// Renderer-facing output. Every key in the JSON document is camelCase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgReport {
    pub year: Year,
    pub filter: RosterFilter,
    pub headcount: Headcount,
    pub hierarchy: Vec<HierarchyNode>,
    pub roles: Vec<RoleBreakdown>,
    pub city_clusters: BTreeMap<String, Vec<ClusterCount>>,
    pub designations_by_city: Vec<DesignationBreakdown>,
    pub designations_by_cluster: Vec<DesignationBreakdown>,
    pub cost_centres: Vec<CountRow>,
    pub business_units: Vec<CountRow>,
    pub rh_allocations: Vec<RhAllocation>,
    pub rh_entitlements: Vec<RhEntitlement>,
    pub rejected: Vec<String>,
}

pub struct ReportBuilder<'a> {
    config: &'a OrgConfig,
    year: Year,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a OrgConfig, year: Year) -> Self {
        Self { config, year }
    }

    pub fn build(&self, roster: &NormalizedRoster, filter: &RosterFilter) -> OrgReport {
        let rules = &self.config.grouping_rules;

        // 1. Filter
        let records = if filter.is_empty() {
            roster.records.clone()
        } else {
            filter.apply(&roster.records)
        };

        // 2-3. Hierarchy and role table
        let hierarchy = aggregate(&records);
        let roles = role_breakdown(&hierarchy, rules);

        // 4. Location
        let city_clusters = city_cluster_breakdown(&records);
        let designations_by_city = designation_breakdowns(Dimension::City, &records, rules);
        let designations_by_cluster = designation_breakdowns(Dimension::Cluster, &records, rules);

        // 5. Finance
        let cost_centres = breakdown_by(Dimension::CostCentre, &records);
        let business_units = breakdown_by(Dimension::BusinessUnit, &records);

        // 6. RH
        let allocation_table = build_allocations(&self.config.rh_seeds);
        let rh_entitlements = rh_entitlements(&records, &allocation_table, self.year);

        let mut rejected: Vec<String> = roster.rejected.iter().map(|e| e.to_string()).collect();
        rejected.extend(allocation_table.rejected.iter().map(|e| e.to_string()));

        let headcount = total(&hierarchy);
        log::info!(
            "report: year={} headcount={headcount} departments={} roles={} rejected={}",
            self.year,
            hierarchy.len(),
            roles.len(),
            rejected.len()
        );

        OrgReport {
            year: self.year,
            filter: filter.clone(),
            headcount,
            hierarchy,
            roles,
            city_clusters,
            designations_by_city,
            designations_by_cluster,
            cost_centres,
            business_units,
            rh_allocations: allocation_table.allocations,
            rh_entitlements,
            rejected,
        }
    }
}

/// RH days per working employee with a joining date and an allocation for
/// their city in `year`. Employees without either are left out.
pub fn rh_entitlements(
    records: &[EmployeeRecord],
    allocations: &AllocationTable,
    year: Year,
) -> Vec<RhEntitlement> {
    let mut out = Vec::new();
    let mut uncovered = 0usize;
    for record in records.iter().filter(|r| r.is_working()) {
        let Some(joined) = record.date_of_joining else {
            continue;
        };
        match allocations.find(&record.city, year) {
            Some(allocation) => out.push(RhEntitlement {
                employee_code: record.employee_code.clone(),
                city: record.city.clone(),
                date_of_joining: joined,
                days: allocation.entitlement_for_joining(joined),
            }),
            None => uncovered += 1,
        }
    }
    if uncovered > 0 {
        log::debug!("report: {uncovered} employees in cities without an RH seed for {year}");
    }
    out
}
