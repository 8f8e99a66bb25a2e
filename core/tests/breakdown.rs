//! Flat breakdown tables: city/cluster and scoped designation tables.

use hrms_core::{
    breakdown::{breakdown_by, city_cluster_breakdown, designation_breakdown_for, designation_breakdowns},
    config::OrgConfig,
    employee::{Dimension, EmployeeRecord},
    roster::RosterGenerator,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn at(city: &str, cluster: &str, designation: &str, n: usize) -> Vec<EmployeeRecord> {
    (0..n)
        .map(|_| {
            EmployeeRecord::working("Operations", "Workshop", "Technician", designation)
                .located(city, cluster)
        })
        .collect()
}

fn sample() -> Vec<EmployeeRecord> {
    let mut records = Vec::new();
    records.extend(at("Pune", "Pune Central", "Workshop Technician", 6));
    records.extend(at("Pune", "Pune Central", "Senior Workshop Technician", 2));
    records.extend(at("Pune", "Hinjewadi", "Associate Workshop Technician", 3));
    records.extend(at("Pune", "Kothrud", "Store Keeper", 3));
    records.extend(at("Mumbai", "Navi Mumbai", "Workshop Technician", 4));
    records.extend(at("Mumbai", "Navi Mumbai", "Store Keeper", 1).into_iter().map(|r| r.relieved()));
    records
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn city_cluster_breakdown_orders_clusters_by_count() {
    let table = city_cluster_breakdown(&sample());

    let cities: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(cities, vec!["Mumbai", "Pune"]);

    let pune: Vec<(&str, u64)> = table["Pune"]
        .iter()
        .map(|c| (c.cluster_name.as_str(), c.employee_count))
        .collect();
    assert_eq!(
        pune,
        vec![("Pune Central", 8), ("Hinjewadi", 3), ("Kothrud", 3)],
        "Hinjewadi and Kothrud tie at 3 and fall back to name order"
    );
    assert_eq!(table["Mumbai"][0].employee_count, 4, "relieved staff are excluded");
}

/// Pune has all three variants across its clusters, so the city table groups.
#[test]
fn city_scope_applies_grouping_and_conserves_total() {
    let records = sample();
    let rules = OrgConfig::builtin().grouping_rules;

    let pune = designation_breakdown_for(Dimension::City, "Pune", &records, &rules);

    let in_scope = records.iter().filter(|r| r.city == "Pune" && r.is_working()).count() as u64;
    assert_eq!(pune.total(), in_scope);
    assert_eq!(pune.groups.len(), 2);
    assert!(pune.groups[0].is_group);
    assert_eq!(pune.groups[0].count, 11);
    assert_eq!(pune.groups[1].designation, "Store Keeper");
}

/// Cluster scope sees only Pune Central: two variants, no group.
#[test]
fn cluster_scope_without_all_members_passes_through() {
    let rules = OrgConfig::builtin().grouping_rules;

    let central = designation_breakdown_for(Dimension::Cluster, "Pune Central", &sample(), &rules);

    assert!(central.groups.iter().all(|g| !g.is_group));
    assert_eq!(central.total(), 8);
}

#[test]
fn unknown_scope_value_is_empty_not_an_error() {
    let rules = OrgConfig::builtin().grouping_rules;
    let none = designation_breakdown_for(Dimension::City, "Kolkata", &sample(), &rules);
    assert!(none.is_empty());
    assert_eq!(none.total(), 0);
}

/// Per-city tables over a generated roster add back up to the headcount.
#[test]
fn every_city_table_sums_to_headcount() {
    let roster = RosterGenerator::new(77).generate(500, 2026);
    let rules = OrgConfig::builtin().grouping_rules;
    let working = roster.iter().filter(|r| r.is_working()).count() as u64;

    let tables = designation_breakdowns(Dimension::City, &roster, &rules);
    let sum: u64 = tables.iter().map(|t| t.total()).sum();
    assert_eq!(sum, working);

    let units: u64 = breakdown_by(Dimension::BusinessUnit, &roster).iter().map(|r| r.count).sum();
    assert_eq!(units, working);
}
