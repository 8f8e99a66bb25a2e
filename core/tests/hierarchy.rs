//! Hierarchy rollup tests: ordering, conservation, additivity.

use hrms_core::{
    employee::EmployeeRecord,
    hierarchy::{aggregate, find_path, flatten, total, HierarchyNode},
    roster::RosterGenerator,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn employees(n: usize, dept: &str, sub: &str, role: &str, designation: &str) -> Vec<EmployeeRecord> {
    (0..n)
        .map(|_| EmployeeRecord::working(dept, sub, role, designation))
        .collect()
}

fn assert_sorted(nodes: &[HierarchyNode]) {
    for pair in nodes.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.count > b.count || (a.count == b.count && a.name < b.name),
            "siblings out of order: {}({}) before {}({})",
            a.name, a.count, b.name, b.count
        );
    }
    for node in nodes {
        assert_sorted(&node.children);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// 10 Operations + 6 Sales employees → Operations first, then Sales.
#[test]
fn departments_ordered_by_descending_count() {
    let mut records = employees(6, "Sales", "Field Sales", "Advisor", "Service Advisor");
    records.extend(employees(10, "Operations", "Workshop", "Technician", "Workshop Technician"));

    let tree = aggregate(&records);

    let summary: Vec<(&str, u64)> = tree.iter().map(|d| (d.name.as_str(), d.count)).collect();
    assert_eq!(summary, vec![("Operations", 10), ("Sales", 6)]);
}

#[test]
fn empty_input_yields_empty_forest() {
    let tree = aggregate(&[]);
    assert!(tree.is_empty(), "expected no departments, got {}", tree.len());
    assert_eq!(total(&tree), 0);
}

/// Relieved employees never contribute to headcount.
#[test]
fn count_conservation_ignores_relieved() {
    let mut records = employees(4, "Finance", "Accounts", "Accountant", "Accounts Executive");
    records.push(EmployeeRecord::working("Finance", "Accounts", "Accountant", "Accounts Manager").relieved());
    records.push(EmployeeRecord::working("Legal", "Contracts", "Counsel", "Associate Counsel").relieved());

    let tree = aggregate(&records);

    assert_eq!(total(&tree), 4);
    assert_eq!(tree.len(), 1, "a department with only relieved staff must not appear");
    assert!(find_path(&tree, &["Finance", "Accounts", "Accountant", "Accounts Manager"]).is_none());
}

/// Every node equals the sum of its children, at every level, for a
/// realistic generated roster.
#[test]
fn tree_is_additive_with_four_levels() {
    let roster = RosterGenerator::new(2024).generate(400, 2026);
    let working = roster.iter().filter(|r| r.is_working()).count() as u64;

    let tree = aggregate(&roster);

    assert_eq!(total(&tree), working, "department counts must sum to working headcount");
    for dept in &tree {
        assert!(dept.is_additive(), "department {} is not additive", dept.name);
        assert_eq!(dept.depth(), 4, "department {} should have four levels", dept.name);
    }
    let leaf_sum: u64 = flatten(&tree).iter().map(|row| row.count).sum();
    assert_eq!(leaf_sum, working);
}

/// Equal counts fall back to ascending name at every level.
#[test]
fn ties_break_alphabetically() {
    let mut records = employees(3, "Zeta", "Z1", "R", "D");
    records.extend(employees(3, "Alpha", "A2", "R", "D"));
    records.extend(employees(2, "Alpha", "A1", "R", "D"));
    records.extend(employees(1, "Alpha", "A1", "R", "C"));

    let tree = aggregate(&records);

    assert_eq!(tree[0].name, "Alpha", "Alpha(6) outranks Zeta(3)");
    let subs: Vec<&str> = tree[0].children.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(subs, vec!["A1", "A2"], "A1(3) and A2(3) tie, so A1 comes first");
    assert_sorted(&tree);
}

/// The raw tree keeps the Workshop-Technician designations separate;
/// grouping is a display concern only.
#[test]
fn tree_never_groups_designations() {
    let mut records = employees(5, "Operations", "Workshop", "Technician", "Workshop Technician");
    records.extend(employees(2, "Operations", "Workshop", "Technician", "Senior Workshop Technician"));
    records.extend(employees(1, "Operations", "Workshop", "Technician", "Associate Workshop Technician"));

    let tree = aggregate(&records);

    let role = find_path(&tree, &["Operations", "Workshop", "Technician"]).expect("role node");
    assert_eq!(role.children.len(), 3);
    assert_eq!(role.count, 8);
}
