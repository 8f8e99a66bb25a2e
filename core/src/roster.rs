//! Deterministic synthetic roster generation.
//!
//! Produces realistic employee snapshots for demos and tests from a fixed
//! org template. Same seed, same count, same year: identical roster.

use crate::{
    config::{ASSOCIATE_WORKSHOP_TECHNICIAN, SENIOR_WORKSHOP_TECHNICIAN, WORKSHOP_TECHNICIAN},
    employee::{EmployeeRecord, WorkingStatus},
    rng::{RngBank, RosterRng, RosterStream},
    types::Year,
};
use chrono::NaiveDate;

/// Share of generated employees marked as relieved.
pub const RELIEVED_SHARE: f64 = 0.08;

/// How many years back joining dates may go.
pub const JOINING_WINDOW_YEARS: i32 = 3;

struct RoleTemplate {
    department: &'static str,
    sub_department: &'static str,
    role: &'static str,
    business_unit: &'static str,
    weight: f64,
    designations: &'static [(&'static str, f64)],
}

const ORG_TEMPLATE: &[RoleTemplate] = &[
    RoleTemplate {
        department: "Operations",
        sub_department: "Workshop",
        role: "Technician",
        business_unit: "After Sales",
        weight: 0.45,
        designations: &[
            (WORKSHOP_TECHNICIAN, 0.80),
            (SENIOR_WORKSHOP_TECHNICIAN, 0.08),
            (ASSOCIATE_WORKSHOP_TECHNICIAN, 0.05),
            ("Store Keeper", 0.07),
        ],
    },
    RoleTemplate {
        department: "Operations",
        sub_department: "Workshop",
        role: "Supervisor",
        business_unit: "After Sales",
        weight: 0.06,
        designations: &[("Workshop Supervisor", 0.7), ("Floor Manager", 0.3)],
    },
    RoleTemplate {
        department: "Operations",
        sub_department: "Logistics",
        role: "Driver",
        business_unit: "After Sales",
        weight: 0.10,
        designations: &[("Pickup Driver", 0.6), ("Delivery Driver", 0.4)],
    },
    RoleTemplate {
        department: "Sales",
        sub_department: "Field Sales",
        role: "Advisor",
        business_unit: "Retail",
        weight: 0.15,
        designations: &[("Service Advisor", 0.6), ("Senior Service Advisor", 0.4)],
    },
    RoleTemplate {
        department: "Sales",
        sub_department: "Inside Sales",
        role: "Caller",
        business_unit: "Retail",
        weight: 0.08,
        designations: &[("Telecaller", 0.8), ("Team Lead", 0.2)],
    },
    RoleTemplate {
        department: "Human Resources",
        sub_department: "Talent Acquisition",
        role: "Recruiter",
        business_unit: "Corporate",
        weight: 0.05,
        designations: &[("Recruiter", 0.7), ("Senior Recruiter", 0.3)],
    },
    RoleTemplate {
        department: "Finance",
        sub_department: "Accounts",
        role: "Accountant",
        business_unit: "Corporate",
        weight: 0.05,
        designations: &[("Accounts Executive", 0.7), ("Accounts Manager", 0.3)],
    },
    RoleTemplate {
        department: "Technology",
        sub_department: "Engineering",
        role: "Engineer",
        business_unit: "Corporate",
        weight: 0.06,
        designations: &[("Software Engineer", 0.6), ("Senior Software Engineer", 0.4)],
    },
];

/// (city, cluster, weight)
const LOCATIONS: &[(&str, &str, f64)] = &[
    ("Bengaluru", "Bengaluru North", 0.18),
    ("Bengaluru", "Bengaluru South", 0.14),
    ("Mumbai", "Mumbai Western", 0.12),
    ("Mumbai", "Navi Mumbai", 0.08),
    ("Delhi", "Delhi Central", 0.13),
    ("Delhi", "Gurugram", 0.10),
    ("Hyderabad", "Hyderabad West", 0.09),
    ("Pune", "Pune Central", 0.08),
    ("Chennai", "Chennai South", 0.08),
];

pub struct RosterGenerator {
    bank: RngBank,
}

impl RosterGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            bank: RngBank::new(seed),
        }
    }

    /// Generate `count` employees with joining dates up to the end of
    /// `as_of_year`.
    pub fn generate(&self, count: usize, as_of_year: Year) -> Vec<EmployeeRecord> {
        let mut position_rng = self.bank.for_stream(RosterStream::Position);
        let mut location_rng = self.bank.for_stream(RosterStream::Location);
        let mut status_rng = self.bank.for_stream(RosterStream::Status);
        let mut joining_rng = self.bank.for_stream(RosterStream::Joining);

        let mut roster = Vec::with_capacity(count);
        for i in 0..count {
            let Some(template) = position_rng.pick_weighted(ORG_TEMPLATE, |t| t.weight) else {
                break;
            };
            let designation = position_rng
                .pick_weighted(template.designations, |d| d.1)
                .map(|d| d.0)
                .unwrap_or(template.role);
            let (city, cluster, _) = location_rng
                .pick_weighted(LOCATIONS, |l| l.2)
                .copied()
                .unwrap_or(LOCATIONS[0]);

            let working_status = if status_rng.chance(RELIEVED_SHARE) {
                WorkingStatus::Relieved
            } else {
                WorkingStatus::Working
            };

            roster.push(EmployeeRecord {
                employee_code: Some(format!("e-{i:06}")),
                department: template.department.into(),
                sub_department: template.sub_department.into(),
                role: template.role.into(),
                designation: designation.into(),
                city: city.into(),
                cluster: cluster.into(),
                cost_centre: cost_centre(template.department, city),
                business_unit: template.business_unit.into(),
                working_status,
                date_of_joining: joining_date(&mut joining_rng, as_of_year),
            });
        }
        log::info!("roster: generated {} employees for {as_of_year}", roster.len());
        roster
    }
}

fn cost_centre(department: &str, city: &str) -> String {
    let dept: String = department.chars().take(3).collect();
    let city: String = city.chars().take(3).collect();
    format!("CC-{}-{}", dept.to_uppercase(), city.to_uppercase())
}

fn joining_date(rng: &mut RosterRng, as_of_year: Year) -> Option<NaiveDate> {
    let year = as_of_year - rng.next_u64_below(JOINING_WINDOW_YEARS as u64 + 1) as i32;
    let month = rng.next_u64_below(12) as u32 + 1;
    // Day 28 exists in every month.
    let day = rng.next_u64_below(28) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn template_weights_cover_every_role() {
        assert!(ORG_TEMPLATE.iter().all(|t| t.weight > 0.0 && !t.designations.is_empty()));
        let total: f64 = LOCATIONS.iter().map(|l| l.2).sum();
        assert!((total - 1.0).abs() < 1e-9, "location weights sum to {total}");
    }

    #[test]
    fn joining_dates_stay_in_window() {
        let roster = RosterGenerator::new(42).generate(200, 2026);
        for record in &roster {
            let year = record.date_of_joining.map(|d| d.year()).unwrap_or_default();
            assert!(
                (2026 - JOINING_WINDOW_YEARS..=2026).contains(&year),
                "joining year {year} outside window"
            );
        }
    }

    #[test]
    fn cost_centre_is_derived_from_department_and_city() {
        assert_eq!(cost_centre("Operations", "Pune"), "CC-OPE-PUN");
    }
}
