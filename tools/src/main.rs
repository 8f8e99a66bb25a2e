//! org-report: headless runner for the HR org analytics core.
//!
//! Usage:
//!   org-report --employees roster.json --rh rh_seeds.json --city Pune
//!   org-report --seed 12345 --count 500 --year 2026 --json

use anyhow::Result;
use chrono::Datelike;
use hrms_core::{
    config::{load_rh_seeds, OrgConfig},
    employee::{NormalizedRoster, RosterFilter},
    proration::month_key,
    report::{OrgReport, ReportBuilder},
    roster::RosterGenerator,
    types::Year,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let count = parse_arg(&args, "--count", 500usize);
    let year: Year = parse_arg(&args, "--year", chrono::Local::now().year());
    let json_mode = args.iter().any(|a| a == "--json");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let employees = string_arg(&args, "--employees");
    let rh = string_arg(&args, "--rh");

    let filter = RosterFilter {
        city: string_arg(&args, "--city").map(str::to_string),
        cluster: string_arg(&args, "--cluster").map(str::to_string),
        department: string_arg(&args, "--department").map(str::to_string),
        business_unit: string_arg(&args, "--business-unit").map(str::to_string),
    };

    if !json_mode {
        println!("org-report: HR headcount and RH report");
        println!("  year:      {year}");
        println!("  data_dir:  {data_dir}");
        match employees {
            Some(path) => println!("  employees: {path}"),
            None => println!("  employees: synthetic (seed {seed}, count {count})"),
        }
        println!();
    }

    let mut config = if Path::new(data_dir).is_dir() {
        OrgConfig::load(data_dir)?
    } else {
        log::warn!("data dir {data_dir} not found, using built-in config");
        OrgConfig::builtin()
    };
    if let Some(path) = rh {
        config.rh_seeds = load_rh_seeds(path)?;
    }

    let roster = match employees {
        Some(path) => NormalizedRoster::from_path(path)
            .map_err(|e| anyhow::anyhow!("Cannot load roster {path}: {e}"))?,
        None => NormalizedRoster {
            records: RosterGenerator::new(seed).generate(count, year),
            rejected: Vec::new(),
        },
    };

    let report = ReportBuilder::new(&config, year).build(&roster, &filter);

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn print_summary(report: &OrgReport) {
    println!("=== HEADCOUNT ===");
    println!("  working:        {}", report.headcount);
    println!("  departments:    {}", report.hierarchy.len());
    println!("  roles:          {}", report.roles.len());
    println!("  rejected input: {}", report.rejected.len());
    for reason in &report.rejected {
        println!("    - {reason}");
    }

    println!();
    println!("=== DEPARTMENTS ===");
    for dept in &report.hierarchy {
        println!("  {:<24} {:>6}", dept.name, dept.count);
        for sub in &dept.children {
            println!("    {:<22} {:>6}", sub.name, sub.count);
        }
    }

    println!();
    println!("=== ROLES ===");
    for role in &report.roles {
        println!("  {} / {} / {} ({})", role.department, role.sub_department, role.role, role.total);
        for group in &role.designations {
            // Grouped labels span several lines; indent the continuation.
            let label = group.label().replace('\n', "\n        ");
            println!("      {label}: {}", group.count);
        }
    }

    println!();
    println!("=== CITIES ===");
    for (city, clusters) in &report.city_clusters {
        let total: u64 = clusters.iter().map(|c| c.employee_count).sum();
        println!("  {city} ({total})");
        for cluster in clusters {
            println!("    {:<22} {:>6}", cluster.cluster_name, cluster.employee_count);
        }
    }

    println!();
    println!("=== RH ALLOCATION ===");
    if report.rh_allocations.is_empty() {
        println!("  (No RH seeds loaded)");
    } else {
        for allocation in &report.rh_allocations {
            let table: Vec<String> = allocation
                .month_allocation
                .iter()
                .map(|(month, days)| format!("{}={days}", month_key(month)))
                .collect();
            println!("  {} {} | {}", allocation.city, allocation.year, table.join(" "));
        }
        println!("  entitlements computed: {}", report.rh_entitlements.len());
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
