//! Data-dir configuration: designation grouping rules and RH quota seeds.

use crate::proration::RhSeed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

pub const WORKSHOP_TECHNICIAN: &str = "Workshop Technician";
pub const SENIOR_WORKSHOP_TECHNICIAN: &str = "Senior Workshop Technician";
pub const ASSOCIATE_WORKSHOP_TECHNICIAN: &str = "Associate Workshop Technician";

/// Joins member labels inside a synthetic group label.
pub const GROUP_LABEL_SEPARATOR: &str = "\n+ ";

/// A set of sibling designations that is displayed as one entry when
/// every member is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingRule {
    pub name: String,
    /// Members in the order they appear in the synthetic label.
    pub members: Vec<String>,
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    GROUP_LABEL_SEPARATOR.to_string()
}

impl GroupingRule {
    pub fn workshop_technicians() -> Self {
        Self {
            name: "workshop_technicians".into(),
            members: vec![
                ASSOCIATE_WORKSHOP_TECHNICIAN.into(),
                WORKSHOP_TECHNICIAN.into(),
                SENIOR_WORKSHOP_TECHNICIAN.into(),
            ],
            separator: default_separator(),
        }
    }

    pub fn contains(&self, designation: &str) -> bool {
        self.members.iter().any(|m| m == designation)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DesignationGroupsFile {
    rules: Vec<GroupingRule>,
}

#[derive(Debug, Clone, Deserialize)]
struct RhSeedsFile {
    seeds: Vec<RhSeed>,
}

#[derive(Debug, Clone)]
pub struct OrgConfig {
    pub grouping_rules: Vec<GroupingRule>,
    pub rh_seeds: Vec<RhSeed>,
}

impl OrgConfig {
    /// Load from the data/ directory.
    /// `org/designation_groups.json` is required; `holidays/rh_seeds.json`
    /// is optional and yields no seeds when absent.
    /// In tests, use OrgConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let groups_path = format!("{data_dir}/org/designation_groups.json");
        let groups_file: DesignationGroupsFile = read_json(&groups_path)?;
        for rule in &groups_file.rules {
            validate_rule(rule)
                .map_err(|e| anyhow::anyhow!("Invalid rule in {groups_path}: {e}"))?;
        }

        let seeds_path = format!("{data_dir}/holidays/rh_seeds.json");
        let rh_seeds = if Path::new(&seeds_path).exists() {
            load_rh_seeds(&seeds_path)?
        } else {
            log::info!("config: {seeds_path} not found, no RH seeds loaded");
            Vec::new()
        };

        log::debug!(
            "config: loaded {} grouping rules, {} RH seeds from {data_dir}",
            groups_file.rules.len(),
            rh_seeds.len()
        );

        Ok(Self {
            grouping_rules: groups_file.rules,
            rh_seeds,
        })
    }

    /// Hardcoded defaults: the Workshop-Technician rule and no seeds.
    pub fn builtin() -> Self {
        Self {
            grouping_rules: vec![GroupingRule::workshop_technicians()],
            rh_seeds: Vec::new(),
        }
    }
}

/// Read an RH seeds file (`{"seeds": [...]}`) from any path.
pub fn load_rh_seeds(path: &str) -> anyhow::Result<Vec<RhSeed>> {
    let file: RhSeedsFile = read_json(path)?;
    Ok(file.seeds)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
}

fn validate_rule(rule: &GroupingRule) -> anyhow::Result<()> {
    if rule.members.len() < 2 {
        anyhow::bail!("rule '{}' needs at least two members", rule.name);
    }
    for (i, member) in rule.members.iter().enumerate() {
        if rule.members[..i].contains(member) {
            anyhow::bail!("rule '{}' lists '{member}' twice", rule.name);
        }
    }
    Ok(())
}
