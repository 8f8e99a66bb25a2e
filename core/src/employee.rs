//! Employee records: the boundary shape, the canonical shape, and the
//! normalization step between them.
//!
//! RULE: Only this module knows about external key variants.
//! Everything downstream (hierarchy, breakdown, report) sees
//! `EmployeeRecord` and nothing else.

use crate::{
    error::{HrResult, ValidationError},
    types::UNASSIGNED,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingStatus {
    Working,
    Relieved,
}

impl WorkingStatus {
    /// Case-insensitive match of the status strings seen in exports.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "working" | "active" => Some(Self::Working),
            "relieved" | "inactive" => Some(Self::Relieved),
            _ => None,
        }
    }
}

/// One categorical column of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Department,
    SubDepartment,
    Role,
    Designation,
    City,
    Cluster,
    CostCentre,
    BusinessUnit,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Department    => "department",
            Self::SubDepartment => "sub_department",
            Self::Role          => "role",
            Self::Designation   => "designation",
            Self::City          => "city",
            Self::Cluster       => "cluster",
            Self::CostCentre    => "cost_centre",
            Self::BusinessUnit  => "business_unit",
        }
    }
}

/// An employee object as it arrives from the data layer.
/// Every key is accepted in camelCase or snake_case.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEmployee {
    #[serde(default, alias = "employee_code")]
    pub employee_code: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "sub_department")]
    pub sub_department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default, alias = "cost_centre")]
    pub cost_centre: Option<String>,
    #[serde(default, alias = "business_unit")]
    pub business_unit: Option<String>,
    #[serde(default, alias = "working_status")]
    pub working_status: Option<String>,
    #[serde(default, alias = "date_of_joining")]
    pub date_of_joining: Option<String>,
}

impl RawEmployee {
    /// Map onto the canonical record. `index` is the position in the
    /// input array and is carried on any rejection.
    pub fn normalize(self, index: usize) -> Result<EmployeeRecord, ValidationError> {
        let working_status = match self.working_status.as_deref().map(str::trim) {
            None | Some("") => WorkingStatus::Working,
            Some(raw) => WorkingStatus::parse(raw).ok_or_else(|| {
                ValidationError::UnknownWorkingStatus {
                    index,
                    value: raw.to_string(),
                }
            })?,
        };

        Ok(EmployeeRecord {
            employee_code: non_blank(self.employee_code),
            department: required(self.department, index, "department")?,
            sub_department: required(self.sub_department, index, "subDepartment")?,
            role: required(self.role, index, "role")?,
            designation: required(self.designation, index, "designation")?,
            city: location(self.city),
            cluster: location(self.cluster),
            cost_centre: location(self.cost_centre),
            business_unit: location(self.business_unit),
            working_status,
            date_of_joining: self
                .date_of_joining
                .as_deref()
                .and_then(|raw| parse_joining_date(raw, index)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, ValidationError> {
    non_blank(value).ok_or(ValidationError::MissingField { index, field })
}

fn location(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| UNASSIGNED.to_string())
}

/// Accepts `YYYY-MM-DD` (leading zeros optional), optionally followed by a
/// time part after `T` or a space. An unparseable date is logged and
/// dropped, not rejected: it only feeds the entitlement report.
fn parse_joining_date(raw: &str, index: usize) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("record={index} ignoring date_of_joining '{raw}': {e}");
            None
        }
    }
}

/// The canonical employee snapshot the aggregators consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_code: Option<String>,
    pub department: String,
    pub sub_department: String,
    pub role: String,
    pub designation: String,
    pub city: String,
    pub cluster: String,
    pub cost_centre: String,
    pub business_unit: String,
    pub working_status: WorkingStatus,
    pub date_of_joining: Option<NaiveDate>,
}

impl EmployeeRecord {
    /// A working employee at the given hierarchy path, with every
    /// location field unassigned.
    pub fn working(department: &str, sub_department: &str, role: &str, designation: &str) -> Self {
        Self {
            employee_code: None,
            department: department.into(),
            sub_department: sub_department.into(),
            role: role.into(),
            designation: designation.into(),
            city: UNASSIGNED.into(),
            cluster: UNASSIGNED.into(),
            cost_centre: UNASSIGNED.into(),
            business_unit: UNASSIGNED.into(),
            working_status: WorkingStatus::Working,
            date_of_joining: None,
        }
    }

    pub fn located(mut self, city: &str, cluster: &str) -> Self {
        self.city = city.into();
        self.cluster = cluster.into();
        self
    }

    pub fn relieved(mut self) -> Self {
        self.working_status = WorkingStatus::Relieved;
        self
    }

    pub fn is_working(&self) -> bool {
        self.working_status == WorkingStatus::Working
    }

    pub fn field(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Department    => &self.department,
            Dimension::SubDepartment => &self.sub_department,
            Dimension::Role          => &self.role,
            Dimension::Designation   => &self.designation,
            Dimension::City          => &self.city,
            Dimension::Cluster       => &self.cluster,
            Dimension::CostCentre    => &self.cost_centre,
            Dimension::BusinessUnit  => &self.business_unit,
        }
    }
}

/// Output of the boundary normalization step.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRoster {
    pub records: Vec<EmployeeRecord>,
    pub rejected: Vec<ValidationError>,
}

impl NormalizedRoster {
    /// Normalize every raw record. Invalid records are logged and
    /// collected in `rejected`; the rest go through.
    pub fn from_raw(raw: Vec<RawEmployee>) -> Self {
        let mut roster = Self::default();
        for (index, employee) in raw.into_iter().enumerate() {
            match employee.normalize(index) {
                Ok(record) => roster.records.push(record),
                Err(e) => {
                    log::warn!("normalize: skipping record: {e}");
                    roster.rejected.push(e);
                }
            }
        }
        log::debug!(
            "normalize: accepted={} rejected={}",
            roster.records.len(),
            roster.rejected.len()
        );
        roster
    }

    /// Parse a JSON array of employee objects and normalize it.
    pub fn from_json(json: &str) -> HrResult<Self> {
        let raw: Vec<RawEmployee> = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Read and normalize a JSON roster file.
    pub fn from_path(path: &str) -> HrResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn working_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_working()).count()
    }
}

/// Explicit filter parameters for a report. Every present predicate must
/// match; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterFilter {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "business_unit")]
    pub business_unit: Option<String>,
}

impl RosterFilter {
    pub fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.cluster.is_none()
            && self.department.is_none()
            && self.business_unit.is_none()
    }

    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        let checks = [
            (&self.city, Dimension::City),
            (&self.cluster, Dimension::Cluster),
            (&self.department, Dimension::Department),
            (&self.business_unit, Dimension::BusinessUnit),
        ];
        checks.iter().all(|(wanted, dimension)| match wanted {
            Some(value) => record.field(*dimension) == value.as_str(),
            None => true,
        })
    }

    pub fn apply(&self, records: &[EmployeeRecord]) -> Vec<EmployeeRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_case_insensitive() {
        assert_eq!(WorkingStatus::parse("Working"), Some(WorkingStatus::Working));
        assert_eq!(WorkingStatus::parse(" RELIEVED "), Some(WorkingStatus::Relieved));
        assert_eq!(WorkingStatus::parse("on leave"), None);
    }

    #[test]
    fn joining_date_accepts_timestamp_suffix() {
        let date = parse_joining_date("2024-07-01T00:00:00.000Z", 0);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(parse_joining_date("07/01/2024", 0), None);
    }

    #[test]
    fn joining_date_without_leading_zeros() {
        assert_eq!(parse_joining_date("2026-7-1", 0), NaiveDate::from_ymd_opt(2026, 7, 1));
        assert_eq!(parse_joining_date("2026-7-1 09:30", 0), NaiveDate::from_ymd_opt(2026, 7, 1));
        assert_eq!(parse_joining_date("2026-13-1", 0), None);
    }

    #[test]
    fn blank_grouping_field_is_missing() {
        let raw = RawEmployee {
            department: Some("Operations".into()),
            sub_department: Some("   ".into()),
            role: Some("Technician".into()),
            designation: Some("Store Keeper".into()),
            ..Default::default()
        };
        assert_eq!(
            raw.normalize(3),
            Err(ValidationError::MissingField { index: 3, field: "subDepartment" })
        );
    }
}
