//! Restricted-holiday (RH) proration.
//!
//! An employee joining in month M (January = 1) is entitled to the share
//! of the annual quota accrued over the months left in the year,
//! counting the joining month itself:
//!
//!   remaining = 13 - M
//!   days      = round_half_up(total_rh * remaining / 12)
//!
//! with a floor of one day whenever the quota is at least one. In
//! integer arithmetic the rounding is `(total_rh * remaining + 6) / 12`.
//! January always yields the full quota and the table never increases
//! from one month to the next.

use crate::{
    error::ValidationError,
    types::{RhDays, Year},
};
use chrono::{Datelike, Month, NaiveDate};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Upper bound on an annual quota.
pub const MAX_RH_PER_YEAR: i64 = 366;

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Three-letter key used in serialized allocation tables ("Jan".."Dec").
pub fn month_key(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Days granted to someone joining in `join_month` (1..=12).
pub fn prorated_days(total_rh: RhDays, join_month: u32) -> Result<RhDays, ValidationError> {
    if !(1..=MONTHS_PER_YEAR).contains(&join_month) {
        return Err(ValidationError::InvalidMonth(join_month));
    }
    let remaining = u64::from(MONTHS_PER_YEAR + 1 - join_month);
    let rounded = (u64::from(total_rh) * remaining + 6) / u64::from(MONTHS_PER_YEAR);
    let floor = total_rh.min(1);
    // rounded <= total_rh, so the narrowing cannot truncate.
    Ok((rounded as RhDays).max(floor))
}

/// Month-indexed RH table, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, RhDays>")]
pub struct MonthAllocation {
    days: [RhDays; 12],
}

impl MonthAllocation {
    pub fn get(&self, month: Month) -> RhDays {
        self.days[month.number_from_month() as usize - 1]
    }

    /// Lookup by 1-based month number.
    pub fn for_month(&self, month: u32) -> Result<RhDays, ValidationError> {
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(ValidationError::InvalidMonth(month));
        }
        Ok(self.days[month as usize - 1])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, RhDays)> + '_ {
        MONTHS.iter().copied().zip(self.days.iter().copied())
    }

    pub fn as_array(&self) -> [RhDays; 12] {
        self.days
    }

    pub fn is_non_increasing(&self) -> bool {
        self.days.windows(2).all(|w| w[0] >= w[1])
    }
}

impl Serialize for MonthAllocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (month, days) in self.iter() {
            map.serialize_entry(month_key(month), &days)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, RhDays>> for MonthAllocation {
    type Error = String;

    fn try_from(raw: BTreeMap<String, RhDays>) -> Result<Self, Self::Error> {
        let mut days = [None; 12];
        for (key, value) in raw {
            let month: Month = key
                .parse()
                .map_err(|_| format!("unknown month key '{key}'"))?;
            days[month.number_from_month() as usize - 1] = Some(value);
        }
        let mut out = [0; 12];
        for (i, slot) in days.iter().enumerate() {
            out[i] = slot.ok_or_else(|| format!("missing month '{}'", month_key(MONTHS[i])))?;
        }
        let table = Self { days: out };
        if !table.is_non_increasing() {
            return Err(format!("month table increases within the year: {out:?}"));
        }
        Ok(table)
    }
}

/// Build the allocation table for an annual quota.
/// A negative quota is a ValidationError, never a silent zero table.
/// Quotas above `MAX_RH_PER_YEAR` are rejected with `QuotaTooLarge`.
pub fn build_month_allocation(total_rh: i64, as_of_year: Year) -> Result<MonthAllocation, ValidationError> {
    let total = checked_quota(total_rh)?;
    let mut days = [0; 12];
    for (i, slot) in days.iter_mut().enumerate() {
        *slot = prorated_days(total, i as u32 + 1)?;
    }
    log::debug!("proration: year={as_of_year} total_rh={total} table={days:?}");
    Ok(MonthAllocation { days })
}

fn checked_quota(total_rh: i64) -> Result<RhDays, ValidationError> {
    if total_rh < 0 {
        return Err(ValidationError::NegativeQuota { total_rh });
    }
    if total_rh > MAX_RH_PER_YEAR {
        return Err(ValidationError::QuotaTooLarge { total_rh });
    }
    Ok(total_rh as RhDays)
}

/// A city/year quota as supplied by the holiday calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RhSeed {
    pub city: String,
    pub year: Year,
    #[serde(alias = "total_rh")]
    pub total_rh: i64,
}

/// RULE: `total_rh == month_allocation[Jan]`, checked on deserialize too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RhAllocationFields")]
pub struct RhAllocation {
    pub city: String,
    pub year: Year,
    pub total_rh: RhDays,
    pub month_allocation: MonthAllocation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RhAllocationFields {
    city: String,
    year: Year,
    #[serde(alias = "total_rh")]
    total_rh: RhDays,
    #[serde(alias = "month_allocation")]
    month_allocation: MonthAllocation,
}

impl TryFrom<RhAllocationFields> for RhAllocation {
    type Error = String;

    fn try_from(raw: RhAllocationFields) -> Result<Self, Self::Error> {
        let january = raw.month_allocation.get(Month::January);
        if raw.total_rh != january {
            return Err(format!(
                "RH allocation for '{}' {}: totalRh {} does not match Jan {january}",
                raw.city, raw.year, raw.total_rh
            ));
        }
        Ok(Self {
            city: raw.city,
            year: raw.year,
            total_rh: raw.total_rh,
            month_allocation: raw.month_allocation,
        })
    }
}

impl RhAllocation {
    pub fn for_seed(seed: &RhSeed) -> Result<Self, ValidationError> {
        let month_allocation = build_month_allocation(seed.total_rh, seed.year)?;
        Ok(Self {
            city: seed.city.clone(),
            year: seed.year,
            total_rh: month_allocation.get(Month::January),
            month_allocation,
        })
    }

    /// Days granted to an employee who joined on `joined`. Joining before
    /// this allocation's year grants the full quota, joining after it
    /// grants nothing.
    pub fn entitlement_for_joining(&self, joined: NaiveDate) -> RhDays {
        match joined.year().cmp(&self.year) {
            std::cmp::Ordering::Less => self.total_rh,
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Equal => self.days_for_month(joined.month()),
        }
    }

    fn days_for_month(&self, month: u32) -> RhDays {
        // chrono months are always 1..=12
        self.month_allocation.for_month(month).unwrap_or(0)
    }
}

/// Allocations for a batch of seeds. Invalid or duplicate seeds are
/// skipped and reported in `rejected`.
#[derive(Debug, Clone, Default)]
pub struct AllocationTable {
    pub allocations: Vec<RhAllocation>,
    pub rejected: Vec<ValidationError>,
}

impl AllocationTable {
    pub fn find(&self, city: &str, year: Year) -> Option<&RhAllocation> {
        self.allocations
            .iter()
            .find(|a| a.city == city && a.year == year)
    }
}

pub fn build_allocations(seeds: &[RhSeed]) -> AllocationTable {
    let mut table = AllocationTable::default();
    for (index, seed) in seeds.iter().enumerate() {
        if table.find(&seed.city, seed.year).is_some() {
            log::warn!("proration: duplicate seed city={} year={}", seed.city, seed.year);
            table.rejected.push(ValidationError::DuplicateSeed {
                city: seed.city.clone(),
                year: seed.year,
            });
            continue;
        }
        match RhAllocation::for_seed(seed) {
            Ok(allocation) => table.allocations.push(allocation),
            Err(e) => {
                log::warn!("proration: skipping seed {index} city={}: {e}", seed.city);
                table.rejected.push(ValidationError::InvalidSeed {
                    index,
                    city: seed.city.clone(),
                    source: Box::new(e),
                });
            }
        }
    }
    table
}
