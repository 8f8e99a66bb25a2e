//! Shared primitive types used across the org analytics core.

/// A headcount. Counts are never negative.
pub type Headcount = u64;

/// A calendar year, as carried on holiday allocation seeds.
pub type Year = i32;

/// Number of restricted holidays granted.
pub type RhDays = u32;

/// Placeholder for location fields that are absent on an incoming record.
pub const UNASSIGNED: &str = "Unassigned";

/// Display order for counted rows: descending count, then ascending name.
/// Every sorted table in the crate uses this so equal counts never depend
/// on input order.
pub fn headcount_order(
    a_count: Headcount,
    a_name: &str,
    b_count: Headcount,
    b_name: &str,
) -> std::cmp::Ordering {
    b_count.cmp(&a_count).then_with(|| a_name.cmp(b_name))
}
