//! Rate tables: working days per union and daily value per region.
//!
//! Both lookup structures are built once per run from their source tables and
//! then treated as read-only. Data-quality problems (non-numeric day counts,
//! unparseable currency values, absent source tables) degrade to documented
//! defaults with a warning; only the absence of *both* sources is fatal.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::tables::{SourceKind, TableSet, columns};

/// Working days applied when a union is absent from the working-days source.
pub const DEFAULT_WORKING_DAYS: u32 = 22;

/// Daily value applied when no region name matches the employee's union.
pub fn default_daily_value() -> Decimal {
    Decimal::new(3500, 2) // 35.00
}

/// One region entry of the daily-value lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionRate {
    region: String,
    daily_value: Decimal,
}

/// Immutable rate lookups, built once and passed explicitly into the
/// calculation operations.
///
/// Region resolution tests each known region name for containment within the
/// employee's upper-cased union string. Entries are held sorted by descending
/// region-name length (ties broken lexicographically), so when a union string
/// contains two region names the longest one wins deterministically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTables {
    working_days: HashMap<String, u32>,
    regions: Vec<RegionRate>,
}

impl RateTables {
    /// Builds the rate tables from the loaded sources.
    ///
    /// Returns `MissingRequiredSource` only when both the working-days and
    /// region-rate sources are absent; a single absent source falls back to
    /// its global default with one warning.
    pub fn build(tables: &TableSet) -> EngineResult<Self> {
        let working_days_source = tables.get(SourceKind::WorkingDays);
        let region_source = tables.get(SourceKind::RegionRates);

        if working_days_source.is_none() && region_source.is_none() {
            return Err(EngineError::MissingRequiredSource {
                name: format!(
                    "{} and {}",
                    SourceKind::WorkingDays.label(),
                    SourceKind::RegionRates.label()
                ),
            });
        }

        let mut working_days = HashMap::new();
        match working_days_source {
            Some(table) => {
                for row in 0..table.row_count() {
                    let Some(union_name) = table.text(row, columns::UNION) else {
                        continue;
                    };
                    let union_name = union_name.trim().to_uppercase();
                    if union_name.is_empty() {
                        continue;
                    }
                    let days = match table
                        .text(row, columns::WORKING_DAYS)
                        .and_then(parse_day_count)
                    {
                        Some(days) => days,
                        None => {
                            warn!(
                                union = %union_name,
                                default = DEFAULT_WORKING_DAYS,
                                "non-numeric working-day count, using default"
                            );
                            DEFAULT_WORKING_DAYS
                        }
                    };
                    working_days.insert(union_name, days);
                }
            }
            None => {
                warn!(
                    default = DEFAULT_WORKING_DAYS,
                    "working-days source absent, every union falls back to the default"
                );
            }
        }

        let mut regions = Vec::new();
        match region_source {
            Some(table) => {
                for row in 0..table.row_count() {
                    let Some(region) = table.text(row, columns::REGION) else {
                        continue;
                    };
                    let region = region.trim().to_uppercase();
                    if region.is_empty() {
                        continue;
                    }
                    match table.text(row, columns::DAILY_VALUE).and_then(parse_currency) {
                        Some(daily_value) => regions.push(RegionRate { region, daily_value }),
                        None => {
                            warn!(region = %region, "unparseable daily value, row skipped");
                        }
                    }
                }
            }
            None => {
                warn!("region-rate source absent, every lookup falls back to the default value");
            }
        }

        Ok(Self::from_entries(working_days, regions))
    }

    /// Builds rate tables from already-parsed entries.
    ///
    /// Intended for tests and fixtures; applies the same normalization and
    /// deterministic region ordering as [`RateTables::build`].
    pub fn from_parts(
        working_days: HashMap<String, u32>,
        regions: Vec<(String, Decimal)>,
    ) -> Self {
        let working_days = working_days
            .into_iter()
            .map(|(union_name, days)| (union_name.trim().to_uppercase(), days))
            .collect();
        let regions = regions
            .into_iter()
            .map(|(region, daily_value)| RegionRate {
                region: region.trim().to_uppercase(),
                daily_value,
            })
            .collect();
        Self::from_entries(working_days, regions)
    }

    fn from_entries(working_days: HashMap<String, u32>, mut regions: Vec<RegionRate>) -> Self {
        // Longest region name first; lexicographic for equal lengths.
        regions.sort_by(|a, b| {
            b.region
                .len()
                .cmp(&a.region.len())
                .then_with(|| a.region.cmp(&b.region))
        });
        regions.dedup_by(|a, b| a.region == b.region);
        Self {
            working_days,
            regions,
        }
    }

    /// The working-day count for a union, defaulting to
    /// [`DEFAULT_WORKING_DAYS`] when unmapped.
    pub fn working_days(&self, union_name: &str) -> u32 {
        self.working_days
            .get(union_name.trim().to_uppercase().as_str())
            .copied()
            .unwrap_or(DEFAULT_WORKING_DAYS)
    }

    /// The daily benefit value for a union, resolved by region substring
    /// match, defaulting when no region name is contained in the union string.
    pub fn daily_value(&self, union_name: &str) -> Decimal {
        self.region_for(union_name)
            .map(|rate| rate.daily_value)
            .unwrap_or_else(default_daily_value)
    }

    /// The region entry matched for a union, if any.
    fn region_for(&self, union_name: &str) -> Option<&RegionRate> {
        let union_upper = union_name.to_uppercase();
        self.regions
            .iter()
            .find(|rate| union_upper.contains(rate.region.as_str()))
    }

    /// Number of mapped unions.
    pub fn union_count(&self) -> usize {
        self.working_days.len()
    }

    /// Number of mapped regions.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

/// Parses a working-day count cell; fractional values are truncated.
fn parse_day_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if let Ok(days) = trimmed.parse::<u32>() {
        return Some(days);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| *value >= 0.0)
        .map(|value| value as u32)
}

/// Parses a currency value by stripping the `R$` symbol and spaces and
/// converting a comma decimal separator to a period.
///
/// # Examples
///
/// ```
/// use benefit_engine::rates::parse_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_currency("R$ 37,50"), Some(Decimal::new(3750, 2)));
/// assert_eq!(parse_currency("35.00"), Some(Decimal::new(3500, 2)));
/// assert_eq!(parse_currency("n/a"), None);
/// ```
pub fn parse_currency(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
