//! Exclusion resolution.
//!
//! Computes the set of registration ids that must never receive the benefit:
//! directors, interns, apprentices, employees on leave, and overseas staff.
//! Category provenance is retained so the audit export can list why each id
//! was removed. A missing source table contributes an empty category, not an
//! error, and one id may legitimately belong to several categories.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tables::{SourceKind, Table, TableSet, columns};

/// The title keyword that marks a director on the active roster.
///
/// Matched as a case-insensitive substring rather than an exact title so
/// variants like `DIRETOR DE OPERAÇÕES` are caught.
pub const DIRECTOR_TITLE_KEYWORD: &str = "DIRETOR";

/// The category that caused a registration id to be excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCategory {
    /// Job title contains the director keyword.
    Director,
    /// Listed in the intern source.
    Intern,
    /// Listed in the apprentice source.
    Apprentice,
    /// Listed in the leave source.
    OnLeave,
    /// Listed in the overseas source.
    Overseas,
}

impl ExclusionCategory {
    /// All categories, in resolution order.
    pub const ALL: [ExclusionCategory; 5] = [
        ExclusionCategory::Director,
        ExclusionCategory::Intern,
        ExclusionCategory::Apprentice,
        ExclusionCategory::OnLeave,
        ExclusionCategory::Overseas,
    ];

    /// A short label for logs and the audit export.
    pub fn label(self) -> &'static str {
        match self {
            ExclusionCategory::Director => "director",
            ExclusionCategory::Intern => "intern",
            ExclusionCategory::Apprentice => "apprentice",
            ExclusionCategory::OnLeave => "on leave",
            ExclusionCategory::Overseas => "overseas",
        }
    }
}

impl fmt::Display for ExclusionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of excluded registration ids, tagged by producing category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionSet {
    by_category: BTreeMap<ExclusionCategory, BTreeSet<String>>,
}

impl ExclusionSet {
    /// Returns true if the id is excluded by any category.
    pub fn contains(&self, registration_id: &str) -> bool {
        self.by_category
            .values()
            .any(|ids| ids.contains(registration_id))
    }

    /// The categories that excluded the given id.
    pub fn categories_for(&self, registration_id: &str) -> Vec<ExclusionCategory> {
        self.by_category
            .iter()
            .filter(|(_, ids)| ids.contains(registration_id))
            .map(|(category, _)| *category)
            .collect()
    }

    /// The ids excluded by one category.
    pub fn category(&self, category: ExclusionCategory) -> Option<&BTreeSet<String>> {
        self.by_category.get(&category)
    }

    /// The union of all categories.
    pub fn ids(&self) -> BTreeSet<String> {
        self.by_category.values().flatten().cloned().collect()
    }

    /// The number of distinct excluded ids.
    pub fn unique_count(&self) -> usize {
        self.ids().len()
    }

    /// Iterates over `(category, ids)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (ExclusionCategory, &BTreeSet<String>)> {
        self.by_category.iter().map(|(category, ids)| (*category, ids))
    }

    fn insert(&mut self, category: ExclusionCategory, ids: BTreeSet<String>) {
        self.by_category.insert(category, ids);
    }
}

/// Resolves the exclusion set from the loaded source tables.
pub fn resolve(tables: &TableSet) -> ExclusionSet {
    let mut exclusions = ExclusionSet::default();

    for category in ExclusionCategory::ALL {
        let ids = match category {
            ExclusionCategory::Director => directors(tables.get(SourceKind::ActiveRoster)),
            ExclusionCategory::Intern => all_ids(tables.get(SourceKind::Interns)),
            ExclusionCategory::Apprentice => all_ids(tables.get(SourceKind::Apprentices)),
            ExclusionCategory::OnLeave => all_ids(tables.get(SourceKind::Leave)),
            ExclusionCategory::Overseas => all_ids(tables.get(SourceKind::Overseas)),
        };
        info!(category = %category, count = ids.len(), "exclusions resolved");
        exclusions.insert(category, ids);
    }

    info!(
        unique = exclusions.unique_count(),
        "total unique exclusions"
    );
    exclusions
}

/// Active-roster ids whose job title contains the director keyword.
fn directors(roster: Option<&Table>) -> BTreeSet<String> {
    let Some(roster) = roster else {
        return BTreeSet::new();
    };

    (0..roster.row_count())
        .filter(|&row| {
            roster
                .text(row, columns::JOB_TITLE)
                .is_some_and(|title| title.to_uppercase().contains(DIRECTOR_TITLE_KEYWORD))
        })
        .filter_map(|row| roster.text(row, columns::REGISTRATION_ID))
        .map(str::to_string)
        .collect()
}

/// Every registration id present in a roster-style source.
fn all_ids(table: Option<&Table>) -> BTreeSet<String> {
    let Some(table) = table else {
        return BTreeSet::new();
    };

    (0..table.row_count())
        .filter_map(|row| table.text(row, columns::REGISTRATION_ID))
        .filter(|id| !id.trim().is_empty())
        .map(str::to_string)
        .collect()
}
