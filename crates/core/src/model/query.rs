//! Query results, outcomes, and category filtering.

use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::diagnostic::Diagnostic;
use super::merchant::{MapPoint, MerchantRecord};
use crate::Jurisdiction;

/// Why a result is (or is not) empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Populated,
    NoData,
    Failed,
}

/// Merchants for one jurisdiction, in the order the registry returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub jurisdiction: Jurisdiction,
    pub status: QueryStatus,
    pub records: Vec<MerchantRecord>,
}

impl QueryResult {
    /// Build a result from normalized records.
    ///
    /// An empty record list is tagged [`QueryStatus::NoData`].
    pub fn from_records(jurisdiction: Jurisdiction, records: Vec<MerchantRecord>) -> Self {
        if records.is_empty() {
            return Self::no_data(jurisdiction);
        }
        Self { jurisdiction, status: QueryStatus::Populated, records }
    }

    pub fn no_data(jurisdiction: Jurisdiction) -> Self {
        Self { jurisdiction, status: QueryStatus::NoData, records: Vec::new() }
    }

    pub fn failed(jurisdiction: Jurisdiction) -> Self {
        Self { jurisdiction, status: QueryStatus::Failed, records: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct, sorted, non-blank category names.
    pub fn categories(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.category.as_deref())
            .filter(|c| !c.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records matching the category filter, order preserved.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&MerchantRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Apply a category filter and attach an advisory if it empties a non-empty result.
    pub fn select(&self, filter: &CategoryFilter) -> Selection<'_> {
        let records = self.filter(filter);
        let advisory = match filter {
            CategoryFilter::Only(category) if records.is_empty() && !self.is_empty() => {
                Some(Diagnostic::empty_category(self.jurisdiction, category))
            }
            _ => None,
        };
        Selection { records, advisory }
    }

    pub fn map_points(&self) -> Vec<MapPoint> {
        self.records.iter().map(MerchantRecord::map_point).collect()
    }
}

/// Category selection. `전체` ("all") keeps every merchant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Label shown for the "all categories" choice.
    pub const ALL_LABEL: &'static str = "전체";

    pub fn from_option(category: Option<&str>) -> Self {
        category.map(|c| c.parse().unwrap_or_default()).unwrap_or_default()
    }

    pub fn matches(&self, record: &MerchantRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => record.category.as_deref() == Some(category.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == Self::ALL_LABEL || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_LABEL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// A filtered view over a [`QueryResult`].
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub records: Vec<&'a MerchantRecord>,
    pub advisory: Option<Diagnostic>,
}

/// What the pipeline hands to the presentation layer.
///
/// `result` is always present; on failure it is empty and `diagnostic`
/// explains why.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub diagnostic: Option<Diagnostic>,
    pub cache_hit: bool,
}

impl QueryOutcome {
    pub fn is_error(&self) -> bool {
        self.diagnostic.as_ref().is_some_and(Diagnostic::is_error)
    }
}
