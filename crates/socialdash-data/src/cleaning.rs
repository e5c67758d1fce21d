//! Cleaning steps applied before ids are assigned.

use crate::records::RawReaction;
use chrono::{DateTime, NaiveDateTime};
use socialdash_common::{DashError, Result};
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;
use tracing::{debug, info, instrument};

/// A reaction row with every cell present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CleanReactionRow {
    /// Id of the reacting user.
    pub user: u64,
    /// Reaction type.
    pub reaction_type: String,
    /// Reaction instant.
    pub reaction_date: NaiveDateTime,
}

/// Drops reactions without a user, then fills missing types with the most
/// frequent type and missing dates with the median date.
///
/// Filling is only attempted when something is missing; a column that needs
/// filling but has no values at all is a data shape error.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn clean_reactions(rows: Vec<RawReaction>) -> Result<Vec<CleanReactionRow>> {
    let before = rows.len();
    let rows: Vec<RawReaction> = rows.into_iter().filter(|r| r.user.is_some()).collect();
    if rows.len() < before {
        info!("Dropped {} reactions without a user", before - rows.len());
    }

    let fill_type = if rows.iter().any(|r| r.reaction_type.is_none()) {
        let mode = most_frequent(rows.iter().filter_map(|r| r.reaction_type.as_deref()))
            .ok_or_else(|| {
                DashError::data_shape("reaction types need filling but none are present")
            })?
            .to_string();
        debug!("Filling missing reaction types with '{}'", mode);
        Some(mode)
    } else {
        None
    };

    let fill_date = if rows.iter().any(|r| r.reaction_date.is_none()) {
        let median = median_datetime(rows.iter().filter_map(|r| r.reaction_date)).ok_or_else(|| {
            DashError::data_shape("reaction dates need filling but none are present")
        })?;
        debug!("Filling missing reaction dates with {}", median);
        Some(median)
    } else {
        None
    };

    rows.into_iter()
        .map(|row| {
            // Every branch below is covered by the fills computed above.
            let reaction_type = row
                .reaction_type
                .or_else(|| fill_type.clone())
                .ok_or_else(|| DashError::data_shape("reaction type left unfilled"))?;
            let reaction_date = row
                .reaction_date
                .or(fill_date)
                .ok_or_else(|| DashError::data_shape("reaction date left unfilled"))?;
            let user = row
                .user
                .ok_or_else(|| DashError::data_shape("reaction user left unfilled"))?;
            Ok(CleanReactionRow {
                user,
                reaction_type,
                reaction_date,
            })
        })
        .collect()
}

/// Most frequent value; ties go to the lexicographically smallest.
pub fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Median instant; an even count gives the midpoint of the two middle values.
pub fn median_datetime(values: impl Iterator<Item = NaiveDateTime>) -> Option<NaiveDateTime> {
    let mut millis: Vec<i64> = values.map(|v| v.and_utc().timestamp_millis()).collect();
    if millis.is_empty() {
        return None;
    }
    millis.sort_unstable();

    let mid = millis.len() / 2;
    let median = if millis.len() % 2 == 0 {
        let (a, b) = (millis[mid - 1], millis[mid]);
        a + (b - a) / 2
    } else {
        millis[mid]
    };
    DateTime::from_timestamp_millis(median).map(|dt| dt.naive_utc())
}

/// Removes exact duplicate rows, keeping the first occurrence in order.
pub fn dedup_rows<T: Eq + Hash + Clone>(rows: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|row| seen.insert(row.clone())).collect()
}
