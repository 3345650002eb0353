use indexmap::IndexSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{FrameValues, SeriesStore};
use crate::render::Color;

pub const DEFAULT_MAX_VISIBLE_ITEMS: usize = 12;

/// Labels that have shown a strictly positive value at some visited instant.
///
/// The set only grows; it has no removal API. Iteration follows first
/// appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearedSet {
    labels: IndexSet<String>,
}

impl AppearedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every strictly positive label; returns how many were new.
    pub fn record(&mut self, values: &FrameValues) -> usize {
        let mut added = 0;
        for (label, value) in values {
            if *value > 0.0 && !self.labels.contains(label) {
                self.labels.insert(label.clone());
                added += 1;
            }
        }
        added
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.labels.insert(label.into())
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Filter/cap policy applied on every ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    pub max_visible_items: usize,
    pub keep_zero_items: bool,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            max_visible_items: DEFAULT_MAX_VISIBLE_ITEMS,
            keep_zero_items: false,
        }
    }
}

/// One bar's render-ready data for the current instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub label: String,
    pub value: f64,
    pub color: Color,
    /// Zero-based position, highest value first.
    pub rank: usize,
}

/// Ranks one instant and carries the appeared-set between calls.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    policy: RankingPolicy,
    appeared: AppearedSet,
}

impl RankingEngine {
    #[must_use]
    pub fn new(policy: RankingPolicy) -> Self {
        Self {
            policy,
            appeared: AppearedSet::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> RankingPolicy {
        self.policy
    }

    pub fn set_keep_zero_items(&mut self, keep_zero_items: bool) {
        self.policy.keep_zero_items = keep_zero_items;
    }

    #[must_use]
    pub fn appeared(&self) -> &AppearedSet {
        &self.appeared
    }

    /// Seeds the appeared-set from every label positive anywhere in `store`.
    pub fn prescan(&mut self, store: &SeriesStore) {
        for label in store.ever_positive_labels() {
            self.appeared.insert(label);
        }
    }

    /// Produces the ordered, filtered and capped display list for `values`.
    ///
    /// Colors come from `store`; labels unknown to the store are skipped.
    pub fn rank(&mut self, values: &FrameValues, store: &SeriesStore) -> Vec<DisplayItem> {
        let newly_appeared = self.record(values);
        let items = self.preview(values, store);

        trace!(
            input_len = values.len(),
            visible = items.len(),
            newly_appeared,
            keep_zero_items = self.policy.keep_zero_items,
            "ranked instant"
        );
        items
    }

    /// Same list as [`RankingEngine::rank`] without updating the appeared-set.
    ///
    /// Labels the update would add are positive in `values` and pass the
    /// filter anyway, so `preview` followed by `record` equals `rank`.
    #[must_use]
    pub fn preview(&self, values: &FrameValues, store: &SeriesStore) -> Vec<DisplayItem> {
        let mut ordered: Vec<(&str, f64)> = values
            .iter()
            .map(|(label, value)| (label.as_str(), *value))
            .collect();
        // `sort_by` is stable, so equal values keep input order.
        ordered.sort_by(|left, right| right.1.total_cmp(&left.1));

        ordered
            .into_iter()
            .filter(|(label, value)| {
                *value > 0.0 || (self.policy.keep_zero_items && self.appeared.contains(label))
            })
            .filter_map(|(label, value)| {
                store
                    .color_of(label)
                    .map(|color| (label.to_owned(), value, color))
            })
            .take(self.policy.max_visible_items)
            .enumerate()
            .map(|(rank, (label, value, color))| DisplayItem {
                label,
                value,
                color,
                rank,
            })
            .collect()
    }

    /// Adds every label positive in `values` to the appeared-set.
    ///
    /// Returns how many labels were new.
    pub fn record(&mut self, values: &FrameValues) -> usize {
        self.appeared.record(values)
    }
}
