use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::{ExitInstruction, RectPrimitive};

/// Visible-label changes between two consecutive frames.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleSetDiff {
    pub entered: Vec<String>,
    pub updated: Vec<String>,
    pub exited: Vec<String>,
}

impl VisibleSetDiff {
    #[must_use]
    pub fn is_membership_change(&self) -> bool {
        !self.entered.is_empty() || !self.exited.is_empty()
    }
}

/// Placement of one visible bar handed to the reconciler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBar<'a> {
    pub label: &'a str,
    pub rank: usize,
    pub rect: RectPrimitive,
}

/// Remembers the previous frame's bars and classifies the next frame.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    previous: IndexMap<String, (usize, RectPrimitive)>,
}

impl Reconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn previous_len(&self) -> usize {
        self.previous.len()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.previous.contains_key(label)
    }

    /// Diffs `current` against the previous call and stores it for the next.
    pub fn reconcile(&mut self, current: &[PlacedBar<'_>]) -> (VisibleSetDiff, Vec<ExitInstruction>) {
        let outcome = self.diff(current);
        self.commit(current);
        outcome
    }

    /// Diffs `current` against the last committed frame without storing it.
    ///
    /// Exits carry the last geometry they were drawn with, in previous rank
    /// order.
    #[must_use]
    pub fn diff(&self, current: &[PlacedBar<'_>]) -> (VisibleSetDiff, Vec<ExitInstruction>) {
        let mut diff = VisibleSetDiff::default();
        for bar in current {
            if self.previous.contains_key(bar.label) {
                diff.updated.push(bar.label.to_owned());
            } else {
                diff.entered.push(bar.label.to_owned());
            }
        }

        let mut exits = Vec::new();
        for (label, (rank, rect)) in &self.previous {
            if !current.iter().any(|bar| bar.label == label.as_str()) {
                diff.exited.push(label.clone());
                exits.push(ExitInstruction {
                    label: label.clone(),
                    last_rank: *rank,
                    last_rect: *rect,
                });
            }
        }
        (diff, exits)
    }

    /// Makes `current` the frame the next diff compares against.
    pub fn commit(&mut self, current: &[PlacedBar<'_>]) {
        self.previous = current
            .iter()
            .map(|bar| (bar.label.to_owned(), (bar.rank, bar.rect)))
            .collect();
    }

    pub fn clear(&mut self) {
        self.previous.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{PlacedBar, Reconciler};
    use crate::render::{Color, RectPrimitive};

    fn bar(label: &str, rank: usize) -> PlacedBar<'_> {
        PlacedBar {
            label,
            rank,
            rect: RectPrimitive::new(0.0, rank as f64 * 10.0, 50.0, 8.0, Color::rgb(0.0, 0.0, 0.0)),
        }
    }

    #[test]
    fn first_frame_enters_everything() {
        let mut reconciler = Reconciler::new();
        let (diff, exits) = reconciler.reconcile(&[bar("a", 0), bar("b", 1)]);
        assert_eq!(diff.entered, vec!["a", "b"]);
        assert!(diff.updated.is_empty());
        assert!(exits.is_empty());
    }

    #[test]
    fn dropped_label_exits_with_last_geometry() {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&[bar("a", 0), bar("b", 1)]);
        let (diff, exits) = reconciler.reconcile(&[bar("c", 0), bar("a", 1)]);

        assert_eq!(diff.entered, vec!["c"]);
        assert_eq!(diff.updated, vec!["a"]);
        assert_eq!(diff.exited, vec!["b"]);
        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].last_rank, 1);
        assert_eq!(exits[0].last_rect.y, 10.0);
        assert!(diff.is_membership_change());
    }

    #[test]
    fn uncommitted_diff_leaves_previous_frame_in_place() {
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&[bar("a", 0)]);
        let (diff, _) = reconciler.diff(&[bar("b", 0)]);
        assert_eq!(diff.exited, vec!["a"]);

        let (diff, exits) = reconciler.diff(&[bar("a", 0), bar("c", 1)]);
        assert_eq!(diff.updated, vec!["a"]);
        assert_eq!(diff.entered, vec!["c"]);
        assert!(exits.is_empty());
    }
}
