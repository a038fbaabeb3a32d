//! Highlight table for a whole page of rows.
//!
//! The table is a snapshot: it is computed from one revision of rows, rules,
//! columns and mode, and must be recomputed when any of them changes.

use std::collections::{BTreeMap, HashMap};

use srh_core::board::{Column, Item};
use srh_core::rule::Rule;

use crate::evaluator::Evaluator;
use crate::resolver::Highlight;

/// Highlights keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightTable {
    rows: usize,
    highlights: HashMap<String, Highlight>,
}

impl HighlightTable {
    /// Computes highlights for `items` using the local clock.
    pub fn compute(items: &[Item], rules: &[Rule], columns: &[Column], dark_mode: bool) -> Self {
        Self::compute_with(&Evaluator::new(columns), items, rules, dark_mode)
    }

    /// Computes highlights for `items` with a given evaluator.
    pub fn compute_with(
        evaluator: &Evaluator<'_>,
        items: &[Item],
        rules: &[Rule],
        dark_mode: bool,
    ) -> Self {
        let highlights = items
            .iter()
            .filter_map(|item| {
                evaluator
                    .resolve(item, rules, dark_mode)
                    .map(|h| (item.id.clone(), h))
            })
            .collect();
        Self {
            rows: items.len(),
            highlights,
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&Highlight> {
        self.highlights.get(item_id)
    }

    /// Number of rows the table was computed over.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of rows with a highlight.
    pub fn highlighted_count(&self) -> usize {
        self.highlights.len()
    }

    /// Rows won per rule id.
    pub fn wins_by_rule(&self) -> BTreeMap<&str, usize> {
        let mut wins = BTreeMap::new();
        for h in self.highlights.values() {
            *wins.entry(h.rule_id.as_str()).or_insert(0) += 1;
        }
        wins
    }
}
