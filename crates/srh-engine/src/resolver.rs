//! Highlight resolution: the first matching rule colors the row.

use serde::Serialize;
use srh_core::board::{Column, Item};
use srh_core::palette;
use srh_core::rule::Rule;
use tracing::debug;

use crate::evaluator::Evaluator;

/// The highlight applied to one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub rule_id: String,
    pub rule_name: String,
    pub color_id: String,
    /// Hex color for the requested mode; absent for an unknown color id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub total_matches: usize,
    pub all_matching_rule_ids: Vec<String>,
}

impl Highlight {
    /// Number of matching rules beyond the winner.
    pub fn more_count(&self) -> usize {
        self.total_matches.saturating_sub(1)
    }
}

impl Evaluator<'_> {
    /// Resolves the highlight for `item`, or `None` when no rule matches.
    pub fn resolve<'r, I>(&self, item: &Item, rules: I, dark_mode: bool) -> Option<Highlight>
    where
        I: IntoIterator<Item = &'r Rule>,
    {
        let matches = self.matching_rules(item, rules);
        let winner = matches.first()?;

        let color = palette::find_color(&winner.color_id).map(|c| c.hex(dark_mode).to_owned());
        if color.is_none() {
            debug!(rule = %winner.id, color = %winner.color_id, "unknown color id");
        }

        Some(Highlight {
            rule_id: winner.id.clone(),
            rule_name: winner.name.clone(),
            color_id: winner.color_id.clone(),
            color,
            total_matches: matches.len(),
            all_matching_rule_ids: matches.iter().map(|r| r.id.clone()).collect(),
        })
    }
}

/// Resolves the highlight for `item` using the local clock.
pub fn resolve<'r, I>(
    item: &Item,
    rules: I,
    columns: &[Column],
    dark_mode: bool,
) -> Option<Highlight>
where
    I: IntoIterator<Item = &'r Rule>,
{
    Evaluator::new(columns).resolve(item, rules, dark_mode)
}
