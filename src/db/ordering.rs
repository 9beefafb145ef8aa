//! Display ordering for columns and cards.
//!
//! Order values are assigned as "sibling count + 1" and never renumbered, so
//! gaps are normal. Sequences are always resolved by sorting.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::db::{Board, Card, Column, Id};

/// Order value for a new item appended after `siblings` existing ones.
pub fn next_order(siblings: usize) -> i64 {
    siblings as i64 + 1
}

/// The board's columns in display sequence.
///
/// Ids listed in `board.column_order` come first, in that order; ids that no
/// longer resolve to one of the board's columns are skipped. Columns of the
/// board missing from the list follow, by ascending `order`. An empty list
/// therefore means "sort by `order`".
pub fn resolve_columns(board: &Board, columns: &[Column]) -> Vec<Column> {
    let mut own: Vec<&Column> = columns.iter().filter(|c| c.board_id == board.id).collect();
    own.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

    let by_id: HashMap<&str, &Column> = own.iter().map(|&c| (c.id.as_str(), c)).collect();
    let mut placed: HashSet<&str> = HashSet::new();
    let mut resolved = Vec::with_capacity(own.len());

    for id in &board.column_order {
        if let Some(&column) = by_id.get(id.as_str())
            && placed.insert(column.id.as_str())
        {
            resolved.push(column.clone());
        }
    }

    for column in own {
        if placed.insert(column.id.as_str()) {
            resolved.push(column.clone());
        }
    }

    resolved
}

/// Card display comparison: ascending `order`, then arrival (`created_at`),
/// then id so the result is deterministic.
pub fn compare_cards(a: &Card, b: &Card) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by(compare_cards);
}

/// Cards grouped by column id, each group sorted for display.
pub fn cards_by_column(cards: Vec<Card>) -> HashMap<Id, Vec<Card>> {
    let mut grouped: HashMap<Id, Vec<Card>> = HashMap::new();
    for card in cards {
        grouped.entry(card.column_id.clone()).or_default().push(card);
    }
    for list in grouped.values_mut() {
        sort_cards(list);
    }
    grouped
}
