//! Due-set selection for a topic's review pools.

use crate::types::{ItemId, ItemKind, ReviewItem};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// An item selected for review, paired with its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueItem<T> {
    pub id: ItemId,
    pub content: T,
}

/// Whether an item should be shown on the given day.
///
/// Never-answered items are always due; otherwise the boundary is inclusive.
pub fn is_due(item: Option<&ReviewItem>, today: NaiveDate) -> bool {
    item.map_or(true, |item| item.next_review_date <= today)
}

/// Select the due items of one pool, keeping their original order.
pub fn select_due<T: Clone>(
    kind: ItemKind,
    items: &[T],
    progress: &BTreeMap<ItemId, ReviewItem>,
    today: NaiveDate,
) -> Vec<DueItem<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, content)| (ItemId::new(kind, index), content))
        .filter(|(id, _)| is_due(progress.get(id), today))
        .map(|(id, content)| DueItem {
            id,
            content: content.clone(),
        })
        .collect()
}

/// Count the due items of one pool without cloning content.
pub fn count_due(
    kind: ItemKind,
    len: usize,
    progress: &BTreeMap<ItemId, ReviewItem>,
    today: NaiveDate,
) -> usize {
    (0..len)
        .filter(|&index| is_due(progress.get(&ItemId::new(kind, index)), today))
        .count()
}
