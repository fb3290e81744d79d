//! Filtered and sorted projection of the history list.
//!
//! Every displayed row keeps the index it had in the source list. Deletion
//! must go through [`HistoryView::original_index`], never the display index.

use std::cmp::Ordering;

use crate::models::HistoryRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOption {
    #[default]
    DateDesc,
    DateAsc,
    TopicAsc,
    TopicDesc,
}

#[derive(Debug, Clone)]
pub struct HistoryView<'a> {
    rows: Vec<(usize, &'a HistoryRecord)>,
}

impl<'a> HistoryView<'a> {
    /// Filter by a case-insensitive match on topic or any keyword, then sort.
    pub fn new(items: &'a [HistoryRecord], query: &str, sort: SortOption) -> Self {
        let query = query.trim().to_lowercase();
        let mut rows: Vec<(usize, &HistoryRecord)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_query(item, &query))
            .collect();
        rows.sort_by(|(_, a), (_, b)| compare(a, b, sort));
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, display_index: usize) -> Option<&'a HistoryRecord> {
        self.rows.get(display_index).map(|(_, item)| *item)
    }

    /// Index in the source list of the row shown at `display_index`.
    pub fn original_index(&self, display_index: usize) -> Option<usize> {
        self.rows.get(display_index).map(|(index, _)| *index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a HistoryRecord> + '_ {
        self.rows.iter().map(|(_, item)| *item)
    }
}

fn matches_query(item: &HistoryRecord, query: &str) -> bool {
    query.is_empty()
        || item.topic.to_lowercase().contains(query)
        || item
            .keywords
            .iter()
            .any(|k| k.to_lowercase().contains(query))
}

fn compare(a: &HistoryRecord, b: &HistoryRecord, sort: SortOption) -> Ordering {
    match sort {
        SortOption::DateDesc => b.created_at.cmp(&a.created_at),
        SortOption::DateAsc => a.created_at.cmp(&b.created_at),
        SortOption::TopicAsc => a.topic.to_lowercase().cmp(&b.topic.to_lowercase()),
        SortOption::TopicDesc => b.topic.to_lowercase().cmp(&a.topic.to_lowercase()),
    }
}
