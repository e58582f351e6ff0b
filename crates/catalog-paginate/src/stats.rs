use crate::types::{PageGroup, PageSequence};

/// Statistics about a derived page sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationStatistics {
    /// Total number of catalogue items across all item pages
    pub item_count: usize,
    /// Pages backed by items
    pub item_pages: usize,
    /// Placed external-URL pages
    pub url_pages: usize,
    /// Summary pages (0 or 1)
    pub summary_pages: usize,
    /// Total page count
    pub total_pages: usize,
    /// Spare item slots on partially-filled pages
    pub unused_slots: usize,
}

/// Calculate statistics for a page sequence
pub fn calculate_statistics(sequence: &PageSequence) -> PaginationStatistics {
    let mut stats = PaginationStatistics {
        item_count: 0,
        item_pages: 0,
        url_pages: 0,
        summary_pages: 0,
        total_pages: sequence.len(),
        unused_slots: 0,
    };

    for group in sequence {
        match group {
            PageGroup::Items { indices, layout } => {
                stats.item_pages += 1;
                stats.item_count += indices.len();
                stats.unused_slots += layout.capacity() - indices.len();
            }
            PageGroup::ExternalUrl { .. } => stats.url_pages += 1,
            PageGroup::Summary => stats.summary_pages += 1,
        }
    }

    stats
}
