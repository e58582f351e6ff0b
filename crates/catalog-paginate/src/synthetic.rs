//! Splicing synthetic pages into the item-page sequence
//!
//! External-URL pages are positioned by the operator, so their target
//! indices are clamped rather than validated: an index past the end means
//! "last", never an error. All requested indices refer to the sequence
//! BEFORE any insertion; requests are applied in ascending index order and
//! each splice is offset by the insertions already performed, so the final
//! positions match the operator's intent against the original sequence.

use crate::types::{PageGroup, PageSequence, UrlPageSlot};

/// Build the full page sequence from item groups plus synthetic requests
///
/// Only slots with a `page_index` participate. Requests targeting the same
/// index resolve in ascending slot order. The summary page, when requested,
/// always lands at the very end.
pub fn insert_synthetic_pages(
    groups: Vec<PageGroup>,
    slots: &[UrlPageSlot],
    append_summary: bool,
) -> PageSequence {
    let base_len = groups.len();
    let mut sequence = groups;

    let mut placed: Vec<(usize, usize)> = slots
        .iter()
        .enumerate()
        .filter_map(|(slot, cfg)| cfg.page_index.map(|index| (index, slot)))
        .collect();
    placed.sort_unstable();

    for (inserted, (page_index, slot)) in placed.into_iter().enumerate() {
        let target = page_index.min(base_len) + inserted;
        let cfg = &slots[slot];
        sequence.insert(
            target,
            PageGroup::ExternalUrl {
                slot,
                url: cfg.url.clone(),
                title: cfg.title.clone(),
            },
        );
    }

    if append_summary {
        sequence.push(PageGroup::Summary);
    }

    sequence
}
