//! Flattening a reordered page sequence back into item order
//!
//! The page sequence partitions the item indices into disjoint, covering
//! groups, so walking the groups in display order visits every item exactly
//! once: the flattened order is a pure permutation by construction. Synthetic
//! pages are not flattened; their positions are recorded so the caller can
//! persist them back into configuration.

use std::collections::BTreeMap;

use crate::overrides::ItemOverrides;
use crate::types::{PageGroup, PageSequence};

/// Result of applying a page reorder
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    /// `item_order[j]` is the OLD index of the item now at position `j`
    pub item_order: Vec<usize>,
    /// Override tables re-keyed to the new positions
    pub overrides: ItemOverrides,
    /// Slot identifier -> page position, for every placed external-URL page
    pub url_page_positions: BTreeMap<usize, usize>,
    /// Position of the summary page, if one is in the sequence
    pub summary_page_index: Option<usize>,
}

/// Flatten a (possibly reordered) sequence into the new canonical item order
///
/// Applying this to an unmoved sequence returns the identity order and
/// override tables equal to the input.
pub fn apply_reorder(sequence: &PageSequence, overrides: &ItemOverrides) -> ReorderOutcome {
    let mut item_order = Vec::new();
    let mut url_page_positions = BTreeMap::new();
    let mut summary_page_index = None;

    for (position, group) in sequence.iter().enumerate() {
        match group {
            PageGroup::Items { indices, .. } => item_order.extend_from_slice(indices),
            PageGroup::ExternalUrl { slot, .. } => {
                url_page_positions.insert(*slot, position);
            }
            PageGroup::Summary => summary_page_index = Some(position),
        }
    }

    let overrides = overrides.remap(&item_order);

    ReorderOutcome {
        item_order,
        overrides,
        url_page_positions,
        summary_page_index,
    }
}

/// Swap the page at `index` with its neighbour in `direction` (±1)
///
/// Out-of-range moves are silent no-ops: the request comes from same-process
/// UI state, not a protocol boundary, so clamping beats rejection.
pub fn move_page(sequence: &mut PageSequence, index: usize, direction: isize) {
    let len = sequence.len() as isize;
    let from = index as isize;
    let to = from + direction;

    if from < len && to >= 0 && to < len && from != to {
        sequence.swap(index, to as usize);
    }
}
