//! Per-item override tables
//!
//! Every table is a sparse map keyed by the item's current index in the
//! catalogue order. The tables move together: any permutation of the item
//! order must re-key all of them at once, or override data detaches from the
//! item it belongs to.

use std::collections::BTreeMap;

use crate::types::{BarcodeKind, LayoutTag, PaginateError, Result};

/// Sparse per-item attribute overrides, keyed by current item index
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOverrides {
    /// Layout tag override (item starts a page of this layout)
    pub layout: BTreeMap<usize, LayoutTag>,
    /// Barcode symbology override
    pub barcode: BTreeMap<usize, BarcodeKind>,
    /// Whether to show the author/brand bio block
    pub show_bio: BTreeMap<usize, bool>,
    /// Free-text footer note
    pub footer_note: BTreeMap<usize, String>,
}

impl ItemOverrides {
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
            && self.barcode.is_empty()
            && self.show_bio.is_empty()
            && self.footer_note.is_empty()
    }

    /// The layout that takes effect for the item at `index`
    pub fn effective_layout(&self, index: usize, default: LayoutTag) -> LayoutTag {
        self.layout.get(&index).copied().unwrap_or(default)
    }

    /// Check every key against the item count
    ///
    /// A key at or past `item_count` is a configuration error, not a
    /// recoverable condition: the tables no longer describe the item list.
    pub fn validate(&self, item_count: usize) -> Result<()> {
        let max_key = self
            .layout
            .keys()
            .chain(self.barcode.keys())
            .chain(self.show_bio.keys())
            .chain(self.footer_note.keys())
            .max()
            .copied();

        match max_key {
            Some(key) if key >= item_count => Err(PaginateError::Config(format!(
                "Override keyed by item index {} but only {} items exist",
                key, item_count
            ))),
            _ => Ok(()),
        }
    }

    /// Re-key every table through a permutation of the item order
    ///
    /// `item_order[j]` is the old index of the item now at position `j`.
    /// Produces tables keyed by new positions, so each override follows its
    /// item rather than staying at its old slot.
    pub fn remap(&self, item_order: &[usize]) -> Self {
        fn remap_one<V: Clone>(map: &BTreeMap<usize, V>, order: &[usize]) -> BTreeMap<usize, V> {
            order
                .iter()
                .enumerate()
                .filter_map(|(new_index, old_index)| {
                    map.get(old_index).map(|v| (new_index, v.clone()))
                })
                .collect()
        }

        Self {
            layout: remap_one(&self.layout, item_order),
            barcode: remap_one(&self.barcode, item_order),
            show_bio: remap_one(&self.show_bio, item_order),
            footer_note: remap_one(&self.footer_note, item_order),
        }
    }
}
