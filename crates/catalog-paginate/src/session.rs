//! Interactive pagination session
//!
//! Owns the item list, the configuration and the derived page sequence while
//! the operator previews and reorders. The sequence is always recomputed from
//! items + overrides + synthetic-page requests; it only diverges from that
//! derivation transiently, between `move_page` calls and the next
//! `commit_reorder`. Rendering must snapshot the sequence after a commit,
//! never during edits.

use crate::groups::build_page_groups;
use crate::options::CatalogOptions;
use crate::overrides::ItemOverrides;
use crate::reorder::{self, ReorderOutcome};
use crate::synthetic::insert_synthetic_pages;
use crate::types::*;

pub struct CatalogSession {
    items: Vec<Item>,
    default_layout: LayoutTag,
    overrides: ItemOverrides,
    url_slots: Vec<UrlPageSlot>,
    append_summary: bool,
    sequence: PageSequence,
}

impl CatalogSession {
    /// Start a session from an item list and persisted options
    ///
    /// Fails fast on configuration errors (override keys past the item
    /// count, too many URL slots); there is no partial session.
    pub fn new(items: Vec<Item>, options: &CatalogOptions) -> Result<Self> {
        options.validate(items.len())?;

        let mut session = Self {
            items,
            default_layout: options.default_layout,
            overrides: options.overrides.clone(),
            url_slots: options.url_slots.clone(),
            append_summary: options.append_summary,
            sequence: Vec::new(),
        };
        session.rebuild();
        Ok(session)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn overrides(&self) -> &ItemOverrides {
        &self.overrides
    }

    pub fn url_slots(&self) -> &[UrlPageSlot] {
        &self.url_slots
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    /// The layout in effect for the item currently at `index`
    pub fn effective_layout(&self, index: usize) -> LayoutTag {
        self.overrides.effective_layout(index, self.default_layout)
    }

    /// Re-derive the page sequence from items, overrides and slots
    pub fn rebuild(&mut self) {
        let groups = build_page_groups(self.items.len(), self.default_layout, &self.overrides);
        self.sequence = insert_synthetic_pages(groups, &self.url_slots, self.append_summary);
    }

    /// Set or clear the layout override for one item, then re-derive
    pub fn set_layout_override(&mut self, index: usize, layout: Option<LayoutTag>) -> Result<()> {
        if index >= self.items.len() {
            return Err(PaginateError::Config(format!(
                "Layout override for item {} but only {} items exist",
                index,
                self.items.len()
            )));
        }

        match layout {
            Some(tag) => self.overrides.layout.insert(index, tag),
            None => self.overrides.layout.remove(&index),
        };
        self.rebuild();
        Ok(())
    }

    /// Swap a page with its neighbour; out-of-range moves are no-ops
    pub fn move_page(&mut self, index: usize, direction: isize) {
        reorder::move_page(&mut self.sequence, index, direction);
    }

    /// Commit the current page order
    ///
    /// Installs the flattened item order and the re-keyed override tables,
    /// writes each placed URL page's position back into its configuration
    /// slot, and re-derives the sequence. After a commit, re-deriving
    /// reproduces the arrangement the operator committed.
    pub fn commit_reorder(&mut self) -> ReorderOutcome {
        let outcome = reorder::apply_reorder(&self.sequence, &self.overrides);

        let reordered = outcome
            .item_order
            .iter()
            .map(|&old_index| self.items[old_index].clone())
            .collect();
        self.items = reordered;
        self.overrides = outcome.overrides.clone();
        for (&slot, &position) in &outcome.url_page_positions {
            if let Some(cfg) = self.url_slots.get_mut(slot) {
                cfg.page_index = Some(position);
            }
        }

        self.rebuild();
        outcome
    }

    /// Current configuration, suitable for persisting
    pub fn to_options(&self) -> CatalogOptions {
        CatalogOptions {
            default_layout: self.default_layout,
            overrides: self.overrides.clone(),
            url_slots: self.url_slots.clone(),
            append_summary: self.append_summary,
        }
    }
}
