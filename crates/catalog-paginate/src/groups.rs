//! Grouping items into fixed-capacity pages
//!
//! A single linear pass over the item order. Two conditions close the
//! current page: the effective layout changes, or the page is full. A layout
//! change always forces a new page even when the previous one has spare
//! capacity - items are never packed across a layout boundary.

use crate::overrides::ItemOverrides;
use crate::types::{LayoutTag, PageGroup};

/// Group `item_count` items into pages under the capacity model
///
/// Output contains only item groups; synthetic pages are spliced in later.
/// Zero items produce an empty sequence, not an error. Partially-filled
/// trailing pages are left as-is - padding to full capacity, if the renderer
/// wants it, is the renderer's concern.
pub fn build_page_groups(
    item_count: usize,
    default_layout: LayoutTag,
    overrides: &ItemOverrides,
) -> Vec<PageGroup> {
    let mut groups = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_layout = default_layout;
    let mut remaining = 0usize;

    for index in 0..item_count {
        let effective = overrides.effective_layout(index, default_layout);

        if current.is_empty() {
            current_layout = effective;
            remaining = effective.capacity();
        } else if effective != current_layout || remaining == 0 {
            groups.push(PageGroup::Items {
                indices: std::mem::take(&mut current),
                layout: current_layout,
            });
            current_layout = effective;
            remaining = effective.capacity();
        }

        current.push(index);
        remaining -= 1;
    }

    if !current.is_empty() {
        groups.push(PageGroup::Items {
            indices: current,
            layout: current_layout,
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_item_list() {
        let groups = build_page_groups(0, LayoutTag::FourUp, &ItemOverrides::default());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_single_item_on_large_layout() {
        // One item on an eight-up page still yields one group of one;
        // groups are never padded here.
        let groups = build_page_groups(1, LayoutTag::EightUp, &ItemOverrides::default());
        assert_eq!(
            groups,
            vec![PageGroup::Items {
                indices: vec![0],
                layout: LayoutTag::EightUp,
            }]
        );
    }

    #[test]
    fn test_capacity_break() {
        let groups = build_page_groups(9, LayoutTag::FourUp, &ItemOverrides::default());
        let sizes: Vec<usize> = groups.iter().map(|g| g.item_count()).collect();
        assert_eq!(sizes, vec![4, 4, 1]);
    }

    #[test]
    fn test_layout_change_forces_break() {
        // Items 0..2 are two-up; item 2 overridden to single. The two-up page
        // has spare capacity when the override hits, but must still close.
        let mut overrides = ItemOverrides::default();
        overrides.layout.insert(1, LayoutTag::Single);

        let groups = build_page_groups(3, LayoutTag::TwoUp, &overrides);
        assert_eq!(
            groups,
            vec![
                PageGroup::Items {
                    indices: vec![0],
                    layout: LayoutTag::TwoUp,
                },
                PageGroup::Items {
                    indices: vec![1],
                    layout: LayoutTag::Single,
                },
                PageGroup::Items {
                    indices: vec![2],
                    layout: LayoutTag::TwoUp,
                },
            ]
        );
    }

    #[test]
    fn test_coverage_and_order() {
        let mut overrides = ItemOverrides::default();
        overrides.layout.insert(3, LayoutTag::Single);
        overrides.layout.insert(7, LayoutTag::TwoUp);
        overrides.layout.insert(8, LayoutTag::TwoUp);

        let groups = build_page_groups(12, LayoutTag::FourUp, &overrides);

        let flat: Vec<usize> = groups
            .iter()
            .flat_map(|g| match g {
                PageGroup::Items { indices, .. } => indices.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(flat, (0..12).collect::<Vec<_>>());

        for group in &groups {
            if let PageGroup::Items { indices, layout } = group {
                assert!(indices.len() <= layout.capacity());
            }
        }
    }
}
