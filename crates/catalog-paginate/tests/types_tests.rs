use catalog_paginate::*;
use std::str::FromStr;

#[test]
fn test_layout_capacities() {
    assert_eq!(LayoutTag::Single.capacity(), 1);
    assert_eq!(LayoutTag::TwoUp.capacity(), 2);
    assert_eq!(LayoutTag::FourUp.capacity(), 4);
    assert_eq!(LayoutTag::EightUp.capacity(), 8);
}

#[test]
fn test_grid_matches_capacity() {
    for tag in [
        LayoutTag::Single,
        LayoutTag::TwoUp,
        LayoutTag::FourUp,
        LayoutTag::EightUp,
    ] {
        let (cols, rows) = tag.grid_dimensions();
        assert_eq!(cols * rows, tag.capacity(), "grid mismatch for {:?}", tag);
    }
}

#[test]
fn test_layout_tag_parse_round_trip() {
    for tag in [
        LayoutTag::Single,
        LayoutTag::TwoUp,
        LayoutTag::FourUp,
        LayoutTag::EightUp,
    ] {
        assert_eq!(LayoutTag::from_str(tag.name()).unwrap(), tag);
    }
}

#[test]
fn test_unknown_layout_tag_fails() {
    let result = LayoutTag::from_str("sixteen-up");
    match result {
        Err(PaginateError::InvalidLayoutTag(tag)) => assert_eq!(tag, "sixteen-up"),
        other => panic!("Expected InvalidLayoutTag, got {:?}", other),
    }
}

#[test]
fn test_page_group_item_count() {
    let items = PageGroup::Items {
        indices: vec![3, 4, 5],
        layout: LayoutTag::FourUp,
    };
    assert_eq!(items.item_count(), 3);
    assert!(!items.is_synthetic());

    assert_eq!(PageGroup::Summary.item_count(), 0);
    assert!(PageGroup::Summary.is_synthetic());
}
