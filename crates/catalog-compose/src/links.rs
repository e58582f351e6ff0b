//! Link annotations over composited pages
//!
//! Regions arrive in the bitmap's top-left-origin space; PDF rectangles are
//! bottom-left-origin, so the vertical axis flips against the page height.
//! A degenerate region is skipped, never an error: one bad link must not
//! abort the page.

use lopdf::{Dictionary, Object};

use crate::transform::PageTransform;
use crate::types::LinkRegion;

/// Build a `/Link` annotation dictionary for a region, or `None` to skip it
pub fn link_annotation(
    region: &LinkRegion,
    transform: &PageTransform,
    page_height: f32,
) -> Option<Dictionary> {
    if region.is_degenerate() {
        return None;
    }

    let (x, top, width, height) = transform.place_region(region);

    // Flip from top-left raster space to bottom-left page space
    let x1 = x;
    let y1 = page_height - (top + height);
    let x2 = x + width;
    let y2 = page_height - top;

    if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
        return None;
    }

    let mut action = Dictionary::new();
    action.set("S", Object::Name(b"URI".to_vec()));
    action.set("URI", Object::string_literal(region.href.as_str()));

    let mut annotation = Dictionary::new();
    annotation.set("Type", Object::Name(b"Annot".to_vec()));
    annotation.set("Subtype", Object::Name(b"Link".to_vec()));
    annotation.set(
        "Rect",
        Object::Array(vec![
            Object::Real(x1),
            Object::Real(y1),
            Object::Real(x2),
            Object::Real(y2),
        ]),
    );
    annotation.set(
        "Border",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
        ]),
    );
    annotation.set("A", Object::Dictionary(action));

    Some(annotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::fit_transform;

    fn rect_of(annotation: &Dictionary) -> Vec<f32> {
        annotation
            .get(b"Rect")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|obj| match obj {
                Object::Integer(i) => *i as f32,
                Object::Real(r) => *r,
                other => panic!("Unexpected rect entry: {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_vertical_flip() {
        // Identity scale: bitmap and page are both 400x500.
        let transform = fit_transform(400, 500, 400.0, 500.0);
        let region = LinkRegion {
            href: "https://example.com".to_string(),
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 30.0,
        };

        let annotation = link_annotation(&region, &transform, 500.0).unwrap();
        let rect = rect_of(&annotation);

        assert!((rect[0] - 10.0).abs() < 1e-3);
        assert!((rect[1] - 450.0).abs() < 1e-3); // 500 - (20 + 30)
        assert!((rect[2] - 110.0).abs() < 1e-3);
        assert!((rect[3] - 480.0).abs() < 1e-3); // 500 - 20
    }

    #[test]
    fn test_zero_size_region_is_skipped() {
        let transform = fit_transform(400, 500, 400.0, 500.0);
        for (width, height) in [(0.0, 30.0), (100.0, 0.0)] {
            let region = LinkRegion {
                href: "https://example.com".to_string(),
                x: 10.0,
                y: 20.0,
                width,
                height,
            };
            assert!(link_annotation(&region, &transform, 500.0).is_none());
        }
    }

    #[test]
    fn test_uri_action() {
        let transform = fit_transform(400, 500, 400.0, 500.0);
        let region = LinkRegion {
            href: "https://example.com/shop".to_string(),
            x: 0.0,
            y: 0.0,
            width: 50.0,
            height: 50.0,
        };

        let annotation = link_annotation(&region, &transform, 500.0).unwrap();
        let action = annotation.get(b"A").unwrap().as_dict().unwrap();
        assert_eq!(action.get(b"S").unwrap().as_name().unwrap(), b"URI");
        assert_eq!(
            action.get(b"URI").unwrap().as_str().unwrap(),
            b"https://example.com/shop"
        );
    }
}
