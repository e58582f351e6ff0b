//! Raster compositing - merging captured pages into one output document
//!
//! Captures are CPU- and memory-heavy (full-resolution bitmaps), so they run
//! through an ordered queue: at most `capture_concurrency` captures are in
//! flight, and pages are composited strictly in original order as each
//! capture completes. Any capture failure aborts the whole run; a partial
//! document is never returned.

use std::collections::VecDeque;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::capture::{CapturedPage, PageRender};
use crate::links::link_annotation;
use crate::transform::fit_transform;
use crate::types::*;

/// Composite captured pages into a single PDF with live links
pub async fn composite(
    pages: Vec<Box<dyn PageRender>>,
    options: &CompositeOptions,
) -> Result<Document> {
    options.validate()?;

    if pages.is_empty() {
        return Err(ComposeError::NoPages);
    }

    let (page_width_mm, page_height_mm) = options
        .paper_size
        .dimensions_with_orientation(options.orientation);
    let page_width_pt = mm_to_pt(page_width_mm);
    let page_height_pt = mm_to_pt(page_height_mm);

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();

    let limit = options.capture_concurrency;
    let raster_scale = options.raster_scale;
    let mut source = pages.into_iter().enumerate();
    let mut in_flight: VecDeque<(usize, tokio::task::JoinHandle<Result<CapturedPage>>)> =
        VecDeque::new();

    loop {
        while in_flight.len() < limit {
            let Some((index, page)) = source.next() else {
                break;
            };
            log::debug!("Capturing page {} ({})", index + 1, page.describe());
            in_flight.push_back((
                index,
                tokio::task::spawn_blocking(move || page.capture(raster_scale)),
            ));
        }

        let Some((index, handle)) = in_flight.pop_front() else {
            break;
        };
        let captured = handle.await??;

        let page_id = append_page(
            &mut output,
            pages_tree_id,
            &captured,
            page_width_pt,
            page_height_pt,
            options.jpeg_quality,
        )
        .map_err(|e| match e {
            ComposeError::Render(msg) => {
                ComposeError::Render(format!("page {}: {}", index + 1, msg))
            }
            other => other,
        })?;
        page_refs.push(Object::Reference(page_id));
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Place one captured page into the output document
fn append_page(
    output: &mut Document,
    parent_pages_id: ObjectId,
    captured: &CapturedPage,
    page_width_pt: f32,
    page_height_pt: f32,
    jpeg_quality: u8,
) -> Result<ObjectId> {
    let (bitmap_width, bitmap_height) = captured.image.dimensions();
    if bitmap_width == 0 || bitmap_height == 0 {
        return Err(ComposeError::Render(
            "captured bitmap has zero size".to_string(),
        ));
    }

    let transform = fit_transform(bitmap_width, bitmap_height, page_width_pt, page_height_pt);

    let image_id = add_image_xobject(output, captured, jpeg_quality)?;
    let mut xobjects = Dictionary::new();
    xobjects.set("Im0", Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    // Image space is the unit square: scale by the placed size
    let content = format!(
        "q {} 0 0 {} {} {} cm /Im0 Do Q\n",
        transform.render_width, transform.render_height, transform.x_offset, transform.y_offset
    );
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut annotations = Vec::new();
    for region in &captured.links {
        match link_annotation(region, &transform, page_height_pt) {
            Some(annotation) => {
                annotations.push(Object::Reference(output.add_object(annotation)));
            }
            None => {
                log::warn!("Skipping degenerate link region for {}", region.href);
            }
        }
    }

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_width_pt),
            Object::Real(page_height_pt),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));
    if !annotations.is_empty() {
        page_dict.set("Annots", Object::Array(annotations));
    }

    Ok(output.add_object(page_dict))
}

/// Embed a captured bitmap as a DCTDecode image XObject
fn add_image_xobject(
    output: &mut Document,
    captured: &CapturedPage,
    jpeg_quality: u8,
) -> Result<ObjectId> {
    let (width, height) = captured.image.dimensions();

    let rgb = image::DynamicImage::ImageRgba8(captured.image.clone()).to_rgb8();
    let mut jpeg = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, jpeg_quality)
        .encode_image(&rgb)?;

    let mut image_dict = Dictionary::new();
    image_dict.set("Type", Object::Name(b"XObject".to_vec()));
    image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
    image_dict.set("Width", Object::Integer(width as i64));
    image_dict.set("Height", Object::Integer(height as i64));
    image_dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    image_dict.set("BitsPerComponent", Object::Integer(8));
    image_dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));

    // JPEG data is already compressed; recompressing the stream corrupts it
    Ok(output.add_object(Stream {
        dict: image_dict,
        content: jpeg,
        allows_compression: false,
        start_position: None,
    }))
}
