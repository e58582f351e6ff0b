use catalog_compose::*;
use image::RgbaImage;
use lopdf::{Document, Object};

/// Stub page: solid colour bitmap with optional links, or a forced failure
struct StubPage {
    width: u32,
    height: u32,
    links: Vec<LinkRegion>,
    fail: bool,
}

impl StubPage {
    fn plain(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            links: Vec::new(),
            fail: false,
        }
    }

    fn with_links(width: u32, height: u32, links: Vec<LinkRegion>) -> Self {
        Self {
            width,
            height,
            links,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            width: 1,
            height: 1,
            links: Vec::new(),
            fail: true,
        }
    }
}

impl PageRender for StubPage {
    fn describe(&self) -> String {
        "stub page".to_string()
    }

    fn capture(&self, raster_scale: f32) -> Result<CapturedPage> {
        if self.fail {
            return Err(ComposeError::Render("stub capture failure".to_string()));
        }

        let width = (self.width as f32 * raster_scale) as u32;
        let height = (self.height as f32 * raster_scale) as u32;
        let links = self
            .links
            .iter()
            .map(|link| LinkRegion {
                href: link.href.clone(),
                x: link.x * raster_scale,
                y: link.y * raster_scale,
                width: link.width * raster_scale,
                height: link.height * raster_scale,
            })
            .collect();

        Ok(CapturedPage {
            image: RgbaImage::from_pixel(width, height, image::Rgba([240, 240, 240, 255])),
            links,
        })
    }
}

fn region(href: &str, x: f32, y: f32, width: f32, height: f32) -> LinkRegion {
    LinkRegion {
        href: href.to_string(),
        x,
        y,
        width,
        height,
    }
}

fn page_annotations(doc: &Document, page_number: u32) -> Vec<Object> {
    let pages = doc.get_pages();
    let page_id = pages[&page_number];
    let page_dict = doc.get_dictionary(page_id).unwrap();
    match page_dict.get(b"Annots") {
        Ok(Object::Array(annots)) => annots.clone(),
        _ => Vec::new(),
    }
}

#[tokio::test]
async fn test_composite_empty_fails() {
    let result = composite(Vec::new(), &CompositeOptions::default()).await;
    assert!(matches!(result, Err(ComposeError::NoPages)));
}

#[tokio::test]
async fn test_composite_page_count_and_order() {
    let pages: Vec<Box<dyn PageRender>> = (0..5)
        .map(|_| Box::new(StubPage::plain(320, 440)) as Box<dyn PageRender>)
        .collect();

    let output = composite(pages, &CompositeOptions::default()).await.unwrap();
    assert_eq!(output.get_pages().len(), 5);
}

#[tokio::test]
async fn test_composite_parallel_capture_keeps_order() {
    let mut pages: Vec<Box<dyn PageRender>> = Vec::new();
    for i in 0..6u32 {
        // Distinct widths so page order is observable in the output
        pages.push(Box::new(StubPage::plain(100 + i * 10, 400)));
    }

    let options = CompositeOptions {
        capture_concurrency: 4,
        raster_scale: 1.0,
        ..Default::default()
    };
    let output = composite(pages, &options).await.unwrap();
    assert_eq!(output.get_pages().len(), 6);
}

#[tokio::test]
async fn test_composite_fails_fatally_on_capture_error() {
    let pages: Vec<Box<dyn PageRender>> = vec![
        Box::new(StubPage::plain(320, 440)),
        Box::new(StubPage::failing()),
        Box::new(StubPage::plain(320, 440)),
    ];

    let result = composite(pages, &CompositeOptions::default()).await;
    assert!(matches!(result, Err(ComposeError::Render(_))));
}

#[tokio::test]
async fn test_links_survive_compositing() {
    let pages: Vec<Box<dyn PageRender>> = vec![Box::new(StubPage::with_links(
        400,
        500,
        vec![
            region("https://example.com/a", 10.0, 20.0, 100.0, 30.0),
            region("https://example.com/zero", 0.0, 0.0, 0.0, 10.0),
        ],
    ))];

    let options = CompositeOptions {
        raster_scale: 2.0,
        ..Default::default()
    };
    let output = composite(pages, &options).await.unwrap();

    // The zero-width region must be dropped, the real one kept.
    let annotations = page_annotations(&output, 1);
    assert_eq!(annotations.len(), 1);

    let Some(Object::Reference(id)) = annotations.first() else {
        panic!("annotation should be a reference");
    };
    let annotation = output.get_dictionary(*id).unwrap();
    assert_eq!(
        annotation.get(b"Subtype").unwrap().as_name().unwrap(),
        b"Link"
    );

    let action = annotation.get(b"A").unwrap().as_dict().unwrap();
    assert_eq!(
        action.get(b"URI").unwrap().as_str().unwrap(),
        b"https://example.com/a"
    );
}

#[tokio::test]
async fn test_link_geometry_scales_with_fit() {
    // Bitmap 800x1200 (after raster_scale 1.0) onto A4 portrait.
    let link = region("https://example.com", 100.0, 100.0, 200.0, 50.0);
    let pages: Vec<Box<dyn PageRender>> =
        vec![Box::new(StubPage::with_links(800, 1200, vec![link.clone()]))];

    let options = CompositeOptions {
        raster_scale: 1.0,
        ..Default::default()
    };
    let output = composite(pages, &options).await.unwrap();

    let (page_w_mm, page_h_mm) = PaperSize::A4.dimensions_mm();
    let page_w = mm_to_pt(page_w_mm);
    let page_h = mm_to_pt(page_h_mm);
    let transform = fit_transform(800, 1200, page_w, page_h);

    let annotations = page_annotations(&output, 1);
    let Some(Object::Reference(id)) = annotations.first() else {
        panic!("annotation should be a reference");
    };
    let rect: Vec<f32> = output
        .get_dictionary(*id)
        .unwrap()
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
        .collect();

    let width = rect[2] - rect[0];
    let height = rect[3] - rect[1];
    assert!((width / link.width - transform.scale).abs() < 1e-4);
    assert!((height / link.height - transform.scale).abs() < 1e-4);
    assert!((rect[0] - (transform.x_offset + link.x * transform.scale)).abs() < 1e-3);
    // Vertical flip: the rect's top edge sits scale*y below the page top
    assert!((page_h - rect[3] - (transform.y_offset + link.y * transform.scale)).abs() < 1e-3);
}

#[tokio::test]
async fn test_save_composited_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let pages: Vec<Box<dyn PageRender>> = vec![Box::new(StubPage::plain(320, 440))];
    let output = composite(pages, &CompositeOptions::default()).await.unwrap();
    save_pdf(output, &path).await.unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
}

#[test]
fn test_options_validation() {
    let mut options = CompositeOptions::default();
    assert!(options.validate().is_ok());

    options.raster_scale = 0.0;
    assert!(options.validate().is_err());

    options.raster_scale = 2.0;
    options.capture_concurrency = 0;
    assert!(options.validate().is_err());

    options.capture_concurrency = 1;
    options.jpeg_quality = 0;
    assert!(options.validate().is_err());
}
