//! Page capture contract
//!
//! The compositor never renders content itself; it asks each logical page to
//! capture into a bitmap. Whoever implements `PageRender` (the item-block
//! renderer, the pdfium adapter, a test stub) owns the drawing and reports
//! the clickable regions it drew, in the bitmap's own pixel space.

use image::RgbaImage;

use crate::types::{LinkRegion, Result};

/// One captured logical page: the raster plus the links drawn on it
#[derive(Debug, Clone)]
pub struct CapturedPage {
    pub image: RgbaImage,
    pub links: Vec<LinkRegion>,
}

/// A logical page the compositor can rasterize
///
/// `capture` runs on the blocking pool and is expected to be CPU-heavy.
/// A capture failure is fatal to the whole composite; there is no partial
/// output document.
pub trait PageRender: Send + Sync {
    /// Short human-readable description for diagnostics
    fn describe(&self) -> String;

    /// Rasterize at the given upscaling factor
    ///
    /// Link regions must be reported at the same scale as the returned
    /// bitmap.
    fn capture(&self, raster_scale: f32) -> Result<CapturedPage>;
}
