//! Fit-within placement of a captured bitmap on the output page
//!
//! The bitmap is scaled by the smaller of the two axis ratios (never
//! cropped, aspect ratio preserved) and centered. The same transform maps
//! link regions from bitmap space onto the page.

use crate::types::LinkRegion;

/// The affine placement of one bitmap on one output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    /// Bitmap-space -> page-space scale factor
    pub scale: f32,
    /// Left edge of the placed bitmap
    pub x_offset: f32,
    /// Offset of the placed bitmap from either horizontal page edge
    /// (centered, so top-left and bottom-left measures agree)
    pub y_offset: f32,
    /// Placed width in page units
    pub render_width: f32,
    /// Placed height in page units
    pub render_height: f32,
}

/// Compute the fit-within transform for a bitmap onto an output page
pub fn fit_transform(
    bitmap_width: u32,
    bitmap_height: u32,
    page_width: f32,
    page_height: f32,
) -> PageTransform {
    let bitmap_width = bitmap_width as f32;
    let bitmap_height = bitmap_height as f32;

    let mut scale = page_width / bitmap_width;
    if bitmap_height * scale > page_height {
        scale = page_height / bitmap_height;
    }

    let render_width = bitmap_width * scale;
    let render_height = bitmap_height * scale;

    PageTransform {
        scale,
        x_offset: (page_width - render_width) / 2.0,
        y_offset: (page_height - render_height) / 2.0,
        render_width,
        render_height,
    }
}

impl PageTransform {
    /// Map a bitmap-space link region into page space (still top-left origin)
    ///
    /// Returns `(x, y, width, height)` with `y` measured from the page top.
    pub fn place_region(&self, region: &LinkRegion) -> (f32, f32, f32, f32) {
        (
            self.x_offset + region.x * self.scale,
            self.y_offset + region.y * self.scale,
            region.width * self.scale,
            region.height * self.scale,
        )
    }
}
