//! Pdfium-backed page source
//!
//! Rasterizes one page of an existing PDF so externally produced documents
//! can be composited into a catalogue export. Pdfium handles are not Send,
//! so the document is reopened per capture on the blocking pool rather than
//! held across await points.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::capture::{CapturedPage, PageRender};
use crate::types::{ComposeError, Result};

/// Initialize Pdfium, trying the vendored library first, then falling back
/// to the system library
fn init_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

fn pdfium_error(e: PdfiumError) -> ComposeError {
    ComposeError::Render(format!("pdfium: {}", e))
}

/// One page of a PDF file, rasterized on demand
pub struct PdfPageRender {
    path: PathBuf,
    page_index: u16,
}

impl PdfPageRender {
    pub fn new(path: impl AsRef<Path>, page_index: u16) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            page_index,
        }
    }

    /// Number of pages in a PDF file
    pub fn page_count(path: impl AsRef<Path>) -> Result<u16> {
        let pdfium = init_pdfium().map_err(pdfium_error)?;
        let document = pdfium
            .load_pdf_from_file(path.as_ref(), None)
            .map_err(pdfium_error)?;
        Ok(document.pages().len())
    }
}

impl PageRender for PdfPageRender {
    fn describe(&self) -> String {
        format!("pdf page {} of {}", self.page_index + 1, self.path.display())
    }

    fn capture(&self, raster_scale: f32) -> Result<CapturedPage> {
        let pdfium = init_pdfium().map_err(pdfium_error)?;
        let document = pdfium
            .load_pdf_from_file(&self.path, None)
            .map_err(pdfium_error)?;
        let page = document
            .pages()
            .get(self.page_index)
            .map_err(pdfium_error)?;

        let target_width = (page.width().value * raster_scale).round().max(1.0) as i32;
        let config = PdfRenderConfig::new().set_target_width(target_width);
        let bitmap = page.render_with_config(&config).map_err(pdfium_error)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let image = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
            .ok_or_else(|| {
                ComposeError::Render("pdfium returned a malformed bitmap".to_string())
            })?;

        Ok(CapturedPage {
            image,
            links: Vec::new(),
        })
    }
}
