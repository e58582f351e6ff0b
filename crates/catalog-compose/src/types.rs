use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("No pages to composite")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, ComposeError>;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Output paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Base dimensions (portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// A clickable rectangle in the captured bitmap's pixel space
///
/// Top-left origin, like the bitmap itself. The compositor transforms it
/// into bottom-left-origin page coordinates when it builds the annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub href: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LinkRegion {
    /// A region the compositor should skip rather than annotate
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0
            || self.height <= 0.0
            || !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// Compositing configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOptions {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    /// Upscaling factor applied at capture time, so text and link targets
    /// stay legible after the fit-to-page downscale
    pub raster_scale: f32,
    /// How many captures may be in flight at once. 1 (the default) bounds
    /// peak memory to a single full-resolution bitmap; page order in the
    /// output document is unaffected either way.
    pub capture_concurrency: usize,
    /// JPEG quality for embedded page rasters (1-100)
    pub jpeg_quality: u8,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            raster_scale: 2.0,
            capture_concurrency: 1,
            jpeg_quality: 85,
        }
    }
}

impl CompositeOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.raster_scale.is_finite() && self.raster_scale > 0.0) {
            return Err(ComposeError::Config(format!(
                "Raster scale must be positive, got {}",
                self.raster_scale
            )));
        }
        if self.capture_concurrency == 0 {
            return Err(ComposeError::Config(
                "Capture concurrency must be at least 1".to_string(),
            ));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ComposeError::Config(format!(
                "JPEG quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }

        let (w, h) = self.paper_size.dimensions_mm();
        if w <= 0.0 || h <= 0.0 {
            return Err(ComposeError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
