mod assets;
mod capture;
mod compose;
mod io;
mod links;
#[cfg(feature = "pdfium")]
mod pdfium;
mod transform;
mod types;

pub use assets::load_images;
pub use capture::{CapturedPage, PageRender};
pub use compose::composite;
pub use io::save_pdf;
pub use links::link_annotation;
#[cfg(feature = "pdfium")]
pub use pdfium::PdfPageRender;
pub use transform::{PageTransform, fit_transform};
pub use types::*;
