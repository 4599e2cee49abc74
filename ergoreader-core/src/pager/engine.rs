//! Capability traits for the PDF engine and drawable surfaces

use crate::error::DocumentError;
use async_trait::async_trait;

/// Result type for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Opens raw PDF bytes into a document
#[async_trait]
pub trait PdfEngine: Send + Sync {
    async fn open(&self, bytes: Vec<u8>) -> DocumentResult<Box<dyn PdfDocument>>;
}

/// An opened document
#[async_trait]
pub trait PdfDocument: Send + Sync {
    /// Number of pages, always at least 1 for a usable document
    fn page_count(&self) -> u32;

    /// Load a page by 1-based number
    async fn page(&self, number: u32) -> DocumentResult<Box<dyn PdfPage>>;
}

/// A single loaded page
#[async_trait]
pub trait PdfPage: Send + Sync {
    /// Display viewport at the given scale
    fn viewport(&self, scale: f32) -> Viewport;

    /// Paint the page onto a surface already sized to `viewport`
    async fn render(&self, surface: &mut dyn Surface, viewport: &Viewport) -> DocumentResult<()>;
}

/// Something a page can be painted on
pub trait Surface: Send {
    /// Resize and clear the surface
    fn resize(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Draw a run of text with its baseline origin at (x, y)
    fn draw_text(&mut self, x: f32, y: f32, text: &str);
}

/// Page dimensions in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Viewport {
    /// Scale an unscaled page size
    pub fn scaled(width: f32, height: f32, scale: f32) -> Self {
        Self {
            width: width * scale,
            height: height * scale,
            scale,
        }
    }

    /// Whole-unit surface size covering the viewport
    pub fn surface_size(&self) -> (u32, u32) {
        (self.width.ceil().max(1.0) as u32, self.height.ceil().max(1.0) as u32)
    }
}
