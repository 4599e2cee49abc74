//! Pagination controller for uploaded documents
//!
//! One controller drives one document at a time. Page changes only touch
//! state; the caller renders once the new page has settled, so renders never
//! overlap.

mod engine;
mod lopdf_engine;
mod surface;

pub use engine::{DocumentResult, PdfDocument, PdfEngine, PdfPage, Surface, Viewport};
pub use lopdf_engine::LopdfEngine;
pub use surface::{TextRun, TextSurface};

use crate::error::DocumentError;
use crate::types::Book;
use crate::upload::decode_document;
use std::sync::Arc;

/// Fixed display scale for rendered pages
pub const RENDER_SCALE: f32 = 1.5;

pub const MISSING_DOCUMENT_MESSAGE: &str = "No PDF data found for this book.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load PDF. The file may be invalid or corrupted.";
pub const RENDER_FAILED_MESSAGE: &str = "Failed to render the page. The PDF might be corrupted.";

/// Observable controller state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerState {
    Unloaded,
    Loading,
    Ready { page: u32, page_count: u32 },
    Failed { reason: String },
}

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Unloaded,
    Loading,
    Ready,
    Failed(String),
}

/// Per-document page state
pub struct PageController {
    engine: Arc<dyn PdfEngine>,
    document: Option<Box<dyn PdfDocument>>,
    phase: Phase,
    page: u32,
    page_count: u32,
}

impl PageController {
    pub fn new(engine: Arc<dyn PdfEngine>) -> Self {
        Self {
            engine,
            document: None,
            phase: Phase::Unloaded,
            page: 1,
            page_count: 0,
        }
    }

    pub fn state(&self) -> PagerState {
        match &self.phase {
            Phase::Unloaded => PagerState::Unloaded,
            Phase::Loading => PagerState::Loading,
            Phase::Ready => PagerState::Ready {
                page: self.page,
                page_count: self.page_count,
            },
            Phase::Failed(reason) => PagerState::Failed {
                reason: reason.clone(),
            },
        }
    }

    /// Current 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Open the document carried by a user record
    ///
    /// Any previous document is dropped. Failures end in
    /// [`PagerState::Failed`]; there is no retry until the next activation.
    pub async fn activate(&mut self, book: &Book) -> PagerState {
        self.document = None;
        self.page = 1;
        self.page_count = 0;
        self.phase = Phase::Loading;

        let Some(data) = book.document_data() else {
            tracing::warn!("Book {} has no document payload", book.id);
            self.phase = Phase::Failed(MISSING_DOCUMENT_MESSAGE.to_string());
            return self.state();
        };

        match self.open(data).await {
            Ok(document) => {
                self.page_count = document.page_count();
                self.document = Some(document);
                self.phase = Phase::Ready;
                tracing::info!("Opened '{}' with {} pages", book.title, self.page_count);
            }
            Err(e) => {
                tracing::warn!("Error during PDF loading for {}: {}", book.id, e);
                self.phase = Phase::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
        self.state()
    }

    async fn open(&self, data: &str) -> Result<Box<dyn PdfDocument>, DocumentError> {
        let bytes = decode_document(data)?;
        let document = self.engine.open(bytes).await?;
        if document.page_count() == 0 {
            return Err(DocumentError::Decode("document has no pages".to_string()));
        }
        Ok(document)
    }

    /// Paint the current page onto `surface`
    ///
    /// Does nothing unless a document is ready. A failed render moves the
    /// controller to [`PagerState::Failed`] but keeps the page number.
    pub async fn render_current(&mut self, surface: &mut dyn Surface) -> Result<(), DocumentError> {
        if !self.is_ready() {
            tracing::debug!("No document ready, skipping render");
            return Ok(());
        }
        let Some(document) = self.document.as_ref() else {
            return Ok(());
        };

        let result = render_page(document.as_ref(), self.page, surface).await;
        if let Err(e) = &result {
            tracing::warn!("Error rendering page {}: {}", self.page, e);
            self.phase = Phase::Failed(RENDER_FAILED_MESSAGE.to_string());
        }
        result
    }

    /// Advance one page; returns whether the page changed
    pub fn next(&mut self) -> bool {
        if !self.is_ready() || self.page >= self.page_count {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page; returns whether the page changed
    pub fn previous(&mut self) -> bool {
        if !self.is_ready() || self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Map directional input to navigation
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        match key {
            NavKey::Left => self.previous(),
            NavKey::Right => self.next(),
            NavKey::Other => false,
        }
    }
}

async fn render_page(
    document: &dyn PdfDocument,
    number: u32,
    surface: &mut dyn Surface,
) -> Result<(), DocumentError> {
    let page = document.page(number).await?;
    let viewport = page.viewport(RENDER_SCALE);
    let (width, height) = viewport.surface_size();
    surface.resize(width, height);
    page.render(surface, &viewport).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::encode_document;

    #[tokio::test]
    async fn test_activate_with_lopdf() {
        let book = Book::user("u1", "sample", "Uploaded File", encode_document(&lopdf_engine::tests::sample_pdf(2)));
        let mut controller = PageController::new(Arc::new(LopdfEngine::new()));
        assert_eq!(controller.state(), PagerState::Unloaded);

        let state = controller.activate(&book).await;
        assert_eq!(state, PagerState::Ready { page: 1, page_count: 2 });
    }

    #[tokio::test]
    async fn test_activate_remote_book_fails() {
        let book = Book::remote("r1", "T", "A", "C", "S", "P");
        let mut controller = PageController::new(Arc::new(LopdfEngine::new()));

        let state = controller.activate(&book).await;
        assert_eq!(
            state,
            PagerState::Failed {
                reason: MISSING_DOCUMENT_MESSAGE.to_string()
            }
        );
        assert!(!controller.next());
    }

    #[tokio::test]
    async fn test_activate_bad_payload_fails() {
        let mut controller = PageController::new(Arc::new(LopdfEngine::new()));

        let state = controller.activate(&Book::user("u1", "t", "a", "!!!")).await;
        assert_eq!(
            state,
            PagerState::Failed {
                reason: LOAD_FAILED_MESSAGE.to_string()
            }
        );

        let not_pdf = encode_document(b"plain text");
        let state = controller.activate(&Book::user("u2", "t", "a", not_pdf)).await;
        assert!(matches!(state, PagerState::Failed { .. }));
    }

    #[tokio::test]
    async fn test_render_pages_with_lopdf() {
        let book = Book::user("u1", "sample", "Uploaded File", encode_document(&lopdf_engine::tests::sample_pdf(2)));
        let mut controller = PageController::new(Arc::new(LopdfEngine::new()));
        controller.activate(&book).await;

        let mut surface = TextSurface::new();
        controller.render_current(&mut surface).await.unwrap();
        assert_eq!(controller.state(), PagerState::Ready { page: 1, page_count: 2 });
        assert_eq!(surface.size(), (893, 1263));
        assert_eq!(surface.text(), "Page 1");

        assert!(controller.next());
        controller.render_current(&mut surface).await.unwrap();
        assert_eq!(surface.text(), "Page 2");
    }
}
