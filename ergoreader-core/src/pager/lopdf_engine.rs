//! Pure-Rust PDF engine built on `lopdf`
//!
//! Pages are "rendered" as their extracted text, laid out top to bottom in
//! the page's viewport. That is enough to read uploaded documents from a
//! terminal without a rasterizer.

use super::engine::{DocumentResult, PdfDocument, PdfEngine, PdfPage, Surface, Viewport};
use crate::error::DocumentError;
use async_trait::async_trait;
use lopdf::{Document, Object, ObjectId};
use std::sync::Arc;

/// US Letter in points, used when a page declares no MediaBox
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Page margin in points
const MARGIN: f32 = 36.0;

/// Line advance in points
const LINE_HEIGHT: f32 = 14.0;

/// Parent hops followed when resolving an inherited MediaBox
const MAX_INHERIT_DEPTH: usize = 32;

/// Engine backed by `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfEngine;

impl LopdfEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PdfEngine for LopdfEngine {
    async fn open(&self, bytes: Vec<u8>) -> DocumentResult<Box<dyn PdfDocument>> {
        let document = tokio::task::spawn_blocking(move || Document::load_mem(&bytes))
            .await
            .map_err(|e| DocumentError::Decode(e.to_string()))?
            .map_err(|e| DocumentError::Decode(e.to_string()))?;

        let pages: Vec<(u32, ObjectId)> = document.get_pages().into_iter().collect();
        if pages.is_empty() {
            return Err(DocumentError::Decode("document has no pages".to_string()));
        }

        Ok(Box::new(LopdfDocument {
            document: Arc::new(document),
            pages,
        }))
    }
}

struct LopdfDocument {
    document: Arc<Document>,
    /// Page numbers and object ids in page order
    pages: Vec<(u32, ObjectId)>,
}

#[async_trait]
impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    async fn page(&self, number: u32) -> DocumentResult<Box<dyn PdfPage>> {
        let index = number
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|&i| i < self.pages.len())
            .ok_or(DocumentError::PageOutOfRange {
                page: number,
                count: self.page_count(),
            })?;
        let (page_number, page_id) = self.pages[index];
        let (width, height) = media_box(&self.document, page_id).unwrap_or(DEFAULT_PAGE_SIZE);

        Ok(Box::new(LopdfPage {
            document: Arc::clone(&self.document),
            page_number,
            width,
            height,
        }))
    }
}

struct LopdfPage {
    document: Arc<Document>,
    page_number: u32,
    width: f32,
    height: f32,
}

#[async_trait]
impl PdfPage for LopdfPage {
    fn viewport(&self, scale: f32) -> Viewport {
        Viewport::scaled(self.width, self.height, scale)
    }

    async fn render(&self, surface: &mut dyn Surface, viewport: &Viewport) -> DocumentResult<()> {
        let document = Arc::clone(&self.document);
        let page_number = self.page_number;
        let text = tokio::task::spawn_blocking(move || document.extract_text(&[page_number]))
            .await
            .map_err(|e| DocumentError::Render(e.to_string()))?
            .map_err(|e| DocumentError::Render(e.to_string()))?;

        let x = MARGIN * viewport.scale;
        let mut y = MARGIN * viewport.scale;
        for line in text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
            if y > viewport.height {
                break;
            }
            surface.draw_text(x, y, line.trim_start());
            y += LINE_HEIGHT * viewport.scale;
        }
        Ok(())
    }
}

/// Width and height of a page's MediaBox, following inheritance from the
/// page tree
fn media_box(document: &Document, page_id: ObjectId) -> Option<(f32, f32)> {
    let mut current = Some(page_id);

    for _ in 0..MAX_INHERIT_DEPTH {
        let dict = document.get_dictionary(current?).ok()?;
        if let Ok(object) = dict.get(b"MediaBox") {
            return rect_size(document, object);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn rect_size(document: &Document, object: &Object) -> Option<(f32, f32)> {
    let object = match object {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    let coords: Vec<f32> = object
        .as_array()
        .ok()?
        .iter()
        .filter_map(|o| o.as_float().ok())
        .collect();

    match coords.as_slice() {
        [x0, y0, x1, y1] => {
            let (width, height) = ((x1 - x0).abs(), (y1 - y0).abs());
            (width > 0.0 && height > 0.0).then_some((width, height))
        }
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream};

    /// Build a small PDF with `pages` pages of A4 inherited from the page tree
    pub(crate) fn sample_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for n in 0..pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("Page {}", n + 1))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_open_reports_page_count() {
        let document = LopdfEngine::new().open(sample_pdf(3)).await.unwrap();
        assert_eq!(document.page_count(), 3);
    }

    #[tokio::test]
    async fn test_inherited_media_box() {
        let document = LopdfEngine::new().open(sample_pdf(1)).await.unwrap();
        let page = document.page(1).await.unwrap();
        assert_eq!(page.viewport(1.0), Viewport::scaled(595.0, 842.0, 1.0));
        assert_eq!(page.viewport(1.5).surface_size(), (893, 1263));
    }

    #[tokio::test]
    async fn test_page_out_of_range() {
        let document = LopdfEngine::new().open(sample_pdf(2)).await.unwrap();
        assert!(matches!(
            document.page(0).await,
            Err(DocumentError::PageOutOfRange { page: 0, count: 2 })
        ));
        assert!(matches!(
            document.page(3).await,
            Err(DocumentError::PageOutOfRange { page: 3, count: 2 })
        ));
    }

    #[tokio::test]
    async fn test_open_rejects_garbage() {
        let result = LopdfEngine::new().open(b"definitely not a pdf".to_vec()).await;
        assert!(matches!(result, Err(DocumentError::Decode(_))));
    }
}
