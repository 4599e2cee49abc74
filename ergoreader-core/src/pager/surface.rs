//! In-memory text surface

use super::engine::Surface;

/// A positioned run of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Surface that records text runs, used to show pages in a terminal
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    width: u32,
    height: u32,
    runs: Vec<TextRun>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Painted text, top to bottom, one run per line
    pub fn text(&self) -> String {
        let mut runs: Vec<&TextRun> = self.runs.iter().collect();
        runs.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
        runs.iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Surface for TextSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.runs.clear();
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.runs.push(TextRun {
            x,
            y,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_surface() {
        let mut surface = TextSurface::new();
        surface.draw_text(0.0, 10.0, "stale");
        surface.resize(100, 200);
        assert_eq!(surface.size(), (100, 200));
        assert!(surface.runs().is_empty());

        surface.draw_text(10.0, 40.0, "second");
        surface.draw_text(10.0, 20.0, "first");
        assert_eq!(surface.text(), "first\nsecond");
    }
}
