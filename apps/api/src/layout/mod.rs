// Document rendering: content blocks → PDF bytes → output file.
// Rendering is CPU-bound and synchronous; async callers run it inside
// tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod output;
pub mod pdf;
pub mod wrap;

use thiserror::Error;

use crate::models::document::ContentBlock;

pub use output::write_pdf;
pub use pdf::PdfRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Page geometry in PDF points (1/72 in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl Default for PageLayout {
    /// US letter, 1 in margins except a quarter-inch bottom margin.
    fn default() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_left: 72.0,
            margin_right: 72.0,
            margin_top: 72.0,
            margin_bottom: 18.0,
        }
    }
}

impl PageLayout {
    pub fn text_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Y coordinate of the top of the text area (PDF origin is bottom-left).
    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

/// Turns an ordered block sequence into a finished document.
pub trait RenderBackend: Send + Sync {
    fn render(&self, blocks: &[ContentBlock], layout: &PageLayout) -> Result<Vec<u8>, RenderError>;
}
