//! PDF render backend on top of `lopdf`.
//!
//! Uses the built-in Type1 Helvetica faces with WinAnsiEncoding, so nothing is
//! embedded. Content streams are left uncompressed.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

use crate::layout::font_metrics::FontFace;
use crate::layout::wrap::wrap_text;
use crate::layout::{PageLayout, RenderBackend, RenderError};
use crate::models::document::{ContentBlock, HeadingLevel};

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Rgb(f32, f32, f32);

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const DARK_BLUE: Rgb = Rgb(0.0, 0.0, 0.545);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    face: FontFace,
    size: f32,
    color: Rgb,
    align: Align,
    indent: f32,
    space_before: f32,
    space_after: f32,
}

impl TextStyle {
    fn leading(&self) -> f32 {
        self.size * 1.2
    }
}

const NAME_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size: 18.0,
    color: DARK_BLUE,
    align: Align::Center,
    indent: 0.0,
    space_before: 0.0,
    space_after: 6.0,
};

const CONTACT_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size: 10.0,
    color: BLACK,
    align: Align::Center,
    indent: 0.0,
    space_before: 0.0,
    space_after: 12.0,
};

const SECTION_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size: 12.0,
    color: DARK_BLUE,
    align: Align::Left,
    indent: 0.0,
    space_before: 12.0,
    space_after: 6.0,
};

const JOB_TITLE_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaBold,
    size: 11.0,
    color: BLACK,
    align: Align::Left,
    indent: 0.0,
    space_before: 0.0,
    space_after: 2.0,
};

const DATES_STYLE: TextStyle = TextStyle {
    face: FontFace::HelveticaOblique,
    size: 10.0,
    color: BLACK,
    align: Align::Left,
    indent: 20.0,
    space_before: 0.0,
    space_after: 4.0,
};

const BODY_STYLE: TextStyle = TextStyle {
    face: FontFace::Helvetica,
    size: 10.0,
    color: BLACK,
    align: Align::Left,
    indent: 20.0,
    space_before: 0.0,
    space_after: 6.0,
};

/// Gap between the header block (name + contact) and the first section.
const HEADER_GAP: f32 = 12.0;
const JOB_ENTRY_GAP: f32 = 8.0;
const EDUCATION_GAP: f32 = 6.0;

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

/// Lays lines top to bottom, starting a new page when the next line would cross
/// the bottom margin.
struct PageWriter<'a> {
    layout: &'a PageLayout,
    finished: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor_y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            finished: Vec::new(),
            ops: Vec::new(),
            cursor_y: layout.content_top(),
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y >= self.layout.content_top()
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.ops));
        self.cursor_y = self.layout.content_top();
    }

    /// Vertical gap; swallowed at the top of a page.
    fn skip(&mut self, gap: f32) {
        if !self.at_page_top() {
            self.cursor_y -= gap;
        }
    }

    fn line(&mut self, text: &str, style: &TextStyle) {
        let leading = style.leading();
        if self.cursor_y - leading < self.layout.margin_bottom && !self.at_page_top() {
            self.new_page();
        }

        let baseline = self.cursor_y - style.size;
        let x = match style.align {
            Align::Left => self.layout.margin_left + style.indent,
            Align::Center => {
                let width = style.face.metrics().measure_pt(text, style.size);
                self.layout.margin_left + ((self.layout.text_width() - width).max(0.0) / 2.0)
            }
        };
        let Rgb(r, g, b) = style.color;

        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![style.face.resource_name().into(), style.size.into()]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
        self.cursor_y -= leading;
    }

    fn paragraph(&mut self, text: &str, style: &TextStyle) {
        self.skip(style.space_before);
        let width = self.layout.text_width() - style.indent;
        for line in wrap_text(text, style.face.metrics(), style.size, width) {
            self.line(&line, style);
        }
        self.skip(style.space_after);
    }

    fn block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Heading {
                text,
                level: HeadingLevel::Name,
            } => self.paragraph(text, &NAME_STYLE),
            ContentBlock::Heading {
                text,
                level: HeadingLevel::Section,
            } => self.paragraph(text, &SECTION_STYLE),
            ContentBlock::ContactLine { .. } => {
                if let Some(text) = block.contact_text() {
                    self.paragraph(&text, &CONTACT_STYLE);
                }
            }
            ContentBlock::BodyParagraph { text } | ContentBlock::SkillsLine { text } => {
                self.paragraph(text, &BODY_STYLE)
            }
            ContentBlock::JobEntry {
                title,
                company,
                description,
            } => {
                let heading = match company.as_deref().filter(|c| !c.is_empty()) {
                    Some(company) => format!("{title} - {company}"),
                    None => title.clone(),
                };
                self.paragraph(&heading, &JOB_TITLE_STYLE);
                if let Some(description) = description.as_deref().filter(|d| !d.is_empty()) {
                    self.paragraph(&description.replace('•', "\n• "), &BODY_STYLE);
                }
                self.skip(JOB_ENTRY_GAP);
            }
            ContentBlock::EducationLine {
                degree,
                school,
                dates,
            } => {
                let text = [degree.as_deref(), school.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" - ");
                self.paragraph(&text, &BODY_STYLE);
                if let Some(dates) = dates.as_deref().filter(|d| !d.is_empty()) {
                    self.paragraph(dates, &DATES_STYLE);
                }
                self.skip(EDUCATION_GAP);
            }
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.finished.push(self.ops);
        self.finished
    }
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfRenderer;

impl PdfRenderer {
    fn lay_out(blocks: &[ContentBlock], layout: &PageLayout) -> Vec<Vec<Operation>> {
        let mut writer = PageWriter::new(layout);
        let mut iter = blocks.iter().peekable();
        while let Some(block) = iter.next() {
            writer.block(block);
            let ends_header = match block {
                ContentBlock::ContactLine { .. } => true,
                ContentBlock::Heading {
                    level: HeadingLevel::Name,
                    ..
                } => !matches!(iter.peek(), Some(ContentBlock::ContactLine { .. })),
                _ => false,
            };
            if ends_header {
                writer.skip(HEADER_GAP);
            }
        }
        writer.finish()
    }

    fn assemble(pages: Vec<Vec<Operation>>, layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for face in FontFace::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for operations in pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), layout.width.into(), layout.height.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf)?;
        debug!("Rendered PDF: {page_count} page(s), {} bytes", buf.len());
        Ok(buf)
    }
}

impl RenderBackend for PdfRenderer {
    fn render(&self, blocks: &[ContentBlock], layout: &PageLayout) -> Result<Vec<u8>, RenderError> {
        Self::assemble(Self::lay_out(blocks, layout), layout)
    }
}
