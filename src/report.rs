//! Report composer — turns the derived analysis view plus the source image
//! into a downloadable PDF.
//!
//! Two stages: `report_sections` is a pure function producing the document
//! structure (so section omission rules are testable without parsing PDF
//! bytes), and `render_pdf` lays those sections out with `printpdf`. Image
//! decoding failures degrade gracefully — the report is still produced, just
//! without the image section.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::image_crate;
use printpdf::image_crate::GenericImageView;
use printpdf::*;

use crate::analysis::{self, DerivedView};
use crate::config;

// ─── Types ────────────────────────────────────────────────────────────────────

/// Everything the report needs, decoupled from UI state.
#[derive(Debug, Clone)]
pub struct ReportContent {
    pub disease_name: String,
    /// Probability of the detected class, 0–100. `None` renders as `N/A`.
    pub confidence: Option<f64>,
    pub description: String,
    pub prevention: Vec<String>,
    pub medicine: Vec<String>,
    pub diet: Vec<String>,
}

impl ReportContent {
    pub fn from_view(view: &DerivedView) -> Self {
        Self {
            disease_name: view.info.full_name.clone(),
            confidence: Some(view.top.probability),
            description: view.info.description.clone(),
            prevention: view.info.prevention.clone(),
            medicine: view.info.medicine.clone(),
            diet: view.info.diet.clone(),
        }
    }
}

/// One logical block of the report, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    Title { heading: String, generated_on: String },
    Image,
    DiseaseName(String),
    Confidence(String),
    Description(String),
    Bulleted { header: String, items: Vec<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Cannot write report: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Section composition (pure) ───────────────────────────────────────────────

/// Builds the ordered section list. A bulleted section whose list is empty is
/// omitted entirely, header included; the image section appears only when a
/// decodable image is available.
pub fn report_sections(content: &ReportContent, has_image: bool) -> Vec<ReportSection> {
    let mut sections = vec![ReportSection::Title {
        heading: "Skin Disease Classification Report".to_string(),
        generated_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
    }];

    if has_image {
        sections.push(ReportSection::Image);
    }

    sections.push(ReportSection::DiseaseName(content.disease_name.clone()));
    sections.push(ReportSection::Confidence(analysis::format_confidence(
        content.confidence,
    )));

    if !content.description.is_empty() {
        sections.push(ReportSection::Description(content.description.clone()));
    }

    for (header, items) in [
        ("Preventive Measures", &content.prevention),
        ("Medication", &content.medicine),
        ("Diet Plan", &content.diet),
    ] {
        if !items.is_empty() {
            sections.push(ReportSection::Bulleted {
                header: header.to_string(),
                items: items.clone(),
            });
        }
    }

    sections
}

// ─── PDF rendering ────────────────────────────────────────────────────────────

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const TOP_Y_MM: f32 = 280.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;
const IMAGE_WIDTH_MM: f32 = 90.0;
const WRAP_COLUMNS: usize = 90;

/// Descending page cursor. Inserts a fresh page whenever a block would cross
/// the bottom margin, so content never overlaps and y only ever moves down
/// within a page.
struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor {
    fn ensure_space(&mut self, doc: &PdfDocumentReference, needed_mm: f32) {
        if self.y - needed_mm < BOTTOM_MARGIN_MM {
            let (page, layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.y = TOP_Y_MM;
        }
    }

    fn text(&mut self, s: &str, size: f32, x_mm: f32, font: &IndirectFontRef) {
        self.layer.use_text(s, size, Mm(x_mm), Mm(self.y), font);
    }
}

/// Renders the report to PDF bytes. `image_bytes` is the raw selected image;
/// a missing or undecodable image skips the image section rather than failing.
pub fn render_pdf(
    content: &ReportContent,
    image_bytes: Option<&[u8]>,
) -> Result<Vec<u8>, ReportError> {
    let decoded = image_bytes.and_then(|bytes| match image_crate::load_from_memory(bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(error = %e, "Report image could not be decoded, skipping image section");
            None
        }
    });

    let sections = report_sections(content, decoded.is_some());

    let (doc, page1, layer1) = PdfDocument::new(
        "Skin Disease Classification Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let italic = doc
        .add_builtin_font(BuiltinFont::HelveticaOblique)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y_MM,
    };

    for section in &sections {
        match section {
            ReportSection::Title {
                heading,
                generated_on,
            } => {
                cursor.text(heading, 16.0, MARGIN_LEFT_MM, &bold);
                cursor.y -= 6.0;
                cursor.text(
                    &format!("Generated on {generated_on}"),
                    9.0,
                    MARGIN_LEFT_MM,
                    &font,
                );
                cursor.y -= 10.0;
            }
            ReportSection::Image => {
                // Unwrap is safe: the Image section only exists when decode
                // succeeded above.
                let img = decoded.as_ref().expect("image section without image");
                place_image(&doc, &mut cursor, img);
            }
            ReportSection::DiseaseName(name) => {
                cursor.ensure_space(&doc, 8.0);
                cursor.text("Disease Detected:", 11.0, MARGIN_LEFT_MM, &bold);
                cursor.text(name, 11.0, MARGIN_LEFT_MM + 45.0, &font);
                cursor.y -= 8.0;
            }
            ReportSection::Confidence(formatted) => {
                cursor.ensure_space(&doc, 10.0);
                cursor.text("Confidence Score:", 11.0, MARGIN_LEFT_MM, &bold);
                cursor.text(formatted, 11.0, MARGIN_LEFT_MM + 45.0, &font);
                cursor.y -= 10.0;
            }
            ReportSection::Description(description) => {
                for line in wrap_text(description, WRAP_COLUMNS) {
                    cursor.ensure_space(&doc, 4.5);
                    cursor.text(&line, 9.0, MARGIN_LEFT_MM, &italic);
                    cursor.y -= 4.5;
                }
                cursor.y -= 8.0;
            }
            ReportSection::Bulleted { header, items } => {
                cursor.ensure_space(&doc, 12.0);
                cursor.text(header, 11.0, MARGIN_LEFT_MM, &bold);
                cursor.y -= 6.0;
                for item in items {
                    let bullet = format!("\u{2022} {item}");
                    for line in wrap_text(&bullet, WRAP_COLUMNS) {
                        cursor.ensure_space(&doc, 4.5);
                        cursor.text(&line, 9.0, MARGIN_LEFT_MM + 5.0, &font);
                        cursor.y -= 4.5;
                    }
                    cursor.y -= 1.5;
                }
                cursor.y -= 6.0;
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
}

/// Embeds the lesion photo centered at a fixed width, aspect preserved.
fn place_image(doc: &PdfDocumentReference, cursor: &mut PageCursor, img: &image_crate::DynamicImage) {
    let (w_px, h_px) = img.dimensions();
    if w_px == 0 || h_px == 0 {
        return;
    }
    // dpi chosen so the image renders exactly IMAGE_WIDTH_MM wide.
    let dpi = w_px as f32 * 25.4 / IMAGE_WIDTH_MM;
    let height_mm = h_px as f32 * 25.4 / dpi;

    cursor.ensure_space(doc, height_mm + 6.0);
    cursor.y -= height_mm;

    let pdf_image = Image::from_dynamic_image(img);
    pdf_image.add_to_layer(
        cursor.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH_MM - IMAGE_WIDTH_MM) / 2.0)),
            translate_y: Some(Mm(cursor.y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    cursor.y -= 8.0;
}

/// Writes PDF bytes under `dir` with the fixed report filename.
pub fn export_report_to_file(pdf_bytes: &[u8], dir: &Path) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(config::REPORT_FILENAME);
    std::fs::write(&path, pdf_bytes)?;
    Ok(path)
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ─── Tests ────────────────────────────────────────────────────────────────────
