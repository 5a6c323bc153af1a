//! Document Renderer: lays out an export schema as A4 pages and draws them
//! to PDF bytes via `printpdf`.
//!
//! Rendering is split in two passes. [`layout`] is pure and positions every
//! text line (header, patient, clinical and medication blocks, footers);
//! [`render`] draws that layout with the built-in Helvetica fonts. Table rows
//! are placed whole: a row that does not fit the current page moves to the
//! next one, under a repeated table header.
//!
//! Built-in fonts only cover the WinAnsi code page. Text outside it is
//! refused with [`ReportError::Render`] before anything is drawn.

use std::io::BufWriter;

use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::config;
use crate::models::Medication;

use super::{DocumentArtifact, ExportSchema, ReportError};

// ─── Page geometry (mm) ───────────────────────────────────────────────────────

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const CONTENT_TOP: f32 = 280.0;
const CONTENT_BOTTOM: f32 = 20.0;
const FOOTER_Y: f32 = 10.0;

const BODY_SIZE: f32 = 9.0;
const BODY_LEADING: f32 = 4.5;
const BODY_CHARS: usize = 95;
const ROW_GAP: f32 = 2.0;

pub const EXISTING_MARKER: &str = "Existing Medication";

/// Table columns: header, x offset, wrap width in characters.
const COLUMNS: [(&str, f32, usize); 4] = [
    ("Medication", 20.0, 32),
    ("Dosage", 85.0, 18),
    ("Frequency", 122.0, 22),
    ("Duration", 168.0, 11),
];

// ─── Layout types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// What a positioned line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,
    Heading,
    Field,
    Body,
    Emphasis,
    TableHeader,
    /// One line of a medication cell; `row` is the index in the input list.
    TableCell { row: usize, column: usize },
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub kind: LineKind,
    pub font: FontStyle,
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<TextLine>,
}

impl PageLayout {
    /// Medication rows that have at least one line on this page.
    pub fn rows(&self) -> Vec<usize> {
        let mut rows = Vec::new();
        for line in &self.lines {
            if let LineKind::TableCell { row, .. } = line.kind {
                if rows.last() != Some(&row) {
                    rows.push(row);
                }
            }
        }
        rows
    }

    pub fn has_table_header(&self) -> bool {
        self.lines.iter().any(|l| l.kind == LineKind::TableHeader)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Medication row indices in document order, each listed once.
    pub fn row_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = Vec::new();
        for row in self.pages.iter().flat_map(PageLayout::rows) {
            if order.last() != Some(&row) {
                order.push(row);
            }
        }
        order
    }

    /// All text of one medication row, in placement order.
    pub fn row_text(&self, row: usize) -> Vec<&str> {
        self.lines()
            .filter(|l| matches!(l.kind, LineKind::TableCell { row: r, .. } if r == row))
            .map(|l| l.text.as_str())
            .collect()
    }

    /// Index of the first line whose text equals `text`.
    pub fn position_of(&self, text: &str) -> Option<usize> {
        self.lines().position(|l| l.text == text)
    }
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// `Sanjeevan-Prescription-<prescriptionId>.pdf`
pub fn file_name(prescription_id: &str) -> String {
    format!(
        "{}-Prescription-{}.{}",
        config::PRODUCT_PREFIX,
        prescription_id,
        config::DOCUMENT_EXTENSION
    )
}

/// Renders `schema` to PDF bytes.
pub fn render(schema: &ExportSchema) -> Result<DocumentArtifact, ReportError> {
    let prescription_id = schema.case_details.prescription_id.trim();
    if prescription_id.is_empty() {
        return Err(ReportError::Render("export schema has no prescription id".into()));
    }

    check_encodable(schema)?;
    let layout = layout(schema);
    let bytes = draw(&layout)?;
    tracing::debug!(
        prescription_id,
        pages = layout.pages.len(),
        rows = schema.medications.len(),
        size = bytes.len(),
        "Rendered prescription PDF"
    );

    Ok(DocumentArtifact {
        file_name: file_name(&schema.case_details.prescription_id),
        bytes,
        generated_at: Utc::now(),
    })
}

/// Renders an untyped schema, rejecting one that does not have the export shape.
pub fn render_json(value: &serde_json::Value) -> Result<DocumentArtifact, ReportError> {
    let schema: ExportSchema = serde_json::from_value(value.clone())
        .map_err(|e| ReportError::Render(format!("invalid export schema: {e}")))?;
    render(&schema)
}

/// Produces a document artifact from an export schema.
pub trait DocumentGenerator: Send + Sync + 'static {
    fn generate(&self, schema: &ExportSchema) -> Result<DocumentArtifact, ReportError>;
}

/// The production generator: `printpdf` rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfGenerator;

impl DocumentGenerator for PdfGenerator {
    fn generate(&self, schema: &ExportSchema) -> Result<DocumentArtifact, ReportError> {
        render(schema)
    }
}

// ─── Encoding check ───────────────────────────────────────────────────────────

/// WinAnsi code points outside ASCII and Latin-1.
const WIN_ANSI_EXTRA: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

fn win_ansi(c: char) -> bool {
    c.is_whitespace()
        || matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || WIN_ANSI_EXTRA.contains(c)
}

/// Fails on the first free-text field the built-in fonts cannot encode.
/// `printpdf` would otherwise drop those characters silently.
fn check_encodable(schema: &ExportSchema) -> Result<(), ReportError> {
    let case = &schema.case_details;
    let patient = &schema.patient;

    let mut fields: Vec<(String, &str)> = vec![
        ("caseDetails.prescriptionId".into(), case.prescription_id.as_str()),
        ("caseDetails.date".into(), case.date.as_str()),
        ("caseDetails.doctorName".into(), case.doctor_name.as_str()),
        ("caseDetails.aiSummary".into(), case.ai_summary.as_str()),
        ("caseDetails.aiDiagnosis".into(), case.ai_diagnosis.as_str()),
        ("caseDetails.medicalHistory".into(), case.medical_history.as_str()),
        ("patient.name".into(), patient.name.as_str()),
        ("patient.height".into(), patient.height.as_str()),
        ("patient.weight".into(), patient.weight.as_str()),
    ];
    for (i, allergy) in patient.allergies.iter().enumerate() {
        fields.push((format!("patient.allergies[{i}]"), allergy.as_str()));
    }
    for (i, med) in schema.medications.iter().enumerate() {
        fields.push((format!("medications[{i}].name"), med.name.as_str()));
        fields.push((format!("medications[{i}].dosage"), med.dosage.as_str()));
        fields.push((format!("medications[{i}].frequency"), med.frequency.as_str()));
        fields.push((format!("medications[{i}].duration"), med.duration.as_str()));
    }

    for (field, text) in fields {
        if let Some(c) = text.chars().find(|&c| !win_ansi(c)) {
            return Err(ReportError::Render(format!(
                "{field} contains {c:?} (U+{:04X}), which the PDF font cannot encode",
                c as u32
            )));
        }
    }
    Ok(())
}

// ─── Layout pass ──────────────────────────────────────────────────────────────

/// Positions every line of the document. Pure: equal schemas give equal layouts.
pub fn layout(schema: &ExportSchema) -> DocumentLayout {
    let case = &schema.case_details;
    let patient = &schema.patient;
    let mut cursor = Cursor::new();

    // Header
    cursor.line("SANJEEVAN PRESCRIPTION", LineKind::Title, FontStyle::Bold, 16.0, 8.0);
    cursor.field("Prescription ID", &case.prescription_id);
    cursor.field("Date", &case.date);
    cursor.field("Doctor", &case.doctor_name);
    cursor.advance(4.0);

    // Patient
    cursor.heading("PATIENT");
    cursor.field("Name", &patient.name);
    cursor.field("Age", &patient.age.to_string());
    cursor.field("Gender", patient.gender.as_str());
    cursor.field("Height", &patient.height);
    cursor.field("Weight", &patient.weight);
    cursor.field("Allergies", &patient.allergy_line());
    cursor.advance(4.0);

    // Clinical
    cursor.heading("AI SYMPTOM SUMMARY");
    cursor.wrapped(&case.ai_summary, BODY_CHARS, LineKind::Body, FontStyle::Regular, BODY_SIZE, BODY_LEADING);
    cursor.advance(3.0);
    cursor.heading("DIAGNOSIS");
    cursor.wrapped(&case.ai_diagnosis, 70, LineKind::Emphasis, FontStyle::Bold, 12.0, 6.0);
    cursor.advance(3.0);
    cursor.heading("MEDICAL HISTORY");
    cursor.wrapped(&case.medical_history, BODY_CHARS, LineKind::Body, FontStyle::Regular, BODY_SIZE, BODY_LEADING);
    cursor.advance(4.0);

    // Medications
    cursor.heading("PRESCRIBED MEDICATIONS");
    cursor.table(&schema.medications);

    // Disclaimer
    cursor.advance(6.0);
    let disclaimer = format!(
        "Prepared from an AI-assisted consultation and reviewed by {}. \
         Follow the instructions carefully and contact your doctor with any questions.",
        case.doctor_name
    );
    cursor.wrapped(&disclaimer, 110, LineKind::Body, FontStyle::Regular, 7.0, 3.5);

    let mut pages = cursor.finish();
    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        page.lines.push(TextLine {
            text: format!("{} - Page {} of {}", config::APP_NAME, i + 1, total),
            kind: LineKind::Footer,
            font: FontStyle::Regular,
            size: 7.0,
            x: MARGIN_LEFT,
            y: FOOTER_Y,
        });
    }

    DocumentLayout {
        title: file_name(&case.prescription_id),
        pages,
    }
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: CONTENT_TOP,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = CONTENT_TOP;
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= CONTENT_BOTTOM
    }

    fn ensure_space(&mut self, height: f32) {
        if !self.fits(height) {
            self.new_page();
        }
    }

    fn advance(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn push(&mut self, text: String, kind: LineKind, font: FontStyle, size: f32, x: f32) {
        let y = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine { text, kind, font, size, x, y });
        }
    }

    fn line(&mut self, text: &str, kind: LineKind, font: FontStyle, size: f32, leading: f32) {
        self.ensure_space(leading);
        self.push(text.to_string(), kind, font, size, MARGIN_LEFT);
        self.advance(leading);
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading together with the first line that follows it.
        self.ensure_space(6.0 + BODY_LEADING);
        self.line(text, LineKind::Heading, FontStyle::Bold, 11.0, 6.0);
    }

    fn field(&mut self, label: &str, value: &str) {
        let text = format!("{label}: {value}");
        self.wrapped(&text, BODY_CHARS, LineKind::Field, FontStyle::Regular, BODY_SIZE, BODY_LEADING);
    }

    fn wrapped(
        &mut self,
        text: &str,
        max_chars: usize,
        kind: LineKind,
        font: FontStyle,
        size: f32,
        leading: f32,
    ) {
        for line in wrap_text(text, max_chars) {
            self.line(&line, kind, font, size, leading);
        }
    }

    fn table_header(&mut self) {
        self.ensure_space(BODY_LEADING + 1.0);
        for (title, x, _) in COLUMNS {
            self.push(title.to_string(), LineKind::TableHeader, FontStyle::Bold, BODY_SIZE, x);
        }
        self.advance(BODY_LEADING + 1.0);
    }

    fn table(&mut self, medications: &[Medication]) {
        self.table_header();
        let body_height = CONTENT_TOP - CONTENT_BOTTOM - (BODY_LEADING + 1.0);

        for (row, med) in medications.iter().enumerate() {
            let cells = row_cells(med);
            let line_count = cells.iter().map(Vec::len).max().unwrap_or(1);
            let height = line_count as f32 * BODY_LEADING + ROW_GAP;

            if !self.fits(height) {
                self.new_page();
                self.table_header();
            }

            for i in 0..line_count {
                // Only a row taller than a whole page can get here.
                if height > body_height && !self.fits(BODY_LEADING) {
                    self.new_page();
                    self.table_header();
                }
                for (column, cell) in cells.iter().enumerate() {
                    let Some(text) = cell.get(i) else { continue };
                    let font = if column == 0 && med.is_existing && i + 1 == cell.len() {
                        FontStyle::Bold
                    } else {
                        FontStyle::Regular
                    };
                    let size = if font == FontStyle::Bold { 7.5 } else { BODY_SIZE };
                    self.push(
                        text.clone(),
                        LineKind::TableCell { row, column },
                        font,
                        size,
                        COLUMNS[column].1,
                    );
                }
                self.advance(BODY_LEADING);
            }
            self.advance(ROW_GAP);
        }
    }

    fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}

/// Wrapped cell lines for one medication row. The name cell ends with the
/// existing-medication marker when the medication predates this consultation.
fn row_cells(med: &Medication) -> [Vec<String>; 4] {
    let mut name = wrap_text(&med.name, COLUMNS[0].2);
    if med.is_existing {
        name.push(EXISTING_MARKER.to_string());
    }
    [
        name,
        wrap_text(&med.dosage, COLUMNS[1].2),
        wrap_text(&med.frequency, COLUMNS[2].2),
        wrap_text(&med.duration, COLUMNS[3].2),
    ]
}

/// Word-wrap helper for PDF text rendering. Explicit line breaks are kept,
/// blank lines included. Words longer than `max_chars` are broken across
/// lines; no characters are dropped.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = text
        .lines()
        .flat_map(|paragraph| wrap_paragraph(paragraph, max_chars))
        .collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_chars).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current = piece;
                }
            }
            continue;
        }

        if current_len + word_len + 1 > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// ─── Draw pass ────────────────────────────────────────────────────────────────

fn draw(layout: &DocumentLayout) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(&layout.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;

    let mut targets = vec![(page1, layer1)];
    for _ in 1..layout.pages.len() {
        targets.push(doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1"));
    }

    for (page, (page_index, layer_index)) in layout.pages.iter().zip(targets) {
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in &page.lines {
            let font: &IndirectFontRef = match line.font {
                FontStyle::Regular => &regular,
                FontStyle::Bold => &bold,
            };
            layer.use_text(line.text.as_str(), line.size, Mm(line.x), Mm(line.y), font);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;
    use crate::report::assemble;
    use regex::Regex;

    fn schema() -> ExportSchema {
        assemble(&fixtures::record()).unwrap()
    }

    fn schema_with(medications: Vec<Medication>) -> ExportSchema {
        assemble(&fixtures::record_with_medications(medications)).unwrap()
    }

    #[test]
    fn test_file_name_pattern() {
        assert_eq!(file_name("P-98124"), "Sanjeevan-Prescription-P-98124.pdf");
    }

    #[test]
    fn test_render_produces_pdf() {
        let artifact = render(&schema()).unwrap();
        assert!(!artifact.bytes.is_empty());
        assert_eq!(&artifact.bytes[0..4], b"%PDF");

        let pattern = Regex::new(r"^Sanjeevan-Prescription-(.+)\.pdf$").unwrap();
        let caps = pattern.captures(&artifact.file_name).unwrap();
        assert_eq!(&caps[1], "P-98124");
    }

    #[test]
    fn test_render_empty_medications() {
        let schema = schema_with(vec![]);
        let artifact = render(&schema).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");

        let layout = layout(&schema);
        assert!(layout.pages[0].has_table_header());
        assert!(layout.row_order().is_empty());
        assert!(!layout
            .lines()
            .any(|l| matches!(l.kind, LineKind::TableCell { .. })));
    }

    #[test]
    fn test_rows_follow_input_order() {
        let names = ["Albuterol", "Fluticasone", "Metformin", "Melatonin", "Albuterol"];
        for len in 0..=names.len() {
            let mut meds: Vec<Medication> = names[..len]
                .iter()
                .enumerate()
                .map(|(i, n)| fixtures::medication(i as u32 + 1, n, i % 2 == 0))
                .collect();
            for _ in 0..2 {
                let layout = layout(&schema_with(meds.clone()));
                assert_eq!(layout.row_order(), (0..len).collect::<Vec<_>>());
                for (row, med) in meds.iter().enumerate() {
                    assert_eq!(layout.row_text(row)[0], med.name);
                }
                meds.reverse();
            }
        }
    }

    #[test]
    fn test_existing_medication_marker() {
        let layout = layout(&schema_with(vec![
            fixtures::medication(1, "Albuterol", false),
            fixtures::medication(3, "Metformin", true),
        ]));
        assert_eq!(layout.row_order(), vec![0, 1]);
        assert!(!layout.row_text(0).contains(&EXISTING_MARKER));
        assert!(layout.row_text(1).contains(&EXISTING_MARKER));
        assert!(layout.row_text(1).contains(&"Metformin"));
        assert!(layout.row_text(1).contains(&"Ongoing"));
    }

    #[test]
    fn test_blocks_in_document_order() {
        let layout = layout(&schema());
        let header = layout.position_of("Prescription ID: P-98124").unwrap();
        let doctor = layout.position_of("Doctor: Dr. Anil Kumar").unwrap();
        let patient = layout.position_of("Name: Priya Sharma").unwrap();
        let allergies = layout
            .position_of("Allergies: Pollen, No Known Drug Allergies")
            .unwrap();
        let diagnosis = layout.position_of("Moderate Persistent Asthma").unwrap();
        let history = layout.position_of("MEDICAL HISTORY").unwrap();
        let table = layout.position_of("Medication").unwrap();

        assert!(header < doctor);
        assert!(doctor < patient);
        assert!(patient < allergies);
        assert!(allergies < diagnosis);
        assert!(diagnosis < history);
        assert!(history < table);

        let emphasis = layout.lines().find(|l| l.kind == LineKind::Emphasis).unwrap();
        assert_eq!(emphasis.font, FontStyle::Bold);
    }

    #[test]
    fn test_free_text_is_not_truncated() {
        let mut schema = schema();
        schema.case_details.ai_summary = "wheezing ".repeat(120) + "END-OF-SUMMARY";
        let layout = layout(&schema);

        let start = layout.position_of("AI SYMPTOM SUMMARY").unwrap() + 1;
        let end = layout.position_of("DIAGNOSIS").unwrap();
        let rendered: Vec<&str> = layout
            .lines()
            .skip(start)
            .take(end - start)
            .filter(|l| l.kind == LineKind::Body)
            .map(|l| l.text.as_str())
            .collect();
        let words: Vec<&str> = rendered.iter().flat_map(|l| l.split_whitespace()).collect();
        let expected: Vec<&str> = schema.case_details.ai_summary.split_whitespace().collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn test_long_table_paginates_without_splitting_rows() {
        let meds: Vec<Medication> = (0..80)
            .map(|i| fixtures::medication(i, &format!("Medication number {i}"), i % 3 == 0))
            .collect();
        let layout = layout(&schema_with(meds));

        assert!(layout.pages.len() > 1);
        assert_eq!(layout.row_order(), (0..80).collect::<Vec<_>>());

        let mut seen = Vec::new();
        for page in &layout.pages {
            let rows = page.rows();
            if !rows.is_empty() {
                assert!(page.has_table_header(), "rows without a table header");
            }
            seen.extend(rows);
        }
        // A split row would appear on two pages.
        assert_eq!(seen, (0..80).collect::<Vec<_>>());

        for page in &layout.pages {
            for line in &page.lines {
                assert!(line.y >= FOOTER_Y, "line placed below the page: {line:?}");
            }
        }
    }

    #[test]
    fn test_single_row_taller_than_page_continues() {
        let mut med = fixtures::medication(1, "Prednisone", false);
        med.frequency = "take ".repeat(2000);
        let layout = layout(&schema_with(vec![med]));

        assert_eq!(layout.row_order(), vec![0]);

        let words: usize = layout
            .lines()
            .filter(|l| l.kind == LineKind::TableCell { row: 0, column: 2 })
            .map(|l| l.text.split_whitespace().count())
            .sum();
        assert_eq!(words, 2000);

        let spanned: Vec<&PageLayout> =
            layout.pages.iter().filter(|p| p.rows() == vec![0]).collect();
        assert!(spanned.len() > 1, "row should continue across pages");
        for page in &spanned {
            assert!(page.has_table_header(), "continuation page without a table header");
        }

        for line in layout.lines().filter(|l| l.kind != LineKind::Footer) {
            assert!(line.y >= CONTENT_BOTTOM, "line placed below the content area: {line:?}");
        }
    }

    #[test]
    fn test_footer_on_every_page() {
        let meds: Vec<Medication> = (0..80)
            .map(|i| fixtures::medication(i, "Amlodipine", false))
            .collect();
        let layout = layout(&schema_with(meds));
        let total = layout.pages.len();
        for (i, page) in layout.pages.iter().enumerate() {
            let footer = page.lines.iter().find(|l| l.kind == LineKind::Footer).unwrap();
            assert_eq!(footer.text, format!("Sanjeevan - Page {} of {}", i + 1, total));
        }
    }

    #[test]
    fn test_multi_page_render_is_valid_pdf() {
        let meds: Vec<Medication> = (0..120)
            .map(|i| fixtures::medication(i, "Lisinopril", i % 2 == 0))
            .collect();
        let artifact = render(&schema_with(meds)).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(layout(&schema()), layout(&schema()));
    }

    #[test]
    fn test_render_json_rejects_invalid_shape() {
        let mut value = serde_json::to_value(schema()).unwrap();
        value["medications"] = serde_json::json!("Albuterol, Metformin");
        let err = render_json(&value).unwrap_err();
        assert!(matches!(err, ReportError::Render(_)));
    }

    #[test]
    fn test_render_json_accepts_export_shape() {
        let value = serde_json::to_value(schema()).unwrap();
        let artifact = render_json(&value).unwrap();
        assert_eq!(artifact.file_name, "Sanjeevan-Prescription-P-98124.pdf");
    }

    #[test]
    fn test_render_refuses_text_outside_font_encoding() {
        let mut schema = schema();
        schema.patient.name = "प्रिया शर्मा".into();
        let ReportError::Render(message) = render(&schema).unwrap_err() else {
            panic!("expected a render error");
        };
        assert!(message.contains("patient.name"), "{message}");

        let mut med = fixtures::medication(1, "Albuterol", false);
        med.frequency = "≥ 2 hours apart".into();
        let ReportError::Render(message) = render(&schema_with(vec![med])).unwrap_err() else {
            panic!("expected a render error");
        };
        assert!(message.contains("medications[0].frequency"), "{message}");
        assert!(message.contains("U+2265"), "{message}");
    }

    #[test]
    fn test_render_accepts_latin1_and_win_ansi_punctuation() {
        let mut schema = schema();
        schema.patient.name = "José Müller-Søren".into();
        schema.case_details.ai_summary = "Cough – worse at night… “wheezing” €5 co-pay".into();
        let artifact = render(&schema).unwrap();
        assert_eq!(&artifact.bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_render_rejects_blank_prescription_id() {
        let mut schema = schema();
        schema.case_details.prescription_id = "  ".into();
        assert!(matches!(render(&schema), Err(ReportError::Render(_))));
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a long sentence that should be wrapped at around forty characters or so.";
        let lines = wrap_text(text, 40);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 40);
        }
    }

    #[test]
    fn test_wrap_text_breaks_long_words_without_loss() {
        let word = "x".repeat(75);
        let lines = wrap_text(&format!("ab {word} cd"), 30);
        assert_eq!(lines[0], "ab");
        assert!(lines.iter().all(|l| l.chars().count() <= 30));
        let joined = lines.concat().replace(' ', "");
        assert_eq!(joined, format!("ab{word}cd"));
    }

    #[test]
    fn test_wrap_text_keeps_line_breaks() {
        let lines = wrap_text("Line one\nLine two\n\n- item", 40);
        assert_eq!(lines, vec!["Line one", "Line two", "", "- item"]);

        let lines = wrap_text("first\r\nsecond", 40);
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_medical_history_line_breaks_survive_layout() {
        let mut schema = schema();
        schema.case_details.medical_history = "Line one\nLine two\n\n- item".into();
        let layout = layout(&schema);

        let start = layout.position_of("MEDICAL HISTORY").unwrap() + 1;
        let history: Vec<&str> = layout
            .lines()
            .skip(start)
            .take(4)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(history, vec!["Line one", "Line two", "", "- item"]);
    }

    #[test]
    fn test_wrap_text_short() {
        let lines = wrap_text("Short", 40);
        assert_eq!(lines, vec!["Short".to_string()]);
    }

    #[test]
    fn test_wrap_text_empty() {
        let lines = wrap_text("", 40);
        assert_eq!(lines.len(), 1);
    }
}
