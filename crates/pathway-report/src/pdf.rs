//! Single-student PDF report.
//!
//! Produces a small PDF 1.4 file using the standard Helvetica fonts, so no
//! font embedding is needed. Text that would run past the bottom margin
//! continues on a new page.

use std::path::Path;

use anyhow::Result;

use pathway_core::AssessmentRecord;

use crate::branding::Branding;

/// US Letter, in points.
const PAGE_WIDTH: i32 = 612;
const PAGE_HEIGHT: i32 = 792;
const TOP: i32 = 750;
const BOTTOM_MARGIN: i32 = 72;
const LEFT: i32 = 100;
const INDENT: i32 = 120;
const LINE_GAP: i32 = 20;

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Escape a string for a PDF literal. Characters WinAnsi cannot show from
/// their Latin-1 byte (C1 controls and anything past U+00FF) become `?`.
fn pdf_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            c if (c as u32) < 0x20 => out.push(b' '),
            '\u{80}'..='\u{9F}' => out.push(b'?'),
            c if (c as u32) <= 0xFF => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Accumulates page content streams while tracking the cursor.
struct Layout {
    pages: Vec<Vec<u8>>,
    y: i32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: TOP,
        }
    }

    fn current(&mut self) -> &mut Vec<u8> {
        // `pages` is never empty.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_if_needed(&mut self) {
        if self.y < BOTTOM_MARGIN {
            self.pages.push(Vec::new());
            self.y = TOP;
        }
    }

    /// Draw one line of text at the cursor, then move down by `advance`.
    fn text(&mut self, x: i32, font: Font, size: i32, text: &str, advance: i32) {
        self.break_if_needed();
        let y = self.y;
        let out = self.current();
        out.extend_from_slice(format!("BT /{} {} Tf {} {} Td (", font.resource(), size, x, y).as_bytes());
        out.extend_from_slice(&pdf_text(text));
        out.extend_from_slice(b") Tj ET\n");
        self.y -= advance;
    }

    /// Horizontal rule at the cursor.
    fn rule(&mut self, x1: i32, x2: i32, advance: i32) {
        self.break_if_needed();
        let y = self.y;
        self.current()
            .extend_from_slice(format!("{x1} {y} m {x2} {y} l S\n").as_bytes());
        self.y -= advance;
    }

    fn skip(&mut self, advance: i32) {
        self.y -= advance;
    }
}

/// Serialize page content streams into a complete PDF file.
fn assemble(pages: &[Vec<u8>]) -> Vec<u8> {
    // Objects 1-4 are fixed; each page then takes a page and a content object.
    let page_obj = |i: usize| 5 + 2 * i;
    let mut objects: Vec<Vec<u8>> = Vec::new();

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", page_obj(i))).collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    for (i, content) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                page_obj(i) + 1
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

/// Render the report for one student.
pub fn render_report(record: &AssessmentRecord, branding: &Branding) -> Vec<u8> {
    let mut layout = Layout::new();

    layout.text(LEFT, Font::Bold, 24, &branding.institution, LINE_GAP);
    layout.text(LEFT, Font::Regular, 14, &branding.report_title, 10);
    layout.rule(LEFT, 500, 40);

    let id = &record.identity;
    layout.text(LEFT, Font::Regular, 14, &format!("Name: {}", id.name), LINE_GAP);
    layout.text(LEFT, Font::Regular, 14, &format!("School: {}", id.school), LINE_GAP);
    layout.text(LEFT, Font::Regular, 14, &format!("District: {}", id.district), LINE_GAP);
    layout.text(LEFT, Font::Regular, 14, &format!("Board: {}", id.board), LINE_GAP);
    layout.text(
        LEFT,
        Font::Regular,
        14,
        &format!("Dominant Trait: {}", record.dominant_trait),
        LINE_GAP,
    );
    layout.text(
        LEFT,
        Font::Regular,
        14,
        &format!("Suggested Stream: {}", record.suggested_stream()),
        LINE_GAP,
    );
    layout.skip(LINE_GAP);

    layout.text(LEFT, Font::Bold, 14, "Detailed Scores:", LINE_GAP);
    for (category, score) in record.scores.iter() {
        layout.text(INDENT, Font::Regular, 14, &format!("{category}: {score:.1}%"), LINE_GAP);
    }

    layout.skip(LINE_GAP);
    layout.text(
        LEFT,
        Font::Regular,
        10,
        &format!("Assessment #{} submitted {}", record.id, record.submitted_at.format("%Y-%m-%d")),
        LINE_GAP,
    );

    assemble(&layout.pages)
}

/// Write the report for one student to a file.
pub fn write_report(record: &AssessmentRecord, branding: &Branding, path: &Path) -> Result<()> {
    let pdf = render_report(record, branding);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, pdf)?;
    Ok(())
}
