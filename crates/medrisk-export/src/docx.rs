use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
};
use medrisk_core::models::report::RiskReport;
use tracing::debug;

use crate::error::ExportError;
use crate::render::report_markdown;
use crate::styles::DocumentStyles;

const HEADING_STYLES: [(&str, &str); 3] = [
    ("Heading1", "heading 1"),
    ("Heading2", "heading 2"),
    ("Heading3", "heading 3"),
];

/// Render `report` through the Markdown template and pack it as DOCX.
pub fn report_docx(report: &RiskReport, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let markdown = report_markdown(report)?;
    let bytes = generate_docx(&markdown, styles)?;
    debug!(user_id = %report.user_id, bytes = bytes.len(), "report DOCX generated");
    Ok(bytes)
}

/// Build a DOCX document from a small Markdown subset:
/// `#`/`##`/`###` headings, `- ` bullets, `**bold**` spans, `---` page breaks.
/// Any other non-empty line is a body paragraph.
pub fn generate_docx(markdown: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = styles.margin_twips();
    let mut docx = Docx::new().page_margin(
        PageMargin::new()
            .top(margin)
            .bottom(margin)
            .left(margin)
            .right(margin),
    );

    for (level, (style_id, name)) in HEADING_STYLES.iter().enumerate() {
        docx = docx.add_style(
            Style::new(*style_id, StyleType::Paragraph)
                .name(*name)
                .size(styles.heading_size(level + 1) * 2) // half-points
                .bold(),
        );
    }

    for line in markdown.lines() {
        let line = line.trim();
        let paragraph = if line.is_empty() {
            Paragraph::new()
        } else if let Some((level, text)) = heading(line) {
            heading_paragraph(text, level, styles)
        } else if let Some(text) = line.strip_prefix("- ") {
            bullet_paragraph(text, styles)
        } else if line == "---" {
            Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        } else {
            inline_paragraph(Paragraph::new().align(AlignmentType::Left), line, styles)
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Heading level (1-3) and text for `#`-prefixed lines.
fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(|text| (hashes, text))
}

fn heading_paragraph(text: &str, level: usize, styles: &DocumentStyles) -> Paragraph {
    let (style_id, _) = HEADING_STYLES[level - 1];
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let bullet = body_run("\u{2022} ", styles);
    inline_paragraph(
        Paragraph::new().align(AlignmentType::Left).add_run(bullet),
        text,
        styles,
    )
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Append `text` to `para`, making `**...**` spans bold. An unclosed `**`
/// is kept as literal text.
fn inline_paragraph(mut para: Paragraph, text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut remaining = text;
    while let Some(start) = remaining.find("**") {
        let after = &remaining[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        if start > 0 {
            para = para.add_run(body_run(&remaining[..start], styles));
        }
        para = para.add_run(body_run(&after[..end], styles).bold());
        remaining = &after[end + 2..];
    }
    if !remaining.is_empty() {
        para = para.add_run(body_run(remaining, styles));
    }
    para
}
