//! Minimal PDF 1.4 writer.
//!
//! Produces text-only pages set in the built-in Helvetica font with
//! `WinAnsiEncoding`. Characters outside Latin-1 are replaced with `?`.

use std::fmt::Write as _;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 72;
const BODY_SIZE: u32 = 11;
const HEADING_SIZE: u32 = 16;
const LEADING: u32 = 15;
/// Characters per wrapped body line at 11pt Helvetica within the margins.
const WRAP_WIDTH: usize = 88;
/// Line advances that fit between the top and bottom margins.
const LINES_PER_PAGE: u32 = (PAGE_HEIGHT - 2 * MARGIN) / LEADING;
/// Objects 1-4 are catalog, page tree, font and info; pages follow in pairs.
const FIRST_PAGE_OBJECT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Heading(String),
    Body(String),
    Blank,
}

impl Line {
    /// Line advances taken on the page; headings leave an extra gap.
    const fn height(&self) -> u32 {
        match self {
            Self::Heading(_) => 2,
            Self::Body(_) | Self::Blank => 1,
        }
    }
}

/// Accumulates lines of text, then serializes them as PDF pages.
///
/// A new page starts whenever the next line would cross the bottom margin.
#[derive(Debug, Default, Clone)]
pub struct PdfWriter {
    title: String,
    lines: Vec<Line>,
}

impl PdfWriter {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line::Heading(text.into()));
        self
    }

    /// Add body text, wrapped at word boundaries.
    pub fn text(&mut self, text: &str) -> &mut Self {
        for line in wrap(text, WRAP_WIDTH) {
            self.lines.push(Line::Body(line));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(Line::Blank);
        self
    }

    /// Serialize the document.
    #[must_use]
    pub fn finish(&self) -> Vec<u8> {
        let pages = self.pages();
        let kids = (0..pages.len())
            .map(|index| format!("{} 0 R", FIRST_PAGE_OBJECT + 2 * index))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()).into_bytes(),
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
            info_dictionary(&self.title),
        ];
        for (index, lines) in pages.iter().enumerate() {
            let contents = FIRST_PAGE_OBJECT + 2 * index + 1;
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 3 0 R >> >> /Contents {contents} 0 R >>"
                )
                .into_bytes(),
            );
            objects.push(stream(&content_stream(lines)));
        }

        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = writeln!(xref, "{offset:010} 00000 n ");
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info 4 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1,
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }

    /// Split the lines into page-sized runs. Always yields at least one page.
    fn pages(&self) -> Vec<&[Line]> {
        let mut pages = Vec::new();
        let mut start = 0;
        let mut used = 0;
        for (index, line) in self.lines.iter().enumerate() {
            if index > start && used + line.height() > LINES_PER_PAGE {
                pages.push(&self.lines[start..index]);
                start = index;
                used = 0;
            }
            used += line.height();
        }
        pages.push(&self.lines[start..]);
        pages
    }
}

fn content_stream(lines: &[Line]) -> Vec<u8> {
    let mut ops = Vec::new();
    ops.extend_from_slice(
        format!(
            "BT\n/F1 {BODY_SIZE} Tf\n{LEADING} TL\n{MARGIN} {} Td\n",
            PAGE_HEIGHT - MARGIN
        )
        .as_bytes(),
    );
    for line in lines {
        match line {
            Line::Heading(text) => {
                ops.extend_from_slice(format!("/F1 {HEADING_SIZE} Tf\n").as_bytes());
                push_show(&mut ops, text);
                ops.extend_from_slice(format!("T*\n/F1 {BODY_SIZE} Tf\n").as_bytes());
            }
            Line::Body(text) => push_show(&mut ops, text),
            Line::Blank => {}
        }
        ops.extend_from_slice(b"T*\n");
    }
    ops.extend_from_slice(b"ET");
    ops
}

fn push_show(ops: &mut Vec<u8>, text: &str) {
    ops.push(b'(');
    ops.extend_from_slice(&escape(text));
    ops.extend_from_slice(b") Tj\n");
}

fn stream(content: &[u8]) -> Vec<u8> {
    let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(b"\nendstream");
    body
}

fn info_dictionary(title: &str) -> Vec<u8> {
    let mut body = b"<< /Producer (solace) /Title (".to_vec();
    body.extend_from_slice(&escape(title));
    body.extend_from_slice(b") >>");
    body
}

/// Latin-1 bytes of `text` with PDF string delimiters escaped.
fn escape(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(ch as u8);
            }
            ' '..='~' => out.push(ch as u8),
            '\u{a0}'..='\u{ff}' => out.push(u8::try_from(u32::from(ch)).unwrap_or(b'?')),
            '\u{2018}' | '\u{2019}' => out.push(b'\''),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
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
