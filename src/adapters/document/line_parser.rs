//! Line-oriented report parser adapter.
//!
//! Classifies each trimmed line of provider output into a [`DocumentBlock`].
//! Rules are tried in a fixed order; the first match wins:
//!
//! 1. empty line -> `Blank`
//! 2. `#`, `##`, `###` prefix -> `Heading` (deeper prefixes clamp to 3,
//!    a closing `###` run is dropped)
//! 3. table alignment row (`| :--- | ---: |`) -> dropped
//! 4. thematic break (`---`, `***`, `___`) -> `Blank`
//! 5. `-` or `*` prefix -> `ListItem`
//! 6. contains `|` -> `TableRow`, or `Paragraph` when every cell is empty
//! 7. anything else -> `Paragraph`

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::report::{DocumentBlock, ParsedDocument};
use crate::ports::ReportParser;

static THEMATIC_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*_]{3,}$").expect("valid thematic break regex"));

/// First cells that mark a table row as a header even mid-table.
const HEADER_KEYWORDS: &[&str] = &[
    "característica",
    "caracteristica",
    "feature",
    "métrica",
    "metrica",
    "indicador",
];

/// Deterministic single-pass parser for generated reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineReportParser;

impl LineReportParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReportParser for LineReportParser {
    fn parse(&self, raw: &str) -> ParsedDocument {
        parse(raw)
    }
}

/// Parses raw report text. Accepts `\n` and `\r\n` line endings.
pub fn parse(raw: &str) -> ParsedDocument {
    let mut blocks = Vec::new();
    let mut in_table = false;

    for line in raw.lines() {
        let trimmed = line.trim();

        let block = match classify(trimmed, in_table) {
            Some(block) => block,
            None => continue,
        };
        in_table = block.is_table_row();
        blocks.push(block);
    }

    ParsedDocument::new(blocks)
}

/// Classifies one trimmed line. `None` means the line emits no block.
fn classify(line: &str, in_table: bool) -> Option<DocumentBlock> {
    if line.is_empty() {
        return Some(DocumentBlock::Blank);
    }

    if line.starts_with('#') {
        let level = line.chars().take_while(|c| *c == '#').count().min(3) as u8;
        let text = strip_closing_hashes(line.trim_start_matches('#').trim());
        return Some(DocumentBlock::heading(level, text));
    }

    if line.contains('|') && is_alignment_row(line) {
        return None;
    }

    if THEMATIC_BREAK_RE.is_match(line) {
        return Some(DocumentBlock::Blank);
    }

    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        let text = rest.strip_prefix(' ').unwrap_or(rest);
        return Some(DocumentBlock::list_item(text));
    }

    if line.contains('|') {
        let cells = split_cells(line);
        if cells.iter().all(|c| c.is_empty()) {
            return Some(DocumentBlock::paragraph(line));
        }
        let is_header = !in_table || has_emphasis(&cells) || starts_with_keyword(&cells);
        return Some(DocumentBlock::TableRow { cells, is_header });
    }

    Some(DocumentBlock::paragraph(line))
}

/// Drops a trailing run of `#` separated from the text by whitespace, so
/// `Título ###` becomes `Título` while `C#` is kept.
fn strip_closing_hashes(text: &str) -> &str {
    let stripped = text.trim_end_matches('#');
    if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
        stripped.trim_end()
    } else {
        text
    }
}

/// Splits on `|`, trims each cell and drops empty edge fragments.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().map_or(false, |c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().map_or(false, |c| c.is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(String::from).collect()
}

/// True when every non-empty cell is made of `-` and `:` with at least one `-`.
fn is_alignment_row(line: &str) -> bool {
    let mut non_empty = line.split('|').map(str::trim).filter(|c| !c.is_empty()).peekable();
    if non_empty.peek().is_none() {
        return false;
    }
    non_empty.all(|cell| cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':'))
}

fn has_emphasis(cells: &[String]) -> bool {
    cells.iter().any(|c| c.contains("**") || c.contains("__"))
}

fn starts_with_keyword(cells: &[String]) -> bool {
    cells
        .first()
        .map(|c| HEADER_KEYWORDS.contains(&c.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn blocks(raw: &str) -> Vec<DocumentBlock> {
        parse(raw).blocks().to_vec()
    }

    #[test]
    fn parses_end_to_end_scenario() {
        let raw = "## Resumo\n\n- Ponto forte: preço\n| Métrica | Valor |\n| :--- | :--- |\n| ROI | 3x |";
        assert_eq!(
            blocks(raw),
            vec![
                DocumentBlock::heading(2, "Resumo"),
                DocumentBlock::Blank,
                DocumentBlock::list_item("Ponto forte: preço"),
                DocumentBlock::table_row(["Métrica", "Valor"], true),
                DocumentBlock::table_row(["ROI", "3x"], false),
            ]
        );
    }

    #[test]
    fn table_with_alignment_row_yields_two_rows() {
        let raw = "| A | B |\n| :--- | :--- |\n| 1 | 2 |";
        assert_eq!(
            blocks(raw),
            vec![
                DocumentBlock::table_row(["A", "B"], true),
                DocumentBlock::table_row(["1", "2"], false),
            ]
        );
    }

    #[test]
    fn heading_levels_use_longest_prefix() {
        assert_eq!(
            blocks("# Um\n## Dois\n###Três\n#### Quatro"),
            vec![
                DocumentBlock::heading(1, "Um"),
                DocumentBlock::heading(2, "Dois"),
                DocumentBlock::heading(3, "Três"),
                DocumentBlock::heading(3, "Quatro"),
            ]
        );
    }

    #[test]
    fn closing_hashes_are_stripped() {
        assert_eq!(
            blocks("### Título ###
## Linguagem C#
# ##"),
            vec![
                DocumentBlock::heading(3, "Título"),
                DocumentBlock::heading(2, "Linguagem C#"),
                DocumentBlock::heading(1, ""),
            ]
        );
    }

    #[test]
    fn rows_without_cell_text_are_paragraphs() {
        assert_eq!(
            blocks("|
| |
||"),
            vec![
                DocumentBlock::paragraph("|"),
                DocumentBlock::paragraph("| |"),
                DocumentBlock::paragraph("||"),
            ]
        );
    }

    #[test]
    fn consecutive_blanks_are_preserved() {
        assert_eq!(
            blocks("a\n\n   \nb"),
            vec![
                DocumentBlock::paragraph("a"),
                DocumentBlock::Blank,
                DocumentBlock::Blank,
                DocumentBlock::paragraph("b"),
            ]
        );
    }

    #[test]
    fn list_markers_strip_one_space() {
        assert_eq!(
            blocks("- item\n* outro\n-colado\n-  dois espaços"),
            vec![
                DocumentBlock::list_item("item"),
                DocumentBlock::list_item("outro"),
                DocumentBlock::list_item("colado"),
                DocumentBlock::list_item(" dois espaços"),
            ]
        );
    }

    #[test]
    fn thematic_break_is_blank() {
        assert_eq!(blocks("---\n***\n___"), vec![DocumentBlock::Blank; 3]);
    }

    #[test]
    fn pipe_less_alignment_row_is_dropped() {
        assert_eq!(
            blocks("A | B\n--- | ---\n1 | 2"),
            vec![
                DocumentBlock::table_row(["A", "B"], true),
                DocumentBlock::table_row(["1", "2"], false),
            ]
        );
    }

    #[test]
    fn non_table_block_starts_a_new_run() {
        let raw = "| x | y |\n| 1 | 2 |\n\n| z | w |";
        let rows: Vec<bool> = parse(raw)
            .iter()
            .filter_map(|b| match b {
                DocumentBlock::TableRow { is_header, .. } => Some(*is_header),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec![true, false, true]);
    }

    #[test]
    fn emphasis_or_keyword_marks_header_mid_run() {
        let raw = "| a | b |\n| **Total** | 9 |\n| Indicador | Meta |\n| c | d |";
        let headers: Vec<bool> = parse(raw)
            .iter()
            .map(|b| matches!(b, DocumentBlock::TableRow { is_header: true, .. }))
            .collect();
        assert_eq!(headers, vec![true, true, true, false]);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        assert_eq!(
            blocks("## Título\r\n\r\ntexto\r\n"),
            vec![
                DocumentBlock::heading(2, "Título"),
                DocumentBlock::Blank,
                DocumentBlock::paragraph("texto"),
            ]
        );
    }

    #[test]
    fn empty_input_is_empty_document() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parser_port_delegates() {
        let parser = LineReportParser::new();
        assert_eq!(parser.parse("texto"), parse("texto"));
    }

    proptest! {
        #[test]
        fn level_three_lines_become_level_three_headings(
            titles in proptest::collection::vec("[A-Za-z0-9][A-Za-z0-9 ]{0,20}[A-Za-z0-9]", 1..10)
        ) {
            let raw = titles.iter().map(|t| format!("### {}", t)).collect::<Vec<_>>().join("\n");
            let expected: Vec<DocumentBlock> =
                titles.iter().map(|t| DocumentBlock::heading(3, t.as_str())).collect();
            prop_assert_eq!(blocks(&raw), expected);
        }

        #[test]
        fn parsing_is_total_and_bounded(raw in "(?s).{0,400}") {
            let doc = parse(&raw);
            prop_assert!(doc.len() <= raw.lines().count());
            prop_assert_eq!(parse(&raw), doc);
        }
    }
}
