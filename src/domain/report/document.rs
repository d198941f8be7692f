//! Document model - Typed blocks of a generated report.

use serde::{Deserialize, Serialize};

/// One structurally classified line of report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentBlock {
    /// Section heading, level 1 to 3.
    Heading { level: u8, text: String },
    /// Running text.
    Paragraph { text: String },
    /// Bulleted item, marker stripped.
    ListItem { text: String },
    /// One row of a table.
    TableRow { cells: Vec<String>, is_header: bool },
    /// Vertical spacing.
    Blank,
}

impl DocumentBlock {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        DocumentBlock::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        DocumentBlock::Paragraph { text: text.into() }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        DocumentBlock::ListItem { text: text.into() }
    }

    pub fn table_row<I, S>(cells: I, is_header: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DocumentBlock::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
            is_header,
        }
    }

    pub fn is_table_row(&self) -> bool {
        matches!(self, DocumentBlock::TableRow { .. })
    }

    /// Plain-text rendering of this block, without a trailing newline.
    pub fn to_plain_text(&self) -> String {
        match self {
            DocumentBlock::Heading { text, .. } | DocumentBlock::Paragraph { text } => text.clone(),
            DocumentBlock::ListItem { text } => format!("• {}", text),
            DocumentBlock::TableRow { cells, .. } => cells.join(" | "),
            DocumentBlock::Blank => String::new(),
        }
    }
}

/// Ordered, immutable sequence of blocks produced from one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    blocks: Vec<DocumentBlock>,
}

impl ParsedDocument {
    pub fn new(blocks: Vec<DocumentBlock>) -> Self {
        Self { blocks }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentBlock> {
        self.blocks.iter()
    }

    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of the first heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            DocumentBlock::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Blocks joined with newlines, for clipboard copy and plain-text export.
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(DocumentBlock::to_plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a ParsedDocument {
    type Item = &'a DocumentBlock;
    type IntoIter = std::slice::Iter<'a, DocumentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
