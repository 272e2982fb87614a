//! Work-queue rows and the keyword items derived from them.

use serde::{Deserialize, Serialize};

/// One row's cells, one per category column; `None` for empty cells.
pub type RowCells = Vec<Option<String>>;

/// Spreadsheet-style letter for a 0-based column index.
pub fn column_letter(index: usize) -> String {
    debug_assert!(index < 26, "single-letter columns only");
    ((b'A' + index as u8) as char).to_string()
}

/// A single unit of work: one keyword in one category cell of one row.
///
/// Never persisted - it is a transient view derived per fetch by joining a
/// row's non-empty cells with the configured category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordItem {
    pub category: String,
    pub keyword: String,
    pub column_index: usize,
    pub column_letter: String,
    pub row: u32,
}

impl KeywordItem {
    /// Map a row's non-empty cells to keyword items, in column order.
    /// Cells beyond the category list are ignored.
    pub fn from_cells(row: u32, cells: &[Option<String>], categories: &[String]) -> Vec<Self> {
        categories
            .iter()
            .enumerate()
            .filter_map(|(index, category)| {
                let keyword = cells.get(index)?.as_deref()?.trim();
                if keyword.is_empty() {
                    return None;
                }
                Some(Self {
                    category: category.clone(),
                    keyword: keyword.to_string(),
                    column_index: index,
                    column_letter: column_letter(index),
                    row,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        vec!["Business".into(), "Finance".into(), "Technology".into()]
    }

    fn cell(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    #[test]
    fn column_letters_follow_the_alphabet() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(2), "C");
        assert_eq!(column_letter(8), "I");
    }

    #[test]
    fn from_cells_skips_empty_and_whitespace_cells() {
        let cells = vec![cell("sunset beach"), None, cell("   ")];
        let items = KeywordItem::from_cells(5, &cells, &categories());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].keyword, "sunset beach");
        assert_eq!(items[0].category, "Business");
        assert_eq!(items[0].column_letter, "A");
        assert_eq!(items[0].row, 5);
    }

    #[test]
    fn from_cells_keeps_column_order() {
        let cells = vec![cell("one"), cell("two"), cell("three")];
        let items = KeywordItem::from_cells(7, &cells, &categories());

        let letters: Vec<&str> = items.iter().map(|i| i.column_letter.as_str()).collect();
        assert_eq!(letters, ["A", "B", "C"]);
    }

    #[test]
    fn from_cells_trims_keyword_text() {
        let cells = vec![cell("  city skyline  ")];
        let items = KeywordItem::from_cells(9, &cells, &categories());
        assert_eq!(items[0].keyword, "city skyline");
    }

    #[test]
    fn short_rows_and_extra_cells_are_tolerated() {
        let short = vec![cell("only one")];
        assert_eq!(KeywordItem::from_cells(1, &short, &categories()).len(), 1);

        let long = vec![cell("a"), cell("b"), cell("c"), cell("past the categories")];
        assert_eq!(KeywordItem::from_cells(1, &long, &categories()).len(), 3);
    }
}
