//! Search — forward literal scan over rendered rows.
//!
//! Searches are literal string matches — simple, fast, and sufficient
//! here. The scan walks rendered rows (what the user sees, tabs
//! expanded) from the top of the document and stops at the first hit,
//! mapping the match's render column back to a char column so the
//! cursor can be placed on it. One forward pass per invocation: no
//! wraparound, no reverse search.

use crate::document::Document;
use crate::position::Position;

/// Find the first occurrence of `query` in the document's rendered
/// rows, scanning forward from the top.
///
/// Returns the match position in **char** coordinates, ready for the
/// cursor. `None` for an empty query or no match.
#[must_use]
pub fn find_forward(doc: &Document, query: &str) -> Option<Position> {
    if query.is_empty() {
        return None;
    }

    for index in 0..doc.row_count() {
        let row = doc.row(index)?;
        if let Some(byte_idx) = row.render().find(query) {
            // Render column of the hit, then back to a char column.
            let rx = row.render()[..byte_idx].chars().count();
            return Some(Position::new(index, row.rx_to_cx(rx)));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn finds_first_occurrence_from_top() {
        let doc = Document::from_text("a\nb\nc\n");
        assert_eq!(find_forward(&doc, "b"), Some(Position::new(1, 0)));
    }

    #[test]
    fn earlier_row_wins_over_later() {
        let doc = Document::from_text("xx needle\nneedle\n");
        assert_eq!(find_forward(&doc, "needle"), Some(Position::new(0, 3)));
    }

    #[test]
    fn no_match_returns_none() {
        let doc = Document::from_text("alpha\nbeta\n");
        assert_eq!(find_forward(&doc, "gamma"), None);
    }

    #[test]
    fn empty_query_returns_none() {
        let doc = Document::from_text("alpha\n");
        assert_eq!(find_forward(&doc, ""), None);
    }

    #[test]
    fn empty_document_returns_none() {
        assert_eq!(find_forward(&Document::new(), "x"), None);
    }

    #[test]
    fn match_after_tab_maps_back_to_char_column() {
        // Rendered: "    abc" — the hit at render column 4 is char
        // column 1 (right after the tab).
        let doc = Document::from_text("\tabc\n");
        assert_eq!(find_forward(&doc, "abc"), Some(Position::new(0, 1)));
    }

    #[test]
    fn query_spanning_tab_expansion_matches_rendered_text() {
        // "a\tb" renders as "a   b"; searching the rendered spacing
        // finds it even though the raw text has a tab.
        let doc = Document::from_text("a\tb\n");
        let hit = find_forward(&doc, "a   b");
        assert_eq!(hit, Some(Position::new(0, 0)));
    }

    #[test]
    fn multibyte_prefix_counts_chars_not_bytes() {
        let doc = Document::from_text("ééx\n");
        assert_eq!(find_forward(&doc, "x"), Some(Position::new(0, 2)));
    }
}
