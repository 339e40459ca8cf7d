//! Page geometry and the vertical layout cursor
//!
//! All coordinates are PostScript points on an A4 portrait page with the
//! origin at the top-left corner; `y` grows downward. Text is placed by its
//! baseline, images by their top edge.

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

pub const MARGIN_X: f32 = 40.0;
pub const TOP_MARGIN: f32 = 40.0;
/// A table row is only started while the cursor is at or above this line
pub const PAGE_BOTTOM: f32 = 770.0;

pub const LOGO_SIZE: f32 = 120.0;
/// Vertical space reserved for the logo whether or not it loads
pub const LOGO_BLOCK_HEIGHT: f32 = 150.0;

pub const TITLE_FONT_SIZE: f32 = 22.0;
pub const TITLE_GAP: f32 = 20.0;
pub const SUBTITLE_FONT_SIZE: f32 = 12.0;
pub const SUBTITLE_GAP: f32 = 40.0;

pub const SECTION_FONT_SIZE: f32 = 16.0;
pub const BODY_FONT_SIZE: f32 = 12.0;
pub const SUMMARY_HEADING_GAP: f32 = 20.0;
pub const SUMMARY_LINE_HEIGHT: f32 = 18.0;
pub const SUMMARY_TRAILING_GAP: f32 = 30.0;
pub const SUMMARY_VALUE_X: f32 = 160.0;

pub const CHART_LABEL_FONT_SIZE: f32 = 14.0;
pub const CHART_LABEL_GAP: f32 = 10.0;
pub const CHART_WIDTH: f32 = 220.0;
pub const CHART_HEIGHT: f32 = 200.0;
pub const CHART_LEFT_X: f32 = 40.0;
pub const CHART_RIGHT_X: f32 = 300.0;
/// Space taken by the chart row even when both charts are omitted
pub const CHART_BLOCK_HEIGHT: f32 = 240.0;

pub const TABLE_HEADING_GAP: f32 = 15.0;
pub const TABLE_RULE_GAP: f32 = 15.0;
pub const TABLE_HEADER_GAP: f32 = 15.0;
pub const TABLE_RULE_WIDTH: f32 = 1.0;
pub const ROW_HEIGHT: f32 = 18.0;

/// One transaction table column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub x: f32,
    /// Longest cell text, in characters, that fits before the next column
    pub max_chars: usize,
}

pub const TABLE_COLUMNS: [Column; 6] = [
    Column {
        title: "Date",
        x: 40.0,
        max_chars: 12,
    },
    Column {
        title: "Type",
        x: 115.0,
        max_chars: 9,
    },
    Column {
        title: "Category",
        x: 175.0,
        max_chars: 14,
    },
    Column {
        title: "Label",
        x: 265.0,
        max_chars: 16,
    },
    Column {
        title: "Amount",
        x: 365.0,
        max_chars: 15,
    },
    Column {
        title: "Note",
        x: 460.0,
        max_chars: 15,
    },
];

/// Monotonic vertical position plus the page it is on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
    page: usize,
}

impl LayoutCursor {
    /// Cursor at the top margin of page one
    pub fn new() -> Self {
        Self {
            y: TOP_MARGIN,
            page: 1,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// 1-based page number
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn advance(&mut self, dy: f32) {
        debug_assert!(dy >= 0.0, "layout cursor only moves down");
        self.y += dy;
    }

    /// Whether the next row would start below the page-bottom threshold
    pub fn needs_page_break(&self) -> bool {
        self.y > PAGE_BOTTOM
    }

    pub fn start_new_page(&mut self) {
        self.page += 1;
        self.y = TOP_MARGIN;
    }
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rows that fit on a page when the first row starts at `start_y`
pub fn rows_fitting(start_y: f32) -> usize {
    if start_y > PAGE_BOTTOM {
        0
    } else {
        ((PAGE_BOTTOM - start_y) / ROW_HEIGHT).floor() as usize + 1
    }
}

/// Row capacity of every page after the first
pub fn rows_per_continuation_page() -> usize {
    rows_fitting(TOP_MARGIN)
}

/// Baseline of the first table row on page one
///
/// Fixed regardless of which optional sections (logo, charts) rendered.
pub fn first_row_y() -> f32 {
    TOP_MARGIN
        + LOGO_BLOCK_HEIGHT
        + TITLE_GAP
        + SUBTITLE_GAP
        + SUMMARY_HEADING_GAP
        + SUMMARY_LINE_HEIGHT * 4.0
        + SUMMARY_TRAILING_GAP
        + CHART_BLOCK_HEIGHT
        + TABLE_HEADING_GAP
        + TABLE_RULE_GAP
        + TABLE_HEADER_GAP
}

/// Pages needed for `rows` table rows when page one holds `first_page_rows`
pub fn page_count_for(rows: usize, first_page_rows: usize) -> usize {
    if rows <= first_page_rows {
        return 1;
    }
    let per_page = rows_per_continuation_page();
    1 + (rows - first_page_rows).div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the same break rule the generator uses
    fn paginate(rows: usize, start_y: f32) -> (usize, Vec<f32>) {
        let mut cursor = LayoutCursor::new();
        cursor.advance(start_y - TOP_MARGIN);
        let mut ys = Vec::new();
        for _ in 0..rows {
            if cursor.needs_page_break() {
                cursor.start_new_page();
            }
            ys.push(cursor.y());
            cursor.advance(ROW_HEIGHT);
        }
        (cursor.page(), ys)
    }

    #[test]
    fn test_continuation_capacity() {
        assert_eq!(rows_per_continuation_page(), 41);
    }

    #[test]
    fn test_first_row_position() {
        assert_eq!(first_row_y(), 657.0);
        assert_eq!(rows_fitting(first_row_y()), 7);
    }

    #[test]
    fn test_fresh_page_table_uses_ceil_pages() {
        let capacity = rows_per_continuation_page();
        for rows in [1usize, 40, 41, 42, 82, 83, 200] {
            let (pages, ys) = paginate(rows, TOP_MARGIN);
            assert_eq!(pages, rows.div_ceil(capacity), "rows = {}", rows);
            assert!(ys.iter().all(|y| *y <= PAGE_BOTTOM));
        }
    }

    #[test]
    fn test_page_count_for_matches_walk() {
        let start = first_row_y();
        let first = rows_fitting(start);
        for rows in [1usize, 3, 7, 8, 48, 49, 100] {
            let (pages, ys) = paginate(rows, start);
            assert_eq!(pages, page_count_for(rows, first), "rows = {}", rows);
            assert!(ys.iter().all(|y| *y <= PAGE_BOTTOM));
        }
    }

    #[test]
    fn test_cursor_resets_on_new_page() {
        let mut cursor = LayoutCursor::new();
        cursor.advance(800.0);
        assert!(cursor.needs_page_break());

        cursor.start_new_page();

        assert_eq!(cursor.page(), 2);
        assert_eq!(cursor.y(), TOP_MARGIN);
        assert!(!cursor.needs_page_break());
    }
}
