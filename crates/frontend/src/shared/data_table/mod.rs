//! Generic paginated table.
//!
//! The page owns the rows and pagination; the table owns only its sort state.
//! Sorting is applied to the rows it was handed, i.e. the loaded page.

pub mod cells;
pub mod column;
pub mod sort;
pub mod view;

pub use column::{CellContext, CellRenderer, ColumnSpec, ExpandedRenderer};
pub use sort::{sort_records, SortDirection, SortState};
pub use view::DataTable;

/// What the table body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Rows,
}

/// Loading wins over empty; rows are shown only when not loading.
pub fn body_state(loading: bool, row_count: usize) -> BodyState {
    if loading {
        BodyState::Loading
    } else if row_count == 0 {
        BodyState::Empty
    } else {
        BodyState::Rows
    }
}

/// "Showing 11–20 of 57" line under the table. `None` when there is nothing to show.
pub fn range_caption(
    current_page: usize,
    per_page: usize,
    total_items: usize,
    row_count: usize,
) -> Option<String> {
    if total_items == 0 || row_count == 0 || per_page == 0 {
        return None;
    }
    // Значения приходят с сервера как есть
    let first = (current_page.max(1) - 1).saturating_mul(per_page).saturating_add(1);
    if first > total_items {
        return None;
    }
    let last = first.saturating_add(row_count - 1).min(total_items);
    Some(format!("Showing {}–{} of {}", first, last, total_items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_state_precedence() {
        assert_eq!(body_state(true, 0), BodyState::Loading);
        assert_eq!(body_state(true, 5), BodyState::Loading);
        assert_eq!(body_state(false, 0), BodyState::Empty);
        assert_eq!(body_state(false, 5), BodyState::Rows);
    }

    #[test]
    fn test_range_caption() {
        assert_eq!(range_caption(2, 10, 57, 10).as_deref(), Some("Showing 11–20 of 57"));
        assert_eq!(range_caption(6, 10, 57, 7).as_deref(), Some("Showing 51–57 of 57"));
        assert_eq!(range_caption(1, 10, 0, 0), None);
    }

    #[test]
    fn test_range_caption_with_absurd_metadata() {
        assert_eq!(range_caption(usize::MAX, usize::MAX, 57, 10), None);
        assert_eq!(range_caption(0, 10, 5, 5).as_deref(), Some("Showing 1–5 of 5"));
        let huge = range_caption(2, usize::MAX, usize::MAX, 3).unwrap();
        assert_eq!(huge, format!("Showing {}–{} of {}", usize::MAX, usize::MAX, usize::MAX));
    }
}
