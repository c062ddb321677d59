//! Grid state and the filter → sort → paginate pipeline

use super::{Column, GridRow};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// View state owned by one mounted grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub page: usize,
    pub search: String,
    pub page_size: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl GridState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 1,
            search: String::new(),
            page_size: page_size.max(1),
        }
    }

    /// Sorts by `key`, flipping the direction when `key` is already active.
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortSpec {
                key: current.key,
                direction: current.direction.flipped(),
            },
            _ => SortSpec {
                key: key.to_owned(),
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Header click on `column`; ignored for unsortable columns.
    pub fn request_sort<R: GridRow>(&mut self, column: &Column<R>) {
        if column.sortable {
            self.toggle_sort(column.key);
        }
    }

    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.sort
            .as_ref()
            .filter(|sort| sort.key == key)
            .map(|sort| sort.direction)
    }

    /// New search text; the result set changes, so start over at page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Keeps `page` within `[1, max(total_pages, 1)]`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.clamp_page(total_pages);
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.clamp_page(total_pages);
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Rows of the current page after filtering and sorting `rows`. The
    /// stored page is clamped to the filtered set, so a shrink is not undone
    /// when rows come back.
    pub fn view<R: GridRow>(&mut self, rows: &[R]) -> GridView<R> {
        let mut matched = filter_rows(rows, &self.search);
        if let Some(sort) = &self.sort {
            sort_rows(&mut matched, sort);
        }
        let slice = paginate(matched.len(), self.page, self.page_size);
        self.page = slice.page;
        GridView {
            rows: matched[slice.start..slice.end].iter().map(|row| (*row).clone()).collect(),
            page: slice.page,
            total_pages: slice.total_pages,
            total_rows: matched.len(),
            first_index: slice.start,
        }
    }
}

/// What the grid draws for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct GridView<R> {
    pub rows: Vec<R>,
    /// Clamped current page, 1-based.
    pub page: usize,
    pub total_pages: usize,
    /// Rows left after filtering.
    pub total_rows: usize,
    /// Position of `rows[0]` in the filtered set.
    pub first_index: usize,
}

impl<R> GridView<R> {
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "显示 11-20 条，共 42 条"
    pub fn range_label(&self) -> String {
        if self.total_rows == 0 {
            return "共 0 条".to_owned();
        }
        format!(
            "显示 {}-{} 条，共 {} 条",
            self.first_index + 1,
            self.first_index + self.rows.len(),
            self.total_rows
        )
    }
}

/// Rows with at least one field whose string form contains `text`,
/// ignoring case. Only empty text keeps every row; whitespace is matched
/// like any other character.
pub fn filter_rows<'a, R: GridRow>(rows: &'a [R], text: &str) -> Vec<&'a R> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| R::FIELDS.iter().any(|key| row.field(key).contains_lowercase(&needle)))
        .collect()
}

/// Stable sort; rows with equal keys keep their relative order in both directions.
pub fn sort_rows<R: GridRow>(rows: &mut [&R], sort: &SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = a.field(&sort.key).compare(&b.field(&sort.key));
        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Bounds of one page over `len` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSlice {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// `total_pages = ceil(len / page_size)`; `page` is clamped into range.
pub fn paginate(len: usize, page: usize, page_size: usize) -> PageSlice {
    let page_size = page_size.max(1);
    let total_pages = len.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = ((page - 1) * page_size).min(len);
    let end = (start + page_size).min(len);
    PageSlice {
        page,
        total_pages,
        start,
        end,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::grid::{CellContent, CellValue, render_cell};

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: usize,
        name: String,
        v: i64,
    }

    impl Item {
        fn new(id: usize, name: &str, v: i64) -> Self {
            Self {
                id,
                name: name.to_owned(),
                v,
            }
        }
    }

    impl GridRow for Item {
        const FIELDS: &'static [&'static str] = &["name", "v"];

        fn field(&self, key: &str) -> CellValue {
            match key {
                "name" => CellValue::from(&self.name),
                "v" => CellValue::from(self.v),
                _ => CellValue::Empty,
            }
        }

        fn row_key(&self) -> String {
            self.id.to_string()
        }
    }

    fn abc() -> Vec<Item> {
        vec![Item::new(0, "a", 5), Item::new(1, "b", 1), Item::new(2, "c", 5)]
    }

    fn names(view: &GridView<Item>) -> Vec<&str> {
        view.rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_v_then_flip() {
        let rows = abc();
        let mut state = GridState::default();

        state.toggle_sort("v");
        assert_eq!(names(&state.view(&rows)), vec!["b", "a", "c"]);

        state.toggle_sort("v");
        assert_eq!(state.direction_for("v"), Some(SortDirection::Descending));
        assert_eq!(names(&state.view(&rows)), vec!["a", "c", "b"]);

        state.toggle_sort("v");
        assert_eq!(names(&state.view(&rows)), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_other_key_resets_to_ascending() {
        let mut state = GridState::default();
        state.toggle_sort("v");
        state.toggle_sort("v");
        state.toggle_sort("name");
        assert_eq!(
            state.sort,
            Some(SortSpec {
                key: "name".to_owned(),
                direction: SortDirection::Ascending
            })
        );
        assert_eq!(state.direction_for("v"), None);
    }

    #[test]
    fn test_unsortable_column_ignores_requests() {
        let mut state = GridState::default();
        state.request_sort(&Column::<Item>::new("v", "V").unsortable());
        assert_eq!(state.sort, None);
        state.request_sort(&Column::<Item>::new("v", "V"));
        assert_eq!(state.direction_for("v"), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_search_single_row() {
        let mut state = GridState::default();
        state.set_search("b");
        let view = state.view(&abc());
        assert_eq!(names(&view), vec!["b"]);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.total_rows, 1);
    }

    #[test]
    fn test_search_matches_any_field_ignoring_case() {
        let rows = vec![Item::new(0, "Harbour", 12), Item::new(1, "Lake", 3)];
        assert_eq!(filter_rows(&rows, "HAR").len(), 1);
        assert_eq!(filter_rows(&rows, "12")[0].name, "Harbour");
        assert_eq!(filter_rows(&rows, "").len(), 2);
        assert!(filter_rows(&rows, "  ").is_empty());
        assert!(filter_rows(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_shrink_clamps_stored_page() {
        let many: Vec<Item> = (0..25).map(|id| Item::new(id, "row", id as i64)).collect();
        let mut state = GridState::new(10);
        state.next_page(3);
        state.next_page(3);
        assert_eq!(state.page, 3);

        let view = state.view(&many[..5]);
        assert_eq!(view.page, 1);
        assert_eq!(state.page, 1);

        assert_eq!(state.view(&many).page, 1);
    }

    #[test]
    fn test_search_keeps_spaces_in_the_needle() {
        let rows = vec![Item::new(0, "ab", 1), Item::new(1, "a b", 2)];
        let found: Vec<&str> = filter_rows(&rows, "a ").iter().map(|row| row.name.as_str()).collect();
        assert_eq!(found, vec!["a b"]);
    }

    #[test]
    fn test_two_pages_of_two() {
        let rows = abc();
        let mut state = GridState::new(2);
        let first = state.view(&rows);
        assert_eq!(first.total_pages, 2);
        assert_eq!(names(&first), vec!["a", "b"]);
        assert_eq!(first.range_label(), "显示 1-2 条，共 3 条");

        state.next_page(first.total_pages);
        let second = state.view(&rows);
        assert_eq!(names(&second), vec!["c"]);
        assert!(!second.has_next());

        state.next_page(second.total_pages);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_prev_on_first_page_is_noop() {
        let mut state = GridState::new(2);
        state.prev_page(2);
        assert_eq!(state.page, 1);
        state.prev_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_clamps_when_results_shrink() {
        let rows: Vec<Item> = (0..25).map(|i| Item::new(i, &format!("row{i}"), i as i64)).collect();
        let mut state = GridState::new(10);
        state.page = 3;
        assert_eq!(state.view(&rows).rows.len(), 5);

        state.search = "row1".to_owned();
        let view = state.view(&rows);
        // row1 and row10..row19
        assert_eq!(view.total_rows, 11);
        assert_eq!(view.page, 2);
        assert_eq!(view.first_index, 10);

        state.search = "nothing".to_owned();
        let view = state.view(&rows);
        assert_eq!(view.page, 1);
        assert_eq!(view.total_pages, 0);
        assert!(view.is_empty());
        assert_eq!(view.range_label(), "共 0 条");
    }

    #[test]
    fn test_set_search_returns_to_first_page() {
        let mut state = GridState::new(2);
        state.page = 4;
        state.set_search("x");
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let rows = abc();
        let mut state = GridState::default();
        state.toggle_sort("missing");
        assert_eq!(names(&state.view(&rows)), vec!["a", "b", "c"]);
        state.toggle_sort("missing");
        assert_eq!(names(&state.view(&rows)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_paginate_bounds() {
        assert_eq!(
            paginate(0, 1, 10),
            PageSlice {
                page: 1,
                total_pages: 0,
                start: 0,
                end: 0
            }
        );
        assert_eq!(paginate(10, 1, 10).total_pages, 1);
        assert_eq!(paginate(11, 9, 10), PageSlice { page: 2, total_pages: 2, start: 10, end: 11 });
        assert_eq!(paginate(5, 0, 0).end, 1);
    }

    fn item_strategy() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(("[a-dA-D ]{0,4}", -3i64..4), 0..40).prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(id, (name, v))| Item { id, name, v })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_exact_subset(rows in item_strategy(), needle in "[a-dA-D0-9 -]{0,2}") {
            let filtered = filter_rows(&rows, &needle);
            let lower = needle.to_lowercase();
            let expected: Vec<&Item> = rows
                .iter()
                .filter(|row| lower.is_empty()
                    || row.name.to_lowercase().contains(&lower)
                    || row.v.to_string().contains(&lower))
                .collect();
            prop_assert_eq!(filtered, expected);
        }

        #[test]
        fn prop_sort_is_stable(rows in item_strategy(), descending in any::<bool>()) {
            let mut refs: Vec<&Item> = rows.iter().collect();
            let direction = if descending { SortDirection::Descending } else { SortDirection::Ascending };
            sort_rows(&mut refs, &SortSpec { key: "v".to_owned(), direction });

            for pair in refs.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if descending {
                    prop_assert!(a.v >= b.v);
                } else {
                    prop_assert!(a.v <= b.v);
                }
                if a.v == b.v {
                    prop_assert!(a.id < b.id, "tie order changed: {:?} before {:?}", a, b);
                }
            }
        }

        #[test]
        fn prop_double_toggle_restores_ascending(rows in item_strategy()) {
            let mut state = GridState::default();
            state.page_size = rows.len().max(1);
            state.toggle_sort("v");
            let ascending = state.view(&rows).rows;
            state.toggle_sort("v");
            state.toggle_sort("v");
            prop_assert_eq!(state.view(&rows).rows, ascending);
        }

        #[test]
        fn prop_pages_partition_rows(rows in item_strategy(), page_size in 1usize..8, sort in any::<bool>()) {
            let mut state = GridState::new(page_size);
            if sort {
                state.toggle_sort("name");
            }
            let first = state.view(&rows);
            prop_assert_eq!(first.total_pages, rows.len().div_ceil(page_size));

            let mut everything = Vec::new();
            for page in 1..=first.total_pages {
                state.page = page;
                let view = state.view(&rows);
                prop_assert!(!view.rows.is_empty());
                prop_assert!(view.rows.len() <= page_size);
                everything.extend(view.rows);
            }

            let mut expected: Vec<&Item> = rows.iter().collect();
            if let Some(spec) = &state.sort {
                sort_rows(&mut expected, spec);
            }
            let expected: Vec<Item> = expected.into_iter().cloned().collect();
            prop_assert_eq!(everything, expected);
        }

        #[test]
        fn prop_navigation_stays_in_bounds(len in 0usize..50, page_size in 1usize..10, steps in prop::collection::vec(any::<bool>(), 0..30)) {
            let total_pages = len.div_ceil(page_size);
            let mut state = GridState::new(page_size);
            for forward in steps {
                if forward {
                    state.next_page(total_pages);
                } else {
                    state.prev_page(total_pages);
                }
                prop_assert!(state.page >= 1);
                prop_assert!(state.page <= total_pages.max(1));
            }
        }

        #[test]
        fn prop_cell_without_formatter_is_string_form(rows in item_strategy()) {
            let column = Column::<Item>::new("v", "V");
            let labelled = Column::<Item>::new("v", "V").format(|row: &Item| CellContent::text(format!("#{}", row.v)));
            let missing = Column::<Item>::new("nope", "?");
            for row in &rows {
                prop_assert_eq!(render_cell(&column, row), CellContent::Text(row.v.to_string()));
                prop_assert_eq!(render_cell(&labelled, row), CellContent::Text(format!("#{}", row.v)));
                prop_assert_eq!(render_cell(&missing, row), CellContent::Text(String::new()));
            }
        }
    }
}
