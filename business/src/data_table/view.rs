use std::ops::Range;

use super::{Column, TableRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [Self; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    pub fn rows(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.rows() == rows)
    }
}

/// Indices of rows where at least one column's raw value contains `query`,
/// ignoring case. An empty query keeps every row.
pub fn filter_rows<R: TableRow>(columns: &[Column<R>], rows: &[R], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return (0..rows.len()).collect();
    }
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            columns
                .iter()
                .any(|column| column.resolve(row).matches_lowercase(&needle))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Always at least one page, even for an empty table.
pub fn total_pages(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Positions in the filtered list that `page` shows.
pub fn page_window(rows: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(rows);
    let end = start.saturating_add(page_size).min(rows);
    start..end
}

/// Page that keeps the first visible row on screen after a page-size change.
pub fn page_after_resize(page: usize, old_size: usize, new_size: usize) -> usize {
    let first_row = page.saturating_sub(1) * old_size;
    first_row / new_size.max(1) + 1
}

#[derive(Debug, Clone)]
struct FilterCache {
    revision: u64,
    len: usize,
    query: Option<String>,
    indices: Vec<usize>,
}

/// Search, page and page-size state for one table instance.
#[derive(Debug, Clone)]
pub struct TableView {
    search_query: String,
    current_page: usize,
    page_size: PageSize,
    cache: Option<FilterCache>,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
            page_size: PageSize::default(),
            cache: None,
        }
    }
}

/// What one frame of a table shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// Indices into the data, in display order.
    pub rows: Vec<usize>,
    pub filtered: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl PageSlice {
    /// 1-based position of the first visible row, 0 when empty.
    pub fn from(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    pub fn to(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.from() + self.rows.len() - 1
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn is_paginated(&self) -> bool {
        self.filtered > self.page_size
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.from(),
            self.to(),
            self.filtered
        )
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Any change of query goes back to page 1.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.search_query {
            self.search_query = query;
            self.current_page = 1;
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Clamped against the row count on the next [`TableView::slice`].
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        if size != self.page_size {
            self.current_page =
                page_after_resize(self.current_page, self.page_size.rows(), size.rows());
            self.page_size = size;
        }
    }

    /// Refilters when the data revision, length or query changed.
    fn filtered<R: TableRow>(
        &mut self,
        columns: &[Column<R>],
        rows: &[R],
        revision: u64,
        search_enabled: bool,
    ) -> &[usize] {
        let query = search_enabled.then(|| self.search_query.clone());
        let fresh = self.cache.as_ref().is_some_and(|cache| {
            cache.revision == revision && cache.len == rows.len() && cache.query == query
        });

        if !fresh {
            let indices = match query.as_deref() {
                Some(query) => filter_rows(columns, rows, query),
                None => (0..rows.len()).collect(),
            };
            self.cache = Some(FilterCache {
                revision,
                len: rows.len(),
                query,
                indices,
            });
        }

        self.cache
            .as_ref()
            .map(|cache| cache.indices.as_slice())
            .unwrap_or_default()
    }

    /// Filters (when the data revision or query changed), clamps the current page
    /// and returns the rows to draw.
    pub fn slice<R: TableRow>(
        &mut self,
        columns: &[Column<R>],
        rows: &[R],
        revision: u64,
        search_enabled: bool,
    ) -> PageSlice {
        let size = self.page_size.rows();
        let page = self.current_page;
        let indices = self.filtered(columns, rows, revision, search_enabled);

        let total_pages = total_pages(indices.len(), size);
        let current_page = clamp_page(page, total_pages);
        let slice = PageSlice {
            rows: indices[page_window(indices.len(), current_page, size)].to_vec(),
            filtered: indices.len(),
            current_page,
            total_pages,
            page_size: size,
        };
        self.current_page = current_page;
        slice
    }

    /// Every filtered row as a single page, for tables drawn without pagination.
    pub fn unpaginated<R: TableRow>(
        &mut self,
        columns: &[Column<R>],
        rows: &[R],
        revision: u64,
        search_enabled: bool,
    ) -> PageSlice {
        let indices = self.filtered(columns, rows, revision, search_enabled).to_vec();
        self.current_page = 1;
        PageSlice {
            filtered: indices.len(),
            page_size: indices.len().max(1),
            rows: indices,
            current_page: 1,
            total_pages: 1,
        }
    }
}
