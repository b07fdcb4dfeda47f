//! Request and response contracts shared by the list endpoints and the
//! client-side list controller.

use serde::{Deserialize, Serialize};

/// Direction of a single sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_asc(asc: bool) -> Self {
        if asc { Self::Asc } else { Self::Desc }
    }

    pub fn is_asc(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Return the opposite sort direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One entry of the ordered sort list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(rename = "SortField")]
    pub field: String,
    #[serde(rename = "SortAsc", with = "sort_asc")]
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

mod sort_asc {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SortDirection;

    pub fn serialize<S: Serializer>(direction: &SortDirection, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(direction.is_asc())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SortDirection, D::Error> {
        bool::deserialize(d).map(SortDirection::from_asc)
    }
}

/// Describes one page request: size, index, ordered sorts and free-text search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagingSpec {
    /// Rows per page; `None` returns every matching row.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Zero-based page number; `None` is page 0.
    #[serde(default)]
    pub page_index: Option<usize>,
    #[serde(default)]
    pub sorts: Vec<Sort>,
    #[serde(default)]
    pub search_text: Option<String>,
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl PagingSpec {
    pub fn paged(page_size: usize) -> Self {
        Self {
            page_size: Some(page_size),
            ..Self::default()
        }
    }

    pub fn page(mut self, page_index: usize) -> Self {
        self.page_index = Some(page_index);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn search<I, S>(mut self, text: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_text = Some(text.into());
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Page size when paging applies. A zero size is treated as unpaged.
    pub fn effective_page_size(&self) -> Option<usize> {
        self.page_size.filter(|size| *size > 0)
    }

    /// Page index that applies to the request; always 0 when unpaged.
    pub fn effective_page_index(&self) -> usize {
        match self.effective_page_size() {
            Some(_) => self.page_index.unwrap_or(0),
            None => 0,
        }
    }

    /// Trimmed search text, `None` when empty or when no search field is given.
    pub fn search_term(&self) -> Option<&str> {
        if self.search_fields.is_empty() {
            return None;
        }
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Number of pages for `total_count` rows.
///
/// An empty result still has one (empty) page, and an unpaged request always
/// reports a single page.
pub fn total_pages(total_count: usize, page_size: Option<usize>) -> usize {
    match page_size.filter(|size| *size > 0) {
        Some(size) => total_count.div_ceil(size).max(1),
        None => 1,
    }
}

/// One page of rows together with the count of all matching rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageResult<T> {
    pub result_list: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    pub fn from_rows(rows: Vec<T>, total_count: usize, page_size: Option<usize>) -> Self {
        Self {
            result_list: rows,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    pub fn empty() -> Self {
        Self::from_rows(Vec::new(), 0, None)
    }

    /// Converts every row, failing on the first conversion error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PageResult<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(PageResult {
            result_list: self
                .result_list
                .into_iter()
                .map(f)
                .collect::<Result<Vec<_>, E>>()?,
            total_count: self.total_count,
            total_pages: self.total_pages,
        })
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            result_list: self.result_list.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, Some(10)), 3);
        assert_eq!(total_pages(20, Some(10)), 2);
        assert_eq!(total_pages(1, Some(10)), 1);
    }

    #[test]
    fn total_pages_is_one_for_empty_or_unpaged() {
        assert_eq!(total_pages(0, Some(10)), 1);
        assert_eq!(total_pages(0, None), 1);
        assert_eq!(total_pages(250, None), 1);
        assert_eq!(total_pages(250, Some(0)), 1);
    }

    #[test]
    fn page_index_ignored_when_unpaged() {
        let spec = PagingSpec::default().page(4);
        assert_eq!(spec.effective_page_index(), 0);
        assert_eq!(PagingSpec::paged(10).page(4).effective_page_index(), 4);
    }

    #[test]
    fn search_term_requires_text_and_fields() {
        assert_eq!(
            PagingSpec::default().search("  abc ", ["Name"]).search_term(),
            Some("abc")
        );
        assert_eq!(
            PagingSpec::default()
                .search("abc", Vec::<String>::new())
                .search_term(),
            None
        );
        assert_eq!(PagingSpec::default().search("   ", ["Name"]).search_term(), None);
    }

    #[test]
    fn serializes_with_wire_names() {
        let spec = PagingSpec::paged(10).page(1).sort(Sort::desc("CreatedAt"));
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["PageSize"], 10);
        assert_eq!(value["PageIndex"], 1);
        assert_eq!(value["Sorts"][0]["SortField"], "CreatedAt");
        assert_eq!(value["Sorts"][0]["SortAsc"], false);

        let page = PageResult::from_rows(vec![1, 2], 12, Some(2));
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["ResultList"], serde_json::json!([1, 2]));
        assert_eq!(value["TotalCount"], 12);
        assert_eq!(value["TotalPages"], 6);
    }
}
