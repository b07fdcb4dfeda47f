use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::paging::{PagingSpec, Sort, SortDirection};

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Query-string form of a [`PagingSpec`].
///
/// Multi-column sorts repeat `sortField`/`sortAsc` pairs in order; a missing
/// `sortAsc` means ascending. A missing `pageSize` requests every row.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    #[validate(range(min = 1, max = 1000))]
    pub page_size: Option<usize>,
    pub page_index: Option<usize>,
    #[serde(default)]
    pub sort_field: Vec<String>,
    #[serde(default)]
    pub sort_asc: Vec<bool>,
    pub search_text: Option<String>,
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl ListQueryParams {
    pub fn from_spec(spec: &PagingSpec) -> Self {
        Self {
            page_size: spec.page_size,
            page_index: spec.page_index,
            sort_field: spec.sorts.iter().map(|s| s.field.clone()).collect(),
            sort_asc: spec.sorts.iter().map(|s| s.direction.is_asc()).collect(),
            search_text: spec.search_text.clone(),
            search_fields: spec.search_fields.clone(),
        }
    }

    /// Converts to a [`PagingSpec`], searching `default_search_fields` when the
    /// request names none.
    pub fn into_spec(self, default_search_fields: Vec<String>) -> PagingSpec {
        let sorts = self
            .sort_field
            .into_iter()
            .enumerate()
            .map(|(i, field)| {
                let asc = self.sort_asc.get(i).copied().unwrap_or(true);
                Sort::new(field, SortDirection::from_asc(asc))
            })
            .collect();

        let search_fields = if self.search_fields.is_empty() {
            default_search_fields
        } else {
            self.search_fields
        };

        PagingSpec {
            page_size: self.page_size,
            page_index: self.page_index,
            sorts,
            search_text: self.search_text,
            search_fields,
        }
    }

    /// Key/value pairs in query-string order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(size) = self.page_size {
            pairs.push(("pageSize", size.to_string()));
        }
        if let Some(index) = self.page_index {
            pairs.push(("pageIndex", index.to_string()));
        }
        for (i, field) in self.sort_field.iter().enumerate() {
            pairs.push(("sortField", field.clone()));
            let asc = self.sort_asc.get(i).copied().unwrap_or(true);
            pairs.push(("sortAsc", asc.to_string()));
        }
        if let Some(text) = self.search_text.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("searchText", text.to_string()));
        }
        for field in &self.search_fields {
            pairs.push(("searchFields", field.clone()));
        }
        pairs
    }
}
