//! SQL text generation for list queries.

use crate::list_query::{BindValue, EntityDescriptor, Predicate};
use crate::paging::{PagingSpec, SortDirection};

/// Which slice of the ordered rows the rows query returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Window {
    /// Unpaged: every matching row.
    All,
    /// `LIMIT ? OFFSET ?`, bound after the filter values.
    Page { limit: i64, offset: i64 },
    /// The offset cannot be represented; the page is necessarily empty.
    OutOfRange,
}

/// Rows and count statements sharing one set of filter binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSql {
    pub rows_sql: String,
    pub count_sql: String,
    pub binds: Vec<BindValue>,
    pub window: Window,
}

/// Quote an identifier with double quotes, doubling embedded quotes.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Escape `LIKE` wildcards so the search text matches literally.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Resolves the requested sorts against the allow-list.
///
/// Unknown fields are dropped. When nothing valid remains the descriptor's
/// default sort applies. The tie-breaker is appended ascending unless the
/// ordering already contains it.
pub(crate) fn effective_sorts(
    descriptor: &EntityDescriptor,
    spec: &PagingSpec,
) -> Vec<(&'static str, SortDirection)> {
    let mut sorts: Vec<(&'static str, SortDirection)> = Vec::new();

    for sort in &spec.sorts {
        match descriptor.column(&sort.field) {
            Some(column) => {
                if !sorts.iter().any(|(name, _)| *name == column.column) {
                    sorts.push((column.column, sort.direction));
                }
            }
            None => log::warn!(
                "Ignoring unknown sort field `{}` for {}",
                sort.field,
                descriptor.source
            ),
        }
    }

    if sorts.is_empty() {
        sorts.extend(
            descriptor
                .default_sort
                .iter()
                .filter_map(|(field, direction)| {
                    descriptor.column(field).map(|c| (c.column, *direction))
                }),
        );
    }

    if !sorts.iter().any(|(name, _)| *name == descriptor.tie_breaker) {
        sorts.push((descriptor.tie_breaker, SortDirection::Asc));
    }

    sorts
}

/// Case-insensitive substring match of the search text over the searchable
/// fields named by the request.
///
/// Both sides are folded with `str::to_lowercase`; the column side through the
/// `fold_case` function registered in [`crate::db::register_sql_functions`].
pub(crate) fn search_predicate(
    descriptor: &EntityDescriptor,
    spec: &PagingSpec,
) -> Option<Predicate> {
    let term = spec.search_term()?;

    let mut columns: Vec<&'static str> = Vec::new();
    for field in &spec.search_fields {
        match descriptor.column(field) {
            Some(column) if column.searchable => {
                if !columns.contains(&column.column) {
                    columns.push(column.column);
                }
            }
            _ => log::warn!(
                "Ignoring unsearchable field `{field}` for {}",
                descriptor.source
            ),
        }
    }

    if columns.is_empty() {
        return None;
    }

    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let sql = columns
        .iter()
        .map(|column| {
            format!(
                "fold_case(CAST({} AS TEXT)) LIKE ? ESCAPE '\\'",
                quote_identifier(column)
            )
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    Some(
        columns
            .iter()
            .fold(Predicate::new(sql), |predicate, _| {
                predicate.bind(pattern.as_str())
            }),
    )
}

fn window(spec: &PagingSpec) -> Window {
    let Some(size) = spec.effective_page_size() else {
        return Window::All;
    };
    let offset = size
        .checked_mul(spec.effective_page_index())
        .and_then(|offset| i64::try_from(offset).ok());
    match (i64::try_from(size), offset) {
        (Ok(limit), Some(offset)) => Window::Page { limit, offset },
        _ => Window::OutOfRange,
    }
}

/// Builds the rows and count statements for `spec` over `descriptor`.
pub fn build_list_sql(
    descriptor: &EntityDescriptor,
    filter: Option<&Predicate>,
    spec: &PagingSpec,
) -> ListSql {
    let condition = match (filter.cloned(), search_predicate(descriptor, spec)) {
        (Some(filter), Some(search)) => filter.and(search),
        (Some(filter), None) => filter,
        (None, Some(search)) => search,
        (None, None) => Predicate::default(),
    };

    let source = quote_identifier(descriptor.source);
    let where_clause = if condition.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", condition.sql())
    };

    let select = descriptor
        .select
        .iter()
        .map(|column| quote_identifier(column))
        .collect::<Vec<_>>()
        .join(", ");
    let order_by = effective_sorts(descriptor, spec)
        .into_iter()
        .map(|(column, direction)| format!("{} {}", quote_identifier(column), direction.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");

    let window = window(spec);
    let mut rows_sql = format!("SELECT {select} FROM {source}{where_clause} ORDER BY {order_by}");
    if matches!(window, Window::Page { .. }) {
        rows_sql.push_str(" LIMIT ? OFFSET ?");
    }
    let count_sql = format!("SELECT COUNT(*) AS count FROM {source}{where_clause}");

    ListSql {
        rows_sql,
        count_sql,
        binds: condition.binds().to_vec(),
        window,
    }
}
