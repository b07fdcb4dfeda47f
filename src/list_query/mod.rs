//! Paged, sorted and searched list retrieval over a single relation.
//!
//! A [`ListEntity`] carries a compile-time [`EntityDescriptor`] naming its
//! relation, the columns clients may sort and search by, its default order and
//! a tie-breaking key. Request field names are only ever looked up in that
//! descriptor; nothing from a [`PagingSpec`] is interpolated into SQL.

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::paging::{PageResult, PagingSpec, SortDirection};
use crate::repository::errors::RepositoryResult;

pub mod sql;

pub use sql::{ListSql, Window, build_list_sql};

/// A logical field exposed to clients and the column backing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    /// Name used on the wire (`SortField`, `SearchFields`).
    pub field: &'static str,
    /// Column name in the relation.
    pub column: &'static str,
    /// Whether free-text search may match this column.
    pub searchable: bool,
}

impl Column {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            searchable: false,
        }
    }

    pub const fn searchable(field: &'static str, column: &'static str) -> Self {
        Self {
            field,
            column,
            searchable: true,
        }
    }
}

/// Static description of a listable relation.
#[derive(Clone, Copy, Debug)]
pub struct EntityDescriptor {
    /// Table or view rows are read from.
    pub source: &'static str,
    /// Columns selected for each row.
    pub select: &'static [&'static str],
    /// Allow-list of sortable/searchable fields.
    pub columns: &'static [Column],
    /// Logical fields and directions applied when a request has no valid sort.
    pub default_sort: &'static [(&'static str, SortDirection)],
    /// Unique column appended ascending to every ordering.
    pub tie_breaker: &'static str,
}

impl EntityDescriptor {
    /// Looks a logical field up in the allow-list, ignoring ASCII case.
    pub fn column(&self, field: &str) -> Option<&'static Column> {
        let columns: &'static [Column] = self.columns;
        columns
            .iter()
            .find(|column| column.field.eq_ignore_ascii_case(field.trim()))
    }

    /// Logical names of every searchable field, in descriptor order.
    pub fn searchable_fields(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| column.searchable)
            .map(|column| column.field.to_string())
            .collect()
    }
}

/// A row type that can be listed through [`ListQueryEngine`].
pub trait ListEntity: QueryableByName<Sqlite> + Sized + 'static {
    const DESCRIPTOR: EntityDescriptor;
}

/// Value bound to a `?` placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Integer(i32),
    BigInt(i64),
    Text(String),
}

impl From<i32> for BindValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Caller-built filter condition with its bind values.
///
/// The SQL text is trusted as given; values must go through [`Predicate::bind`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Predicate {
    sql: String,
    binds: Vec<BindValue>,
}

impl Predicate {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<BindValue>) -> Self {
        self.binds.push(value.into());
        self
    }

    /// Conjunction of both conditions; an empty side is dropped.
    pub fn and(self, other: Predicate) -> Predicate {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let mut binds = self.binds;
        binds.extend(other.binds);
        Predicate {
            sql: format!("({}) AND ({})", self.sql, other.sql),
            binds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}

#[derive(QueryableByName)]
struct CountRow {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

fn bind_all<'f>(
    mut query: BoxedSqlQuery<'f, Sqlite, SqlQuery>,
    binds: &[BindValue],
) -> BoxedSqlQuery<'f, Sqlite, SqlQuery> {
    for value in binds {
        query = match value.clone() {
            BindValue::Integer(v) => query.bind::<Integer, _>(v),
            BindValue::BigInt(v) => query.bind::<BigInt, _>(v),
            BindValue::Text(v) => query.bind::<Text, _>(v),
        };
    }
    query
}

/// Runs the rows and count queries for one page request.
pub struct ListQueryEngine<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> ListQueryEngine<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Fetches the requested page of `E` rows matching `filter` and the search.
    ///
    /// A page past the end yields an empty list with the real totals.
    pub fn fetch<E: ListEntity>(
        &mut self,
        filter: Option<&Predicate>,
        spec: &PagingSpec,
    ) -> RepositoryResult<PageResult<E>> {
        let list_sql = build_list_sql(&E::DESCRIPTOR, filter, spec);

        let total = bind_all(
            diesel::sql_query(list_sql.count_sql.as_str()).into_boxed(),
            &list_sql.binds,
        )
        .get_result::<CountRow>(self.conn)?
        .count;
        let total = usize::try_from(total).unwrap_or_default();

        let rows = match list_sql.window {
            Window::OutOfRange => Vec::new(),
            Window::All => bind_all(
                diesel::sql_query(list_sql.rows_sql.as_str()).into_boxed(),
                &list_sql.binds,
            )
            .load::<E>(self.conn)?,
            Window::Page { limit, offset } => bind_all(
                diesel::sql_query(list_sql.rows_sql.as_str()).into_boxed(),
                &list_sql.binds,
            )
            .bind::<BigInt, _>(limit)
            .bind::<BigInt, _>(offset)
            .load::<E>(self.conn)?,
        };

        log::debug!(
            "Listed {} of {total} rows from {} (page {})",
            rows.len(),
            E::DESCRIPTOR.source,
            spec.effective_page_index()
        );

        Ok(PageResult::from_rows(
            rows,
            total,
            spec.effective_page_size(),
        ))
    }
}
