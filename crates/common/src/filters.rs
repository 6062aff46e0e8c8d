//! Equality filters folded into a parameterized `WHERE` clause
//!
//! Column names are `&'static str` so they can only come from code;
//! values are always bound as parameters.

use sqlx::{Postgres, QueryBuilder};

/// Ordered list of `column = value` predicates combined with `AND`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    clauses: Vec<(&'static str, String)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value`. Absent or blank values are skipped.
    pub fn eq(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.clauses.push((column, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Append ` WHERE c1 = $1 AND c2 = $2 ...` to the builder; no-op when empty
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, (column, value)) in self.clauses.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(*column);
            builder.push(" = ");
            builder.push_bind(value.clone());
        }
    }
}
