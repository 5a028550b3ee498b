//! DELETE assembly.

use crate::builder::QueryBuilder;
use crate::compiler::conditions::{self, Bindings, ValueMode};
use crate::error::{QueryError, QueryResult};

/// An unconditioned delete is refused: wiping a table is a job for
/// TRUNCATE through the database administrator, not this compiler.
pub(crate) fn build(query: &QueryBuilder, bindings: &mut Bindings) -> QueryResult<String> {
    if query.conditions.is_empty() {
        return Err(QueryError::config(
            "refusing to compile a delete without conditions; use TRUNCATE \
             through your database administrator to empty a table",
        ));
    }

    let fragment = conditions::parse(
        &query.conditions,
        query,
        Some(query.table.as_str()),
        None,
        None,
        ValueMode::Bind,
        bindings,
    );
    if fragment.is_empty() {
        return Err(QueryError::config(
            "delete conditions compiled to an empty predicate",
        ));
    }

    Ok(format!("DELETE FROM {} WHERE {}", query.table, fragment))
}
