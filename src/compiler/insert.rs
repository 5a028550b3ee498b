//! INSERT assembly.

use crate::builder::QueryBuilder;
use crate::compiler::conditions::Bindings;
use crate::compiler::fields;
use crate::error::QueryResult;

/// Column list comes from the field resolver; placeholders come from the
/// accumulated value keys, which the caller is expected to keep aligned.
pub(crate) fn build(query: &QueryBuilder, _bindings: &mut Bindings) -> QueryResult<String> {
    let mut sql = String::from("INSERT INTO ");
    sql.push_str(&query.table);
    sql.push_str(" (");
    sql.push_str(&fields::resolve(query));
    sql.push_str(") VALUES (");
    let placeholders: Vec<String> = query
        .raw_values()
        .iter()
        .map(|(key, _)| format!(":{key}"))
        .collect();
    sql.push_str(&placeholders.join(", "));
    sql.push(')');
    Ok(sql)
}
