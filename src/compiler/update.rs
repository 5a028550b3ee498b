//! UPDATE assembly.

use crate::builder::QueryBuilder;
use crate::compiler::conditions::{self, Bindings, ValueMode};
use crate::compiler::quote_ident;
use crate::error::QueryResult;

pub(crate) fn build(query: &QueryBuilder, bindings: &mut Bindings) -> QueryResult<String> {
    let mut sql = String::from("UPDATE ");
    sql.push_str(&query.table);
    sql.push_str(" SET ");

    let assignments: Vec<String> = query
        .raw_values()
        .iter()
        .map(|(key, _)| format!("{} = :{key}", quote_ident(key)))
        .collect();
    sql.push_str(&assignments.join(", "));

    if !query.conditions.is_empty() {
        let fragment = conditions::parse(
            &query.conditions,
            query,
            Some(query.table.as_str()),
            None,
            None,
            ValueMode::Bind,
            bindings,
        );
        if !fragment.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
        }
    }

    Ok(sql)
}
