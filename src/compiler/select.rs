//! SELECT assembly.

use crate::builder::QueryBuilder;
use crate::compiler::conditions::{self, Bindings, ValueMode};
use crate::compiler::{fields, joins, order};
use crate::error::QueryResult;

pub(crate) fn build(query: &QueryBuilder, bindings: &mut Bindings) -> QueryResult<String> {
    let mut sql = String::from("SELECT ");
    if query.fields.is_empty() {
        sql.push('*');
    } else {
        sql.push_str(&fields::resolve(query));
    }
    sql.push_str(" FROM ");
    sql.push_str(&query.table);

    sql.push_str(&joins::resolve(query, bindings));

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

    if !query.order.is_empty() {
        sql.push_str(&order::resolve_order(query));
    }
    sql.push_str(&order::resolve_limit(query)?);

    Ok(sql)
}
