//! ORDER BY and LIMIT assembly.

use crate::ast::SortDirection;
use crate::builder::QueryBuilder;
use crate::compiler::quote_ident;
use crate::error::{QueryError, QueryResult};

pub(crate) fn resolve_order(query: &QueryBuilder) -> String {
    let mut clauses: Vec<String> = Vec::new();
    for (keyword, fields) in &query.order {
        let direction = SortDirection::parse(keyword);
        for field in fields {
            clauses.push(format!("{} {}", quote_ident(field), direction.as_str()));
        }
    }
    format!(" ORDER BY {}", clauses.join(", "))
}

pub(crate) fn resolve_limit(query: &QueryBuilder) -> QueryResult<String> {
    let Some(limit) = &query.limit else {
        return Ok(String::new());
    };
    let Some(offset) = limit.first() else {
        return Err(QueryError::config(
            "limit is misconfigured: expected [offset] or [offset, count]",
        ));
    };
    let mut out = format!(" LIMIT {offset}");
    if let Some(count) = limit.get(1).filter(|count| **count != 0) {
        out.push_str(&format!(", {count}"));
    }
    Ok(out)
}
