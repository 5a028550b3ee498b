//! SQL assembly: one build function per operation kind, composed from the
//! field resolver, condition parser, join compiler and order/limit
//! compiler.

pub mod conditions;
pub mod delete;
pub mod fields;
pub mod insert;
pub mod joins;
pub mod order;
pub mod select;
pub mod update;

#[cfg(test)]
mod tests;

use crate::ast::QueryKind;
use crate::builder::QueryBuilder;
use crate::error::QueryResult;
use conditions::Bindings;

pub(crate) fn compile(query: &QueryBuilder, bindings: &mut Bindings) -> QueryResult<String> {
    match query.kind() {
        QueryKind::Select => select::build(query, bindings),
        QueryKind::Insert => insert::build(query, bindings),
        QueryKind::Update => update::build(query, bindings),
        QueryKind::Delete => delete::build(query, bindings),
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
