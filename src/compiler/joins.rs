//! JOIN clause assembly.

use crate::ast::Connector;
use crate::builder::QueryBuilder;
use crate::compiler::conditions::{self, Bindings, ValueMode};
use crate::compiler::quote_ident;

/// Emit one `<TYPE> JOIN` clause per declared join, in declaration order.
/// ON conditions compile in column-reference mode with no default
/// qualifier.
pub(crate) fn resolve(query: &QueryBuilder, bindings: &mut Bindings) -> String {
    let mut out = String::new();
    for (alias, spec) in &query.joins {
        let resolved = spec.table.as_deref().unwrap_or(alias);
        out.push(' ');
        out.push_str(spec.kind.as_str());
        out.push_str(" JOIN ");
        out.push_str(&quote_ident(resolved));
        if spec.table.is_some() {
            out.push(' ');
            out.push_str(alias);
        }
        out.push_str(" ON ");
        out.push_str(&conditions::parse(
            &spec.on,
            query,
            None,
            Some(Connector::And),
            None,
            ValueMode::ColumnRef,
            bindings,
        ));
    }
    out
}
