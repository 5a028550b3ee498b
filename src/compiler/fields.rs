//! Field resolution: qualified SELECT/INSERT column lists.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{FieldDef, FieldKey};
use crate::builder::QueryBuilder;
use crate::compiler::quote_ident;

/// Raw-expression wrapper: `FNC<name>(<args>)FNC`.
static RAW_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^FNC[a-zA-Z0-9]+\(.+\)FNC$").expect("raw marker pattern"));

/// Unwrap `value` if it carries the raw-expression marker.
fn raw_expression(value: &str) -> Option<&str> {
    RAW_EXPR
        .is_match(value)
        .then(|| &value[3..value.len() - 3])
}

/// Resolve the accumulated field specification into a comma-joined list of
/// qualified column expressions.
pub(crate) fn resolve(query: &QueryBuilder) -> String {
    let entries = query.fields.entries();
    let mut out: Vec<String> = Vec::new();

    for (key, def) in entries {
        match def {
            // a lone `*` expands to the primary table and every joined one
            FieldDef::Column(column) if column.as_str() == "*" && entries.len() == 1 => {
                out.push(format!("{}.*", quote_ident(&query.table)));
                for joined in query.join_aliases() {
                    out.push(format!("{}.*", quote_ident(joined)));
                }
            }
            FieldDef::Column(column) => {
                if let Some(expr) = raw_expression(column) {
                    out.push(expr.to_string());
                    continue;
                }
                out.push(resolve_scalar(query, key, column));
            }
            FieldDef::Aliased(subs) => {
                let segments: Vec<String> = subs
                    .iter()
                    .map(|(mask, column)| {
                        let mut segment = String::new();
                        if let FieldKey::Name(table) = key {
                            segment.push_str(&quote_ident(table));
                            segment.push('.');
                        }
                        segment.push_str(&quote_ident(column));
                        if let FieldKey::Name(alias) = mask {
                            segment.push_str(" AS ");
                            segment.push_str(&quote_ident(alias));
                        }
                        segment
                    })
                    .collect();
                out.push(segments.join(","));
            }
        }
    }

    out.join(",")
}

fn resolve_scalar(query: &QueryBuilder, key: &FieldKey, column: &str) -> String {
    match key {
        FieldKey::Name(name) => {
            if column == "*" {
                if query.is_known_table(name) {
                    format!("{}.*", quote_ident(name))
                } else {
                    format!("{}.*", quote_ident(&query.table))
                }
            } else {
                let mut segment = String::new();
                if query.is_known_table(name) {
                    segment.push_str(&quote_ident(name));
                    segment.push('.');
                }
                segment.push_str(&quote_ident(column));
                segment.push_str(" AS ");
                segment.push_str(&quote_ident(name));
                segment
            }
        }
        FieldKey::Pos(_) => {
            if column == "*" {
                format!("{}.*", quote_ident(&query.table))
            } else {
                quote_ident(column)
            }
        }
    }
}
