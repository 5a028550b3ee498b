//! Recursive condition compilation: WHERE/ON fragments plus named
//! bindings.

use crate::ast::{ConditionKey, ConditionNode, ConditionSet, Connector, Value};
use crate::builder::QueryBuilder;
use crate::compiler::quote_ident;

/// How leaf values are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueMode {
    /// Trim, escape and store under a generated binding name; the predicate
    /// references the name as a placeholder.
    Bind,
    /// Read the value as a `[table.]column` reference. Used for JOIN ON
    /// clauses; no binding is created.
    ColumnRef,
}

/// Collected name-to-value bindings, unique within one compiled query.
#[derive(Debug, Default)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `base`, suffixing `_2`, `_3`, ... when the name
    /// is already taken.
    fn bind(&mut self, base: String, value: Value) -> String {
        let mut name = base.clone();
        let mut n = 1usize;
        while self.entries.iter().any(|(existing, _)| *existing == name) {
            n += 1;
            name = format!("{base}_{n}");
        }
        self.entries.push((name.clone(), value));
        name
    }

    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }
}

/// Operator tokens searched in declared order. The scan order is part of
/// the observable behavior: `=` shadows `!=`, `<=` and `>=`, and `LIKE`
/// shadows `NOT LIKE`.
const OPERATORS: [&str; 11] = [
    "LIKE", "=", "!=", "<", ">", "<=", ">=", "NOT", "NOT LIKE", "JSON", "REGEXP",
];

/// A `[table.]field[ operator]` key, split.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct FieldRef<'a> {
    pub table: Option<&'a str>,
    pub field: &'a str,
    pub operator: &'a str,
}

pub(crate) fn parse_field(raw: &str) -> FieldRef<'_> {
    let mut operator = "=";
    for token in OPERATORS {
        // A token at position 0 never matches: the field portion always
        // comes first, so field names like NOTES stay plain equality.
        if raw.find(token).is_some_and(|pos| pos > 0) {
            operator = token;
            break;
        }
    }
    let portion = match raw.split_once(' ') {
        Some((head, _)) => head,
        None => raw,
    };
    let (table, field) = match portion.split_once('.') {
        Some((table, field)) => (Some(table), field),
        None => (None, portion),
    };
    FieldRef {
        table,
        field,
        operator,
    }
}

/// Compile one condition set into a SQL fragment.
///
/// `table` is the default qualifier for leaves without an explicit one;
/// `initial` is the connector assumed after the first node (AND at top
/// level, OR inside non-table groups); `force_field` replaces the key of
/// positionally-keyed children.
pub(crate) fn parse(
    set: &ConditionSet,
    query: &QueryBuilder,
    table: Option<&str>,
    initial: Option<Connector>,
    force_field: Option<&str>,
    mode: ValueMode,
    bindings: &mut Bindings,
) -> String {
    let mut out = String::new();
    let mut pending: Option<Connector> = None;

    for (key, node) in set.entries() {
        match node {
            ConditionNode::Connector(connector) => {
                pending = Some(*connector);
            }
            ConditionNode::Group(inner) => {
                let fragment = match key {
                    ConditionKey::Field(name) if query.is_known_table(name) => {
                        parse(inner, query, Some(name.as_str()), None, None, mode, bindings)
                    }
                    ConditionKey::Field(name) => parse(
                        inner,
                        query,
                        None,
                        Some(Connector::Or),
                        Some(name.as_str()),
                        mode,
                        bindings,
                    ),
                    ConditionKey::Pos(_) => {
                        parse(inner, query, None, Some(Connector::Or), None, mode, bindings)
                    }
                };
                if fragment.is_empty() {
                    continue;
                }
                append(&mut out, &mut pending, initial, &format!("({fragment})"));
            }
            ConditionNode::Leaf(value) => {
                if value.is_falsy() {
                    continue;
                }
                let raw_key = match key {
                    ConditionKey::Field(name) => name.clone(),
                    ConditionKey::Pos(index) => force_field
                        .map(str::to_string)
                        .unwrap_or_else(|| index.to_string()),
                };
                let field_ref = parse_field(&raw_key);
                // an explicit qualifier on the leaf replaces the default
                let qualifier = field_ref.table.or(table);

                let mut predicate = String::new();
                if let Some(table) = qualifier {
                    predicate.push_str(&quote_ident(table));
                    predicate.push('.');
                }
                predicate.push_str(&quote_ident(field_ref.field));
                predicate.push(' ');
                predicate.push_str(field_ref.operator);
                predicate.push(' ');

                match mode {
                    ValueMode::Bind => {
                        let base = binding_base(field_ref.table, field_ref.field, key);
                        let name = bindings.bind(base, value.sanitized());
                        predicate.push(':');
                        predicate.push_str(&name);
                    }
                    ValueMode::ColumnRef => {
                        let raw_value = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        let value_ref = parse_field(&raw_value);
                        if let Some(table) = value_ref.table {
                            predicate.push_str(&quote_ident(table));
                            predicate.push('.');
                        }
                        predicate.push_str(&quote_ident(value_ref.field));
                    }
                }
                append(&mut out, &mut pending, initial, &predicate);
            }
        }
    }

    out
}

/// Binding names derive from table and field, with the positional index as
/// disambiguator for positionally-keyed leaves.
fn binding_base(table: Option<&str>, field: &str, key: &ConditionKey) -> String {
    let mut base = String::from("cnd_");
    if let Some(table) = table {
        base.push_str(table);
        base.push('_');
    }
    base.push_str(field);
    if let ConditionKey::Pos(index) = key {
        base.push_str(&index.to_string());
    }
    base
}

fn append(
    out: &mut String,
    pending: &mut Option<Connector>,
    initial: Option<Connector>,
    fragment: &str,
) {
    if !out.is_empty() {
        out.push(' ');
        out.push_str(pending.unwrap_or(Connector::And).as_str());
        out.push(' ');
    }
    out.push_str(fragment);
    // the connector is sticky: once set it applies to every later sibling
    // until an explicit token replaces it
    if pending.is_none() {
        *pending = Some(initial.unwrap_or(Connector::And));
    }
}
