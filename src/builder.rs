//! The accumulating query description and its compile surface.

use serde::Serialize;

use crate::ast::{ConditionSet, FieldSpec, JoinSpec, QueryKind, Value};
use crate::compiler;
use crate::compiler::conditions::Bindings;
use crate::error::{QueryError, QueryResult};

/// One logical query: created with its kind, fed declarative state through
/// the accumulation methods, compiled with [`QueryBuilder::build`].
///
/// Accumulation is additive and first-write-wins: repeated calls never
/// overwrite an existing entry. Instances are single-use; `build` stores the
/// condition-derived bindings on the instance, so compiling twice may
/// re-suffix binding names.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    kind: QueryKind,
    pub(crate) table: String,
    pub(crate) fields: FieldSpec,
    pub(crate) values: Vec<(String, Value)>,
    pub(crate) conditions: ConditionSet,
    pub(crate) joins: Vec<(String, JoinSpec)>,
    /// Known join aliases, in declaration order. The field resolver and
    /// condition parser consult this to treat keys as table qualifiers.
    tables: Vec<String>,
    pub(crate) order: Vec<(String, Vec<String>)>,
    pub(crate) limit: Option<Vec<i64>>,
    sql: Option<String>,
    condition_bindings: Vec<(String, Value)>,
}

impl QueryBuilder {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            table: String::new(),
            fields: FieldSpec::new(),
            values: Vec::new(),
            conditions: ConditionSet::new(),
            joins: Vec::new(),
            tables: Vec::new(),
            order: Vec::new(),
            limit: None,
            sql: None,
            condition_bindings: Vec::new(),
        }
    }

    pub fn select(table: impl Into<String>) -> Self {
        let mut query = Self::new(QueryKind::Select);
        query.table = table.into();
        query
    }

    pub fn insert(table: impl Into<String>) -> Self {
        let mut query = Self::new(QueryKind::Insert);
        query.table = table.into();
        query
    }

    pub fn update(table: impl Into<String>) -> Self {
        let mut query = Self::new(QueryKind::Update);
        query.table = table.into();
        query
    }

    pub fn delete(table: impl Into<String>) -> Self {
        let mut query = Self::new(QueryKind::Delete);
        query.table = table.into();
        query
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Set the primary table.
    pub fn table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// Accumulate a field specification. Not accepted for delete queries.
    pub fn fields(&mut self, fields: FieldSpec) -> QueryResult<&mut Self> {
        if self.kind == QueryKind::Delete {
            return Err(QueryError::config(format!(
                "fields are not accepted for {} queries",
                self.kind
            )));
        }
        self.fields.merge_from(fields);
        Ok(self)
    }

    /// Accumulate column values. Only accepted for insert and update.
    pub fn values<K, V, I>(&mut self, values: I) -> QueryResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        if matches!(self.kind, QueryKind::Select | QueryKind::Delete) {
            return Err(QueryError::config(format!(
                "values are not accepted for {} queries",
                self.kind
            )));
        }
        for (key, value) in values {
            let key = key.into();
            if !self.values.iter().any(|(k, _)| *k == key) {
                self.values.push((key, value.into()));
            }
        }
        Ok(self)
    }

    /// Accumulate a condition tree.
    pub fn conditions(&mut self, conditions: ConditionSet) -> &mut Self {
        self.conditions.merge_from(conditions);
        self
    }

    /// Accumulate an order entry: one direction keyword mapped to its
    /// fields, first-write-wins per keyword.
    pub fn order(&mut self, direction: impl Into<String>, fields: &[&str]) -> &mut Self {
        let direction = direction.into();
        if !self.order.iter().any(|(d, _)| *d == direction) {
            self.order
                .push((direction, fields.iter().map(|f| f.to_string()).collect()));
        }
        self
    }

    /// Set the limit as a positional `[offset]` or `[offset, count]` pair.
    /// Replaces any earlier limit; the missing-offset case errors at
    /// `build`.
    pub fn limit(&mut self, limit: &[i64]) -> &mut Self {
        self.limit = Some(limit.to_vec());
        self
    }

    /// Register a join under `alias`. Select-only; the alias becomes a known
    /// table for field and condition qualification.
    pub fn join(&mut self, alias: impl Into<String>, spec: JoinSpec) -> QueryResult<&mut Self> {
        if self.kind != QueryKind::Select {
            return Err(QueryError::config(format!(
                "joins are only accepted for select queries, not {}",
                self.kind
            )));
        }
        let alias = alias.into();
        if !self.tables.contains(&alias) {
            self.tables.push(alias.clone());
        }
        self.joins.push((alias, spec));
        Ok(self)
    }

    pub(crate) fn is_known_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t == name)
    }

    pub(crate) fn join_aliases(&self) -> &[String] {
        &self.tables
    }

    /// Compile the accumulated state into SQL text. Condition-derived
    /// bindings become available through [`QueryBuilder::params`] afterward.
    pub fn build(&mut self) -> QueryResult<String> {
        let mut bindings = Bindings::new();
        let sql = compiler::compile(self, &mut bindings)?;
        self.condition_bindings = bindings.into_entries();
        self.sql = Some(sql.clone());
        Ok(sql)
    }

    /// Accumulated values, original and unescaped, for insert/update
    /// consumers.
    pub fn raw_values(&self) -> &[(String, Value)] {
        &self.values
    }

    /// Name-to-value pairs for prepared-statement binding: accumulated
    /// values first, then condition-derived bindings. Values win on a name
    /// clash.
    pub fn params(&self) -> Vec<(String, Value)> {
        let mut out = self.values.clone();
        for (name, value) in &self.condition_bindings {
            if !out.iter().any(|(n, _)| n == name) {
                out.push((name.clone(), value.clone()));
            }
        }
        out
    }

    /// Compiled SQL and parameter map for diagnostics.
    pub fn debug(&self) -> DebugBundle {
        DebugBundle {
            sql: self.sql.clone(),
            params: self.params(),
        }
    }
}

/// Diagnostic snapshot of a compiled query.
#[derive(Debug, Clone, Serialize)]
pub struct DebugBundle {
    pub sql: Option<String>,
    pub params: Vec<(String, Value)>,
}

impl DebugBundle {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_rejected_for_delete() {
        let mut query = QueryBuilder::delete("users");
        let err = query.fields(FieldSpec::star()).unwrap_err();
        assert!(err.to_string().contains("delete"));
    }

    #[test]
    fn test_values_rejected_for_select_and_delete() {
        let mut query = QueryBuilder::select("users");
        assert!(query.values([("a", 1)]).is_err());
        let mut query = QueryBuilder::delete("users");
        assert!(query.values([("a", 1)]).is_err());
    }

    #[test]
    fn test_join_is_select_only() {
        let mut query = QueryBuilder::update("users");
        let err = query
            .join("profiles", JoinSpec::on(ConditionSet::new()))
            .unwrap_err();
        assert!(err.to_string().contains("update"));
    }

    #[test]
    fn test_kind_reports_construction_kind() {
        for kind in [
            QueryKind::Select,
            QueryKind::Insert,
            QueryKind::Update,
            QueryKind::Delete,
        ] {
            assert_eq!(QueryBuilder::new(kind).kind(), kind);
        }
    }

    #[test]
    fn test_values_first_write_wins() {
        let mut query = QueryBuilder::insert("t");
        query.values([("a", 1)]).unwrap();
        query.values([("a", 2), ("b", 3)]).unwrap();
        assert_eq!(
            query.raw_values(),
            &[
                ("a".to_string(), Value::Int(1)),
                ("b".to_string(), Value::Int(3)),
            ]
        );
    }

    #[test]
    fn test_order_first_write_wins_per_direction() {
        let mut query = QueryBuilder::select("t");
        query.order("DESC", &["a"]).order("DESC", &["b"]);
        assert_eq!(query.order.len(), 1);
        assert_eq!(query.order[0].1, vec!["a".to_string()]);
    }
}
