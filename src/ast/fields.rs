use serde::{Deserialize, Serialize};

/// Prefix/suffix wrapper marking a field value as a literal SQL expression
/// to emit verbatim, unquoted.
pub const RAW_MARKER: &str = "FNC";

/// Key of a field entry: positional within one accumulation call, or a
/// table-or-alias name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKey {
    Pos(usize),
    Name(String),
}

/// One field description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldDef {
    /// A column name, `*`, or a raw-marker expression.
    Column(String),
    /// Alias-to-column sub-entries, qualified by the entry's own key as
    /// table.
    Aliased(Vec<(FieldKey, String)>),
}

/// Ordered field specification. Entries merge first-write-wins when
/// accumulated across repeated calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    entries: Vec<(FieldKey, FieldDef)>,
    next_pos: usize,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The all-columns form: expands to the primary table and every joined
    /// table when it is the only entry.
    pub fn star() -> Self {
        Self::new().column("*")
    }

    /// Add a positional column.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.push_pos(FieldDef::Column(name.into()));
        self
    }

    /// Add a column under a named key. The key qualifies the column when it
    /// names a joined table, and doubles as the output alias.
    pub fn aliased(mut self, key: impl Into<String>, column: impl Into<String>) -> Self {
        self.entries
            .push((FieldKey::Name(key.into()), FieldDef::Column(column.into())));
        self
    }

    /// Add table-qualified sub-entries: `table.column [AS alias]` per pair,
    /// alias `None` for no aliasing.
    pub fn table_columns(
        mut self,
        table: impl Into<String>,
        columns: Vec<(Option<String>, String)>,
    ) -> Self {
        let subs = columns
            .into_iter()
            .enumerate()
            .map(|(i, (alias, column))| {
                let key = match alias {
                    Some(a) => FieldKey::Name(a),
                    None => FieldKey::Pos(i),
                };
                (key, column)
            })
            .collect();
        self.entries
            .push((FieldKey::Name(table.into()), FieldDef::Aliased(subs)));
        self
    }

    /// Escape hatch for aggregate/window expressions: `expr` must look like
    /// a function call (`COUNT(*)`, `SUM(total)`) and is emitted verbatim.
    pub fn raw(mut self, expr: impl Into<String>) -> Self {
        let wrapped = format!("{RAW_MARKER}{}{RAW_MARKER}", expr.into());
        self.push_pos(FieldDef::Column(wrapped));
        self
    }

    fn push_pos(&mut self, def: FieldDef) {
        self.entries.push((FieldKey::Pos(self.next_pos), def));
        self.next_pos += 1;
    }

    pub fn entries(&self) -> &[(FieldKey, FieldDef)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union keeping existing entries on key collision.
    pub(crate) fn merge_from(&mut self, other: FieldSpec) {
        for (key, def) in other.entries {
            if !self.entries.iter().any(|(k, _)| *k == key) {
                self.entries.push((key, def));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_wraps_with_marker() {
        let spec = FieldSpec::new().raw("COUNT(*)");
        let (_, def) = &spec.entries()[0];
        assert_eq!(def, &FieldDef::Column("FNCCOUNT(*)FNC".to_string()));
    }

    #[test]
    fn test_merge_keeps_first_entry_per_key() {
        let mut spec = FieldSpec::new().column("a");
        spec.merge_from(FieldSpec::new().column("b").column("c"));
        // position 0 collides, position 1 is new
        let cols: Vec<_> = spec.entries().iter().map(|(_, d)| d.clone()).collect();
        assert_eq!(
            cols,
            vec![
                FieldDef::Column("a".into()),
                FieldDef::Column("c".into()),
            ]
        );
    }

    #[test]
    fn test_merge_named_keys() {
        let mut spec = FieldSpec::new().aliased("total", "amount");
        spec.merge_from(FieldSpec::new().aliased("total", "other"));
        assert_eq!(spec.entries().len(), 1);
        assert_eq!(
            spec.entries()[0].1,
            FieldDef::Column("amount".to_string())
        );
    }
}
