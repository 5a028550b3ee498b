use serde::{Deserialize, Serialize};

use crate::ast::Value;

/// Boolean combinator joining sibling condition nodes. A connector entry
/// applies to the next sibling in iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connector {
    And,
    Or,
    AndNot,
    OrNot,
    Not,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
            Connector::AndNot => "AND NOT",
            Connector::OrNot => "OR NOT",
            Connector::Not => "NOT",
        }
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key of a condition entry. `Field` carries the raw
/// `[table.]field[ operator]` string for leaves, or the group name for
/// nested sets; `Pos` is an auto-assigned index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKey {
    Pos(usize),
    Field(String),
}

/// One node of a condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConditionNode {
    /// Connector token for the next sibling.
    Connector(Connector),
    /// Field-vs-value leaf; the entry key carries the field reference.
    Leaf(Value),
    /// Parenthesized sub-tree.
    Group(ConditionSet),
}

/// Ordered, possibly nested condition tree. Depth is bounded by the literal
/// nesting of the input; there are no back-references.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    entries: Vec<(ConditionKey, ConditionNode)>,
    next_pos: usize,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf under a `[table.]field[ operator]` key.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries
            .push((ConditionKey::Field(key.into()), ConditionNode::Leaf(value.into())));
        self
    }

    /// Add a positional leaf. Pairs with an enclosing group whose key acts
    /// as the forced field for every positional child.
    pub fn push(mut self, value: impl Into<Value>) -> Self {
        let key = self.take_pos();
        self.entries.push((key, ConditionNode::Leaf(value.into())));
        self
    }

    /// Add an explicit connector for the next sibling.
    pub fn connector(mut self, connector: Connector) -> Self {
        let key = self.take_pos();
        self.entries
            .push((key, ConditionNode::Connector(connector)));
        self
    }

    pub fn and(self) -> Self {
        self.connector(Connector::And)
    }

    pub fn or(self) -> Self {
        self.connector(Connector::Or)
    }

    pub fn and_not(self) -> Self {
        self.connector(Connector::AndNot)
    }

    pub fn or_not(self) -> Self {
        self.connector(Connector::OrNot)
    }

    pub fn not(self) -> Self {
        self.connector(Connector::Not)
    }

    /// Add a nested set under a named key. A key naming a joined table
    /// qualifies the children with that table; any other key becomes the
    /// forced field for positional children, and the children default to
    /// OR.
    pub fn group(mut self, key: impl Into<String>, inner: ConditionSet) -> Self {
        self.entries
            .push((ConditionKey::Field(key.into()), ConditionNode::Group(inner)));
        self
    }

    /// Add an anonymous nested set; children default to OR.
    pub fn push_group(mut self, inner: ConditionSet) -> Self {
        let key = self.take_pos();
        self.entries.push((key, ConditionNode::Group(inner)));
        self
    }

    fn take_pos(&mut self) -> ConditionKey {
        let key = ConditionKey::Pos(self.next_pos);
        self.next_pos += 1;
        key
    }

    pub fn entries(&self) -> &[(ConditionKey, ConditionNode)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union keeping existing entries on key collision.
    pub(crate) fn merge_from(&mut self, other: ConditionSet) {
        for (key, node) in other.entries {
            if !self.entries.iter().any(|(k, _)| *k == key) {
                self.entries.push((key, node));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_index_counts_connectors() {
        let set = ConditionSet::new().push("a").or().push("b");
        let keys: Vec<_> = set.entries().iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ConditionKey::Pos(0),
                ConditionKey::Pos(1),
                ConditionKey::Pos(2),
            ]
        );
    }

    #[test]
    fn test_merge_first_write_wins() {
        let mut set = ConditionSet::new().field("id", 1);
        set.merge_from(ConditionSet::new().field("id", 2).field("age >", 30));
        assert_eq!(set.entries().len(), 2);
        assert_eq!(
            set.entries()[0].1,
            ConditionNode::Leaf(Value::Int(1))
        );
    }
}
