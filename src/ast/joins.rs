use serde::{Deserialize, Serialize};

use crate::ast::ConditionSet;

/// Join type, LEFT unless overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    #[default]
    Left,
    Inner,
    Right,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Left => "LEFT",
            JoinKind::Inner => "INNER",
            JoinKind::Right => "RIGHT",
        }
    }
}

/// A join declaration. The key it is registered under is the alias; `table`
/// overrides the physical table name when the alias differs from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub table: Option<String>,
    pub kind: JoinKind,
    /// Column-to-column conditions: leaf values are read as
    /// `[table.]column` references and never parameterized.
    pub on: ConditionSet,
}

impl JoinSpec {
    pub fn on(conditions: ConditionSet) -> Self {
        Self {
            table: None,
            kind: JoinKind::default(),
            on: conditions,
        }
    }

    /// Join a real table under a different alias.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }
}
