use serde::{Deserialize, Serialize};

/// The operation a query performs. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Select => write!(f, "select"),
            QueryKind::Insert => write!(f, "insert"),
            QueryKind::Update => write!(f, "update"),
            QueryKind::Delete => write!(f, "delete"),
        }
    }
}
