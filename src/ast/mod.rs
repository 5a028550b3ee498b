pub mod conditions;
pub mod fields;
pub mod joins;
pub mod kind;
pub mod order;
pub mod values;

pub use self::conditions::{ConditionKey, ConditionNode, ConditionSet, Connector};
pub use self::fields::{FieldDef, FieldKey, FieldSpec};
pub use self::joins::{JoinKind, JoinSpec};
pub use self::kind::QueryKind;
pub use self::order::SortDirection;
pub use self::values::Value;
