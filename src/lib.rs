//! Declarative query compiler.
//!
//! Describe a select, insert, update or delete as data and compile it into
//! parameterized SQL plus a name-to-value binding map for a
//! prepared-statement API.
//!
//! ```ignore
//! use prequel::prelude::*;
//! let mut query = QueryBuilder::select("users");
//! query.conditions(ConditionSet::new().field("active", true));
//! let sql = query.build()?;
//! ```

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod error;

pub use builder::QueryBuilder;

pub mod prelude {
    pub use crate::QueryBuilder;
    pub use crate::ast::*;
    pub use crate::builder::DebugBundle;
    pub use crate::error::*;
}
