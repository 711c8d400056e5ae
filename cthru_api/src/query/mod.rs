mod common;
pub use self::common::{Query, SortClause, SortDirection};

mod predicate;
pub use self::predicate::{FilterValue, Operator, Predicate};

mod structured;
pub use self::structured::{StructuredQuery, DEFAULT_LIMIT};

pub mod soql;
