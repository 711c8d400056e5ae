mod meta;
pub use self::meta::{ColumnMetadata, ViewMetadata};

mod dataset;
pub use self::dataset::{DatasetDescriptor, FieldDescriptor, FieldKind, FieldTarget, LogicalFilter};

mod result;
pub use self::result::{Credentials, Record, ResultSet};
