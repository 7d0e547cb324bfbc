use tracing::debug;

use crate::{
    ast::{Keyword, TypeExpr},
    descriptor::Column,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Numeric,
    Binary,
    Boolean,
    Temporal,
}

impl Bucket {
    pub fn type_expr(self) -> TypeExpr {
        match self {
            Bucket::Numeric => TypeExpr::keyword(Keyword::Number),
            Bucket::Binary => TypeExpr::reference("Uint8Array"),
            Bucket::Boolean => TypeExpr::keyword(Keyword::Boolean),
            Bucket::Temporal => TypeExpr::reference("Date"),
        }
    }
}

/// Known SQL type names. Anything not listed maps to `any`.
pub const TYPE_BUCKETS: &[(&str, Bucket)] = &[
    // Numeric types
    ("int", Bucket::Numeric),
    ("integer", Bucket::Numeric),
    ("tinyint", Bucket::Numeric),
    ("smallint", Bucket::Numeric),
    ("mediumint", Bucket::Numeric),
    ("bigint", Bucket::Numeric),
    ("unsignedbigint", Bucket::Numeric),
    ("int2", Bucket::Numeric),
    ("int8", Bucket::Numeric),
    ("real", Bucket::Numeric),
    ("double", Bucket::Numeric),
    ("doubleprecision", Bucket::Numeric),
    ("float", Bucket::Numeric),
    // Binary types
    ("blob", Bucket::Binary),
    // Boolean types
    ("boolean", Bucket::Boolean),
    ("bool", Bucket::Boolean),
    // Time types
    ("date", Bucket::Temporal),
    ("datetime", Bucket::Temporal),
    ("timestamp", Bucket::Temporal),
];

pub fn bucket(type_name: &str) -> Option<Bucket> {
    let type_name = type_name.to_ascii_lowercase();
    TYPE_BUCKETS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|&(_, bucket)| bucket)
}

/// Maps a column to the TypeScript type used for it in generated code.
///
/// Never fails: missing metadata gives `any`, an unknown type name gives
/// `any` (or `any | null`).
pub fn column_type(column: Option<&Column>) -> TypeExpr {
    let Some(column) = column else {
        return TypeExpr::any();
    };
    let Some(sql_type) = &column.sql_type else {
        return TypeExpr::any();
    };
    let ts_type = match bucket(&sql_type.name) {
        Some(bucket) => bucket.type_expr(),
        None => {
            debug!(
                "Unrecognized SQL type {:?} for column {:?}, using any",
                sql_type.name, column.name
            );
            TypeExpr::any()
        }
    };
    match column.not_null {
        true => ts_type,
        false => TypeExpr::nullable(ts_type),
    }
}
