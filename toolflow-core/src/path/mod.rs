mod expr;
mod reference;

pub use expr::{resolve, PathError, PathExpr, PathSegment};
pub use reference::{
    contains_index_placeholder, fan_out_base, substitute_index, PathRef, INDEX_PLACEHOLDER,
};
