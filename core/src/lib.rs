#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod arena;
pub mod evaluator;
pub mod parser;
pub mod stringifier;
pub mod visitor;

pub use arena::{Arena, ExprId};
pub use parser::{Expr, ParsedExpr};
