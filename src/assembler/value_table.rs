//! `.equ` constants: a flat name → integer map, disjoint from the symbol
//! namespace. No expression evaluator — values arrive pre-parsed as a
//! single literal (see [`crate::ast::Directive::Equ`]).

use std::collections::HashMap;

pub type ValueTable = HashMap<String, i64>;
