//! Resolves the operand-level values Pass 2 needs once registers are
//! already bare indices: immediate values from a literal or `.equ` name,
//! and PC-relative branch/jump targets from a literal, `.equ` name, or
//! symbol, in that priority order.

use crate::assembler::section_table::SectionTable;
use crate::assembler::symbol_table::{self, SymbolTable};
use crate::assembler::value_table::ValueTable;
use crate::ast::ImmValue;
use crate::errors::AssemblyError;
use crate::Addr;

/// Resolves a plain immediate: a literal value, or an `.equ` name looked up
/// in the value table. Labels are not accepted here (not required by the
/// plain I/S/U immediate positions).
pub fn resolve_imm(
    imm: &ImmValue,
    values: &ValueTable,
    line_number: usize,
    text: &str,
) -> Result<i64, AssemblyError> {
    match imm {
        ImmValue::Literal(v) => Ok(*v),
        ImmValue::Name(n) => values.get(n).copied().ok_or_else(|| {
            AssemblyError::semantic(line_number, text, format!("unknown value '{n}' (not a .equ constant)"))
        }),
    }
}

/// Resolves a B/J-format branch or jump target into a PC-relative byte
/// offset, trying in order: (1) a literal integer, (2) an `.equ` name
/// (taken directly as the offset), (3) a symbol name (computed as
/// `symbol_abs_addr - this_line_addr`).
pub fn resolve_target(
    imm: &ImmValue,
    values: &ValueTable,
    symbols: &SymbolTable,
    sections: &SectionTable,
    line_addr: Addr,
    line_number: usize,
    text: &str,
) -> Result<i64, AssemblyError> {
    match imm {
        ImmValue::Literal(v) => Ok(*v),
        ImmValue::Name(n) => {
            if let Some(v) = values.get(n) {
                return Ok(*v);
            }
            let symbol = symbol_table::get_symbol(symbols, n, line_number, text)?;
            let abs = symbol_table::absolute_addr(symbol, sections, line_number, text)?;
            Ok(abs as i64 - line_addr as i64)
        }
    }
}
