//! Named addresses expressed as (section, offset).
//!
//! Grounded on the teacher's `symbol_table.rs`, with the bank field dropped
//! (no bank concept here) and a global/local visibility flag added, per the
//! flat section model.

use std::collections::HashMap;

use crate::assembler::section_table::SectionTable;
use crate::errors::AssemblyError;
use crate::Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub section: String,
    pub offset: u32,
    pub is_global: bool,
}

pub type SymbolTable = HashMap<String, Symbol>;

/// Looks up a symbol by name, producing a fatal semantic error if absent.
pub fn get_symbol<'a>(
    table: &'a SymbolTable,
    name: &str,
    line_number: usize,
    text: &str,
) -> Result<&'a Symbol, AssemblyError> {
    table
        .get(name)
        .ok_or_else(|| AssemblyError::semantic(line_number, text, format!("undefined symbol '{name}'")))
}

/// A symbol's absolute address: `section.base_addr + offset`.
pub fn absolute_addr(
    symbol: &Symbol,
    sections: &SectionTable,
    line_number: usize,
    text: &str,
) -> Result<Addr, AssemblyError> {
    let section = sections.get(&symbol.section).ok_or_else(|| {
        AssemblyError::semantic(
            line_number,
            text,
            format!(
                "symbol's owning section '{}' no longer exists",
                symbol.section
            ),
        )
    })?;
    Ok(section.base_addr + symbol.offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_addr_adds_section_base_and_offset() {
        let mut sections = SectionTable::new();
        sections.insert(
            ".text".to_string(),
            crate::assembler::section_table::Section {
                base_addr: 0x1000,
                size_bytes: 64,
            },
        );
        let symbol = Symbol {
            section: ".text".to_string(),
            offset: 16,
            is_global: true,
        };
        assert_eq!(absolute_addr(&symbol, &sections, 1, "").unwrap(), 0x1010);
    }

    #[test]
    fn missing_symbol_is_a_semantic_error() {
        let table = SymbolTable::new();
        assert!(get_symbol(&table, "missing", 1, "jal missing").is_err());
    }
}
