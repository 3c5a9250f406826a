//! Flat per-section bookkeeping: base address and running size.
//!
//! Grounded on the teacher's `section_stack.rs` `Context`/`ContextStack`,
//! generalized from a bank-relative context stack into a flat name-keyed
//! table — RV32I has no bank concept, so sections never nest or get pushed
//! and popped, only created or re-declared in place.

use std::collections::HashMap;

use crate::Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub base_addr: Addr,
    pub size_bytes: u32,
}

pub type SectionTable = HashMap<String, Section>;

/// Creates a section (or resets an existing one) with base `at` and zero
/// size. Re-declaring a section name is exactly this: the spec's "reset
/// base to the current location counter" behavior is this function called
/// unconditionally on every `.section`/`.text`/`.data`/`.bss`/`.rodata` line.
pub fn declare(table: &mut SectionTable, name: &str, at: Addr) {
    table.insert(
        name.to_string(),
        Section {
            base_addr: at,
            size_bytes: 0,
        },
    );
}

/// Grows a section's running size by `delta` bytes. No-op if the name is
/// unknown (callers only grow sections they've already ensured exist).
pub fn grow(table: &mut SectionTable, name: &str, delta: u32) {
    if let Some(section) = table.get_mut(name) {
        section.size_bytes += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaring_a_section_resets_its_base() {
        let mut table = SectionTable::new();
        declare(&mut table, ".data", 0);
        grow(&mut table, ".data", 8);
        declare(&mut table, ".data", 100);
        assert_eq!(
            table[".data"],
            Section {
                base_addr: 100,
                size_bytes: 0,
            }
        );
    }

    #[test]
    fn growing_an_unknown_section_is_a_no_op() {
        let mut table = SectionTable::new();
        grow(&mut table, ".text", 4);
        assert!(table.is_empty());
    }
}
