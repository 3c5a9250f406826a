//! Pass 1: walks cleaned, parsed lines once, assigning each a pre-line
//! address and building the section, symbol, and value tables. Mirrors the
//! teacher's `symbol_table::build_symbol_table` sizing walk, generalized
//! from bank-relative addressing to the flat section model in
//! [`crate::assembler::section_table`].

use crate::ast::{AssemblyLine, Directive, ImmValue};
use crate::errors::AssemblyError;
use crate::{Addr, ILEN};

use super::section_table::{self, SectionTable};
use super::symbol_table::{Symbol, SymbolTable};
use super::value_table::ValueTable;

/// Everything Pass 1 produces: the finished tables, the total image size,
/// and two parallel per-line arrays so Pass 2 never has to re-derive them.
pub struct PlanResult {
    pub sections: SectionTable,
    pub symbols: SymbolTable,
    pub values: ValueTable,
    /// Location counter *before* each line was processed (I3).
    pub addr_map: Vec<Addr>,
    /// The section active when each line was processed, before that line's
    /// own section-changing effect (if any) takes place.
    pub line_sections: Vec<Option<String>>,
    pub total_size: u32,
}

struct PlanState {
    sections: SectionTable,
    symbols: SymbolTable,
    values: ValueTable,
    current_section: Option<String>,
    location_counter: Addr,
}

impl PlanState {
    fn new() -> Self {
        Self {
            sections: SectionTable::new(),
            symbols: SymbolTable::new(),
            values: ValueTable::new(),
            current_section: None,
            location_counter: 0,
        }
    }

    /// Lazily creates `.text` on first use, per §4.3: "the default section
    /// is `.text`, created lazily the first time any label, instruction, or
    /// section-sensitive directive is seen."
    fn ensure_section(&mut self) -> String {
        if self.current_section.is_none() {
            let name = ".text".to_string();
            section_table::declare(&mut self.sections, &name, self.location_counter);
            self.current_section = Some(name);
        }
        self.current_section.clone().unwrap()
    }

    fn set_section(&mut self, name: &str) {
        section_table::declare(&mut self.sections, name, self.location_counter);
        self.current_section = Some(name.to_string());
    }

    /// Advances the location counter and grows the current section by the
    /// same amount, ensuring a section exists first.
    fn advance(&mut self, delta: u32) {
        let section = self.ensure_section();
        self.location_counter += delta;
        section_table::grow(&mut self.sections, &section, delta);
    }

    fn declare_symbol(&mut self, name: &str, is_global: bool) {
        let section = self.ensure_section();
        let base = self.sections[&section].base_addr;
        let offset = self.location_counter - base;
        self.symbols.insert(
            name.to_string(),
            Symbol {
                section,
                offset,
                is_global,
            },
        );
    }

    fn apply_label(&mut self, name: &str) {
        let section = self.ensure_section();
        let base = self.sections[&section].base_addr;
        let offset = self.location_counter - base;
        let is_global = self.symbols.get(name).map(|s| s.is_global).unwrap_or(false);
        self.symbols.insert(
            name.to_string(),
            Symbol {
                section,
                offset,
                is_global,
            },
        );
    }
}

fn align_up(value: u32, align: u32) -> u32 {
    let rem = value % align;
    if rem == 0 {
        value
    } else {
        value + (align - rem)
    }
}

fn resolve_value(
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

fn apply_directive(
    directive: &Directive,
    line_number: usize,
    text: &str,
    state: &mut PlanState,
) -> Result<(), AssemblyError> {
    match directive {
        Directive::Org(imm) => {
            let target = resolve_value(imm, &state.values, line_number, text)?;
            if target < 0 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    ".org target must be non-negative",
                ));
            }
            state.location_counter = align_up(target as u32, 4);
        }
        Directive::Align(bits) => {
            if *bits == 0 || *bits % 8 != 0 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    ".align operand must be a positive multiple of 8 bits",
                ));
            }
            let bytes = bits / 8;
            let rem = state.location_counter % bytes;
            let delta = if rem == 0 { 0 } else { bytes - rem };
            state.advance(delta);
        }
        Directive::Section(name) => state.set_section(name),
        Directive::Globl(name) => state.declare_symbol(name, true),
        Directive::Local(name) => state.declare_symbol(name, false),
        Directive::Equ(name, value) => {
            state.values.insert(name.clone(), *value);
        }
        Directive::Asciz(s) => {
            let reserved = align_up(s.len() as u32 + 1, 4);
            state.advance(reserved);
        }
        Directive::Zero(n) => {
            // Preserved source quirk: the location counter advances by `n`
            // rounded up to 4, but the owning section's recorded size grows
            // by the unaligned `n` — the two are allowed to diverge here,
            // same as the `.org` gap (see DESIGN.md Open Questions).
            let section = state.ensure_section();
            state.location_counter += align_up(*n, 4);
            section_table::grow(&mut state.sections, &section, *n);
        }
        Directive::Half(values) => state.advance(2 * values.len() as u32),
        Directive::Word(values) => {
            let pad = align_up(state.location_counter, 4) - state.location_counter;
            state.advance(pad);
            state.advance(4 * values.len() as u32);
        }
        Directive::Dword(values) => {
            let pad = align_up(state.location_counter, 4) - state.location_counter;
            state.advance(pad);
            state.advance(8 * values.len() as u32);
        }
    }
    Ok(())
}

/// Runs Pass 1 over every parsed line, producing the tables and per-line
/// address/section arrays Pass 2 needs.
pub fn plan(lines: &[AssemblyLine]) -> Result<PlanResult, AssemblyError> {
    let mut state = PlanState::new();
    let mut addr_map = Vec::with_capacity(lines.len());
    let mut line_sections = Vec::with_capacity(lines.len());

    for line in lines {
        addr_map.push(state.location_counter);
        line_sections.push(state.current_section.clone());

        if let Some(name) = &line.label {
            state.apply_label(name);
        }

        if let Some(directive) = &line.directive {
            apply_directive(directive, line.line_number, &line.text, &mut state)?;
        }

        if line.instruction.is_some() {
            match &state.current_section {
                Some(name) if name == ".text" => {}
                _ => {
                    return Err(AssemblyError::semantic(
                        line.line_number,
                        &line.text,
                        "instructions may only appear in .text",
                    ));
                }
            }
            state.advance(ILEN);
        }
    }

    Ok(PlanResult {
        sections: state.sections,
        symbols: state.symbols,
        values: state.values,
        addr_map,
        line_sections,
        total_size: state.location_counter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_cleaner::clean_source;
    use crate::parser::parse_line;

    fn plan_source(src: &str) -> PlanResult {
        let lines: Vec<_> = clean_source(src)
            .iter()
            .map(parse_line)
            .collect::<Result<_, _>>()
            .unwrap();
        plan(&lines).unwrap()
    }

    #[test]
    fn empty_text_section_has_zero_size() {
        let plan = plan_source(".text\n");
        assert_eq!(plan.total_size, 0);
        assert_eq!(plan.sections[".text"].size_bytes, 0);
    }

    #[test]
    fn instruction_advances_by_four() {
        let plan = plan_source(".text\nadd a0, a1, a2\n");
        assert_eq!(plan.total_size, 4);
    }

    #[test]
    fn instruction_outside_text_is_fatal() {
        let lines: Vec<_> = clean_source(".data\nadd a0, a1, a2\n")
            .iter()
            .map(parse_line)
            .collect::<Result<_, _>>()
            .unwrap();
        assert!(plan(&lines).is_err());
    }

    #[test]
    fn forward_label_gets_patched_by_globl() {
        let plan = plan_source(".text\n.globl start\nstart: add a0, a1, a2\n");
        let symbol = &plan.symbols["start"];
        assert!(symbol.is_global);
        assert_eq!(symbol.offset, 0);
    }

    #[test]
    fn redeclaring_a_section_resets_its_base() {
        let plan = plan_source(".text\nnop\n.data\n.word 1\n.text\nnop\n");
        // 4 bytes of .text then 4 bytes of .data precede the second `.text`
        assert_eq!(plan.sections[".text"].base_addr, 8);
    }
}
