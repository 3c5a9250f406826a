/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Pass 2: re-walks the parsed lines with Pass 1's per-line address map,
//! writing directive data and instruction words into the pre-sized output
//! buffer. Mirrors the teacher's `generate_bytecode`, generalized from a
//! bank-relative single-format encoder to RV32I's five base formats plus
//! SYS, dispatched in [`encode_instruction`] by the format tag in
//! [`crate::isa::InstrDesc`].

pub mod constants;
pub mod data;
pub mod formats;
pub mod operands;

use crate::assembler::planner::PlanResult;
use crate::ast::{AssemblyLine, ImmValue, Operand, Register};
use crate::errors::AssemblyError;
use crate::isa::{self, Format};
use crate::{Addr, ILEN};

/// Runs Pass 2 over every parsed line using Pass 1's tables and per-line
/// address map, producing the final output buffer (I3: both passes walk
/// the same line sequence in the same order).
pub fn encode(lines: &[AssemblyLine], plan: &PlanResult) -> Result<Vec<u8>, AssemblyError> {
    let mut buffer = vec![0u8; plan.total_size as usize];

    for (i, line) in lines.iter().enumerate() {
        let addr = plan.addr_map[i];
        let next_addr = plan
            .addr_map
            .get(i + 1)
            .copied()
            .unwrap_or(plan.total_size);
        let in_text = plan.line_sections[i].as_deref() == Some(".text");

        if let Some(directive) = &line.directive {
            data::emit_directive(
                directive,
                addr,
                next_addr,
                in_text,
                &plan.values,
                &mut buffer,
                line.line_number,
                &line.text,
            )?;
        }

        if let Some(instruction) = &line.instruction {
            let word = encode_instruction(instruction, plan, addr, line.line_number, &line.text)?;
            let start = addr as usize;
            buffer[start..start + ILEN as usize].copy_from_slice(&word.to_le_bytes());
        }
    }

    Ok(buffer)
}

fn reg(operand: &Operand, line_number: usize, text: &str) -> Result<u32, AssemblyError> {
    match operand {
        Operand::Register(Register(n)) => Ok(*n as u32),
        _ => Err(AssemblyError::semantic(
            line_number,
            text,
            "expected a register operand",
        )),
    }
}

fn resolve_plain_imm(operand: &Operand, line_number: usize, text: &str) -> Result<i64, AssemblyError> {
    match operand {
        // Scenario 4: the plain `rd, rs1, imm` position accepts only a
        // literal integer, never a `.equ` name — symbolic resolution is
        // only defined for the `imm(reg)`, S, B, U, and J positions.
        Operand::Immediate(ImmValue::Literal(v)) => Ok(*v),
        Operand::Immediate(ImmValue::Name(_)) => Err(AssemblyError::semantic(
            line_number,
            text,
            "a named value is not allowed in this immediate position; only a literal integer is",
        )),
        _ => Err(AssemblyError::semantic(
            line_number,
            text,
            "expected an immediate value",
        )),
    }
}

fn resolve_memory(
    operand: &Operand,
    plan: &PlanResult,
    line_number: usize,
    text: &str,
) -> Result<(i64, u32), AssemblyError> {
    match operand {
        Operand::Memory { imm, base } => {
            let value = operands::resolve_imm(imm, &plan.values, line_number, text)?;
            Ok((value, base.0 as u32))
        }
        _ => Err(AssemblyError::semantic(
            line_number,
            text,
            "malformed memory operand; expected 'imm(reg)'",
        )),
    }
}

fn check_signed_range(
    value: i64,
    bits: u32,
    line_number: usize,
    text: &str,
) -> Result<i32, AssemblyError> {
    let min = -(1i64 << (bits - 1));
    let max = (1i64 << (bits - 1)) - 1;
    if value < min || value > max {
        return Err(AssemblyError::semantic(
            line_number,
            text,
            format!("immediate {value} out of range for a {bits}-bit signed field"),
        ));
    }
    Ok(value as i32)
}

/// `.text`-only instruction encoding is already enforced by Pass 1 (I4);
/// Pass 2 can assume every instruction here belongs to a 4-byte-aligned
/// `.text` address (I5), since the planner advances the counter by `ILEN`
/// only inside `.text`.
fn encode_instruction(
    instruction: &crate::ast::Instruction,
    plan: &PlanResult,
    line_addr: Addr,
    line_number: usize,
    text: &str,
) -> Result<u32, AssemblyError> {
    let desc = isa::instruction_desc(&instruction.mnemonic).ok_or_else(|| {
        AssemblyError::semantic(
            line_number,
            text,
            format!("unknown mnemonic '{}'", instruction.mnemonic),
        )
    })?;
    let ops = &instruction.operands;

    match desc.format {
        Format::R => {
            if ops.len() != 3 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    "expected 'rd, rs1, rs2' for an R-format instruction",
                ));
            }
            let rd = reg(&ops[0], line_number, text)?;
            let rs1 = reg(&ops[1], line_number, text)?;
            let rs2 = reg(&ops[2], line_number, text)?;
            Ok(formats::encode_r(desc.opcode, desc.funct3, desc.funct7, rd, rs1, rs2))
        }

        Format::I => encode_i_format(&instruction.mnemonic, &desc, ops, plan, line_number, text),

        Format::S => {
            if ops.len() != 2 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    "expected 'rs2, imm(rs1)' for an S-format instruction",
                ));
            }
            let rs2 = reg(&ops[0], line_number, text)?;
            let (imm, rs1) = resolve_memory(&ops[1], plan, line_number, text)?;
            let imm12 = check_signed_range(imm, 12, line_number, text)?;
            Ok(formats::encode_s(desc.opcode, desc.funct3, rs1, rs2, imm12))
        }

        Format::B => {
            if ops.len() != 3 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    "expected 'rs1, rs2, target' for a B-format instruction",
                ));
            }
            let rs1 = reg(&ops[0], line_number, text)?;
            let rs2 = reg(&ops[1], line_number, text)?;
            let target_imm = match &ops[2] {
                Operand::Immediate(imm) => operands::resolve_target(
                    imm,
                    &plan.values,
                    &plan.symbols,
                    &plan.sections,
                    line_addr,
                    line_number,
                    text,
                )?,
                _ => {
                    return Err(AssemblyError::semantic(
                        line_number,
                        text,
                        "expected a branch target",
                    ))
                }
            };
            let offset = check_signed_range(target_imm, 13, line_number, text)? & !1;
            Ok(formats::encode_b(desc.opcode, desc.funct3, rs1, rs2, offset))
        }

        Format::U => {
            if ops.len() != 2 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    "expected 'rd, imm' for a U-format instruction",
                ));
            }
            let rd = reg(&ops[0], line_number, text)?;
            let imm = match &ops[1] {
                Operand::Immediate(imm) => operands::resolve_imm(imm, &plan.values, line_number, text)?,
                _ => {
                    return Err(AssemblyError::semantic(
                        line_number,
                        text,
                        "expected an immediate value",
                    ))
                }
            };
            Ok(formats::encode_u(desc.opcode, rd, imm))
        }

        Format::J => {
            if ops.len() != 2 {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    "expected 'rd, target' for a J-format instruction",
                ));
            }
            let rd = reg(&ops[0], line_number, text)?;
            let target_imm = match &ops[1] {
                Operand::Immediate(imm) => operands::resolve_target(
                    imm,
                    &plan.values,
                    &plan.symbols,
                    &plan.sections,
                    line_addr,
                    line_number,
                    text,
                )?,
                _ => {
                    return Err(AssemblyError::semantic(
                        line_number,
                        text,
                        "expected a jump target",
                    ))
                }
            };
            let offset = check_signed_range(target_imm, 21, line_number, text)? & !1;
            Ok(formats::encode_j(desc.opcode, rd, offset))
        }

        Format::Sys => {
            if !ops.is_empty() {
                return Err(AssemblyError::semantic(
                    line_number,
                    text,
                    format!("'{}' takes no operands", instruction.mnemonic),
                ));
            }
            Ok(desc.fixed_word)
        }
    }
}

/// `slli`/`srli`/`srai` reuse the I-format immediate field as a 5-bit
/// shift amount with `srai`'s funct7 folded into bits 10:5, instead of a
/// sign-extended 12-bit immediate (§4.4).
fn is_shift_immediate(mnemonic: &str) -> bool {
    matches!(mnemonic, "slli" | "srli" | "srai")
}

fn encode_i_format(
    mnemonic: &str,
    desc: &isa::InstrDesc,
    ops: &[Operand],
    plan: &PlanResult,
    line_number: usize,
    text: &str,
) -> Result<u32, AssemblyError> {
    match ops.len() {
        // `rd, rs1, imm` — plain arithmetic/load-immediate form. The named
        // `.equ` form is not accepted here (scenario 4).
        3 => {
            let rd = reg(&ops[0], line_number, text)?;
            let rs1 = reg(&ops[1], line_number, text)?;
            let raw = resolve_plain_imm(&ops[2], line_number, text)?;

            let imm12 = if is_shift_immediate(mnemonic) {
                let shamt = (raw as u32) & 0x1F;
                ((desc.funct7 & 0x7F) << 5) | shamt
            } else {
                check_signed_range(raw, 12, line_number, text)? as u32 & 0xFFF
            };

            Ok(formats::encode_i(desc.opcode, desc.funct3, rd, rs1, imm12 as i32))
        }

        // `rd, imm(rs1)` — loads and `jalr`. The `.equ` name form is
        // accepted here.
        2 => {
            let rd = reg(&ops[0], line_number, text)?;
            let (raw, rs1) = resolve_memory(&ops[1], plan, line_number, text)?;
            let imm12 = check_signed_range(raw, 12, line_number, text)?;
            Ok(formats::encode_i(desc.opcode, desc.funct3, rd, rs1, imm12))
        }

        _ => Err(AssemblyError::semantic(
            line_number,
            text,
            "expected 'rd, rs1, imm' or 'rd, imm(rs1)' for an I-format instruction",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::planner::plan;
    use crate::line_cleaner::clean_source;
    use crate::parser::parse_line;

    fn assemble(src: &str) -> Vec<u8> {
        let lines: Vec<_> = clean_source(src)
            .iter()
            .map(parse_line)
            .collect::<Result<_, _>>()
            .unwrap();
        let p = plan(&lines).unwrap();
        encode(&lines, &p).unwrap()
    }

    #[test]
    fn encodes_add_x10_x11_x12() {
        let bytes = assemble(".text\nadd a0, a1, a2\n");
        assert_eq!(bytes, vec![0x33, 0x85, 0xC5, 0x00]);
    }

    #[test]
    fn forward_branch_offset_resolves_to_eight() {
        let bytes = assemble(".text\nstart: beq a0, a1, end\naddi a0, a0, 1\nend:\n");
        assert_eq!(bytes.len(), 8);
        let word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let imm11 = (word >> 7) & 0x1;
        let imm4_1 = (word >> 8) & 0xF;
        let imm10_5 = (word >> 25) & 0x3F;
        let imm12 = (word >> 31) & 0x1;
        let decoded = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
        assert_eq!(decoded, 8);
    }

    #[test]
    fn named_value_rejected_in_plain_immediate_position() {
        let lines: Vec<_> = clean_source(".equ FOO, 5\n.text\naddi a0, a0, FOO\n")
            .iter()
            .map(parse_line)
            .collect::<Result<_, _>>()
            .unwrap();
        let p = plan(&lines).unwrap();
        assert!(encode(&lines, &p).is_err());
    }

    #[test]
    fn named_value_accepted_in_memory_immediate_position() {
        let bytes = assemble(".equ OFF, 4\n.text\nlw a0, OFF(sp)\n");
        let word = u32::from_le_bytes(bytes.try_into().unwrap());
        assert_eq!((word >> 20) & 0xFFF, 4);
    }

    #[test]
    fn word_directive_is_big_endian_per_unit() {
        let bytes = assemble(".data\n.word 0x11223344, 0xDEADBEEF\n");
        assert_eq!(bytes, vec![0x11, 0x22, 0x33, 0x44, 0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn asciz_pads_to_four_byte_alignment() {
        let bytes = assemble(".data\n.asciz \"hi\"\n");
        assert_eq!(bytes, vec![b'h', b'i', 0x00, 0x00]);
    }

    #[test]
    fn srai_ors_shift_type_bit_into_immediate_field() {
        let bytes = assemble(".text\nsrai a0, a0, 5\n");
        let word = u32::from_le_bytes(bytes.try_into().unwrap());
        assert_eq!((word >> 20) & 0xFFF, 0x20 << 5 | 5);
    }

    #[test]
    fn out_of_range_branch_offset_is_fatal() {
        let src = format!(".text\nbeq a0, a1, {}\n", 1 << 13);
        let lines: Vec<_> = clean_source(&src)
            .iter()
            .map(parse_line)
            .collect::<Result<_, _>>()
            .unwrap();
        let p = plan(&lines).unwrap();
        assert!(encode(&lines, &p).is_err());
    }

    #[test]
    fn ecall_encodes_fixed_word() {
        let bytes = assemble(".text\necall\n");
        assert_eq!(u32::from_le_bytes(bytes.try_into().unwrap()), 0x0000_0073);
    }
}
