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

use riscv_asm::assemble;
use riscv_asm::file_reader::MockFileReader;
use std::path::Path;

fn assemble_source(src: &str) -> Vec<u8> {
    let mut reader = MockFileReader::default();
    reader.add_file("test.s", src);
    assemble(Path::new("test.s"), &reader).unwrap()
}

fn assemble_err(src: &str) -> String {
    let mut reader = MockFileReader::default();
    reader.add_file("test.s", src);
    assemble(Path::new("test.s"), &reader).unwrap_err().to_string()
}

// Scenario 1: empty text section.
#[test]
fn empty_text_section_produces_no_bytes() {
    let bytes = assemble_source(".text\n");
    assert!(bytes.is_empty());
}

// Scenario 2: single add.
#[test]
fn single_add_encodes_to_four_bytes() {
    let bytes = assemble_source(".text\nadd a0, a1, a2\n");
    assert_eq!(bytes, vec![0x33, 0x85, 0xC5, 0x00]);
}

// Scenario 3: forward branch.
#[test]
fn forward_branch_spans_two_instructions() {
    let bytes = assemble_source(".text\nstart: beq a0, a1, end\naddi a0, a0, 1\nend:\n");
    assert_eq!(bytes.len(), 8);
    let word = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
    let imm11 = (word >> 7) & 0x1;
    let imm4_1 = (word >> 8) & 0xF;
    let imm10_5 = (word >> 25) & 0x3F;
    let imm12 = (word >> 31) & 0x1;
    let decoded = (imm12 << 12) | (imm11 << 11) | (imm10_5 << 5) | (imm4_1 << 1);
    assert_eq!(decoded, 8);
}

// Scenario 4: `.equ` is not a valid plain I-literal immediate.
#[test]
fn equ_name_rejected_in_plain_i_immediate_position() {
    assert!(assemble_err(".equ FOO, 5\n.text\naddi a0, a0, FOO\n").contains("immediate"));
}

// Scenario 5: `.word` data, big-endian per unit.
#[test]
fn word_directive_data_section() {
    let bytes = assemble_source(".data\n.word 0x11223344, 0xDEADBEEF\n");
    assert_eq!(bytes, vec![0x11, 0x22, 0x33, 0x44, 0xDE, 0xAD, 0xBE, 0xEF]);
}

// Scenario 6: `.asciz` alignment.
#[test]
fn asciz_pads_to_four_bytes() {
    let bytes = assemble_source(".data\n.asciz \"hi\"\n");
    assert_eq!(bytes, vec![b'h', b'i', 0x00, 0x00]);
}

// P1: output length equals Pass 1's computed size.
#[test]
fn output_length_matches_computed_size() {
    let bytes = assemble_source(".text\nadd a0, a1, a2\naddi a0, a0, 1\n.data\n.word 1, 2\n");
    assert_eq!(bytes.len(), 4 + 4 + 8);
}

// P4/I5: every instruction starts on a 4-byte boundary even across a gap.
#[test]
fn org_padding_keeps_instructions_aligned() {
    let bytes = assemble_source(".text\nnop_filler:\n.org 12\nadd a0, a1, a2\n");
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[12..16], &[0x33, 0x85, 0xC5, 0x00]);
}

// P5: padding bytes are 0x13 in .text and 0x00 elsewhere.
#[test]
fn padding_is_nop_in_text_and_zero_in_data() {
    let text = assemble_source(".text\n.org 8\n");
    assert_eq!(text, vec![0x13, 0x00, 0x00, 0x00, 0x13, 0x00, 0x00, 0x00]);

    let data = assemble_source(".data\n.zero 4\n");
    assert_eq!(data, vec![0x00, 0x00, 0x00, 0x00]);
}

// P6: assembling the same source twice is byte-identical.
#[test]
fn assembling_twice_is_idempotent() {
    let src = ".text\nstart: jal ra, start\n";
    assert_eq!(assemble_source(src), assemble_source(src));
}

#[test]
fn globl_before_label_is_patched_in_place() {
    let bytes = assemble_source(".text\n.globl start\nstart: jal ra, start\n");
    let word = u32::from_le_bytes(bytes.try_into().unwrap());
    // jal ra, start (offset 0): opcode 0x6F, rd=1 (ra), every immediate bit zero.
    assert_eq!(word, 0x0000_00EF);
}

#[test]
fn jalr_load_style_operand_resolves_register_and_offset() {
    let bytes = assemble_source(".text\njalr ra, 4(sp)\n");
    let word = u32::from_le_bytes(bytes.try_into().unwrap());
    assert_eq!((word >> 15) & 0x1F, 2); // sp
    assert_eq!((word >> 20) & 0xFFF, 4);
}

#[test]
fn instruction_outside_text_is_rejected() {
    assert!(assemble_err(".data\nadd a0, a1, a2\n").contains("text"));
}

#[test]
fn unknown_directive_is_rejected() {
    assert!(assemble_err(".text\n.frobnicate 1\n").len() > 0);
}

#[test]
fn unresolved_branch_target_is_rejected() {
    assert!(assemble_err(".text\nbeq a0, a1, nowhere\n").contains("undefined"));
}

// Re-declaring a section resets its base to the current location counter
// (§9 redesign decision); a symbol recorded against an earlier instance of
// that section name resolves against the *final* base, not the one active
// when the label was seen. This test only pins down the image size and that
// both references still resolve (no undefined-symbol error) — the exact
// resulting offsets are a documented quirk, not a guarantee.
#[test]
fn redeclaring_a_section_resets_its_base_address() {
    let bytes = assemble_source(
        ".text\nnop_one: jal ra, nop_one\n.data\n.word 1\n.text\njal ra, nop_one\n",
    );
    assert_eq!(bytes.len(), 12);
}

#[test]
fn half_and_dword_directives_reserve_expected_byte_counts() {
    let bytes = assemble_source(".data\n.half 1, 2, 3\n.dword 0xFF\n");
    // 3 halves = 6 bytes, then .dword rounds up to 4-byte alignment (8) before writing 8 bytes.
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[8..16], &[0, 0, 0, 0, 0, 0, 0, 0xFF]);
}
