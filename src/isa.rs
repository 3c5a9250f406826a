//! Static descriptors for the RV32I base integer instruction set:
//! register-name lookup and mnemonic → (format, opcode, funct3, funct7).
//!
//! Grounded on the register/instruction tables in the original Go
//! prototype (`assembler/riscv.go`) and cross-checked against real RV32I
//! opcodes as used by `examples/burjui-risky`.

use std::collections::HashMap;
use std::sync::OnceLock;

/// The five base instruction formats, plus the fixed-encoding system
/// instructions (`ecall`/`ebreak`), which don't carry any operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    R,
    I,
    S,
    B,
    U,
    J,
    Sys,
}

/// Static descriptor for one mnemonic: which format it encodes as, and
/// the fixed bit fields that distinguish it from others of the same
/// format (opcode always; funct3/funct7 only where the format uses them).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    pub format: Format,
    pub opcode: u32,
    pub funct3: u32,
    pub funct7: u32,
    /// For SYS instructions only: the complete fixed 32-bit encoding.
    pub fixed_word: u32,
}

const fn desc(format: Format, opcode: u32, funct3: u32, funct7: u32) -> InstrDesc {
    InstrDesc {
        format,
        opcode,
        funct3,
        funct7,
        fixed_word: 0,
    }
}

const fn sys(fixed_word: u32) -> InstrDesc {
    InstrDesc {
        format: Format::Sys,
        opcode: 0b111_0011,
        funct3: 0,
        funct7: 0,
        fixed_word,
    }
}

/// Register-name (ABI or `xN`) to 0..31 index. Lookup is case-sensitive.
pub fn register_index(name: &str) -> Option<u8> {
    static MAP: OnceLock<HashMap<&'static str, u8>> = OnceLock::new();
    MAP.get_or_init(build_register_map).get(name).copied()
}

fn build_register_map() -> HashMap<&'static str, u8> {
    const ABI_NAMES: [&str; 32] = [
        "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3",
        "a4", "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11",
        "t3", "t4", "t5", "t6",
    ];

    let mut map = HashMap::with_capacity(64);
    for (i, name) in ABI_NAMES.iter().enumerate() {
        map.insert(*name, i as u8);
    }
    map.insert("x0", 0);
    map.insert("x1", 1);
    map.insert("x2", 2);
    map.insert("x3", 3);
    map.insert("x4", 4);
    map.insert("x5", 5);
    map.insert("x6", 6);
    map.insert("x7", 7);
    map.insert("x8", 8);
    map.insert("x9", 9);
    map.insert("x10", 10);
    map.insert("x11", 11);
    map.insert("x12", 12);
    map.insert("x13", 13);
    map.insert("x14", 14);
    map.insert("x15", 15);
    map.insert("x16", 16);
    map.insert("x17", 17);
    map.insert("x18", 18);
    map.insert("x19", 19);
    map.insert("x20", 20);
    map.insert("x21", 21);
    map.insert("x22", 22);
    map.insert("x23", 23);
    map.insert("x24", 24);
    map.insert("x25", 25);
    map.insert("x26", 26);
    map.insert("x27", 27);
    map.insert("x28", 28);
    map.insert("x29", 29);
    map.insert("x30", 30);
    map.insert("x31", 31);
    map
}

/// Mnemonic to instruction descriptor. Lookup is case-sensitive.
pub fn instruction_desc(mnemonic: &str) -> Option<InstrDesc> {
    static MAP: OnceLock<HashMap<&'static str, InstrDesc>> = OnceLock::new();
    MAP.get_or_init(build_instruction_table).get(mnemonic).copied()
}

const OP_R: u32 = 0b011_0011;
const OP_IMM: u32 = 0b001_0011;
const OP_LOAD: u32 = 0b000_0011;
const OP_STORE: u32 = 0b010_0011;
const OP_BRANCH: u32 = 0b110_0011;
const OP_JAL: u32 = 0b110_1111;
const OP_JALR: u32 = 0b110_0111;
const OP_LUI: u32 = 0b011_0111;
const OP_AUIPC: u32 = 0b001_0111;

fn build_instruction_table() -> HashMap<&'static str, InstrDesc> {
    let mut t = HashMap::with_capacity(48);

    // R-format: register-register ALU ops.
    t.insert("add", desc(Format::R, OP_R, 0x0, 0x00));
    t.insert("sub", desc(Format::R, OP_R, 0x0, 0x20));
    t.insert("sll", desc(Format::R, OP_R, 0x1, 0x00));
    t.insert("slt", desc(Format::R, OP_R, 0x2, 0x00));
    t.insert("sltu", desc(Format::R, OP_R, 0x3, 0x00));
    t.insert("xor", desc(Format::R, OP_R, 0x4, 0x00));
    t.insert("srl", desc(Format::R, OP_R, 0x5, 0x00));
    t.insert("sra", desc(Format::R, OP_R, 0x5, 0x20));
    t.insert("or", desc(Format::R, OP_R, 0x6, 0x00));
    t.insert("and", desc(Format::R, OP_R, 0x7, 0x00));

    // I-format: immediate ALU ops.
    t.insert("addi", desc(Format::I, OP_IMM, 0x0, 0x00));
    t.insert("slti", desc(Format::I, OP_IMM, 0x2, 0x00));
    t.insert("sltiu", desc(Format::I, OP_IMM, 0x3, 0x00));
    t.insert("xori", desc(Format::I, OP_IMM, 0x4, 0x00));
    t.insert("ori", desc(Format::I, OP_IMM, 0x6, 0x00));
    t.insert("andi", desc(Format::I, OP_IMM, 0x7, 0x00));
    // Shift-immediate funct7 disambiguates logical vs arithmetic right shift;
    // the encoder masks the immediate to 5 bits and ORs in 0x20 for srai.
    t.insert("slli", desc(Format::I, OP_IMM, 0x1, 0x00));
    t.insert("srli", desc(Format::I, OP_IMM, 0x5, 0x00));
    t.insert("srai", desc(Format::I, OP_IMM, 0x5, 0x20));

    // I-format: loads.
    t.insert("lb", desc(Format::I, OP_LOAD, 0x0, 0x00));
    t.insert("lh", desc(Format::I, OP_LOAD, 0x1, 0x00));
    t.insert("lw", desc(Format::I, OP_LOAD, 0x2, 0x00));
    t.insert("lbu", desc(Format::I, OP_LOAD, 0x4, 0x00));
    t.insert("lhu", desc(Format::I, OP_LOAD, 0x5, 0x00));

    // I-format: jalr.
    t.insert("jalr", desc(Format::I, OP_JALR, 0x0, 0x00));

    // S-format: stores.
    t.insert("sb", desc(Format::S, OP_STORE, 0x0, 0x00));
    t.insert("sh", desc(Format::S, OP_STORE, 0x1, 0x00));
    t.insert("sw", desc(Format::S, OP_STORE, 0x2, 0x00));

    // B-format: branches.
    t.insert("beq", desc(Format::B, OP_BRANCH, 0x0, 0x00));
    t.insert("bne", desc(Format::B, OP_BRANCH, 0x1, 0x00));
    t.insert("blt", desc(Format::B, OP_BRANCH, 0x4, 0x00));
    t.insert("bge", desc(Format::B, OP_BRANCH, 0x5, 0x00));
    t.insert("bltu", desc(Format::B, OP_BRANCH, 0x6, 0x00));
    t.insert("bgeu", desc(Format::B, OP_BRANCH, 0x7, 0x00));

    // U-format.
    t.insert("lui", desc(Format::U, OP_LUI, 0x0, 0x00));
    t.insert("auipc", desc(Format::U, OP_AUIPC, 0x0, 0x00));

    // J-format.
    t.insert("jal", desc(Format::J, OP_JAL, 0x0, 0x00));

    // System instructions: fixed 32-bit words, no operand fields.
    t.insert("ecall", sys(0x0000_0073));
    t.insert("ebreak", sys(0x0010_0073));

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abi_and_numeric_register_names_agree() {
        assert_eq!(register_index("a0"), register_index("x10"));
        assert_eq!(register_index("zero"), Some(0));
        assert_eq!(register_index("ra"), Some(1));
        assert_eq!(register_index("t6"), Some(31));
    }

    #[test]
    fn register_lookup_is_case_sensitive() {
        assert_eq!(register_index("ZERO"), None);
        assert_eq!(register_index("A0"), None);
    }

    #[test]
    fn r_type_funct7_distinguishes_add_from_sub() {
        let add = instruction_desc("add").unwrap();
        let sub = instruction_desc("sub").unwrap();
        assert_eq!(add.opcode, sub.opcode);
        assert_eq!(add.funct3, sub.funct3);
        assert_ne!(add.funct7, sub.funct7);
    }

    #[test]
    fn unknown_mnemonic_is_absent() {
        assert!(instruction_desc("li").is_none());
        assert!(instruction_desc("mv").is_none());
    }
}
