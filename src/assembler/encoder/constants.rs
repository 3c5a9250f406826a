//! Fixed encodings that don't belong in the mnemonic table in
//! [`crate::isa`] because they're not tied to a single mnemonic: the
//! padding filler used inside `.text`.

/// `addi x0, x0, 0` — the canonical RV32 NOP, little-endian bytes
/// `13 00 00 00`. Used to pad `.org`/`.align` gaps inside `.text`.
pub const NOP: u32 = 0x0000_0013;
