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

pub mod assembler;
pub mod ast;
pub mod emitter;
pub mod errors;
pub mod file_reader;
pub mod isa;
pub mod line_cleaner;
pub mod parser;

use std::path::Path;

use anyhow::{Context, Result};
use file_reader::FileReader;

extern crate pest;
extern crate pest_derive;

/// Byte address within the output image. RV32 doesn't need more than 32
/// bits of address space, and keeping this distinct from the packed
/// 32-bit instruction word (a plain `u32` in [`assembler::encoder::formats`])
/// is what the teacher's single address/word alias conflated.
pub type Addr = u32;

/// Instruction length in bytes. Fixed at build time; every RV32I encoding
/// this assembler emits is exactly one word.
pub const ILEN: u32 = 4;

/// Runs the full two-pass pipeline over a single source file: read, clean,
/// parse each logical line, size the image (Pass 1), then encode it
/// (Pass 2). Returns the finished little-endian output buffer; writing it
/// to disk is the caller's job (see [`emitter::write`]).
pub fn assemble<F: FileReader>(source_path: &Path, reader: &F) -> Result<Vec<u8>> {
    let source = reader
        .read_to_string(source_path)
        .with_context(|| format!("failed to read {}", source_path.display()))?;

    let cleaned = line_cleaner::clean_source(&source);

    let lines: Vec<ast::AssemblyLine> = cleaned
        .iter()
        .map(parser::parse_line)
        .collect::<Result<_, _>>()
        .context("failed during parsing stage")?;

    let plan = assembler::planner::plan(&lines).context("failed during assembler pass 1")?;

    let buffer =
        assembler::encoder::encode(&lines, &plan).context("failed during assembler pass 2")?;

    Ok(buffer)
}
