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

use anyhow::Result;
use clap::Parser as clap_parser;
use riscv_asm::emitter;
use riscv_asm::file_reader::AsmFileReader;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version, author = "Connor Nolan")]
struct Opts {
    /// Assembly source file to assemble.
    #[clap(short, long, default_value = "assembly/asm_example.s")]
    input: PathBuf,

    /// Path to write the assembled raw binary image to.
    #[clap(short, long, default_value = "assembly.bin")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let reader = AsmFileReader;
    let image = riscv_asm::assemble(&opts.input, &reader)?;
    emitter::write(&opts.output, &image)?;

    println!(
        "Successfully assembled {} to {} ({} bytes)",
        opts.input.display(),
        opts.output.display(),
        image.len()
    );

    Ok(())
}
