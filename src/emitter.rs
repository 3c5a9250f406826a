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

//! Writes the finished output buffer to disk. The buffer produced by
//! [`crate::assembler::encoder::encode`] is already in its final byte
//! order (little-endian instruction words, big-endian data units per the
//! preserved `.half`/`.word`/`.dword` quirk) — this is a blind
//! byte-for-byte write, nothing more.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub fn write(path: &Path, buffer: &[u8]) -> Result<()> {
    fs::write(path, buffer).with_context(|| format!("failed to write {}", path.display()))
}
