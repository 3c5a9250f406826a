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

//! The assembly pipeline proper: Pass 1 sizing ([`planner`]) and Pass 2
//! encoding ([`encoder`]), plus the tables both passes share
//! ([`section_table`], [`symbol_table`], [`value_table`]).
//!
//! Generalized from the teacher's module split (`constant_table`,
//! `symbol_table`, `section_stack`, `encoder`, driven by a free-standing
//! `build_constant_table`/`build_symbol_table`/`generate_bytecode` trio in
//! this file) into the flat two-pass model this spec describes: one
//! `plan()` call produces every table Pass 2 needs, one `encode()` call
//! consumes them. There's no constant pre-pass here because `.equ` is
//! folded into the same Pass-1 walk that builds the section/symbol tables
//! (see [`planner::plan`]).

pub mod encoder;
pub mod planner;
pub mod section_table;
pub mod symbol_table;
pub mod value_table;
