//! Turns cleaned logical lines into [`crate::ast::AssemblyLine`]s.
//!
//! Unlike a whole-file grammar, [`RiscvParser`] parses one already-cleaned
//! line at a time — the line cleaner has already stripped comments and
//! blank lines and tracks each line's original source number, so the
//! grammar only needs to describe what a single logical line looks like.
//! Syntax errors are wrapped into [`AssemblyError::Structural`] using that
//! tracked line number, since pest's own line:col would otherwise always
//! read "line 1" for a single-line input.

mod ast_builder;

use crate::ast::AssemblyLine;
use crate::errors::AssemblyError;
use crate::line_cleaner::CleanedLine;
use ast_builder::AstBuilder;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct RiscvParser;

pub fn parse_line(cleaned: &CleanedLine) -> Result<AssemblyLine, AssemblyError> {
    let mut pairs = RiscvParser::parse(Rule::line, &cleaned.text).map_err(|e| {
        AssemblyError::structural(cleaned.line_number, cleaned.text.clone(), e.to_string())
    })?;

    let line_pair = pairs
        .next()
        .expect("Rule::line always produces exactly one pair");

    let mut builder = AstBuilder::new(cleaned.line_number, &cleaned.text);
    let mut label = None;
    let mut directive = None;
    let mut instruction = None;

    for pair in line_pair.into_inner() {
        match pair.as_rule() {
            Rule::label => label = Some(builder.build_label(pair)?),
            Rule::directive => directive = Some(builder.build_directive(pair)?),
            Rule::instruction => instruction = Some(builder.build_instruction(pair)?),
            Rule::EOI => {}
            other => unreachable!("unexpected top-level rule: {other:?}"),
        }
    }

    Ok(AssemblyLine {
        line_number: cleaned.line_number,
        text: cleaned.text.clone(),
        label,
        directive,
        instruction,
    })
}
