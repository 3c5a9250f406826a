//! Walks the pest parse tree for one line into the typed AST in
//! [`crate::ast`]. Unlike the teacher's per-mnemonic dispatch table, both
//! directives and instructions here share one grammar rule each
//! (`directive`, `instruction`); the specific name just travels along as a
//! plain string and downstream consumers (the directive builder here, the
//! format table in [`crate::isa`] for instructions) interpret it.

mod directive;
mod operand_builders;
mod utility_functions;

use crate::ast::{Directive, Instruction};
use crate::errors::AssemblyError;
use crate::parser::Rule;
use pest::iterators::Pair;

pub struct AstBuilder {
    line_number: usize,
    text: String,
}

impl AstBuilder {
    pub fn new(line_number: usize, text: &str) -> Self {
        Self {
            line_number,
            text: text.to_string(),
        }
    }

    pub fn build_label(&mut self, pair: Pair<Rule>) -> Result<String, AssemblyError> {
        let ident = pair
            .into_inner()
            .next()
            .expect("label always carries an identifier");
        Ok(ident.as_str().to_string())
    }

    pub fn build_directive(&mut self, pair: Pair<Rule>) -> Result<Directive, AssemblyError> {
        let mut inner = pair.into_inner();
        let name_pair = inner.next().expect("directive always carries a name");
        let name = &name_pair.as_str()[1..];
        let operands = match inner.next() {
            Some(list_pair) => self.build_operand_list(list_pair)?,
            None => Vec::new(),
        };
        directive::build(self.line_number, &self.text, name, operands)
    }

    pub fn build_instruction(&mut self, pair: Pair<Rule>) -> Result<Instruction, AssemblyError> {
        let mut inner = pair.into_inner();
        let mnemonic = inner
            .next()
            .expect("instruction always carries a mnemonic")
            .as_str()
            .to_string();
        let operands = match inner.next() {
            Some(list_pair) => self.build_operand_list(list_pair)?,
            None => Vec::new(),
        };
        Ok(Instruction { mnemonic, operands })
    }

    fn build_operand_list(
        &self,
        pair: Pair<Rule>,
    ) -> Result<Vec<crate::ast::Operand>, AssemblyError> {
        pair.into_inner()
            .map(|p| operand_builders::build_operand(self.line_number, &self.text, p))
            .collect()
    }
}
