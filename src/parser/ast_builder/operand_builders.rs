use super::utility_functions::{parse_literal, unescape};
use crate::ast::{ImmValue, Operand, Register};
use crate::errors::AssemblyError;
use crate::isa;
use crate::parser::Rule;
use pest::iterators::Pair;

pub fn build_operand(
    line_number: usize,
    text: &str,
    pair: Pair<Rule>,
) -> Result<Operand, AssemblyError> {
    let inner = pair
        .into_inner()
        .next()
        .expect("operand always wraps exactly one alternative");

    match inner.as_rule() {
        Rule::memory => build_memory(line_number, text, inner),
        Rule::register => Ok(Operand::Register(build_register(line_number, text, inner)?)),
        Rule::immediate => Ok(Operand::Immediate(ImmValue::Literal(parse_literal(
            line_number,
            text,
            inner.as_str(),
        )?))),
        Rule::string_literal => Ok(Operand::StringLiteral(build_string_literal(inner))),
        Rule::identifier => Ok(Operand::Immediate(ImmValue::Name(inner.as_str().to_string()))),
        other => unreachable!("unexpected operand alternative: {other:?}"),
    }
}

pub fn build_register(
    line_number: usize,
    text: &str,
    pair: Pair<Rule>,
) -> Result<Register, AssemblyError> {
    isa::register_index(pair.as_str())
        .map(Register)
        .ok_or_else(|| {
            AssemblyError::structural(
                line_number,
                text,
                format!("unknown register '{}'", pair.as_str()),
            )
        })
}

fn build_memory(line_number: usize, text: &str, pair: Pair<Rule>) -> Result<Operand, AssemblyError> {
    let mut inner = pair.into_inner();
    let imm_pair = inner
        .next()
        .expect("memory operand always carries an immediate or name");
    let base_pair = inner
        .next()
        .expect("memory operand always carries a base register");

    let imm = match imm_pair.as_rule() {
        Rule::immediate => ImmValue::Literal(parse_literal(line_number, text, imm_pair.as_str())?),
        Rule::identifier => ImmValue::Name(imm_pair.as_str().to_string()),
        other => unreachable!("unexpected memory-offset alternative: {other:?}"),
    };
    let base = build_register(line_number, text, base_pair)?;

    Ok(Operand::Memory { imm, base })
}

fn build_string_literal(pair: Pair<Rule>) -> String {
    let inner = pair
        .into_inner()
        .next()
        .expect("string_literal always wraps string_inner");
    unescape(inner.as_str())
}
