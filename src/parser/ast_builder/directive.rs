use crate::ast::{Directive, ImmValue, Operand};
use crate::errors::AssemblyError;

/// Builds a [`Directive`] from its already-stripped name (no leading `.`)
/// and its parsed operand list. Operand shape is validated here rather
/// than deferred to Pass 1, since a directive with the wrong operand shape
/// is a structural error, not a semantic one.
pub fn build(
    line_number: usize,
    text: &str,
    name: &str,
    operands: Vec<Operand>,
) -> Result<Directive, AssemblyError> {
    match name {
        "org" => Ok(Directive::Org(one_imm(line_number, text, name, operands)?)),
        "align" => Ok(Directive::Align(one_literal_u32(line_number, text, name, operands)?)),
        "section" => Ok(Directive::Section(one_name(line_number, text, name, operands)?)),
        "text" | "data" | "bss" | "rodata" => {
            if !operands.is_empty() {
                return Err(AssemblyError::structural(
                    line_number,
                    text,
                    format!(".{name} takes no operands"),
                ));
            }
            Ok(Directive::Section(format!(".{name}")))
        }
        "globl" => Ok(Directive::Globl(one_name(line_number, text, name, operands)?)),
        "local" => Ok(Directive::Local(one_name(line_number, text, name, operands)?)),
        "equ" => build_equ(line_number, text, operands),
        "asciz" => Ok(Directive::Asciz(one_string(line_number, text, name, operands)?)),
        "zero" => Ok(Directive::Zero(one_literal_u32(line_number, text, name, operands)?)),
        "half" => Ok(Directive::Half(imm_list(line_number, text, name, operands)?)),
        "word" => Ok(Directive::Word(imm_list(line_number, text, name, operands)?)),
        "dword" => Ok(Directive::Dword(imm_list(line_number, text, name, operands)?)),
        _ => Err(AssemblyError::structural(
            line_number,
            text,
            format!("unknown directive '.{name}'"),
        )),
    }
}

fn one_imm(
    line_number: usize,
    text: &str,
    name: &str,
    mut operands: Vec<Operand>,
) -> Result<ImmValue, AssemblyError> {
    if operands.len() != 1 {
        return Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} takes exactly one operand"),
        ));
    }
    match operands.remove(0) {
        Operand::Immediate(imm) => Ok(imm),
        _ => Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} operand must be an immediate value or name"),
        )),
    }
}

fn one_literal_u32(
    line_number: usize,
    text: &str,
    name: &str,
    operands: Vec<Operand>,
) -> Result<u32, AssemblyError> {
    match one_imm(line_number, text, name, operands)? {
        ImmValue::Literal(v) if v >= 0 => Ok(v as u32),
        ImmValue::Literal(_) => Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} operand must be non-negative"),
        )),
        ImmValue::Name(_) => Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} operand must be a literal integer, not a name"),
        )),
    }
}

fn one_name(
    line_number: usize,
    text: &str,
    name: &str,
    operands: Vec<Operand>,
) -> Result<String, AssemblyError> {
    match one_imm(line_number, text, name, operands)? {
        ImmValue::Name(n) => Ok(n),
        ImmValue::Literal(_) => Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} operand must be a name"),
        )),
    }
}

fn one_string(
    line_number: usize,
    text: &str,
    name: &str,
    mut operands: Vec<Operand>,
) -> Result<String, AssemblyError> {
    if operands.len() != 1 {
        return Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} takes exactly one string operand"),
        ));
    }
    match operands.remove(0) {
        Operand::StringLiteral(s) => Ok(s),
        _ => Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} operand must be a quoted string"),
        )),
    }
}

fn imm_list(
    line_number: usize,
    text: &str,
    name: &str,
    operands: Vec<Operand>,
) -> Result<Vec<ImmValue>, AssemblyError> {
    if operands.is_empty() {
        return Err(AssemblyError::structural(
            line_number,
            text,
            format!(".{name} requires at least one value"),
        ));
    }
    operands
        .into_iter()
        .map(|op| match op {
            Operand::Immediate(imm) => Ok(imm),
            _ => Err(AssemblyError::structural(
                line_number,
                text,
                format!(".{name} values must be immediates or names"),
            )),
        })
        .collect()
}

fn build_equ(
    line_number: usize,
    text: &str,
    mut operands: Vec<Operand>,
) -> Result<Directive, AssemblyError> {
    if operands.len() != 2 {
        return Err(AssemblyError::structural(
            line_number,
            text,
            ".equ takes exactly a name and a literal integer value",
        ));
    }
    let value_op = operands.remove(1);
    let name_op = operands.remove(0);

    let name = match name_op {
        Operand::Immediate(ImmValue::Name(n)) => n,
        _ => {
            return Err(AssemblyError::structural(
                line_number,
                text,
                ".equ's first operand must be a name",
            ));
        }
    };

    let value = match value_op {
        Operand::Immediate(ImmValue::Literal(v)) => v,
        _ => {
            return Err(AssemblyError::structural(
                line_number,
                text,
                ".equ's value must be a literal integer; expressions are not supported",
            ));
        }
    };

    Ok(Directive::Equ(name, value))
}
