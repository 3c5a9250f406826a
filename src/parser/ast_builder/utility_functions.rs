use crate::errors::AssemblyError;

/// Parses a literal integer as produced by the `immediate` grammar rule:
/// an optional leading `-`, then `0x`/`0b`-prefixed or plain decimal digits.
pub fn parse_literal(line_number: usize, text: &str, raw: &str) -> Result<i64, AssemblyError> {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, raw),
    };

    let value = if let Some(hex) = unsigned.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(bin) = unsigned.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        unsigned.parse::<i64>()
    }
    .map_err(|_| AssemblyError::structural(line_number, text, format!("invalid integer literal '{raw}'")))?;

    Ok(sign * value)
}

/// Un-escapes a quoted string body: `\n`, `\t`, `\\`, `\"` and `\0`.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
