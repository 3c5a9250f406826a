use thiserror::Error;

/// All fatal errors raised while assembling a source file.
///
/// Every variant carries the 1-based source line number and the cleaned
/// line text it was raised against, so the driver can print a diagnostic
/// that points at the offending source without re-deriving it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    #[error("line {line}: {reason}\n  --> {text}")]
    Structural {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("line {line}: {reason}\n  --> {text}")]
    Semantic {
        line: usize,
        text: String,
        reason: String,
    },
}

impl AssemblyError {
    pub fn structural(line: usize, text: impl Into<String>, reason: impl Into<String>) -> Self {
        AssemblyError::Structural {
            line,
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub fn semantic(line: usize, text: impl Into<String>, reason: impl Into<String>) -> Self {
        AssemblyError::Semantic {
            line,
            text: text.into(),
            reason: reason.into(),
        }
    }
}
