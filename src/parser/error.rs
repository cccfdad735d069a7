use thiserror::Error;

/// Raised when a karyotype string cannot be matched against its grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Karyotype string is empty")]
    Empty,

    #[error(
        "Missing comma separator between chromosome count and sex chromosomes in '{0}'"
    )]
    MissingSeparator(String),

    #[error("Invalid chromosome count: '{0}' is not a number")]
    InvalidCount(String),

    #[error("Invalid sex chromosomes: '{0}' must contain only X, Y, or U")]
    InvalidSexChromosomes(String),

    #[error("Empty cell line at position {0} of '{1}'")]
    EmptyCellLine(usize, String),

    #[error("Invalid cell count '[{0}]': expected a whole number in brackets such as [10]")]
    InvalidCellCount(String),

    #[error("Malformed {keyword} notation '{fragment}': expected {expected}")]
    Malformed {
        keyword: &'static str,
        fragment: String,
        expected: &'static str,
    },

    #[error(
        "Invalid breakpoint '{token}' in '{fragment}': expected an arm (p or q) followed by band digits, such as q13 or p11.2"
    )]
    InvalidBreakpoint { token: String, fragment: String },

    #[error("Too many breakpoints in '{fragment}': {keyword} takes at most {max}, found {found}")]
    TooManyBreakpoints {
        keyword: &'static str,
        fragment: String,
        max: usize,
        found: usize,
    },
}
