use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error(
        "Mismatched dimensions for {op}: left is {left_columns}x{left_rows}, right is {right_columns}x{right_rows} (columns x rows)"
    )]
    ShapeMismatch {
        op: &'static str,
        left_columns: usize,
        left_rows: usize,
        right_columns: usize,
        right_rows: usize,
    },

    #[error("{op} is only supported for 2x2 matrices (got {columns}x{rows})")]
    Not2x2 {
        op: &'static str,
        columns: usize,
        rows: usize,
    },

    #[error("Singular matrix: determinant {determinant} is too close to zero")]
    Singular { determinant: f64 },
}
