// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Error types returned by the `pbcstat_rs` library.

use thiserror::Error;

/// Errors that can occur when pairing a field with the lengths of its periodic box.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Field has `{field}` dimensions and `{lengths}` box lengths were provided (both must be 3).")]
    InvalidDimension { field: usize, lengths: usize },
    #[error("Box length `{1}` along axis `{0}` is not positive.")]
    InvalidLength(usize, f64),
    #[error("Grid of shape `{}` has no cells along at least one axis.", shape_to_string(.0))]
    EmptyGrid([usize; 3]),
}

fn shape_to_string(shape: &[usize; 3]) -> String {
    format!("{} x {} x {}", shape[0], shape[1], shape[2])
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_string() {
        assert_eq!(shape_to_string(&[4, 0, 12]), "4 x 0 x 12");
    }

    #[test]
    fn display_mentions_values() {
        let message = FieldError::InvalidLength(2, -1.5).to_string();
        assert!(message.contains("-1.5"));

        let message = FieldError::InvalidDimension {
            field: 2,
            lengths: 3,
        }
        .to_string();
        assert!(message.contains("dimensions"));

        let message = FieldError::EmptyGrid([4, 0, 12]).to_string();
        assert!(message.contains("4 x 0 x 12"));
    }

    #[test]
    fn display_plain_text() {
        assert_eq!(
            FieldError::InvalidLength(1, -1.5).to_string(),
            "Box length `-1.5` along axis `1` is not positive."
        );
        assert_eq!(
            FieldError::InvalidDimension {
                field: 2,
                lengths: 3
            }
            .to_string(),
            "Field has `2` dimensions and `3` box lengths were provided (both must be 3)."
        );
        assert_eq!(
            FieldError::EmptyGrid([4, 0, 12]).to_string(),
            "Grid of shape `4 x 0 x 12` has no cells along at least one axis."
        );

        for error in [
            FieldError::InvalidLength(0, 0.0),
            FieldError::EmptyGrid([0, 1, 1]),
        ] {
            assert!(!error.to_string().contains('\x1b'));
        }
    }
}
