//! Reading coefficients and evaluation points from text.

use std::io::{BufRead, Write};
use std::num::ParseFloatError;

use thiserror::Error;

/// Failure to read a numeric value supplied by the user.
#[derive(Debug, Error)]
pub enum InputError {
    /// The text is not a floating-point number.
    #[error("invalid value `{text}` for {field}")]
    InvalidNumber {
        /// What was being read, e.g. `a[2]`
        field: String,
        /// The offending text
        text: String,
        /// Underlying parse failure
        #[source]
        source: ParseFloatError,
    },

    /// The value parsed but is NaN or infinite.
    #[error("value `{text}` for {field} is not finite")]
    NotFinite {
        /// What was being read
        field: String,
        /// The offending text
        text: String,
    },

    /// No coefficients were given.
    #[error("no coefficients given")]
    Empty,

    /// The requested degree has no representable coefficient count.
    #[error("degree {degree} is too large")]
    DegreeTooLarge {
        /// Requested degree
        degree: usize,
    },

    /// Input ended before all coefficients were read.
    #[error("input ended after {read} of {expected} coefficients")]
    UnexpectedEnd {
        /// Coefficients read so far
        read: usize,
        /// Coefficients required
        expected: usize,
    },

    /// Reading or prompting failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Parse one finite number.
pub fn parse_number(field: &str, text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    let value: f64 = text.parse().map_err(|source| InputError::InvalidNumber {
        field: field.to_string(),
        text: text.to_string(),
        source,
    })?;
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: field.to_string(),
            text: text.to_string(),
        });
    }
    Ok(value)
}

/// Parse ascending coefficients separated by commas and/or whitespace.
pub fn parse_coefficient_list(text: &str) -> Result<Vec<f64>, InputError> {
    let coefficients = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| parse_number(&format!("a[{i}]"), token))
        .collect::<Result<Vec<_>, _>>()?;

    if coefficients.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(coefficients)
}

/// Interactively read the `degree + 1` coefficients of a polynomial.
///
/// Writes an `a[i] = ` prompt before each coefficient. Values may be given
/// one per line or several per line separated by whitespace.
pub fn read_coefficients<R, W>(
    mut reader: R,
    mut prompt: W,
    degree: usize,
) -> Result<Vec<f64>, InputError>
where
    R: BufRead,
    W: Write,
{
    let expected = degree
        .checked_add(1)
        .ok_or(InputError::DegreeTooLarge { degree })?;
    // Grows with the input rather than the requested degree.
    let mut coefficients = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut line = String::new();

    while coefficients.len() < expected {
        let index = coefficients.len();
        write!(prompt, "a[{index}] = ")?;
        prompt.flush()?;

        while pending.is_empty() {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(InputError::UnexpectedEnd {
                    read: index,
                    expected,
                });
            }
            // Reverse so that pop() yields tokens in reading order.
            pending = line.split_whitespace().rev().map(str::to_string).collect();
        }

        if let Some(token) = pending.pop() {
            coefficients.push(parse_number(&format!("a[{index}]"), &token)?);
        }
    }

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("x", " 1.001 ").unwrap(), 1.001);
        assert_eq!(parse_number("x", "-3e2").unwrap(), -300.0);
        assert!(matches!(
            parse_number("x", "abc"),
            Err(InputError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_number("x", "inf"),
            Err(InputError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_parse_coefficient_list() {
        assert_eq!(
            parse_coefficient_list("-1,3,-3,1").unwrap(),
            vec![-1.0, 3.0, -3.0, 1.0]
        );
        assert_eq!(
            parse_coefficient_list(" 0.5  2, 4 ").unwrap(),
            vec![0.5, 2.0, 4.0]
        );
        assert!(matches!(parse_coefficient_list(" , "), Err(InputError::Empty)));

        let err = parse_coefficient_list("1,two,3").unwrap_err();
        assert_eq!(err.to_string(), "invalid value `two` for a[1]");
    }

    #[test]
    fn test_read_coefficients_one_per_line() {
        let input = Cursor::new("-1\n3\n-3\n1\n");
        let mut prompts = Vec::new();
        let coefficients = read_coefficients(input, &mut prompts, 3).unwrap();

        assert_eq!(coefficients, vec![-1.0, 3.0, -3.0, 1.0]);
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "a[0] = a[1] = a[2] = a[3] = "
        );
    }

    #[test]
    fn test_read_coefficients_tokens_on_one_line() {
        let input = Cursor::new("1 2\n\n3 4 5\n");
        let coefficients = read_coefficients(input, std::io::sink(), 2).unwrap();
        assert_eq!(coefficients, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_read_coefficients_failures() {
        let err = read_coefficients(Cursor::new("1\n2\n"), std::io::sink(), 3).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnexpectedEnd {
                read: 2,
                expected: 4
            }
        ));

        let err = read_coefficients(Cursor::new("1\nx\n"), std::io::sink(), 1).unwrap_err();
        assert_eq!(err.to_string(), "invalid value `x` for a[1]");
    }

    #[test]
    fn test_read_coefficients_huge_degree() {
        let err = read_coefficients(Cursor::new("1\n"), std::io::sink(), usize::MAX).unwrap_err();
        assert!(matches!(err, InputError::DegreeTooLarge { degree: usize::MAX }));

        let degree = 100_000_000_000_000;
        let err = read_coefficients(Cursor::new("1\n"), std::io::sink(), degree).unwrap_err();
        assert!(matches!(
            err,
            InputError::UnexpectedEnd {
                read: 1,
                expected: 100_000_000_000_001
            }
        ));
    }
}
