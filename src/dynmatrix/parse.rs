use std::fmt;
use std::str::FromStr;

use crate::error::{MatrixError, Result};
use crate::traits::Scalar;

use super::DynMatrix;

/// Characters that only decorate a row (the `Display` border and brackets).
const DECORATION: &[char] = &['│', '[', ']'];

/// Trim whitespace and decoration from both ends.
fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || DECORATION.contains(&c))
}

/// Split one row into value tokens.
///
/// Runs of whitespace collapse. With a non-whitespace `value_sep`, every
/// field between two separators must hold a value; an empty field is an
/// error. When `whitespace_separates` is set, whitespace inside a field
/// also separates values. A row that is blank after trimming yields no
/// tokens.
fn row_tokens(
    row: &str,
    value_sep: char,
    whitespace_separates: bool,
) -> core::result::Result<Vec<&str>, String> {
    let row = trim(row);
    if row.is_empty() {
        return Ok(Vec::new());
    }
    if value_sep.is_whitespace() {
        return Ok(row.split_whitespace().map(trim).filter(|t| !t.is_empty()).collect());
    }

    let mut tokens = Vec::new();
    for (k, field) in row.split(value_sep).enumerate() {
        let before = tokens.len();
        if whitespace_separates {
            tokens.extend(field.split_whitespace().map(trim).filter(|t| !t.is_empty()));
        } else {
            let t = trim(field);
            if !t.is_empty() {
                tokens.push(t);
            }
        }
        if tokens.len() == before {
            return Err(format!("empty value in field {}", k + 1));
        }
    }
    Ok(tokens)
}

impl<T> DynMatrix<T>
where
    T: Scalar + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    /// Parse a matrix whose rows are split on `row_sep` and whose values are
    /// split on `value_sep`.
    ///
    /// Surrounding whitespace around every value is ignored, as are rows
    /// that are empty after trimming. Fails with [`MatrixError::Parse`] on a
    /// non-numeric value, an empty field between two separators, a row whose
    /// length differs from the first row, or text with no rows at all.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let m: DynMatrix<f64> = DynMatrix::parse_delimited("1|2 / 3|4", '/', '|').unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// assert!(DynMatrix::<f64>::parse_delimited("1||2 / 3|4", '/', '|').is_err());
    /// ```
    pub fn parse_delimited(text: &str, row_sep: char, value_sep: char) -> Result<Self> {
        Self::from_rows_text(text.split(row_sep), value_sep, false)
    }

    fn from_rows_text<'a>(
        rows: impl Iterator<Item = &'a str>,
        value_sep: char,
        whitespace_separates: bool,
    ) -> Result<Self> {
        let mut data = Vec::new();
        let mut ncols = None;
        let mut nrows = 0;

        for (idx, row) in rows.enumerate() {
            let line = idx + 1;
            let tokens = row_tokens(row, value_sep, whitespace_separates)
                .map_err(|message| MatrixError::Parse { line, message })?;
            if tokens.is_empty() {
                continue;
            }
            match ncols {
                None => ncols = Some(tokens.len()),
                Some(n) if n != tokens.len() => {
                    return Err(MatrixError::Parse {
                        line,
                        message: format!("expected {} values, found {}", n, tokens.len()),
                    });
                }
                Some(_) => {}
            }
            for tok in tokens {
                let value = tok.parse::<T>().map_err(|e| MatrixError::Parse {
                    line,
                    message: format!("invalid value `{}`: {}", tok, e),
                })?;
                data.push(value);
            }
            nrows += 1;
        }

        let ncols = ncols.ok_or_else(|| MatrixError::Parse {
            line: 1,
            message: "no rows".to_string(),
        })?;
        DynMatrix::from_vec(nrows, ncols, data)
    }
}

impl<T> FromStr for DynMatrix<T>
where
    T: Scalar + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    type Err = MatrixError;

    /// Parse the compact `1, 2; 3, 4` form or a multi-line grid.
    ///
    /// Rows are split on `;` or newline, values on `,` or whitespace. Runs
    /// of whitespace count as one separator, but two commas with nothing
    /// between them are an error. The border characters emitted by
    /// `Display` are ignored, so printed matrices parse back.
    ///
    /// ```
    /// use echelon::DynMatrix;
    /// let a: DynMatrix<f64> = "1, 2; 3, 4".parse().unwrap();
    /// let b: DynMatrix<f64> = "1 2\n3   4".parse().unwrap();
    /// assert_eq!(a, b);
    /// assert!("1,,2; 3,4".parse::<DynMatrix<f64>>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        Self::from_rows_text(s.split(|c: char| c == ';' || c == '\n'), ',', true)
    }
}
