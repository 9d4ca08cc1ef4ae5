//! Verhoeff check digit over decimal strings (dihedral group D5).

use crate::error::SetupError;

/// Multiplication table of D5.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutations, cycled with period 8.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Inverses in D5.
const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Check digit value for digits given most-significant first.
pub(crate) fn check_digit_value(digits: &[u8]) -> u8 {
    let c = digits
        .iter()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, &digit)| {
            D[c as usize][P[(i + 1) % 8][digit as usize] as usize]
        });
    INV[c as usize]
}

fn parse_digits(s: &str) -> Result<Vec<u8>, SetupError> {
    s.chars()
        .map(|ch| {
            ch.to_digit(10)
                .map(|d| d as u8)
                .ok_or(SetupError::InvalidDigit(ch))
        })
        .collect()
}

/// Compute the Verhoeff check digit for a string of decimal digits.
///
/// An empty string yields `'0'`.
pub fn check_digit(digits: &str) -> Result<char, SetupError> {
    let values = parse_digits(digits)?;
    Ok(char::from(b'0' + check_digit_value(&values)))
}

/// Whether the last digit of `code` is the check digit of the rest.
///
/// Returns `false` for empty or non-decimal input.
pub fn validate(code: &str) -> bool {
    match parse_digits(code) {
        Ok(values) => match values.split_last() {
            Some((&last, payload)) => check_digit_value(payload) == last,
            None => false,
        },
        Err(_) => false,
    }
}
