use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// InputValueError is used if some parameter does not fulfill the posed requirements, e.g., a
/// duplicate driver name in the roster or a contracted driver that does not exist.
#[derive(Debug, Clone)]
pub struct InputValueError {
    pub msg: String,
}

impl InputValueError {
    pub fn new(msg: impl Into<String>) -> InputValueError {
        InputValueError { msg: msg.into() }
    }
}

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value: {}", self.msg)
    }
}

impl Error for InputValueError {}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array. The sort is stable, i.e. equal values keep
/// their insertion order. Incomparable values (NaN) are treated as equal.
pub fn argsort<T: PartialOrd>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    match order {
        SortOrder::Ascending => {
            indices.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal))
        }
        SortOrder::Descending => {
            indices.sort_by(|&a, &b| x[b].partial_cmp(&x[a]).unwrap_or(Ordering::Equal))
        }
    }
    indices
}

/// round_to rounds x to the given number of decimal places.
pub fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argsort_descending_is_stable() {
        let x = [1.0, 3.0, 2.0, 3.0];
        assert_eq!(argsort(&x, SortOrder::Descending), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_argsort_ascending() {
        let x = [5, 1, 4];
        assert_eq!(argsort(&x, SortOrder::Ascending), vec![1, 2, 0]);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.0 / 3.0, 1), 0.7);
    }
}
