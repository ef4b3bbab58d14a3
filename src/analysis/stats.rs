use std::collections::HashMap;
use std::hash::Hash;

/// Outcome of a mode computation over a multiset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode<T> {
    /// Every value achieving the maximum count; order unspecified.
    Values(Vec<T>),
    NoMode,
}

/// Most frequent value(s) of `values`, keeping all tied maxima.
///
/// A single-element input is its own mode. When every value occurs once and
/// the input has more than one element there is no mode; the empty input also
/// has none. Order-independent over the input multiset.
pub fn mode<T: Eq + Hash + Clone>(values: &[T]) -> Mode<T> {
    let mut counts: HashMap<&T, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut max_count = 0;
    let mut modes: Vec<T> = Vec::new();
    for (value, count) in counts {
        if count > max_count {
            max_count = count;
            modes = vec![value.clone()];
        } else if count == max_count {
            modes.push(value.clone());
        }
    }

    if max_count > 1 || values.len() == 1 {
        Mode::Values(modes)
    } else {
        Mode::NoMode
    }
}
