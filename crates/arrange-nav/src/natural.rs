//! Natural ("human") string ordering.
//!
//! Strings are split into alternating text and digit runs. Text runs compare
//! case-insensitively by code point; digit runs compare by numeric value, of
//! any length, ignoring leading zeros. A string starting with a digit gets an
//! empty leading text run, so runs at the same position always have the
//! same kind.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Text(String),
    Number(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut rest = s;
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        out.push(Chunk::Text(String::new()));
    }
    while !rest.is_empty() {
        let digits = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        out.push(if digits {
            Chunk::Number(run)
        } else {
            Chunk::Text(run.to_lowercase())
        });
        rest = tail;
    }
    out
}

fn cmp_number(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare two strings in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = chunks(a);
    let b = chunks(b);
    for (x, y) in a.iter().zip(&b) {
        let ord = match (x, y) {
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
            (Chunk::Number(x), Chunk::Number(y)) => cmp_number(x, y),
            // Unreachable given the leading empty text run; keep numbers first.
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(items: &[&str]) -> Vec<String> {
        let mut items: Vec<_> = items.iter().map(|s| (*s).to_owned()).collect();
        items.sort_by(|a, b| natural_cmp(a, b));
        items
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(sorted(&["100", "20", "3"]), vec!["3", "20", "100"]);
        assert_eq!(
            sorted(&["100.md", "20.md", "3.md"]),
            vec!["3.md", "20.md", "100.md"]
        );
    }

    #[test]
    fn test_dot_suffix() {
        assert_eq!(sorted(&["100.", "20.", "3."]), vec!["3.", "20.", "100."]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sorted(&["b", "A", "a2", "B1"]), vec!["A", "a2", "b", "B1"]);
    }

    #[test]
    fn test_mixed_runs() {
        assert_eq!(
            sorted(&["v1.10", "v1.9", "v1.2"]),
            vec!["v1.2", "v1.9", "v1.10"]
        );
        assert_eq!(
            sorted(&["chapter10", "chapter2", "appendix"]),
            vec!["appendix", "chapter2", "chapter10"]
        );
    }

    #[test]
    fn test_digits_before_text() {
        assert_eq!(sorted(&["a", "1"]), vec!["1", "a"]);
    }

    #[test]
    fn test_long_numbers_and_leading_zeros() {
        assert_eq!(
            natural_cmp("99999999999999999999999", "100000000000000000000000"),
            Ordering::Less
        );
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("a", "a1"), Ordering::Less);
        assert_eq!(natural_cmp("", "a"), Ordering::Less);
    }
}
