/// Width of the zero-padded numeric suffix.
const CODE_DIGITS: usize = 10;

/// Ordering key for office-style codes (`A-12`, `b7`).
///
/// The letter prefix is lowercased and the numeric suffix zero-padded so that
/// plain string comparison gives natural order (`A-2` < `A-10` < `B-1`).
/// Returns `None` for anything that is not letters, an optional dash, then digits.
pub fn natural_code_key(code: &str) -> Option<String> {
    let code = code.trim();
    let split = code.find(|c: char| !c.is_ascii_alphabetic())?;
    let (prefix, rest) = code.split_at(split);
    if prefix.is_empty() {
        return None;
    }

    let digits = rest.strip_prefix('-').unwrap_or(rest);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some(format!(
        "{}{:0>width$}",
        prefix.to_ascii_lowercase(),
        digits,
        width = CODE_DIGITS
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(natural_code_key("A-2").as_deref(), Some("a0000000002"));
        assert_eq!(natural_code_key("b17").as_deref(), Some("b0000000017"));
        assert_eq!(natural_code_key(" CC-100 ").as_deref(), Some("cc0000000100"));
    }

    #[test]
    fn test_natural_order() {
        let mut codes = vec!["B-1", "A-10", "A-2"];
        codes.sort_by_key(|c| natural_code_key(c));
        assert_eq!(codes, vec!["A-2", "A-10", "B-1"]);
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert_eq!(natural_code_key("12"), None);
        assert_eq!(natural_code_key("A-"), None);
        assert_eq!(natural_code_key("ABC"), None);
        assert_eq!(natural_code_key("A-1b"), None);
        assert_eq!(natural_code_key(""), None);
    }
}
