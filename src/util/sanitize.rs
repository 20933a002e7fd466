//! Input sanitizing for free-text form fields (keystroke filtering, paste cleanup).

/// Accented vowels and ñ accepted alongside ASCII letters.
const ACCENTED: &str = "áéíóúÁÉÍÓÚñÑ";
/// Punctuation accepted in descriptions.
const PROSE_PUNCTUATION: &str = ".,;:-¿?¡!()";
const RFC_MAX_LEN: usize = 13;

/// Character set allowed in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRule {
    /// Letters (ASCII, accented vowels, ñ) and whitespace.
    Letters,
    /// Letters, digits and whitespace.
    Alphanumeric,
    /// Alphanumeric plus basic punctuation.
    Prose,
    /// ASCII digits.
    Digits,
    /// Anything but whitespace.
    NoWhitespace,
    /// ASCII letters, digits and `@._-`.
    Email,
    /// Tax id: ASCII letters and digits, truncated to 13 characters.
    Rfc,
}

impl InputRule {
    pub fn allows(self, c: char) -> bool {
        let letter = c.is_ascii_alphabetic() || ACCENTED.contains(c);
        match self {
            InputRule::Letters => letter || c.is_whitespace(),
            InputRule::Alphanumeric => letter || c.is_ascii_digit() || c.is_whitespace(),
            InputRule::Prose => {
                letter || c.is_ascii_digit() || c.is_whitespace() || PROSE_PUNCTUATION.contains(c)
            }
            InputRule::Digits => c.is_ascii_digit(),
            InputRule::NoWhitespace => !c.is_whitespace(),
            InputRule::Email => c.is_ascii_alphanumeric() || "@._-".contains(c),
            InputRule::Rfc => c.is_ascii_alphanumeric(),
        }
    }
}

/// Drops every character the rule does not allow.
pub fn sanitize(input: &str, rule: InputRule) -> String {
    let cleaned = input.chars().filter(|&c| rule.allows(c));
    match rule {
        InputRule::Rfc => cleaned.take(RFC_MAX_LEN).collect(),
        _ => cleaned.collect(),
    }
}

/// Keeps only digits, at most `max` of them.
pub fn limit_digits(input: &str, max: usize) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters() {
        assert_eq!(sanitize("José Peña 3rd!", InputRule::Letters), "José Peña rd");
    }

    #[test]
    fn test_alphanumeric() {
        assert_eq!(
            sanitize("Aula #12, edificio B", InputRule::Alphanumeric),
            "Aula 12 edificio B"
        );
    }

    #[test]
    fn test_prose_keeps_punctuation() {
        assert_eq!(
            sanitize("¿Qué es? Taller (práctico); ver <b>", InputRule::Prose),
            "¿Qué es? Taller (práctico); ver b"
        );
    }

    #[test]
    fn test_email_and_whitespace() {
        assert_eq!(sanitize("ana maria@x.com ", InputRule::Email), "anamaria@x.com");
        assert_eq!(sanitize(" a b\tc ", InputRule::NoWhitespace), "abc");
    }

    #[test]
    fn test_rfc_truncates() {
        assert_eq!(sanitize("GODE-561231-GR8X9", InputRule::Rfc), "GODE561231GR8");
    }

    #[test]
    fn test_limit_digits() {
        assert_eq!(limit_digits("12a34", 3), "123");
        assert_eq!(limit_digits("abc", 3), "");
    }
}
