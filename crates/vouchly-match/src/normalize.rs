//! Query/name canonicalization applied on both sides before scoring.

/// Canonicalize text for matching: lowercase, keep only ASCII letters,
/// digits, and whitespace.
///
/// Marketing decorations (`™`, `®`, punctuation, accents) routinely differ
/// between what sources publish and what users type; dropping everything
/// outside `[a-z0-9\s]` makes both sides comparable. Idempotent.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii() {
        assert_eq!(normalize_text("Amazon Pay"), "amazon pay");
    }

    #[test]
    fn strips_punctuation_and_symbols() {
        assert_eq!(normalize_text("Gift-Card! (50% off)"), "giftcard 50 off");
    }

    #[test]
    fn strips_trademark_glyphs() {
        assert_eq!(normalize_text("Amazon™ Gift Card®"), "amazon gift card");
    }

    #[test]
    fn keeps_digits_and_whitespace() {
        assert_eq!(normalize_text("card 100\trupees"), "card 100\trupees");
    }

    #[test]
    fn strips_non_ascii_letters() {
        assert_eq!(normalize_text("Café Münze"), "caf mnze");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn punctuation_only_becomes_empty() {
        assert_eq!(normalize_text("!!!???"), "");
    }

    #[test]
    fn idempotent() {
        let once = normalize_text("Amazon™ Gift-Card #1");
        assert_eq!(normalize_text(&once), once);
    }
}
