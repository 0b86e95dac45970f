use tokenizers::NormalizedString;

/// The characters a normalized name may contain, besides ASCII letters
pub static PUNCTUATION: &str = " .,;'";

/// Returns true for characters allowed in a normalized name
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic() || PUNCTUATION.contains(c)
}

/// Decompose a string into NFD form and keep only the allowed characters.
///
/// Combining marks are split off the base letter by the decomposition and never make it
/// through the filter, so "Škoda" becomes "Skoda".
pub fn unicode_to_ascii(s: &str) -> String {
    let mut normalized = NormalizedString::from(s);
    normalized.nfd().filter(is_allowed);

    normalized.get().to_string()
}
