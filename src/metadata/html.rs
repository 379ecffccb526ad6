//! Decoding of HTML character references found in metadata text.

/// Expands every HTML5 character reference in `input`, named or numeric,
/// including the legacy forms without a trailing `;`.
pub fn unescape(input: &str) -> String {
    htmlize::unescape(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(unescape("Sant&eacute; &amp; bien-&ecirc;tre"), "Santé & bien-être");
    }

    #[test]
    fn test_entities_beyond_latin_accents() {
        assert_eq!(unescape("&le; 5 km&sup2;"), "≤ 5 km²");
        assert_eq!(
            unescape("&oelig;uvre &euro; &times; &Icirc;le &oacute;"),
            "œuvre € × Île ó"
        );
        assert_eq!(unescape("&ge; 10 &deg;C"), "≥ 10 °C");
    }

    #[test]
    fn test_references_without_semicolon() {
        assert_eq!(unescape("caf&eacute au lait"), "café au lait");
        assert_eq!(unescape("&#233 x"), "é x");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(unescape("caf&#233; &#x2013; l&#X27;eau"), "café – l'eau");
    }

    #[test]
    fn test_unknown_and_bare_ampersands_kept() {
        assert_eq!(unescape("R&D &bogus; a & b &"), "R&D &bogus; a & b &");
    }

    #[test]
    fn test_surrogate_code_point_replaced() {
        assert_eq!(unescape("&#xD800;"), "\u{FFFD}");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(unescape("<p>Texte</p>"), "<p>Texte</p>");
    }
}
