// src/geo/normalize.rs

use unicode_normalization::UnicodeNormalization;

/// Join key for department names: uppercase, NFKD, non-ASCII dropped.
/// "Bogotá, D.C." and "BOGOTA, D.C." map to the same key.
pub fn normalize_name(raw: &str) -> String {
    raw.to_uppercase()
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_uppercases() {
        assert_eq!(normalize_name("Bogotá, D.C."), "BOGOTA, D.C.");
        assert_eq!(normalize_name("BOYACÁ"), "BOYACA");
        assert_eq!(normalize_name("  nariño "), "NARINO");
        assert_eq!(
            normalize_name("Archipiélago de San Andrés"),
            "ARCHIPIELAGO DE SAN ANDRES"
        );
    }

    #[test]
    fn already_normal_names_are_unchanged() {
        assert_eq!(normalize_name("ANTIOQUIA"), "ANTIOQUIA");
    }
}
