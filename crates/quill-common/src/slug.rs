//! URL slug generation. Pure and deterministic; uniqueness checks are a UX
//! convenience only, the DB unique constraints are the real backstop.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Lowercase, fold diacritics, collapse non-alphanumeric runs into a single
/// `-`, trim separators. Idempotent: `generate(generate(x)) == generate(x)`.
pub fn generate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    let mut push = |ch: char, out: &mut String, pending_sep: &mut bool| {
        if *pending_sep && !out.is_empty() {
            out.push('-');
        }
        *pending_sep = false;
        out.push(ch.to_ascii_lowercase());
    };

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            push(ch, &mut out, &mut pending_sep);
        } else if let Some(folded) = fold_accent(ch) {
            for ch in folded.chars() {
                push(ch, &mut out, &mut pending_sep);
            }
        } else {
            pending_sep = true;
        }
    }

    out
}

/// Base slug, disambiguated against `existing` by appending `-1`, `-2`, …
/// until free. The caller supplies the up-to-date existing-slug set.
pub fn generate_unique(text: &str, existing: &HashSet<String>) -> String {
    let base = generate(text);
    if !existing.contains(&base) {
        return base;
    }

    let mut counter = 1u64;
    loop {
        let candidate = format!("{base}-{counter}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Base slug suffixed with epoch millis, for callers that want a slug
/// unique without consulting the store.
pub fn generate_with_timestamp(text: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{}-{millis}", generate(text))
}

/// ASCII fold for the Latin accented range; anything else is a separator.
fn fold_accent(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "a",
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => "e",
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => "o",
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => "u",
        'ñ' | 'Ñ' => "n",
        'ç' | 'Ç' => "c",
        'ý' | 'ÿ' | 'Ý' => "y",
        'ß' => "ss",
        'æ' | 'Æ' => "ae",
        'œ' | 'Œ' => "oe",
        'ø' | 'Ø' => "o",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_slugify() {
        assert_eq!(generate("Hello World"), "hello-world");
        assert_eq!(generate("  Múltiple   Wörds!! "), "multiple-words");
        assert_eq!(generate("El Ñandú corre"), "el-nandu-corre");
    }

    #[test]
    fn trims_separators() {
        assert_eq!(generate("--leading and trailing--"), "leading-and-trailing");
        assert_eq!(generate("!!!"), "");
    }

    #[test]
    fn idempotent() {
        for text in ["Crème Brûlée", "a  b--c", "Hello, World!"] {
            let once = generate(text);
            assert_eq!(generate(&once), once);
        }
    }

    #[test]
    fn unique_never_collides_with_existing() {
        let existing: HashSet<String> = ["my-post", "my-post-1", "my-post-2"]
            .into_iter()
            .map(String::from)
            .collect();
        let slug = generate_unique("My Post", &existing);
        assert_eq!(slug, "my-post-3");
        assert!(!existing.contains(&slug));
    }

    #[test]
    fn unique_returns_base_when_free() {
        assert_eq!(
            generate_unique("Fresh Title", &HashSet::new()),
            "fresh-title"
        );
    }
}
