use rand::distr::{Alphanumeric, SampleString};

/// Maximum length of a permission group name in the identity store.
pub const PERMISSION_GROUP_NAME_MAX: usize = 80;

/// Length of the random disambiguating suffix.
pub const SUFFIX_LEN: usize = 8;

/// Converts a display name into a URL-safe slug.
///
/// Non-ASCII text is transliterated, anything that is not alphanumeric,
/// underscore, whitespace or a hyphen is dropped, and runs of whitespace and
/// hyphens collapse to a single hyphen. The result is lowercase with no
/// leading or trailing hyphens.
pub fn slugify(value: &str) -> String {
    let ascii = deunicode::deunicode(value);

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }
    slug
}

/// Derives a permission group name: the slug cut to leave room for an
/// 8-character random suffix, then the suffix.
pub fn permission_group_name(display_name: &str) -> String {
    let mut name: String = slugify(display_name)
        .chars()
        .take(PERMISSION_GROUP_NAME_MAX - SUFFIX_LEN)
        .collect();
    name.push_str(&random_string(SUFFIX_LEN));
    name
}

/// Random alphanumeric string. Not used for anything security sensitive
/// beyond unguessable invite codes.
pub fn random_string(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("Reef Watch: North Shore!"), "reef-watch-north-shore");
    }

    #[test]
    fn slugify_collapses_runs_and_trims() {
        assert_eq!(slugify("  -- Kelp   --  Forest --  "), "kelp-forest");
    }

    #[test]
    fn slugify_keeps_underscores_and_digits() {
        assert_eq!(slugify("Zone_7 Divers 2024"), "zone_7-divers-2024");
    }

    #[test]
    fn slugify_transliterates() {
        assert_eq!(slugify("Île de Ré"), "ile-de-re");
    }

    #[test]
    fn slugify_of_symbols_is_empty() {
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn permission_group_name_appends_suffix() {
        let name = permission_group_name("Kelp Forest");
        assert!(name.starts_with("kelp-forest"));
        assert_eq!(name.len(), "kelp-forest".len() + SUFFIX_LEN);
        assert!(name[name.len() - SUFFIX_LEN..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn permission_group_name_is_bounded() {
        let long = "a".repeat(500);
        let name = permission_group_name(&long);
        assert_eq!(name.len(), PERMISSION_GROUP_NAME_MAX);
        assert!(name.starts_with(&"a".repeat(72)));
    }

    #[test]
    fn permission_group_name_is_randomized() {
        assert_ne!(permission_group_name("Reef"), permission_group_name("Reef"));
    }

    #[test]
    fn random_string_has_requested_length() {
        assert_eq!(random_string(32).len(), 32);
    }
}
