//! Filename → kebab-case conversion.
//!
//! Word boundaries are found the way most camelCase splitters do it:
//! 1. Before a capitalized word that follows another character (`HTTPServer` → `HTTP-Server`)
//! 2. Between a lowercase letter or digit and an uppercase letter (`userAPI` → `user-API`)
//!
//! The result is lowercased and every run of hyphens and whitespace collapses to
//! one hyphen. Underscores are left as they are.
//! Only the final extension is split off; it is lowercased and reattached.

use regex::Regex;
use std::sync::LazyLock;

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());

static LOWER_UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Split a filename into base name and final extension (without the dot).
///
/// Leading dots belong to the base, so `.eslintrc` has no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    let leading_dots = name.len() - name.trim_start_matches('.').len();
    match name[leading_dots..].rfind('.') {
        Some(pos) => {
            let dot = leading_dots + pos;
            (&name[..dot], Some(&name[dot + 1..]))
        }
        None => (name, None),
    }
}

/// Convert a bare name (no extension handling) to kebab-case.
fn kebab_base(base: &str) -> String {
    let s1 = CAPITALIZED_WORD.replace_all(base, "${1}-${2}");
    let s2 = LOWER_UPPER.replace_all(&s1, "${1}-${2}");
    let lowered = s2.to_lowercase();
    SEPARATOR_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Convert a filename to its canonical kebab-case form.
///
/// ```
/// use kebab_shop::refactor::to_kebab_case;
///
/// assert_eq!(to_kebab_case("UserService.ts"), "user-service.ts");
/// assert_eq!(to_kebab_case("HTTPServer.JS"), "http-server.js");
/// ```
pub fn to_kebab_case(name: &str) -> String {
    let (base, extension) = split_extension(name);

    let mut kebab = kebab_base(base);
    if kebab.is_empty() {
        // Nothing but separators: keep the base rather than produce a bare `.ext`
        kebab = base.to_string();
    }

    match extension {
        Some(ext) => format!("{}.{}", kebab, ext.to_lowercase()),
        None => kebab,
    }
}
