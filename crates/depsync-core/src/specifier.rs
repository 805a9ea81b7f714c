//! Import specifier normalization
//!
//! Converts raw import specifiers (the quoted string of an import statement)
//! into canonical package names suitable for manifest comparison.

/// Normalize a raw import specifier into a canonical package name.
///
/// Returns `None` for relative or absolute local imports (starting with `.`
/// or `/`) and for the empty string — these never refer to a package.
///
/// For a scoped specifier (`@scope/pkg/sub/path`) the canonical name is the
/// first two path segments (`@scope/pkg`). A scoped specifier with no `/` at
/// all is malformed; it is returned unchanged rather than dropped so that it
/// still shows up in reports. For an unscoped specifier the canonical name
/// is everything before the first `/`.
///
/// Normalization is idempotent: feeding a canonical name back in returns it
/// unchanged.
pub fn normalize(specifier: &str) -> Option<String> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    if specifier.starts_with('@') {
        let name: Vec<&str> = specifier.splitn(3, '/').take(2).collect();
        if name.len() < 2 {
            // Malformed scope without a package segment
            return Some(specifier.to_string());
        }
        return Some(name.join("/"));
    }

    match specifier.find('/') {
        Some(pos) => Some(specifier[..pos].to_string()),
        None => Some(specifier.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscoped_bare() {
        assert_eq!(normalize("react"), Some("react".to_string()));
        assert_eq!(normalize("lodash"), Some("lodash".to_string()));
    }

    #[test]
    fn test_unscoped_with_subpath() {
        assert_eq!(normalize("lodash/debounce"), Some("lodash".to_string()));
        assert_eq!(
            normalize("pkg/deeply/nested/module"),
            Some("pkg".to_string())
        );
    }

    #[test]
    fn test_scoped_bare() {
        assert_eq!(
            normalize("@testing-library/react"),
            Some("@testing-library/react".to_string())
        );
    }

    #[test]
    fn test_scoped_with_subpath() {
        assert_eq!(
            normalize("@scope/pkg/sub/path"),
            Some("@scope/pkg".to_string())
        );
        assert_eq!(
            normalize("@backstage/core-components/dist/index"),
            Some("@backstage/core-components".to_string())
        );
    }

    #[test]
    fn test_malformed_scope_falls_back_unchanged() {
        assert_eq!(normalize("@incomplete"), Some("@incomplete".to_string()));
    }

    #[test]
    fn test_relative_imports_rejected() {
        assert_eq!(normalize("./local-helper"), None);
        assert_eq!(normalize("../sibling/module"), None);
        assert_eq!(normalize("/absolute/path"), None);
        assert_eq!(normalize("."), None);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(normalize(""), None);
    }

    #[test]
    fn test_idempotent() {
        for spec in [
            "react",
            "lodash/debounce",
            "@scope/pkg/sub/path",
            "@testing-library/react",
            "@incomplete",
        ] {
            let once = normalize(spec).unwrap();
            let twice = normalize(&once).unwrap();
            assert_eq!(once, twice, "normalize not idempotent for {}", spec);
        }
    }
}
