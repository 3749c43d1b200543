//! Post-parse validation of facade.toml values.

use miette::SourceSpan;

use crate::{Error, Manifest, Result};

/// Validate the manifest after parsing.
///
/// The package name must be a valid Python identifier because it becomes
/// the first segment of every export path; the decorator name must be an
/// identifier or a dotted identifier chain (e.g. `facade.api_export`).
pub fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    if let Err(reason) = check_identifier(&manifest.package.name) {
        return Err(Error::invalid_identifier(
            &manifest.package.name,
            "package name",
            reason,
            src,
            filename,
            find_value_span(src, &manifest.package.name),
        ));
    }

    if manifest.package.src.is_empty() {
        return Err(Error::invalid_identifier(
            &manifest.package.src,
            "src directory",
            "the implementation subdirectory cannot be empty",
            src,
            filename,
            None,
        ));
    }

    for part in manifest.export.decorator.split('.') {
        if let Err(reason) = check_identifier(part) {
            return Err(Error::invalid_identifier(
                &manifest.export.decorator,
                "decorator name",
                reason,
                src,
                filename,
                find_value_span(src, &manifest.export.decorator),
            ));
        }
    }

    Ok(())
}

/// Check that a string is a valid Python identifier (ASCII subset).
fn check_identifier(s: &str) -> std::result::Result<(), &'static str> {
    let mut chars = s.chars();
    match chars.next() {
        None => return Err("name is empty"),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(c) if c.is_ascii_digit() => return Err("name cannot start with a digit"),
        Some(_) => return Err("name contains an invalid character"),
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err("name contains an invalid character")
    }
}

/// Find the span of a quoted value in the source, for error labels.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let needle = format!("\"{value}\"");
    src.find(&needle)
        .map(|offset| SourceSpan::from((offset + 1, value.len())))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_check_identifier() {
        assert!(check_identifier("pkg").is_ok());
        assert!(check_identifier("_private").is_ok());
        assert!(check_identifier("pkg2").is_ok());
        assert!(check_identifier("2pkg").is_err());
        assert!(check_identifier("my-pkg").is_err());
        assert!(check_identifier("").is_err());
    }

    #[test]
    fn test_invalid_package_name_rejected() {
        let err = Manifest::from_str("[package]\nname = \"my-pkg\"\n").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_dotted_decorator_accepted() {
        let manifest = Manifest::from_str(
            "[package]\nname = \"pkg\"\n\n[export]\ndecorator = \"facade.api_export\"\n",
        )
        .unwrap();
        assert_eq!(manifest.export.decorator, "facade.api_export");
    }

    #[test]
    fn test_invalid_decorator_rejected() {
        let err = Manifest::from_str(
            "[package]\nname = \"pkg\"\n\n[export]\ndecorator = \"not valid\"\n",
        )
        .unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_empty_src_rejected() {
        let err =
            Manifest::from_str("[package]\nname = \"pkg\"\nsrc = \"\"\n").unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }
}
