//! Identifier derivation for generated repositories.
//!
//! All names emitted for a type come from [`Identifiers::derive`], so a type
//! name is validated once before any template sees it.

use proc_macro2::Ident;

use crate::error::GenerateError;

/// Suffix appended to the lower-cased type name to form the repository name.
pub const REPO_SUFFIX: &str = "BaseRepo";

/// Suffix of every generated file stem.
pub const OUTPUT_SUFFIX: &str = "_base_repo";

/// Extension of every generated file.
pub const SOURCE_EXTENSION: &str = "rs";

/// Lower-cases the first character of `name`.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidIdentifier`] when `name` is empty or does
/// not start with an ASCII letter.
pub fn lower_first(name: &str) -> Result<String, GenerateError> {
    let mut chars = name.chars();
    let first = chars.next().ok_or_else(|| invalid(name, "name is empty"))?;
    if !first.is_ascii_alphabetic() {
        return Err(invalid(name, "name must start with an ASCII letter"));
    }
    let mut out = String::with_capacity(name.len());
    out.push(first.to_ascii_lowercase());
    out.push_str(chars.as_str());
    Ok(out)
}

/// Spells `name` as a Rust identifier, using the raw form `r#name` for
/// keywords.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidIdentifier`] with `reason` when `name` is
/// not an identifier in either form, e.g. `self` or `order-items`.
pub fn rust_ident(name: &str, reason: &'static str) -> Result<Ident, GenerateError> {
    syn::parse_str::<Ident>(name)
        .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
        .map_err(|_| invalid(name, reason))
}

fn invalid(name: &str, reason: &'static str) -> GenerateError {
    GenerateError::InvalidIdentifier {
        name: name.to_owned(),
        reason,
    }
}

/// Names derived from a single type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    type_name: String,
    type_ident: Ident,
    repo_name: String,
}

impl Identifiers {
    /// Validates `type_name` and derives the repository names from it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidIdentifier`] when `type_name` is empty,
    /// does not start with an ASCII letter, or contains characters other than
    /// ASCII letters, digits and `_`, or is a keyword that has no raw form
    /// (`Self`).
    pub fn derive(type_name: &str) -> Result<Self, GenerateError> {
        let repo_stem = lower_first(type_name)?;
        if !type_name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(invalid(
                type_name,
                "name may only contain ASCII letters, digits and '_'",
            ));
        }
        let type_ident = rust_ident(type_name, "name cannot be used as a type identifier")?;
        Ok(Self {
            type_name: type_name.to_owned(),
            type_ident,
            repo_name: format!("{repo_stem}{REPO_SUFFIX}"),
        })
    }

    /// The declared type name, e.g. `User`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Identifier emitted for the type; raw (`r#type`) for keywords.
    #[must_use]
    pub const fn type_ident(&self) -> &Ident {
        &self.type_ident
    }

    /// The repository struct name, e.g. `userBaseRepo`.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Borrowed form of the repository, e.g. `&userBaseRepo`; the type of
    /// `self` in every generated method.
    #[must_use]
    pub fn repo_receiver(&self) -> String {
        format!("&{}", self.repo_name)
    }

    /// Borrowed form of the type, e.g. `&User`.
    #[must_use]
    pub fn type_name_with_pointer(&self) -> String {
        format!("&{}", self.type_ident)
    }

    /// File name of the generated source, e.g. `user_base_repo.rs`.
    #[must_use]
    pub fn output_file_name(&self) -> String {
        format!(
            "{}{OUTPUT_SUFFIX}.{SOURCE_EXTENSION}",
            self.type_name.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derives_user_identifiers() {
        let ids = Identifiers::derive("User").expect("valid identifier");

        assert_eq!(ids.type_name(), "User");
        assert_eq!(ids.repo_name(), "userBaseRepo");
        assert_eq!(ids.repo_receiver(), "&userBaseRepo");
        assert_eq!(ids.type_name_with_pointer(), "&User");
        assert_eq!(ids.output_file_name(), "user_base_repo.rs");
    }

    #[rstest]
    fn lowercases_the_whole_name_for_the_file_only() {
        let ids = Identifiers::derive("OrderItem").expect("valid identifier");

        assert_eq!(ids.repo_name(), "orderItemBaseRepo");
        assert_eq!(ids.output_file_name(), "orderitem_base_repo.rs");
    }

    #[rstest]
    #[case::empty("")]
    #[case::underscore("_Hidden")]
    #[case::digit("9Lives")]
    #[case::non_ascii("Élan")]
    #[case::punctuation("User-Profile")]
    #[case::self_type("Self")]
    fn rejects_unusable_type_names(#[case] name: &str) {
        let err = Identifiers::derive(name).expect_err("name should be rejected");
        assert!(matches!(err, GenerateError::InvalidIdentifier { .. }));
    }

    #[rstest]
    #[case::lower("User", "user")]
    #[case::already_lower("user", "user")]
    #[case::single("U", "u")]
    fn lower_first_touches_only_the_first_character(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(lower_first(input).expect("valid"), expected);
    }

    #[rstest]
    fn keyword_types_use_the_raw_identifier() {
        let ids = Identifiers::derive("type").expect("raw identifiers are allowed");

        assert_eq!(ids.type_name(), "type");
        assert_eq!(ids.type_ident().to_string(), "r#type");
        assert_eq!(ids.type_name_with_pointer(), "&r#type");
        assert_eq!(ids.repo_name(), "typeBaseRepo");
        assert_eq!(ids.output_file_name(), "type_base_repo.rs");
    }

    #[rstest]
    #[case::plain("orders", "orders")]
    #[case::keyword("match", "r#match")]
    fn rust_ident_escapes_keywords(#[case] name: &str, #[case] expected: &str) {
        let ident = rust_ident(name, "test").expect("valid identifier");
        assert_eq!(ident.to_string(), expected);
    }

    #[rstest]
    #[case::self_value("self")]
    #[case::crate_root("crate")]
    #[case::hyphen("order-items")]
    fn rust_ident_rejects_names_without_any_spelling(#[case] name: &str) {
        let err = rust_ident(name, "test").expect_err("not an identifier");
        assert!(matches!(err, GenerateError::InvalidIdentifier { reason: "test", .. }));
    }
}
