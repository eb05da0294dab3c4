//! Golden tests for the rendered `Order` repository.
//!
//! The checked-in file is parsed and pretty-printed before comparison, so
//! these tests pin every generated item, signature, body and doc line while
//! leaving line wrapping to the pretty-printer.

use baserepo_gen::{Emitter, EmitterOptions, Formatting, GeneratedArtifact, Package, SourceUnit};
use proc_macro2::TokenStream;
use rstest::rstest;

const ORDER_SOURCE: &str = include_str!("../../../tests/fixtures/order_fixture/src/order.rs");
const GOLDEN: &str = include_str!("order_base_repo.rs.golden");

fn render_order(options: EmitterOptions) -> GeneratedArtifact {
    let unit = SourceUnit::parse("/shop/src/order.rs".into(), ORDER_SOURCE).expect("parse order.rs");
    let package = Package::from_units("/shop/src".into(), vec![unit]);
    let order = package.resolve("Order").expect("Order is declared");
    Emitter::new(options, "-t Order")
        .render(&order)
        .expect("render Order")
}

/// Splits a generated file into its header comment and canonical body.
fn expected_parts(golden: &str) -> (&str, String) {
    let (header, body) = golden
        .split_once("\n\n")
        .expect("golden file has a header paragraph");
    let tokens: TokenStream = body.parse().expect("golden body tokenizes");
    let (canonical, formatting) = baserepo_gen::canonicalize(tokens);
    assert_eq!(formatting, Formatting::Canonical, "golden body parses");
    (header, canonical)
}

fn assert_matches_golden(artifact: &GeneratedArtifact, golden: &str) {
    let (header, body) = expected_parts(golden);
    let (actual_header, actual_body) = artifact
        .contents
        .split_once("\n\n")
        .expect("generated file has a header paragraph");
    assert_eq!(actual_header, header);
    assert_eq!(actual_body, body, "generated body:\n{actual_body}");
}

#[rstest]
fn order_repository_matches_golden_file() {
    let artifact = render_order(EmitterOptions::default());

    assert_eq!(artifact.formatting, Formatting::Canonical);
    assert_eq!(artifact.output_path.as_str(), "/shop/src/order_base_repo.rs");
    assert_matches_golden(&artifact, GOLDEN);
}

#[rstest]
#[case::crate_module("crate::storage")]
#[case::external_crate("shop_db")]
fn runtime_crate_only_changes_the_runtime_import(#[case] runtime: &str) {
    let options = EmitterOptions {
        runtime_crate: syn::parse_str(runtime).expect("runtime path parses"),
    };
    let golden = GOLDEN.replacen("use baserepo::{", &format!("use {runtime}::{{"), 1);

    let artifact = render_order(options);

    assert_matches_golden(&artifact, &golden);
}

#[rstest]
fn generated_file_ends_with_a_single_newline() {
    let artifact = render_order(EmitterOptions::default());

    assert!(artifact.contents.ends_with("}\n"));
    assert!(!artifact.contents.ends_with("\n\n"));
}
