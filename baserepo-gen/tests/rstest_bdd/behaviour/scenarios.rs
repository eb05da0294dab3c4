//! Binds the `baserepo-gen` feature files to the step registry.

use super::steps::{GeneratorContext, generator_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/generate.feature",
    fixtures = [generator_context: GeneratorContext]
);
