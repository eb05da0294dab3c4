//! Step definitions running the `baserepo-gen` binary in a scratch module
//! directory.

use std::process::Output;

use assert_cmd::Command;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, then, when};
use test_helpers::package::TempPackage;

/// Error type for step definition failures.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for step definition operations.
pub type StepResult<T> = Result<T, StepError>;

/// Scenario state shared between generator steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GeneratorContext {
    pub package: Slot<TempPackage>,
    pub last_output: Slot<Output>,
}

/// Provides a clean context for generator scenarios.
#[fixture]
pub fn generator_context() -> GeneratorContext {
    GeneratorContext::default()
}

fn run_generator(context: &GeneratorContext, args: &[&str]) -> StepResult<()> {
    let directory = context
        .package
        .with_ref(|package| package.path().to_owned())
        .ok_or("module directory should be set")?;
    let output = Command::new(env!("CARGO_BIN_EXE_baserepo-gen"))
        .current_dir(&directory)
        .env_remove("BASEREPO_GEN_RUNTIME_CRATE")
        .env_remove("BASEREPO_GEN_LOG")
        .args(args)
        .output()?;
    context.last_output.set(output);
    Ok(())
}

fn last_output<T>(context: &GeneratorContext, f: impl FnOnce(&Output) -> T) -> StepResult<T> {
    context
        .last_output
        .with_ref(f)
        .ok_or_else(|| "baserepo-gen has not run".into())
}

fn stdout_of(context: &GeneratorContext) -> StepResult<String> {
    last_output(context, |output| {
        String::from_utf8_lossy(&output.stdout).into_owned()
    })
}

#[given("a module directory declaring {type_name} in {file}")]
fn module_directory(
    generator_context: &GeneratorContext,
    type_name: String,
    file: String,
) -> StepResult<()> {
    let source = format!("pub struct {type_name} {{\n    pub id: Option<u64>,\n}}\n");
    let package = TempPackage::new()?.with_file(&file, &source)?;
    generator_context.package.set(package);
    Ok(())
}

#[when("baserepo-gen runs with \"{args}\"")]
fn run_with(generator_context: &GeneratorContext, args: String) -> StepResult<()> {
    let split: Vec<&str> = args.split_whitespace().collect();
    run_generator(generator_context, &split)
}

#[when("baserepo-gen runs without arguments")]
fn run_without_arguments(generator_context: &GeneratorContext) -> StepResult<()> {
    run_generator(generator_context, &[])
}

#[then("the command succeeds")]
fn command_succeeds(generator_context: &GeneratorContext) -> StepResult<()> {
    let (success, stderr) = last_output(generator_context, |output| {
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    })?;
    assert!(success, "baserepo-gen failed: {stderr}");
    Ok(())
}

#[then("the command exits with status {code}")]
fn command_exits_with(generator_context: &GeneratorContext, code: i32) -> StepResult<()> {
    let status = last_output(generator_context, |output| output.status.code())?;
    assert_eq!(status, Some(code));
    Ok(())
}

#[then("stdout reports {type_name} generated at {file}")]
fn stdout_reports_generated(
    generator_context: &GeneratorContext,
    type_name: String,
    file: String,
) -> StepResult<()> {
    let path = generator_context
        .package
        .with_ref(|package| package.join(&file))
        .ok_or("module directory should be set")?;
    assert_eq!(
        stdout_of(generator_context)?,
        format!("Type {type_name} repository is generated: {path}\n")
    );
    Ok(())
}

#[then("stdout is \"{line}\"")]
fn stdout_is(generator_context: &GeneratorContext, line: String) -> StepResult<()> {
    assert_eq!(stdout_of(generator_context)?, format!("{line}\n"));
    Ok(())
}

#[then("the directory holds \"{files}\"")]
fn directory_holds(generator_context: &GeneratorContext, files: String) -> StepResult<()> {
    let names = generator_context
        .package
        .with_ref(TempPackage::file_names)
        .ok_or("module directory should be set")??;
    let expected: Vec<&str> = files.split(", ").collect();
    assert_eq!(names, expected);
    Ok(())
}
