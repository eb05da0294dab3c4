//! CLI entrypoint for `baserepo-gen`.

use std::io::Write;

use baserepo_gen::cli::Args;
use baserepo_gen::{Emitter, Generator, GeneratorConfig, InputSet, Package};
use clap::{CommandFactory, Parser};
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BASEREPO_GEN_LOG";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let type_names = match args.type_names() {
        Ok(names) => names,
        Err(err) => err.format(&mut Args::command()).exit(),
    };

    let config = GeneratorConfig::load(args.config_file(), &args.overrides())?;
    let inputs = InputSet::from_args(&args.inputs)?;
    let package = Package::load(&inputs)?;
    let emitter = Emitter::new(config.emitter_options()?, invocation());
    let generator = Generator::new(package, emitter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for type_name in type_names {
        let outcome = generator.generate(type_name)?;
        writeln!(out, "{outcome}").wrap_err("writing to stdout")?;
    }
    Ok(())
}

/// Process arguments after the program name, as recorded in generated
/// headers.
fn invocation() -> String {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
