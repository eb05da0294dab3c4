//! Generates the `Order` repository into `OUT_DIR`.

use std::error::Error;
use std::fs;

use baserepo_gen::{Emitter, EmitterOptions, Package, SourceUnit};
use camino::Utf8PathBuf;

const SOURCE: &str = "src/order.rs";
const TYPE_NAME: &str = "Order";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed={SOURCE}");

    let manifest_dir = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR")?);
    let path = manifest_dir.join(SOURCE);

    let unit = SourceUnit::parse(path.clone(), &fs::read_to_string(&path)?)?;
    let package = Package::from_units(unit.directory().to_path_buf(), vec![unit]);
    let order = package
        .resolve(TYPE_NAME)
        .ok_or_else(|| format!("{TYPE_NAME} is not declared in {path}"))?;

    let emitter = Emitter::new(EmitterOptions::default(), format!("-t {TYPE_NAME}"));
    let artifact = emitter.render(&order)?;
    fs::write(
        out_dir.join(artifact.identifiers.output_file_name()),
        artifact.contents,
    )?;
    Ok(())
}
