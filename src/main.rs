use anyhow::Result;

use defikit::cli::Cli;
use defikit::idl::{convert_idl, load_idl_from_file, write_legacy_idl};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse_args();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    println!(
        "Converting {} -> {}",
        cli.input.display(),
        cli.output.display()
    );

    let idl = load_idl_from_file(&cli.input)?;
    let legacy = convert_idl(idl);
    write_legacy_idl(&cli.output, &legacy)?;

    let names: Vec<&str> = legacy
        .instructions
        .iter()
        .map(|ix| ix.name.as_str())
        .collect();

    println!("Converted IDL with {} instructions", legacy.instructions.len());
    println!("Instructions: {:?}", names);

    Ok(())
}
