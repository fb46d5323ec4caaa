mod cli_options;

use acdc_compiler::compiler::common::error::AcdcError;
use acdc_compiler::*;
use clap::Parser;
use cli_options::CliOptions;
use tracing::{info, Level};

use std::fs;
use std::path::Path;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(file: &Path) -> Result<String, AcdcError> {
    fs::read_to_string(file)
        .map_err(|_| AcdcError::Sys(format!("couldn't find file: '{}'", file.display())))
}

fn write_output(output_path: Option<&Path>, code: &str) -> Result<(), AcdcError> {
    match output_path {
        Some(path) => {
            fs::write(path, code).map_err(|_| AcdcError::Sys(format!("couldn't write to file: '{}'", path.display())))?;
            info!(path = %path.display(), "wrote dc program");
        }
        None => println!("{}", code),
    }
    Ok(())
}

fn run(options: CliOptions, source: &str, output_path: Option<&Path>) -> Result<Generated, AcdcError> {
    let compile_options = Options {
        register_policy: if options.eager_registers {
            RegisterPolicy::Eager
        } else {
            RegisterPolicy::Lazy
        },
        dump_ast: options.dump_ast,
    };

    let program = parse(source)?;
    if compile_options.dump_ast {
        eprintln!("{}", program);
    }

    let (program, symbols) = check(&program, &compile_options)?;
    if options.dump_symbols {
        eprintln!("{}", symbols);
    }

    let generated = generate(&program);
    write_output(output_path, &generated.code)?;

    Ok(generated)
}

fn main() {
    let options = CliOptions::parse();
    init_logging(options.verbose);

    let (file_path, output_path, options) = match options.resolve_paths() {
        Ok(paths) => paths,
        Err(e) => {
            e.print("", true);
            std::process::exit(1);
        }
    };
    let no_color = options.no_color;

    let source = match read_source(&file_path) {
        Ok(source) => source,
        Err(e) => {
            e.print("", no_color);
            std::process::exit(1);
        }
    };

    match run(options, &source, output_path.as_deref()) {
        // partial program was still written, resource failures only get reported
        Ok(generated) => {
            for err in &generated.log {
                eprintln!("acdc: {}", err);
            }
        }
        Err(e) => {
            e.print(&source, no_color);
            std::process::exit(1);
        }
    }
}
