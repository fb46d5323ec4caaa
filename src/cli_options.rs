use acdc_compiler::compiler::common::error::AcdcError;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "acdc")]
#[command(version, about = "Compiles ac source programs into dc", long_about = None)]
pub struct CliOptions {
    /// The ac source file to be read. Prompted for on stdin when omitted
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Specifies the output-file to write the dc program to, otherwise prints it to stdout
    #[arg(short, long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Displays the AST produced by the parser while also compiling program as usual
    #[arg(long)]
    pub dump_ast: bool,

    /// Displays the symbol table once the program passed checking
    #[arg(long)]
    pub dump_symbols: bool,

    /// Fails during checking as soon as a declaration gets no register
    #[arg(long)]
    pub eager_registers: bool,

    /// Errors are printed without color
    #[arg(long)]
    pub no_color: bool,

    /// Raises log verbosity, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CliOptions {
    /// Fills in the source and output paths interactively if no source file was given
    pub fn resolve_paths(mut self) -> Result<(PathBuf, Option<PathBuf>, CliOptions), AcdcError> {
        if let Some(file_path) = self.file_path.take() {
            let output_path = self.output_path.take();
            return Ok((file_path, output_path, self));
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();

        let file_path = prompt(&mut input, "source file: ")?;
        if file_path.is_empty() {
            return Err(AcdcError::Sys("no input file given".to_string()));
        }

        // empty answer means stdout
        let output_path = match self.output_path.take() {
            Some(path) => Some(path),
            None => Some(prompt(&mut input, "output file (empty for stdout): ")?)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        };

        Ok((PathBuf::from(file_path), output_path, self))
    }
}

fn prompt(input: &mut impl BufRead, question: &str) -> Result<String, AcdcError> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", question)
        .and_then(|_| stdout.flush())
        .map_err(|e| AcdcError::Sys(format!("couldn't write prompt: {}", e)))?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| AcdcError::Sys(format!("couldn't read from stdin: {}", e)))?;

    Ok(answer.trim().to_string())
}
