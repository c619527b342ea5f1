//! The reference host: loads a source file and runs its `main`, or starts an
//! interactive REPL when no file is given.

use std::{io, process::ExitCode};

use clap::Parser;
use sprig::{Runtime, RuntimeConfig};

mod repl;

#[derive(Debug, Parser)]
#[command(name = "sprig", version = sprig::VERSION, about = "An embeddable Lisp interpreter")]
struct Cli {
    /// Source file to load and run; omit to start a REPL.
    file: Option<String>,

    /// Arguments passed to the script's `main` function.
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,

    /// After loading the file, start a REPL instead of running `main`.
    #[arg(short = 'x', long)]
    interactive: bool,

    /// Disable string interning.
    #[arg(short = 'T', long)]
    no_intern_strings: bool,

    /// Disable symbol interning.
    #[arg(short = 'Y', long)]
    no_intern_symbols: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut rt = Runtime::with_config(RuntimeConfig {
        intern_strings: !cli.no_intern_strings,
        intern_symbols: !cli.no_intern_symbols,
    });
    let scope = rt.new_default_scope();

    match &cli.file {
        None => {
            repl::run(&mut rt, scope);
            ExitCode::SUCCESS
        }
        Some(file) => run_file(&mut rt, scope, file, &cli),
    }
}

fn run_file(rt: &mut Runtime, scope: sprig::ValueId, file: &str, cli: &Cli) -> ExitCode {
    if rt.load_file(scope, file).is_err() {
        let _ = rt.print_error(&mut io::stderr());
        return ExitCode::FAILURE;
    }

    if cli.interactive {
        repl::run(rt, scope);
        return ExitCode::SUCCESS;
    }

    // Program arguments mirror argv: the script path first, then the rest.
    let mut argv = vec![file.to_owned()];
    argv.extend(cli.args.iter().cloned());

    match rt.run_main(scope, &argv) {
        Err(_) => {
            let _ = rt.print_error(&mut io::stderr());
            ExitCode::FAILURE
        }
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(result)) => match rt.as_int(result) {
            // An integer return becomes the process exit status.
            Some(code) => ExitCode::from((code & 0xff) as u8),
            None => ExitCode::SUCCESS,
        },
    }
}
