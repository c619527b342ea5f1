//! Interactive read-eval-print loop.
//!
//! Lines accumulate until the reader stops reporting `end-of-input`, so
//! multi-line expressions can be typed naturally. Command history is kept in
//! `~/.sprig_history` across sessions. After every iteration the root scope
//! is marked and the heap swept, so the REPL runs in bounded memory.

use std::io;

use rustyline::{DefaultEditor, error::ReadlineError};
use sprig::{ErrorKind, Runtime, ValueId};

const PROMPT: &str = "sprig> ";
const CONTINUE_PROMPT: &str = " ...> ";

pub(crate) fn run(rt: &mut Runtime, scope: ValueId) {
    let Ok(mut editor) = DefaultEditor::new() else {
        eprintln!("failed to initialize the line editor");
        return;
    };
    let history = home::home_dir().map(|dir| dir.join(".sprig_history"));
    if let Some(path) = &history {
        let _ = editor.load_history(path);
    }

    let mut input = String::new();
    loop {
        let prompt = if input.is_empty() { PROMPT } else { CONTINUE_PROMPT };
        match editor.readline(prompt) {
            Ok(line) => {
                if !input.is_empty() {
                    input.push('\n');
                }
                input.push_str(&line);
                if input.trim().is_empty() {
                    input.clear();
                    continue;
                }

                match rt.read_progn(&input) {
                    // Incomplete expression: keep the buffer and ask for more.
                    Err(err) if err.kind() == ErrorKind::EndOfInput => {
                        rt.clear_error();
                        continue;
                    }
                    Err(_) => {
                        let _ = rt.print_error(&mut io::stderr());
                        rt.clear_error();
                    }
                    Ok(program) => {
                        let _ = editor.add_history_entry(input.as_str());
                        match rt.eval(scope, program) {
                            Ok(result) => {
                                if !rt.is_nil(result) {
                                    println!("{}", rt.display(result));
                                }
                            }
                            Err(_) => {
                                let _ = rt.print_error(&mut io::stderr());
                                rt.clear_error();
                            }
                        }
                    }
                }

                input.clear();
                rt.mark(scope);
                rt.sweep();
            }
            Err(ReadlineError::Interrupted) => input.clear(),
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = editor.save_history(path);
    }
}
