use std::{
    error::Error,
    fs,
    io::{stdin, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use reckon::format::format_result;
use reckon::interpreter::Interpreter;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::{error::ReadlineError, Editor};
use rustyline::{Completer, Helper, Highlighter, Hinter, Validator};

/// Evaluates arithmetic expressions, one per line. `$` holds the last result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run, one expression per line. Starts a prompt if omitted.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match args.script {
        Some(path) => run_file(&path),
        None => match run_prompt() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Stops at the first line that fails.
fn run_file(path: &Path) -> ExitCode {
    let Ok(content) = fs::read_to_string(path) else {
        println!("File '{}' not found.", path.display());
        return ExitCode::FAILURE;
    };

    log::info!("running {}", path.display());
    let mut interpreter = Interpreter::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        print!("[ {line} ] -> ");
        match interpreter.run(line) {
            Ok(val) => println!("{}", format_result(val)),
            Err(err) => {
                println!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_line(line: &str, interpreter: &mut Interpreter) {
    if line.trim().is_empty() {
        return;
    }

    match interpreter.run(line) {
        Ok(val) => println!("{}", format_result(val)),
        Err(err) => println!("{err}"),
    }
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct CalcHelper {
    #[rustyline(Highlighter)]
    highlighter: MatchingBracketHighlighter,
}

fn run_prompt() -> Result<(), Box<dyn Error>> {
    log::info!("starting interactive session");
    let mut interpreter = Interpreter::new();

    if !stdin().is_terminal() {
        for line in stdin().lines() {
            run_line(&line?, &mut interpreter);
        }
        return Ok(());
    }

    let h = CalcHelper {
        highlighter: MatchingBracketHighlighter::new(),
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                run_line(&line, &mut interpreter);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err.into()),
        }
    }
}
