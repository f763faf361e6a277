use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use vscript::Interpreter;

/// vscript is a tree-walking interpreter for a small scripting language
/// with Chinese keywords.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to execute; omitting it starts an interactive session.
    script: Option<String>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error)
            if matches!(error.kind(),
                        clap::error::ErrorKind::DisplayHelp
                        | clap::error::ErrorKind::DisplayVersion) =>
        {
            let _ = error.print();
            return ExitCode::SUCCESS;
        },
        Err(_) => {
            eprintln!("用法：vscript [脚本文件]");
            return ExitCode::from(64);
        },
    };

    match args.script {
        Some(path) => run_file(&path),
        None => run_prompt(),
    }
}

/// Reads the script as UTF-8 and interprets it once.
///
/// An unreadable file exits with 70; a lexical, parse or runtime error is
/// reported to stderr and exits with 1.
fn run_file(path: &str) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            report(&format!("无法读取文件 '{path}'：{error}"));
            return ExitCode::from(70);
        },
    };

    let mut interpreter = Interpreter::new();
    match interpreter.run(&source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error.to_string());
            ExitCode::from(1)
        },
    }
}

/// The interactive session.
///
/// Each line runs against the same interpreter, so definitions persist.
/// Errors are reported and the session continues; `.退出` or end of input
/// ends it.
fn run_prompt() -> ExitCode {
    let stdin = io::stdin();
    let mut interpreter = Interpreter::new();
    let mut line = String::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return ExitCode::from(1);
        }

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {},
            Err(_) => return ExitCode::from(1),
        }

        let input = line.trim_end_matches(['\n', '\r']);
        if input == ".退出" {
            break;
        }

        if let Err(error) = interpreter.run(input) {
            report(&error.to_string());
        }
    }

    ExitCode::SUCCESS
}

/// Writes a diagnostic to stderr in ANSI red.
fn report(message: &str) {
    eprintln!("\x1b[31m{message}\x1b[0m");
}
