//! Kiln command-line driver.

use std::io;
use std::path::Path;

use kilnc::{init_tracing, render, run_repl, ConsoleOutput, Session};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut debug_tree = false;
    let mut file_path = None;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--debug-tree" => debug_tree = true,
            flag if flag.starts_with('-') => {
                eprintln!("error: unknown option `{flag}`");
                print_usage();
                std::process::exit(2);
            }
            path if file_path.is_none() => file_path = Some(path),
            extra => {
                eprintln!("error: unexpected argument `{extra}`");
                print_usage();
                std::process::exit(2);
            }
        }
    }

    let mut session = match Session::new(ConsoleOutput::Stdout) {
        Ok(session) => session,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    session.set_debug_tree(debug_tree);

    match file_path {
        Some(path) => run_file(&mut session, path),
        None => {
            let stdin = io::stdin();
            if let Err(error) = run_repl(&mut session, stdin.lock(), io::stdout()) {
                eprintln!("error: {error}");
                std::process::exit(1);
            }
        }
    }
}

fn run_file(session: &mut Session, path: &str) {
    match session.run_file(Path::new(path)) {
        Ok(value) => println!("{value}"),
        Err(error) => {
            let source = std::fs::read_to_string(path).unwrap_or_default();
            eprint!("{}", render(&error, path, &source));
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Kiln interpreter");
    eprintln!();
    eprintln!("Usage: kiln [--debug-tree] [FILE]");
    eprintln!();
    eprintln!("Runs FILE as one translation unit and prints its value.");
    eprintln!("Without FILE, starts a read-eval-print loop on stdin.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --debug-tree   Print the parse tree of every unit before running it");
    eprintln!("  -h, --help     Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=kiln_eval=trace) to trace evaluation.");
}
