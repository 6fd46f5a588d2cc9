use std::{env, fs::read_to_string, process};

use minicc::{
    analyze,
    ast::render::render_program,
    errors::errors::PassError,
    lexer::{lexer::tokenize, tokens::token_table},
    render_error,
};

fn usage() -> ! {
    eprintln!("usage: minicc <file> [--tokens | --tree | --symbols]");
    process::exit(2);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        usage();
    }

    let file_path = &args[1];
    let mode = args.get(2).map(String::as_str);
    let source = match read_to_string(file_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("error: cannot read {}: {}", file_path, error);
            process::exit(2);
        }
    };

    match mode {
        Some("--tokens") => match tokenize(&source) {
            Ok(tokens) => print!("{}", token_table(&tokens)),
            Err(errors) => fail(&source, &PassError::Lex(errors)),
        },
        Some("--tree") => match analyze(&source) {
            Ok((program, _)) => print!("{}", render_program(&program)),
            Err(error) => fail(&source, &error),
        },
        Some("--symbols") => match analyze(&source) {
            Ok((_, checker)) => print!("{}", checker.symbol_table()),
            Err(error) => fail(&source, &error),
        },
        None => {
            if let Err(error) = analyze(&source) {
                fail(&source, &error);
            }
        }
        Some(_) => usage(),
    }
}

fn fail(source: &str, error: &PassError) -> ! {
    eprint!("{}", render_error(source, error));
    process::exit(1);
}
