use std::process;

use gramcheck::checker::{Checker, EXERCISE_SENTENCES};
use gramcheck::configuration::{load_optional_config, ConfigReadError};
use gramcheck::entities;
use gramcheck::grammar::{self, TOY_ENGLISH};
use gramcheck::pipeline;

fn main() {
    // a missing check.toml just means defaults; anything else is an error
    let config = match load_optional_config("check.toml") {
        Ok(config) => config,
        Err(ConfigReadError::ReadError(e)) => {
            eprintln!("failed to read check.toml: {e}");
            process::exit(exitcode::IOERR)
        }
        Err(ConfigReadError::ParseError(e)) => {
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    let grammar_content = match &config.grammar.path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("error reading grammar file: {e}");
                process::exit(exitcode::IOERR)
            }
        },
        None => TOY_ENGLISH.to_string(),
    };

    let grammar = match grammar::parse_grammar(&grammar_content) {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("errors while parsing grammar");
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    let sentences: Vec<String> = match &config.sentences.path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                eprintln!("error reading sentence file: {e}");
                process::exit(exitcode::IOERR)
            }
        },
        None => EXERCISE_SENTENCES.iter().map(|s| s.to_string()).collect(),
    };

    let checker = Checker::with_parse_limit(grammar, config.parser.parse_limit);

    let stdout = std::io::stdout();
    for sentence in &sentences {
        let verdict = checker.check(sentence);
        if let Err(e) = verdict.write_report(stdout.lock()) {
            eprintln!("error writing report: {e}");
            process::exit(exitcode::IOERR)
        }
    }

    if let Some(tokens) = &config.tokens {
        match pipeline::run_pipeline(&tokens.path) {
            Ok(words) => println!("{words:?}"),
            Err(e) => {
                eprintln!("error running token pipeline: {e}");
                process::exit(exitcode::IOERR)
            }
        }

        match entities::run_extraction(&tokens.path) {
            Ok(lines) => {
                for entities in lines {
                    println!("{entities:?}");
                }
            }
            Err(e) => {
                eprintln!("error extracting entities: {e}");
                process::exit(exitcode::IOERR)
            }
        }
    }
}
