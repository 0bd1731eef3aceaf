extern crate clap;

use clap::{App, Arg};
use fillgrid::{parse, render, Crossword, FillError, Solver};

fn main() -> Result<(), FillError> {
    env_logger::init();

    let matches = App::new("fillgrid")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Grid structure file; `_` marks a fillable cell")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list, one word per line")
                .required(true)
                .index(2),
        )
        .get_matches();

    let structure = matches.value_of("structure").expect("structure is required");
    let words = matches.value_of("words").expect("words is required");

    let structure = parse::parse_structure(&std::fs::read_to_string(structure)?)?;
    let vocabulary = parse::parse_words(&std::fs::read_to_string(words)?);

    let crossword = Crossword::new(structure)?;

    match Solver::new(&crossword, &vocabulary).solve() {
        Some(assignment) => {
            print!("{}", render(&crossword, &assignment));
            Ok(())
        }
        None => {
            println!("No solution.");
            std::process::exit(1);
        }
    }
}
