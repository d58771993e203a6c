use std::collections::BTreeSet;
use std::env;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use rsat::driver::{self, Pipeline};
use rsat::parser::parse;
use rsat::solver::Verdict;

/// Verdict line for input that could not be turned into a formula.
const NO_SOLUTION: &str = "NO-SOLUTION";

fn main() -> ExitCode {
    let args: BTreeSet<String> = env::args().collect();
    let verbose = args.contains("-v");
    let latex = args.contains("--latex");

    let pipeline = if args.contains("--linear") {
        Pipeline::Linear
    } else {
        Pipeline::Dpll
    };

    // Read the whole query from stdin
    let mut input = String::new();
    if let Err(err) = stdin().read_to_string(&mut input) {
        eprintln!("error: {err}");
        println!("{NO_SOLUTION}");
        return ExitCode::SUCCESS;
    }

    // Parse
    let formula = match parse(&input) {
        Ok(formula) => formula,
        Err(err) => {
            eprintln!("error: {err}");
            println!("{NO_SOLUTION}");
            return ExitCode::SUCCESS;
        }
    };

    if let Some(exp) = &formula {
        if verbose {
            println!("{exp}");
        }

        if latex {
            println!("{}", exp.latex());
        }
    }

    // Decide
    let outcome = match driver::decide(formula.as_ref(), pipeline) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            println!("{NO_SOLUTION}");
            return ExitCode::SUCCESS;
        }
    };

    if verbose {
        if let Some(cnf) = &outcome.cnf {
            print!("{cnf}");
        }

        if outcome.verdict == Verdict::Sat && !outcome.witness.is_empty() {
            println!("{}", outcome.witness);
        }
    }

    // The verdict is always the last line printed
    println!("{}", outcome.verdict);

    ExitCode::SUCCESS
}
