use clap::{Parser as ClapParser, Subcommand};
use sift_lang::cli::{self, CliError, EvalOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "sift")]
#[command(about = "Sift - evaluate condition expressions against JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression against a JSON document
    Eval {
        /// The expression to evaluate
        expression: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the result
        #[arg(short, long)]
        pretty: bool,

        /// Prepared condition, substituted before evaluation (repeatable)
        #[arg(short = 'c', long = "condition", value_name = "NAME=EXPR")]
        conditions: Vec<String>,
    },

    /// List the dotted field names an expression refers to
    Fields {
        /// The expression to scan
        expression: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            input,
            pretty,
            conditions,
        } => run_eval(expression, input, pretty, conditions),
        Commands::Fields { expression } => {
            for name in sift_lang::field_names(&expression) {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(
    expression: String,
    input: Option<String>,
    pretty: bool,
    conditions: Vec<String>,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            Some(buffer)
        }
        None => None,
    };

    let options = EvalOptions {
        expression,
        input,
        pretty,
        conditions,
    };

    let output = cli::execute_eval(&options)?;
    println!("{}", output);
    Ok(())
}
