use clap::{ArgAction, Parser as ClapParser, Subcommand};
use formula_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "formula")]
#[command(about = "Formula - validate, format and evaluate derived property formulas")]
#[command(version)]
struct Cli {
    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate a formula
    Check {
        /// The formula to check
        formula: String,

        /// JSON object of property values (reads from stdin if not provided)
        #[arg(long)]
        values: Option<String>,

        /// Treat properties without a value as 0
        #[arg(long)]
        null_is_zero: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Print a formula in canonical form
    Fmt {
        /// The formula to format
        formula: String,

        /// Omit spaces around operators
        #[arg(long)]
        compact: bool,
    },

    /// Print the tokens of a formula
    Tokens {
        /// The formula to lex
        formula: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'formula docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            formula,
            values,
            null_is_zero,
            syntax_only,
        } => run_check(formula, values, null_is_zero, syntax_only),
        Commands::Fmt { formula, compact } => {
            cli::format_formula(&formula, compact).map(|text| println!("{}", text))
        }
        Commands::Tokens { formula } => run_tokens(&formula),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => {
            cli::get_doc_category(&category).map(|content| print!("{}", content))
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    formula: String,
    values: Option<String>,
    null_is_zero: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let values = match values {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        formula,
        values,
        null_is_zero,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid {
            formula,
            references,
        } => {
            println!("Formula is valid: {}", formula);
            if !references.is_empty() {
                println!("References: {}", references.join(", "));
            }
        }
        CheckResult::Success(Some(value)) => println!("{}", value),
        CheckResult::Success(None) => println!("null"),
    }
    Ok(())
}

fn run_tokens(formula: &str) -> Result<(), CliError> {
    for token in cli::list_tokens(formula)? {
        println!("{:>4}  {:<10}  {}", token.position, token.kind, token.lexeme);
    }
    Ok(())
}
