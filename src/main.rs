use std::{process::exit, time::Instant};

use clap::{Parser as ClapParser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};

use propform::{
    graph::FormulaGraph,
    parse,
    random::{random_assignment, FormulaGenerator, GeneratorConfig},
    Analyzer, Assignment, Error, Formula, Options,
};

/// The command line interface for working with propositional formulas
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
struct Args {
    /// The maximum number of variables for which truth assignments are enumerated
    #[arg(long, short = 'm', global = true)]
    max_vars: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical text of a formula, its variables, and its number of connectives
    Render { formula: String },

    /// Evaluate a formula under a truth assignment, e.g. `p=true,q=false`
    Eval { formula: String, assignment: String },

    /// Print the truth table of a formula
    Table { formula: String },

    /// Check whether a formula is a tautology, satisfiable, or a fallacy
    Check { formula: String },

    /// Print the negation of a formula
    Negate { formula: String },

    /// Print the negation normal form of a formula
    Nnf { formula: String },

    /// Print the conjunctive normal form of a formula
    Cnf { formula: String },

    /// Print the disjunctive normal form of a formula
    Dnf { formula: String },

    /// Check whether two formulas are logically equivalent
    Equiv { left: String, right: String },

    /// Check whether the premise logically implies the conclusion
    Entails { premise: String, conclusion: String },

    /// Print the formula tree in Graphviz DOT format
    Graph {
        formula: String,

        /// Color the nodes by their value under this truth assignment
        #[arg(long, short = 'a')]
        assignment: Option<String>,
    },

    /// Generate random formulas
    Random {
        /// The seed of the random number generator
        #[arg(long, short = 's', default_value_t = 0)]
        seed: u64,

        /// The number of distinct variables to draw from
        #[arg(long, default_value_t = 5)]
        vars: usize,

        /// The maximal nesting depth
        #[arg(long, default_value_t = 5)]
        depth: usize,

        /// The maximal number of operands of AND and OR
        #[arg(long, default_value_t = 4)]
        max_operands: usize,

        /// The number of formulas to generate
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,

        /// Also print a random truth assignment for each formula
        #[arg(long)]
        assignment: bool,
    },
}

/// The main function. Parses the command line arguments and runs the command.
fn main() {
    env_logger::init();
    let ts = Instant::now();
    let cli = Args::parse();

    let analyzer = Analyzer::new(convert_options(&cli));
    if let Err(err) = run(&cli.command, &analyzer) {
        log::error!("Error: {}", err);
        eprintln!("error: {}", err);
        exit(1);
    }

    log::info!("Done ({}ms).", ts.elapsed().as_millis());
}

fn convert_options(args: &Args) -> Options {
    let mut opts = Options::default();
    if let Some(max) = args.max_vars {
        opts.set_max_variables(max);
    }
    opts
}

fn read_formula(text: &str) -> Result<Formula, Error> {
    Ok(parse(text)?)
}

fn read_assignment(text: &str) -> Result<Assignment, Error> {
    Ok(text.parse::<Assignment>()?)
}

fn run(command: &Command, analyzer: &Analyzer) -> Result<(), Error> {
    match command {
        Command::Render { formula } => {
            let f = read_formula(formula)?;
            println!("{}", f);
            println!(
                "variables: {}",
                f.variables().into_iter().collect::<Vec<_>>().join(", ")
            );
            println!("connectives: {}", f.connective_count());
        }
        Command::Eval {
            formula,
            assignment,
        } => {
            let f = read_formula(formula)?;
            let a = read_assignment(assignment)?;
            println!("{}", f.evaluate(&a)?);
        }
        Command::Table { formula } => {
            let f = read_formula(formula)?;
            print!("{}", analyzer.truth_table(&f)?);
        }
        Command::Check { formula } => {
            let f = read_formula(formula)?;
            println!("tautology: {}", analyzer.is_tautology(&f)?);
            println!("satisfiable: {}", analyzer.is_satisfiable(&f)?);
            println!("fallacy: {}", analyzer.is_fallacy(&f)?);
        }
        Command::Negate { formula } => println!("{}", read_formula(formula)?.negate()),
        Command::Nnf { formula } => println!("{}", read_formula(formula)?.to_nnf()),
        Command::Cnf { formula } => println!("{}", analyzer.to_cnf(&read_formula(formula)?)?),
        Command::Dnf { formula } => println!("{}", analyzer.to_dnf(&read_formula(formula)?)?),
        Command::Equiv { left, right } => {
            let (l, r) = (read_formula(left)?, read_formula(right)?);
            println!("{}", analyzer.equivalent(&l, &r)?);
        }
        Command::Entails {
            premise,
            conclusion,
        } => {
            let (p, c) = (read_formula(premise)?, read_formula(conclusion)?);
            println!("{}", analyzer.implies(&p, &c)?);
        }
        Command::Graph {
            formula,
            assignment,
        } => {
            let f = read_formula(formula)?;
            let graph = match assignment {
                Some(a) => FormulaGraph::with_assignment(&f, &read_assignment(a)?)?,
                None => FormulaGraph::new(&f),
            };
            print!("{}", graph.to_dot());
        }
        Command::Random {
            seed,
            vars,
            depth,
            max_operands,
            count,
            assignment,
        } => {
            let config = GeneratorConfig {
                variables: *vars,
                max_depth: *depth,
                max_operands: *max_operands,
                ..Default::default()
            };
            let mut generator = FormulaGenerator::new(config, *seed);
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
            for _ in 0..*count {
                let f = generator.generate();
                println!("{}", f);
                if *assignment {
                    println!("{}", random_assignment(&f, &mut rng));
                }
            }
        }
    }
    Ok(())
}
