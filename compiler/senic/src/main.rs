//! Seni command-line tool.

use clap::{Parser, Subcommand};
use senic::commands::{
    generation, job_json, read_script, run_script, traits_json, unparse_with_seed, Breeding,
    CommandError,
};
use senic::{init_tracing, Config};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "seni")]
#[command(about = "Run, breed and rewrite Seni-script drawings")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a script and print its output
    Run {
        file: PathBuf,

        /// Draw the genes from this seed instead of using the written values
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a script's traits as JSON
    Traits { file: PathBuf },

    /// Print a generation of variations of a script
    Generation {
        file: PathBuf,

        #[arg(long)]
        population: Option<usize>,

        /// Breed this many generations past the first
        #[arg(long, default_value_t = 0)]
        generations: usize,

        #[arg(long)]
        mutation_rate: Option<f64>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a script with its genes drawn from a seed
    Unparse {
        file: PathBuf,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Read one JSON job from stdin and write the JSON response
    Job,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_filter);

    match execute(cli.command, &config) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command, config: &Config) -> Result<ExitCode, CommandError> {
    match command {
        Command::Run { file, seed } => {
            let rendering = run_script(&read_script(&file)?, seed)?;
            for line in &rendering.output {
                println!("{line}");
            }
            if let Some(error) = rendering.error {
                eprintln!("runtime error: {error}");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Traits { file } => {
            println!("{}", traits_json(&read_script(&file)?)?);
        }
        Command::Generation {
            file,
            population,
            generations,
            mutation_rate,
            seed,
        } => {
            let breeding = Breeding {
                population_size: population.unwrap_or(config.population_size),
                generations,
                mutation_rate: mutation_rate.unwrap_or(config.mutation_rate),
                seed: seed.unwrap_or(config.seed),
            };
            let scripts = generation(&read_script(&file)?, breeding)?;
            for (i, script) in scripts.iter().enumerate() {
                println!(";; genotype {i}");
                println!("{script}");
            }
        }
        Command::Unparse { file, seed } => {
            let script = unparse_with_seed(&read_script(&file)?, seed.unwrap_or(config.seed))?;
            println!("{script}");
        }
        Command::Job => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CommandError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            println!("{}", job_json(&input)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}
