//! Command handlers for the `seni` CLI.
//!
//! Each returns its output instead of printing, so `main` decides where it goes.

use seni_fmt::{unparse, UnparseError};
use seni_genetic::{
    build_traits, genotype_from_seed, initial_generation, next_generation, GeneticError,
};
use std::path::{Path, PathBuf};

use crate::jobs::{gene_table, handle_job, Job, JobError};
use crate::pipeline::{front_ast, ScriptError};
use crate::render::{render, Rendering};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Genetic(#[from] GeneticError),
    #[error(transparent)]
    Unparse(#[from] UnparseError),
    #[error(transparent)]
    Job(#[from] JobError),
    #[error("invalid job: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn read_script(path: &Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluate `script`, with genes drawn from `seed` when given.
pub fn run_script(script: &str, seed: Option<u64>) -> Result<Rendering, CommandError> {
    let genotype = match seed {
        Some(seed) => Some(genotype_from_seed(&gene_table(script)?, seed)?),
        None => None,
    };
    Ok(render(script, genotype.as_deref())?)
}

/// The traits of `script` as pretty-printed JSON.
pub fn traits_json(script: &str) -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(&gene_table(script)?)?)
}

/// Settings for [`generation`].
#[derive(Clone, Copy, Debug)]
pub struct Breeding {
    pub population_size: usize,
    /// Rounds of breeding after the first generation.
    pub generations: usize,
    pub mutation_rate: f64,
    pub seed: u64,
}

/// A generation of `script`, each member unparsed.
///
/// Each breeding round keeps the first half of the previous generation as
/// parents.
pub fn generation(script: &str, breeding: Breeding) -> Result<Vec<String>, CommandError> {
    let ast = front_ast(script)?;
    let genes = build_traits(&ast);
    let mut population = initial_generation(&genes, breeding.population_size, breeding.seed)?;
    for round in 1..=breeding.generations {
        let parents = &population[..population.len().div_ceil(2)];
        population = next_generation(
            parents,
            breeding.population_size,
            breeding.mutation_rate,
            &genes,
            round_seed(breeding, round),
        )?;
    }
    population
        .iter()
        .map(|genotype| Ok(unparse(&ast, genotype)?))
        .collect()
}

/// Seed for breeding round `round`.
fn round_seed(breeding: Breeding, round: usize) -> u64 {
    breeding
        .seed
        .wrapping_add((round as u64).wrapping_mul(breeding.population_size as u64))
}

/// `script` with every gene drawn from `seed`.
pub fn unparse_with_seed(script: &str, seed: u64) -> Result<String, CommandError> {
    let ast = front_ast(script)?;
    let genotype = genotype_from_seed(&build_traits(&ast), seed)?;
    Ok(unparse(&ast, &genotype)?)
}

/// Serve one JSON-encoded job, answering in JSON.
pub fn job_json(input: &str) -> Result<String, CommandError> {
    let job: Job = serde_json::from_str(input)?;
    Ok(serde_json::to_string(&handle_job(job))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_seeds_wrap_instead_of_overflowing() {
        let breeding = Breeding {
            population_size: usize::MAX,
            generations: 3,
            mutation_rate: 0.1,
            seed: u64::MAX,
        };
        assert_eq!(round_seed(breeding, 0), u64::MAX);
        let wrapped = (usize::MAX as u64).wrapping_mul(2).wrapping_add(u64::MAX);
        assert_eq!(round_seed(breeding, 2), wrapped);
    }

    #[test]
    fn round_seeds_step_by_population() {
        let breeding = Breeding {
            population_size: 4,
            generations: 2,
            mutation_rate: 0.1,
            seed: 10,
        };
        assert_eq!(round_seed(breeding, 1), 14);
        assert_eq!(round_seed(breeding, 2), 18);
    }
}
