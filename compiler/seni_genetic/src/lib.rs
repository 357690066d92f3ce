//! Seni Genetic - traits, genotypes and breeding.
//!
//! A script's bracketed literals are its *traits* ([`Gene`]s, in depth-first
//! order). A [`Genotype`] holds one value per trait. Genotypes come from the
//! authored literals, from evaluating each trait's generator against a
//! seeded [`Prng`], or from breeding earlier genotypes.

mod bindings;
mod genotype;
mod prng;

use seni_eval::{silent_handler, EvalError, Environment, Interpreter, Value};
use seni_ir::{Gene, Node};

pub use bindings::{bracket_bindings, gene_environment};
pub use genotype::Genotype;
pub use prng::{Prng, SharedPrng};

/// Parent selection retries before accepting the same parent twice.
const DISTINCT_PARENT_ATTEMPTS: usize = 10;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeneticError {
    #[error("gene {index}: {source}")]
    Generator { index: usize, source: EvalError },
    #[error("genotype {index} has {found} values for {expected} genes")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// The traits of a script, in gene-index order.
pub fn build_traits(front_ast: &[Node]) -> Vec<Gene> {
    seni_canon::compile(front_ast).genes
}

/// The genotype the script was written with.
pub fn genotype_from_initial_values(genes: &[Gene]) -> Genotype {
    genes
        .iter()
        .map(|gene| Value::from(gene.initial_value.clone()))
        .collect()
}

/// Draw every gene from its generator, with a generator seeded by `seed`.
#[tracing::instrument(level = "debug", skip(genes), fields(genes = genes.len()))]
pub fn genotype_from_seed(genes: &[Gene], seed: u64) -> Result<Genotype, GeneticError> {
    Breeder::new(genes, seed).random_genotype()
}

/// A first generation: the authored genotype, then `population_size - 1`
/// genotypes drawn with seeds `seed + 1`, `seed + 2`, ...
#[tracing::instrument(level = "debug", skip(genes), fields(genes = genes.len()))]
pub fn initial_generation(
    genes: &[Gene],
    population_size: usize,
    seed: u64,
) -> Result<Vec<Genotype>, GeneticError> {
    (0..population_size)
        .map(|i| match i {
            0 => Ok(genotype_from_initial_values(genes)),
            i => genotype_from_seed(genes, seed.wrapping_add(i as u64)),
        })
        .collect()
}

/// Breed `population_size` genotypes from `parents`.
///
/// The parents survive unchanged (up to `population_size` of them). Each
/// remaining child takes a prefix of one parent and the rest of another,
/// then every gene is redrawn from its generator with probability
/// `mutation_rate`. With no parents every child is drawn fresh.
#[tracing::instrument(level = "debug", skip(parents, genes), fields(parents = parents.len()))]
pub fn next_generation(
    parents: &[Genotype],
    population_size: usize,
    mutation_rate: f64,
    genes: &[Gene],
    seed: u64,
) -> Result<Vec<Genotype>, GeneticError> {
    for (index, parent) in parents.iter().enumerate() {
        if parent.len() != genes.len() {
            return Err(GeneticError::LengthMismatch {
                index,
                expected: genes.len(),
                found: parent.len(),
            });
        }
    }

    let breeder = Breeder::new(genes, seed);
    let mut generation: Vec<Genotype> = parents.iter().take(population_size).cloned().collect();
    while generation.len() < population_size {
        let child = if parents.is_empty() {
            breeder.random_genotype()?
        } else {
            let child = breeder.crossover(parents);
            breeder.mutate(child, mutation_rate)?
        };
        generation.push(child);
    }
    tracing::debug!(size = generation.len(), "bred generation");
    Ok(generation)
}

/// Evaluates generators against one seeded environment.
struct Breeder<'g> {
    genes: &'g [Gene],
    prng: SharedPrng,
    env: Environment,
    interpreter: Interpreter<'static>,
}

impl<'g> Breeder<'g> {
    fn new(genes: &'g [Gene], seed: u64) -> Self {
        let prng = Prng::shared(seed);
        let env = gene_environment(&prng);
        Breeder {
            genes,
            prng,
            env,
            interpreter: Interpreter::new(silent_handler()),
        }
    }

    fn draw(&self, index: usize) -> Result<Value, GeneticError> {
        let Some(gene) = self.genes.get(index) else {
            return Ok(Value::Undefined);
        };
        let evaluation = self.interpreter.run_program(&self.env, &gene.compiled_ast);
        match evaluation.error {
            Some(source) => Err(GeneticError::Generator { index, source }),
            None => Ok(evaluation.value),
        }
    }

    fn random_genotype(&self) -> Result<Genotype, GeneticError> {
        (0..self.genes.len()).map(|index| self.draw(index)).collect()
    }

    fn crossover(&self, parents: &[Genotype]) -> Vec<Value> {
        let first = self.prng.lock().index(parents.len());
        let mut second = first;
        for _ in 0..DISTINCT_PARENT_ATTEMPTS {
            if second != first || parents.len() < 2 {
                break;
            }
            second = self.prng.lock().index(parents.len());
        }
        let cut = self.prng.lock().index(self.genes.len());

        let mut child = Vec::with_capacity(self.genes.len());
        child.extend_from_slice(&parents[first][..cut]);
        child.extend_from_slice(&parents[second][cut..]);
        child
    }

    fn mutate(&self, mut child: Vec<Value>, mutation_rate: f64) -> Result<Genotype, GeneticError> {
        for (index, value) in child.iter_mut().enumerate() {
            if self.prng.lock().unit() < mutation_rate {
                *value = self.draw(index)?;
            }
        }
        Ok(Genotype::from(child))
    }
}
