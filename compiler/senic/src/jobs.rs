//! The worker job contract.
//!
//! Jobs arrive as JSON objects tagged by `type` (`BUILD_TRAITS`,
//! `INITIAL_GENERATION`, `NEW_GENERATION`, `UNPARSE`, `RENDER`) with
//! camelCase fields. Each job is served from scratch: nothing is shared
//! between two calls of [`handle_job`].

use serde::{Deserialize, Serialize};
use seni_eval::Value;
use seni_fmt::UnparseError;
use seni_genetic::{GeneticError, Genotype};
use seni_ir::{Gene, Name};

use crate::pipeline::{compile_script, front_ast, ScriptError};
use crate::render::render;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Job {
    BuildTraits {
        script: String,
        #[serde(default)]
        script_hash: Option<String>,
    },
    InitialGeneration {
        traits: Vec<Gene>,
        population_size: usize,
        #[serde(default)]
        seed: u64,
    },
    NewGeneration {
        genotypes: Vec<Vec<GeneValue>>,
        population_size: usize,
        traits: Vec<Gene>,
        mutation_rate: f64,
        rng: u64,
    },
    Unparse {
        script: String,
        genotype: Vec<GeneValue>,
    },
    Render {
        script: String,
        #[serde(default)]
        genotype: Option<Vec<GeneValue>>,
    },
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::BuildTraits { .. } => "BUILD_TRAITS",
            Job::InitialGeneration { .. } => "INITIAL_GENERATION",
            Job::NewGeneration { .. } => "NEW_GENERATION",
            Job::Unparse { .. } => "UNPARSE",
            Job::Render { .. } => "RENDER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum JobResponse {
    Traits {
        valid_traits: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        script_hash: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        traits: Vec<Gene>,
    },
    Genotypes {
        genotypes: Vec<Vec<GeneValue>>,
    },
    Script {
        script: String,
    },
    Render {
        output: Vec<String>,
        value: Option<GeneValue>,
        error: Option<String>,
        matrix_depth: usize,
    },
    Error {
        error: String,
    },
}

/// A genotype value as it crosses the job boundary.
///
/// Quoted names are written `{"name": "..."}` to keep them apart from strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneValue {
    Number(f64),
    Boolean(bool),
    Text(String),
    List(Vec<GeneValue>),
    Name { name: String },
}

impl GeneValue {
    /// `None` for values with no JSON form (functions, maps, `undefined`).
    pub fn from_value(value: &Value) -> Option<GeneValue> {
        Some(match value {
            Value::Number(n) => GeneValue::Number(*n),
            Value::Boolean(b) => GeneValue::Boolean(b.is_true()),
            Value::Str(text) => GeneValue::Text(text.clone()),
            Value::Name(name) => GeneValue::Name {
                name: name.as_str().to_owned(),
            },
            Value::List(items) => {
                GeneValue::List(items.iter().map(GeneValue::from_value).collect::<Option<_>>()?)
            }
            Value::Undefined | Value::Map(_) | Value::Closure(_) | Value::Native(_) => return None,
        })
    }
}

impl From<GeneValue> for Value {
    fn from(value: GeneValue) -> Self {
        match value {
            GeneValue::Number(n) => Value::Number(n),
            GeneValue::Boolean(b) => Value::from(b),
            GeneValue::Text(text) => Value::Str(text),
            GeneValue::List(items) => Value::List(items.into_iter().map(Value::from).collect()),
            GeneValue::Name { name } => Value::Name(Name::from(name)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Genetic(#[from] GeneticError),
    #[error(transparent)]
    Unparse(#[from] UnparseError),
    #[error("gene {index} holds a {type_name}, which cannot be sent")]
    Unserializable {
        index: usize,
        type_name: &'static str,
    },
}

/// Serve one job. Failures become [`JobResponse::Error`], except that a
/// script which does not compile answers `BUILD_TRAITS` with
/// `validTraits: false`.
#[tracing::instrument(level = "debug", skip_all, fields(job = job.name()))]
pub fn handle_job(job: Job) -> JobResponse {
    match run_job(job) {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(%error, "job failed");
            JobResponse::Error {
                error: error.to_string(),
            }
        }
    }
}

fn run_job(job: Job) -> Result<JobResponse, JobError> {
    match job {
        Job::BuildTraits {
            script,
            script_hash,
        } => Ok(match front_ast(&script) {
            Ok(ast) => JobResponse::Traits {
                valid_traits: true,
                script_hash,
                traits: seni_genetic::build_traits(&ast),
            },
            Err(error) => {
                tracing::debug!(%error, "invalid script");
                JobResponse::Traits {
                    valid_traits: false,
                    script_hash,
                    traits: Vec::new(),
                }
            }
        }),
        Job::InitialGeneration {
            traits,
            population_size,
            seed,
        } => {
            let generation = seni_genetic::initial_generation(&traits, population_size, seed)?;
            Ok(JobResponse::Genotypes {
                genotypes: encode_generation(&generation)?,
            })
        }
        Job::NewGeneration {
            genotypes,
            population_size,
            traits,
            mutation_rate,
            rng,
        } => {
            let parents: Vec<Genotype> = genotypes.into_iter().map(decode_genotype).collect();
            let generation = seni_genetic::next_generation(
                &parents,
                population_size,
                mutation_rate,
                &traits,
                rng,
            )?;
            Ok(JobResponse::Genotypes {
                genotypes: encode_generation(&generation)?,
            })
        }
        Job::Unparse { script, genotype } => {
            let ast = front_ast(&script)?;
            let genotype = decode_genotype(genotype);
            Ok(JobResponse::Script {
                script: seni_fmt::unparse(&ast, &genotype)?,
            })
        }
        Job::Render { script, genotype } => {
            let genotype = genotype.map(decode_genotype);
            let rendering = render(&script, genotype.as_deref())?;
            Ok(JobResponse::Render {
                output: rendering.output,
                value: GeneValue::from_value(&rendering.value),
                error: rendering.error.map(|error| error.to_string()),
                matrix_depth: rendering.matrix_depth,
            })
        }
    }
}

fn decode_genotype(values: Vec<GeneValue>) -> Genotype {
    values.into_iter().map(Value::from).collect()
}

fn encode_generation(generation: &[Genotype]) -> Result<Vec<Vec<GeneValue>>, JobError> {
    generation.iter().map(|genotype| encode_genotype(genotype)).collect()
}

pub fn encode_genotype(genotype: &[Value]) -> Result<Vec<GeneValue>, JobError> {
    genotype
        .iter()
        .enumerate()
        .map(|(index, value)| {
            GeneValue::from_value(value).ok_or(JobError::Unserializable {
                index,
                type_name: value.type_name(),
            })
        })
        .collect()
}

/// The traits of `script`, compiled.
pub fn gene_table(script: &str) -> Result<Vec<Gene>, ScriptError> {
    Ok(compile_script(script)?.genes)
}
