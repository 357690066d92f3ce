use seni_eval::Value;
use std::ops::Deref;
use std::sync::Arc;

/// One value per gene, by position. Immutable once built; clones share storage.
#[derive(Clone, Debug, PartialEq)]
pub struct Genotype(Arc<[Value]>);

impl Genotype {
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.to_vec()
    }
}

impl Deref for Genotype {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl From<Vec<Value>> for Genotype {
    fn from(values: Vec<Value>) -> Self {
        Genotype(values.into())
    }
}

impl FromIterator<Value> for Genotype {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Genotype(iter.into_iter().collect())
    }
}
