use crate::catalog::{self, PropertyDef, PROPERTIES};
use crate::molecule::SmilesString;

pub mod descriptor_model;
pub mod pipeline;
pub mod pool;
pub mod remote_model;

pub use descriptor_model::DescriptorModel;
pub use pool::ModelPool;
pub use remote_model::RemoteModel;

/// A loaded ADME/toxicity model.
///
/// Implementations need not be thread-safe: [`ModelPool`] hands each instance
/// to one inference call at a time.
pub trait AdmetModel: Send {
    fn name(&self) -> &str;

    /// Predicts every catalog property for each molecule.
    ///
    /// Must return exactly one row per input, in input order. A molecule the
    /// model cannot handle becomes a [`RowPrediction::Failed`] row; `Err` is
    /// reserved for failures of the whole call.
    fn predict(&mut self, smiles: &[SmilesString]) -> eyre::Result<Vec<RowPrediction>>;
}

/// Values for one molecule, one slot per catalog property in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    smiles: SmilesString,
    values: Vec<Option<f64>>,
}

impl PredictionRecord {
    pub fn new(smiles: SmilesString) -> Self {
        Self {
            smiles,
            values: vec![None; PROPERTIES.len()],
        }
    }

    /// Builds a record from model output keyed by property id. Keys outside
    /// the catalog are ignored and missing properties stay empty.
    pub fn from_values<I, K>(smiles: SmilesString, values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut record = Self::new(smiles);
        for (id, value) in values {
            if !record.set(id.as_ref(), value) {
                log::trace!("ignoring unknown property {}", id.as_ref());
            }
        }
        record
    }

    /// Returns false if `id` is not in the catalog.
    pub fn set(&mut self, id: &str, value: f64) -> bool {
        match catalog::position(id) {
            Some(position) => {
                self.values[position] = value.is_finite().then_some(value);
                true
            }
            None => false,
        }
    }

    pub fn smiles(&self) -> &SmilesString {
        &self.smiles
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        catalog::position(id).and_then(|position| self.values[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static PropertyDef, Option<f64>)> + '_ {
        PROPERTIES.iter().zip(self.values.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowPrediction {
    Predicted(PredictionRecord),
    Failed { smiles: SmilesString, reason: String },
}

impl RowPrediction {
    pub fn failed(smiles: &SmilesString, reason: impl ToString) -> Self {
        Self::Failed {
            smiles: smiles.clone(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::validate;

    #[test]
    fn test_record_has_every_property() {
        let record = PredictionRecord::from_values(
            validate("CCO").unwrap(),
            [("logP", -0.0014), ("hERG", 0.02), ("not_a_property", 1.0)],
        );

        assert_eq!(record.iter().count(), PROPERTIES.len());
        assert_eq!(record.get("logP"), Some(-0.0014));
        assert_eq!(record.get("hERG"), Some(0.02));
        assert_eq!(record.get("AMES"), None);
        assert_eq!(record.get("not_a_property"), None);
    }

    #[test]
    fn test_record_iterates_in_catalog_order() {
        let record = PredictionRecord::new(validate("CCN").unwrap());
        let ids = record.iter().map(|(p, _)| p.id).collect::<Vec<_>>();
        let expected = PROPERTIES.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let mut record = PredictionRecord::new(validate("CCO").unwrap());
        assert!(record.set("QED", f64::NAN));
        assert_eq!(record.get("QED"), None);
    }
}
