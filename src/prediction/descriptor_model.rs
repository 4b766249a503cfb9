use crate::molecule::descriptors::physicochemical_properties;
use crate::molecule::SmilesString;
use crate::prediction::{AdmetModel, PredictionRecord, RowPrediction};

/// Computes the physicochemical part of the catalog from RDKit descriptors.
///
/// Needs no model weights; the learned ADME and toxicity endpoints are left
/// empty. Useful as a fallback and for smoke-testing a deployment.
#[derive(Debug, Default)]
pub struct DescriptorModel;

impl DescriptorModel {
    pub fn new() -> Self {
        Self
    }
}

impl AdmetModel for DescriptorModel {
    fn name(&self) -> &str {
        "rdkit-descriptors"
    }

    fn predict(&mut self, smiles: &[SmilesString]) -> eyre::Result<Vec<RowPrediction>> {
        let rows = smiles
            .iter()
            .map(|s| match physicochemical_properties(s.as_str()) {
                Ok(values) => RowPrediction::Predicted(PredictionRecord::from_values(s.clone(), values)),
                Err(e) => {
                    log::warn!("could not compute descriptors for {}: {}", s, e);
                    RowPrediction::failed(s, e)
                }
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::validate;

    #[test]
    fn test_descriptor_rows() {
        let smiles = vec![validate("CCO").unwrap(), validate("c1ccccc1").unwrap()];
        let rows = DescriptorModel::new().predict(&smiles).unwrap();
        assert_eq!(rows.len(), 2);

        match &rows[1] {
            RowPrediction::Predicted(record) => {
                assert_eq!(record.smiles().as_str(), "c1ccccc1");
                assert_eq!(record.get("hydrogen_bond_donors"), Some(0.0));
                assert_eq!(record.get("tpsa"), Some(0.0));
                assert_eq!(record.get("hERG"), None);
            }
            failed => panic!("expected a prediction, got {:?}", failed),
        }
    }
}
