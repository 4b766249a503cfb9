use std::fmt;

use rdkit::ROMol;

use crate::errors::AdmetError;
use crate::molecule::standardization::{repair_smiles, standardize_mol};

/// A SMILES string that RDKit has parsed and canonicalized.
///
/// Only [`validate`] and [`validate_with`] construct one, so anything holding
/// a `SmilesString` may be handed to a prediction model as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SmilesString {
    canonical: String,
}

impl SmilesString {
    pub fn as_str(&self) -> &str {
        &self.canonical
    }
}

impl AsRef<str> for SmilesString {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for SmilesString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reduce to the parent fragment, canonical tautomer and neutral form.
    pub standardize: bool,
    /// Try to repair valence and kekulization problems before parsing.
    pub attempt_fix: bool,
}

fn standardize_checked<F>(
    input: &str,
    romol: &ROMol,
    standardize: F,
) -> Result<ROMol, AdmetError>
where
    F: FnOnce(&ROMol) -> eyre::Result<ROMol>,
{
    standardize(romol).map_err(|e| AdmetError::malformed(input, e))
}

pub fn validate(raw: &str) -> Result<SmilesString, AdmetError> {
    validate_with(raw, ValidationOptions::default())
}

pub fn validate_with(raw: &str, options: ValidationOptions) -> Result<SmilesString, AdmetError> {
    let input = raw.trim();
    // RDKit happily parses "" into a molecule with no atoms
    if input.is_empty() {
        return Err(AdmetError::malformed(raw, "empty SMILES"));
    }

    let romol = if options.attempt_fix {
        repair_smiles(input).map_err(|e| AdmetError::malformed(input, e))?
    } else {
        ROMol::from_smiles(input).map_err(|e| AdmetError::malformed(input, e))?
    };

    let romol = if options.standardize {
        standardize_checked(input, &romol, standardize_mol)?
    } else {
        romol
    };

    let canonical = romol.as_smiles();
    if canonical.is_empty() {
        return Err(AdmetError::malformed(input, "no atoms"));
    }

    Ok(SmilesString { canonical })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_canonicalizes() {
        let smiles = validate("  OCC \n").unwrap();
        assert_eq!(smiles.as_str(), "CCO");
    }

    #[test]
    fn test_validate_aromatic() {
        assert_eq!(validate("C1=CC=CC=C1").unwrap().as_str(), "c1ccccc1");
    }

    #[test]
    fn test_validate_rejects_empty() {
        for raw in ["", "   ", "\t\n"] {
            assert!(matches!(
                validate(raw),
                Err(AdmetError::MalformedSmiles { .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_garbage() {
        for raw in ["not_a_smiles!!", "garbage$$", "C1CC"] {
            match validate(raw) {
                Err(AdmetError::MalformedSmiles { smiles, .. }) => assert_eq!(smiles, raw),
                other => panic!("expected malformed SMILES for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_with_standardize() {
        let options = ValidationOptions {
            standardize: true,
            attempt_fix: false,
        };
        assert_eq!(validate_with("CC=CO", options).unwrap().as_str(), "CCC=O");
    }

    #[test]
    fn test_standardization_failure_is_malformed() {
        let romol = ROMol::from_smiles("CC=CO").unwrap();
        let result = standardize_checked("CC=CO", &romol, |_| {
            Err(eyre::eyre!("tautomer canonicalization failed: too many tautomers"))
        });

        match result {
            Err(e @ AdmetError::MalformedSmiles { .. }) => {
                assert!(e.is_client_error());
                assert!(e.to_string().contains("CC=CO"));
                assert!(e.to_string().contains("tautomer canonicalization failed"));
            }
            other => panic!("expected malformed SMILES, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_with_attempt_fix() {
        assert!(validate("C[N](C)(C)C").is_err());

        let options = ValidationOptions {
            standardize: false,
            attempt_fix: true,
        };
        assert_eq!(
            validate_with("C[N](C)(C)C", options).unwrap().as_str(),
            "C[N+](C)(C)C"
        );
    }
}
