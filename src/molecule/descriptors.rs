use std::collections::HashMap;

use rdkit::{Properties, ROMol};

/// Physicochemical properties derivable from RDKit descriptors, keyed by
/// catalog id.
pub fn physicochemical_properties(smiles: &str) -> eyre::Result<HashMap<String, f64>> {
    let romol = ROMol::from_smiles(smiles).map_err(|e| eyre::eyre!("{}", e))?;
    let computed = Properties::new().compute_properties(&romol);

    let descriptor = |name: &str| {
        computed
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("RDKit did not compute {}", name))
    };

    let molecular_weight = descriptor("amw")?;
    let log_p = descriptor("CrippenClogP")?;
    let acceptors = descriptor("lipinskiHBA")?;
    let donors = descriptor("lipinskiHBD")?;

    let mut properties = HashMap::new();
    properties.insert("molecular_weight".to_string(), molecular_weight);
    properties.insert("logP".to_string(), log_p);
    properties.insert("hydrogen_bond_acceptors".to_string(), acceptors);
    properties.insert("hydrogen_bond_donors".to_string(), donors);
    properties.insert(
        "Lipinski".to_string(),
        lipinski_rules_met(molecular_weight, log_p, acceptors, donors) as f64,
    );
    properties.insert("stereo_centers".to_string(), descriptor("NumAtomStereoCenters")?);
    properties.insert("tpsa".to_string(), descriptor("tpsa")?);

    Ok(properties)
}

/// Number of Lipinski rule-of-five criteria satisfied, 0 through 4.
pub fn lipinski_rules_met(molecular_weight: f64, log_p: f64, acceptors: f64, donors: f64) -> u8 {
    [
        molecular_weight <= 500.0,
        log_p <= 5.0,
        acceptors <= 10.0,
        donors <= 5.0,
    ]
    .into_iter()
    .filter(|met| *met)
    .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lipinski_rules_met() {
        assert_eq!(lipinski_rules_met(46.07, -0.0014, 1.0, 1.0), 4);
        assert_eq!(lipinski_rules_met(812.0, 6.2, 12.0, 3.0), 1);
        assert_eq!(lipinski_rules_met(900.0, 7.0, 14.0, 8.0), 0);
    }

    #[test]
    fn test_ethanol_descriptors() {
        let properties = physicochemical_properties("CCO").unwrap();
        assert!((properties["molecular_weight"] - 46.069).abs() < 0.01);
        assert_eq!(properties["hydrogen_bond_donors"], 1.0);
        assert_eq!(properties["hydrogen_bond_acceptors"], 1.0);
        assert_eq!(properties["stereo_centers"], 0.0);
        assert_eq!(properties["Lipinski"], 4.0);
        assert!((properties["tpsa"] - 20.23).abs() < 0.01);
    }
}
