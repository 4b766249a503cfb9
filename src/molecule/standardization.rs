use std::collections::HashMap;

use rdkit::MolSanitizeException::{AtomValenceException, KekulizeException};
use rdkit::{
    detect_chemistry_problems, fragment_parent, set_hybridization, substruct_match, Atom,
    CleanupParameters, HybridizationType, ROMol, RWMol, SmilesParserParams,
    SubstructMatchParameters, TautomerEnumerator,
};

lazy_static::lazy_static! {
    static ref EXPECTED_VALENCE: HashMap<&'static str, i32> =
        [("C", 4), ("N", 3), ("O", 2)].into_iter().collect();
}

const CHARGED_ATOM_SMARTS: &str = "[+1!h0!$([*]~[-1,-2,-3,-4]),-1!$([*]~[+1,+2,+3,+4])]";
const HYPERVALENT_SILICON: &str = "[Si-";

fn parse_unsanitized(smi: &str) -> eyre::Result<ROMol> {
    let mut parser_params = SmilesParserParams::default();
    parser_params.set_sanitize(false);
    ROMol::from_smiles_with_params(smi, &parser_params).map_err(|e| eyre::eyre!("{}", e))
}

fn set_charge_and_hydrogens(atom: &mut Atom, charge: i32, num_hs: i32) -> eyre::Result<()> {
    atom.set_formal_charge(charge);
    atom.set_num_explicit_hs(num_hs);
    atom.update_property_cache(true)
        .map_err(|e| eyre::eyre!("could not update atom properties: {}", e))
}

/// Neutralizes isolated charged atoms, leaving zwitterion partners, aromatic
/// atoms and sp3 anions untouched.
pub fn neutralize_charges(romol: &ROMol) -> eyre::Result<ROMol> {
    let mut neutral = romol.clone();
    let pattern = RWMol::from_smarts(CHARGED_ATOM_SMARTS)
        .map_err(|e| eyre::eyre!("invalid charge pattern: {}", e))?
        .to_ro_mol();
    let params = SubstructMatchParameters::new();

    let charged_atoms = substruct_match(romol, &pattern, &params)
        .into_iter()
        .map(|atom_match| atom_match[0].mol_atom_idx as u32)
        .collect::<Vec<_>>();

    for atom_idx in charged_atoms {
        let mut atom = neutral.atom_with_idx(atom_idx);
        if atom.get_is_aromatic() {
            continue;
        }

        let charge = atom.get_formal_charge();
        if atom.get_hybridization_type() == HybridizationType::SP3 && charge < 0 {
            continue;
        }

        let num_hs = atom.get_total_num_hs() as i32;
        set_charge_and_hydrogens(&mut atom, 0, num_hs - charge)?;
        set_hybridization(&mut neutral);
    }

    Ok(neutral)
}

/// Drops disconnected fragments containing a hypervalent silicon anion.
pub fn strip_hypervalent_silicon(smi: &str) -> String {
    if !(smi.contains(HYPERVALENT_SILICON) && smi.contains('.')) {
        return smi.to_string();
    }

    smi.split('.')
        .filter(|fragment| !fragment.contains(HYPERVALENT_SILICON))
        .collect::<Vec<_>>()
        .join(".")
}

fn correct_formal_charge(romol: &mut ROMol, atom_idx: u32) {
    romol.update_property_cache(false);

    let mut atom = romol.atom_with_idx(atom_idx);
    let symbol = atom.symbol();
    if let Some(expected) = EXPECTED_VALENCE.get(symbol.as_str()) {
        let total_valence = atom.get_total_valence() as i32;
        if total_valence - atom.get_formal_charge() != *expected {
            atom.set_formal_charge(total_valence - expected);
        }
    }
}

/// Parses `smi` without sanitization, repairs valence and kekulization
/// problems that have a known fix, then re-parses with full sanitization.
pub fn repair_smiles(smi: &str) -> eyre::Result<ROMol> {
    let mut repaired = smi.to_string();
    let mut romol = parse_unsanitized(&repaired)?;

    for problem in detect_chemistry_problems(&romol) {
        match problem {
            AtomValenceException { atom_idx } => {
                let symbol = romol.atom_with_idx(atom_idx).symbol();
                if symbol == "Si" {
                    repaired = strip_hypervalent_silicon(&repaired);
                    romol = parse_unsanitized(&repaired)?;
                } else if EXPECTED_VALENCE.contains_key(symbol.as_str()) {
                    correct_formal_charge(&mut romol, atom_idx);
                    repaired = romol.as_smiles();
                }
            }
            KekulizeException => {
                if repaired.contains("[c-]") {
                    repaired = repaired.replace("[c-]", "[cH-]");
                    romol = parse_unsanitized(&repaired)?;
                }
            }
            _ => {}
        }
    }

    let remaining = detect_chemistry_problems(&romol);
    if !remaining.is_empty() {
        return Err(eyre::eyre!(
            "problems remain after attempted repair: {:?}",
            remaining
        ));
    }

    ROMol::from_smiles(&repaired).map_err(|e| eyre::eyre!("{}", e))
}

/// Largest-fragment parent, canonical tautomer, neutralized.
pub fn standardize_mol(romol: &ROMol) -> eyre::Result<ROMol> {
    let rwmol = romol.as_rw_mol(false, 1);
    let parent = fragment_parent(&rwmol, &CleanupParameters::default(), true);
    let canonical_tautomer = TautomerEnumerator::new()
        .canonicalize(&parent.to_ro_mol())
        .map_err(|e| eyre::eyre!("tautomer canonicalization failed: {}", e))?;
    neutralize_charges(&canonical_tautomer)
}
