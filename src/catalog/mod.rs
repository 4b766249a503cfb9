//! The fixed set of ADME/toxicity properties every prediction is keyed by.
//!
//! Order matters: responses list properties in exactly this order for the
//! lifetime of the process.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Physicochemical,
    Absorption,
    Distribution,
    Metabolism,
    Excretion,
    Toxicity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Physicochemical => "physicochemical",
            Category::Absorption => "absorption",
            Category::Distribution => "distribution",
            Category::Metabolism => "metabolism",
            Category::Excretion => "excretion",
            Category::Toxicity => "toxicity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Regression,
    /// Value is the predicted probability of the positive class.
    Classification,
}

impl Task {
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Regression => "regression",
            Task::Classification => "classification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyDef {
    /// Key used in model output and in responses.
    pub id: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub task: Task,
}

const fn prop(id: &'static str, name: &'static str, category: Category, task: Task) -> PropertyDef {
    PropertyDef {
        id,
        name,
        category,
        task,
    }
}

use Category::*;
use Task::*;

pub const PROPERTIES: [PropertyDef; 49] = [
    prop("molecular_weight", "Molecular Weight", Physicochemical, Regression),
    prop("logP", "LogP", Physicochemical, Regression),
    prop("hydrogen_bond_acceptors", "Hydrogen Bond Acceptors", Physicochemical, Regression),
    prop("hydrogen_bond_donors", "Hydrogen Bond Donors", Physicochemical, Regression),
    prop("Lipinski", "Lipinski Rule of 5", Physicochemical, Regression),
    prop("QED", "Quantitative Estimate of Druglikeness", Physicochemical, Regression),
    prop("stereo_centers", "Stereo Centers", Physicochemical, Regression),
    prop("tpsa", "Topological Polar Surface Area", Physicochemical, Regression),
    prop("HIA_Hou", "Human Intestinal Absorption", Absorption, Classification),
    prop("Bioavailability_Ma", "Oral Bioavailability", Absorption, Classification),
    prop("Solubility_AqSolDB", "Aqueous Solubility", Absorption, Regression),
    prop("Lipophilicity_AstraZeneca", "Lipophilicity", Absorption, Regression),
    prop("HydrationFreeEnergy_FreeSolv", "Hydration Free Energy", Absorption, Regression),
    prop("Caco2_Wang", "Caco2 Permeability", Absorption, Regression),
    prop("PAMPA_NCATS", "PAMPA Permeability", Absorption, Classification),
    prop("Pgp_Broccatelli", "P-glycoprotein Inhibition", Absorption, Classification),
    prop("BBB_Martins", "Blood-Brain Barrier Penetration", Distribution, Classification),
    prop("PPBR_AZ", "Plasma Protein Binding Rate", Distribution, Regression),
    prop("VDss_Lombardo", "Volume of Distribution Steady State", Distribution, Regression),
    prop("Half_Life_Obach", "Half-Life", Excretion, Regression),
    prop("Clearance_Hepatocyte_AZ", "Drug Clearance Hepatocyte", Excretion, Regression),
    prop("Clearance_Microsome_AZ", "Drug Clearance Microsome", Excretion, Regression),
    prop("CYP1A2_Veith", "CYP1A2 Inhibition", Metabolism, Classification),
    prop("CYP2C19_Veith", "CYP2C19 Inhibition", Metabolism, Classification),
    prop("CYP2C9_Veith", "CYP2C9 Inhibition", Metabolism, Classification),
    prop("CYP2D6_Veith", "CYP2D6 Inhibition", Metabolism, Classification),
    prop("CYP3A4_Veith", "CYP3A4 Inhibition", Metabolism, Classification),
    prop("CYP2C9_Substrate_CarbonMangels", "CYP2C9 Substrate", Metabolism, Classification),
    prop("CYP2D6_Substrate_CarbonMangels", "CYP2D6 Substrate", Metabolism, Classification),
    prop("CYP3A4_Substrate_CarbonMangels", "CYP3A4 Substrate", Metabolism, Classification),
    prop("hERG", "hERG Blocking", Toxicity, Classification),
    prop("ClinTox", "Clinical Toxicity", Toxicity, Classification),
    prop("AMES", "AMES Mutagenicity", Toxicity, Classification),
    prop("DILI", "Drug Induced Liver Injury", Toxicity, Classification),
    prop("Carcinogens_Lagunin", "Carcinogenicity", Toxicity, Classification),
    prop("LD50_Zhu", "Acute Toxicity LD50", Toxicity, Regression),
    prop("Skin_Reaction", "Skin Reaction", Toxicity, Classification),
    prop("NR-AR", "Androgen Receptor", Toxicity, Classification),
    prop("NR-AR-LBD", "Androgen Receptor LBD", Toxicity, Classification),
    prop("NR-AhR", "Aryl Hydrocarbon Receptor", Toxicity, Classification),
    prop("NR-Aromatase", "Aromatase", Toxicity, Classification),
    prop("NR-ER", "Estrogen Receptor", Toxicity, Classification),
    prop("NR-ER-LBD", "Estrogen Receptor LBD", Toxicity, Classification),
    prop("NR-PPAR-gamma", "PPAR-gamma", Toxicity, Classification),
    prop("SR-ARE", "ARE", Toxicity, Classification),
    prop("SR-ATAD5", "ATAD5", Toxicity, Classification),
    prop("SR-HSE", "HSE", Toxicity, Classification),
    prop("SR-MMP", "Mitochondrial Membrane Potential", Toxicity, Classification),
    prop("SR-p53", "p53", Toxicity, Classification),
];

lazy_static::lazy_static! {
    static ref ALIASES: HashMap<String, usize> = build_aliases();
}

fn build_aliases() -> HashMap<String, usize> {
    let mut aliases = HashMap::new();
    for (position, property) in PROPERTIES.iter().enumerate() {
        aliases.insert(property.id.to_string(), position);
        aliases.insert(property.id.to_lowercase(), position);
        aliases.insert(property.name.to_lowercase().replace(' ', "_"), position);
    }
    aliases
}

pub fn all_properties() -> &'static [PropertyDef] {
    &PROPERTIES
}

/// Position of a property id in the catalog.
pub fn position(id: &str) -> Option<usize> {
    PROPERTIES.iter().position(|p| p.id == id)
}

/// Looks a property up by id, lowercase id, or snake-cased friendly name
/// (`"blood-brain_barrier_penetration"`).
pub fn resolve(name: &str) -> Option<&'static PropertyDef> {
    ALIASES
        .get(name)
        .or_else(|| ALIASES.get(&name.to_lowercase()))
        .map(|position| &PROPERTIES[*position])
}
