use poem_openapi::types::multipart::Upload;
use poem_openapi_derive::{Multipart, Object};

use crate::molecule::ValidationOptions;

#[derive(Object, Debug)]
pub struct SmiRequest {
    /// A single molecule in SMILES notation
    pub smi: String,
}

#[derive(Multipart)]
pub struct SmilesUpload {
    /// Text file, one SMILES per line; an optional name may follow the SMILES
    pub file: Upload,
}

pub fn validation_options(standardize: Option<bool>, attempt_fix: Option<bool>) -> ValidationOptions {
    ValidationOptions {
        standardize: standardize.unwrap_or(false),
        attempt_fix: attempt_fix.unwrap_or(false),
    }
}
