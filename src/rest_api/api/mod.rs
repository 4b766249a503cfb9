mod admet_api;
pub use admet_api::AdmetApi;

mod health;
pub use health::*;

mod predict_smiles;
pub use predict_smiles::*;

mod properties;
pub use properties::*;

mod response_types;
pub use response_types::*;

mod upload_smiles;
pub use upload_smiles::*;
