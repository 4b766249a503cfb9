mod error;
pub use error::*;

mod smiles;
pub use smiles::*;
