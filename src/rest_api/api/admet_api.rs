use poem::web::Data;
use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    OpenApi,
};

use crate::prediction::ModelPool;
use crate::rest_api::api::{
    get_property, health, list_properties, predict_smiles, upload_smiles, GetPropertyResponse,
    HealthResponse, ListPropertiesResponse, PredictSmilesResponse, UploadSmilesResponse,
};
use crate::rest_api::models::{validation_options, SmiRequest, SmilesUpload};

#[derive(Default)]
pub struct AdmetApi;

#[OpenApi]
impl AdmetApi {
    #[oai(path = "/health", method = "get")]
    /// Liveness check
    pub async fn health(&self) -> HealthResponse {
        health()
    }

    #[oai(path = "/properties", method = "get")]
    /// List the predicted properties, in response order
    pub async fn list_properties(&self) -> ListPropertiesResponse {
        list_properties()
    }

    #[oai(path = "/properties/:name", method = "get")]
    /// Look a property up by id or friendly name, case-insensitively
    pub async fn get_property(&self, name: Path<String>) -> GetPropertyResponse {
        get_property(&name.0)
    }

    #[oai(path = "/smi/", method = "post")]
    /// Predict every property for a single SMILES
    pub async fn predict_smiles(
        &self,
        request: Json<SmiRequest>,
        standardize: Query<Option<bool>>,
        attempt_fix: Query<Option<bool>>,
        pool: Data<&ModelPool>,
    ) -> PredictSmilesResponse {
        let options = validation_options(standardize.0, attempt_fix.0);
        predict_smiles(pool.0, request.0, options).await
    }

    #[oai(path = "/upload_smi/", method = "post")]
    /// Predict every property for each line of an uploaded SMILES file.
    /// Malformed lines are reported under `errors` without failing the batch
    pub async fn upload_smiles(
        &self,
        upload: SmilesUpload,
        standardize: Query<Option<bool>>,
        attempt_fix: Query<Option<bool>>,
        pool: Data<&ModelPool>,
    ) -> UploadSmilesResponse {
        let options = validation_options(standardize.0, attempt_fix.0);
        upload_smiles(pool.0, upload, options).await
    }
}
