use poem_openapi::payload::Json;

use crate::formatting::format_single;
use crate::molecule::ValidationOptions;
use crate::prediction::{pipeline::predict_one, ModelPool};
use crate::rest_api::api::PredictSmilesResponse;
use crate::rest_api::models::SmiRequest;

pub async fn predict_smiles(
    pool: &ModelPool,
    request: SmiRequest,
    options: ValidationOptions,
) -> PredictSmilesResponse {
    match predict_one(pool, &request.smi, options).await {
        Ok(record) => PredictSmilesResponse::Ok(Json(format_single(&record))),
        Err(e) => {
            log::info!("rejected /smi/ request: {}", e);
            e.into()
        }
    }
}
