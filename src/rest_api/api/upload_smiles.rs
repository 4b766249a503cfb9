use poem_openapi::payload::Json;

use crate::errors::AdmetError;
use crate::formatting::format_line_prediction;
use crate::molecule::ValidationOptions;
use crate::prediction::pipeline::{parse_lines, predict_lines};
use crate::prediction::ModelPool;
use crate::rest_api::api::{UploadLineError, UploadSmilesOk, UploadSmilesResponse};
use crate::rest_api::models::SmilesUpload;

const UTF8_BOM: char = '\u{feff}';

async fn read_upload(upload: SmilesUpload) -> Result<String, AdmetError> {
    let file_name = upload.file.file_name().unwrap_or("<unnamed>").to_string();
    let bytes = upload.file.into_vec().await?;
    let text = String::from_utf8(bytes)?;

    log::debug!("received {} ({} bytes)", file_name, text.len());

    Ok(text.trim_start_matches(UTF8_BOM).to_string())
}

pub async fn upload_smiles(
    pool: &ModelPool,
    upload: SmilesUpload,
    options: ValidationOptions,
) -> UploadSmilesResponse {
    let text = match read_upload(upload).await {
        Ok(text) => text,
        Err(e) => return e.into(),
    };

    let outcome = match predict_lines(pool, parse_lines(&text), options).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::info!("rejected /upload_smi/ request: {}", e);
            return e.into();
        }
    };

    let results = outcome
        .predictions
        .iter()
        .map(format_line_prediction)
        .collect();

    let errors = outcome
        .rejected
        .into_iter()
        .map(|rejected| UploadLineError {
            line: rejected.line as u64,
            smi: rejected.smiles,
            reason: rejected.reason,
        })
        .collect();

    UploadSmilesResponse::Ok(Json(UploadSmilesOk { results, errors }))
}
