use poem_openapi::{payload::Json, ApiResponse, Object};

use crate::catalog::PropertyDef;
use crate::errors::AdmetError;
use crate::rest_api::models::GenericResponseError;

// Response types
#[derive(ApiResponse, Debug)]
pub enum HealthResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<HealthStatus>),
}

#[derive(ApiResponse, Debug)]
pub enum ListPropertiesResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<Vec<PropertyInfo>>),
}

#[derive(ApiResponse, Debug)]
pub enum GetPropertyResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<PropertyInfo>),
    #[oai(status = "404", content_type = "application/json")]
    NotFound(Json<GenericResponseError>),
}

#[derive(ApiResponse, Debug)]
pub enum PredictSmilesResponse {
    /// `smi` followed by one field per catalog property
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<serde_json::Value>),
    #[oai(status = "400", content_type = "application/json")]
    BadRequest(Json<GenericResponseError>),
    #[oai(status = "500", content_type = "application/json")]
    Err(Json<GenericResponseError>),
}

#[derive(ApiResponse, Debug)]
pub enum UploadSmilesResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<UploadSmilesOk>),
    #[oai(status = "400", content_type = "application/json")]
    BadRequest(Json<GenericResponseError>),
    #[oai(status = "500", content_type = "application/json")]
    Err(Json<GenericResponseError>),
}

impl From<AdmetError> for PredictSmilesResponse {
    fn from(e: AdmetError) -> Self {
        if e.is_client_error() {
            Self::BadRequest(Json(e.into()))
        } else {
            Self::Err(Json(e.into()))
        }
    }
}

impl From<AdmetError> for UploadSmilesResponse {
    fn from(e: AdmetError) -> Self {
        if e.is_client_error() {
            Self::BadRequest(Json(e.into()))
        } else {
            Self::Err(Json(e.into()))
        }
    }
}

// Relevant structs
#[derive(Object, Debug, serde::Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

#[derive(Object, Debug, serde::Serialize)]
pub struct PropertyInfo {
    pub id: String,
    pub name: String,
    pub category: String,
    pub task: String,
}

impl From<&PropertyDef> for PropertyInfo {
    fn from(property: &PropertyDef) -> Self {
        Self {
            id: property.id.to_string(),
            name: property.name.to_string(),
            category: property.category.as_str().to_string(),
            task: property.task.as_str().to_string(),
        }
    }
}

#[derive(Object, Debug)]
pub struct UploadSmilesOk {
    /// One entry per predicted line: `line`, `smi`, optional `name`, then
    /// one field per catalog property
    pub results: Vec<serde_json::Value>,
    pub errors: Vec<UploadLineError>,
}

#[derive(Object, Debug, serde::Serialize)]
pub struct UploadLineError {
    pub line: u64,
    pub smi: String,
    pub reason: String,
}
