use poem_openapi::payload::Json;

use crate::catalog::{all_properties, resolve};
use crate::rest_api::api::{GetPropertyResponse, ListPropertiesResponse, PropertyInfo};
use crate::rest_api::models::GenericResponseError;

pub fn list_properties() -> ListPropertiesResponse {
    let properties = all_properties().iter().map(PropertyInfo::from).collect();
    ListPropertiesResponse::Ok(Json(properties))
}

pub fn get_property(name: &str) -> GetPropertyResponse {
    match resolve(name) {
        Some(property) => GetPropertyResponse::Ok(Json(PropertyInfo::from(property))),
        None => GetPropertyResponse::NotFound(Json(GenericResponseError {
            error: format!("unknown property {:?}", name),
        })),
    }
}
