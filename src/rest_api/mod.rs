pub mod api;
pub mod models;
pub mod openapi_server;
