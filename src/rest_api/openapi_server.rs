use poem::{listener::TcpListener, EndpointExt, Route, Server};
use poem_openapi::{ContactObject, OpenApiService};

use crate::prediction::ModelPool;
use crate::rest_api::api::AdmetApi;

pub const API_PREFIX: &str = "/";
pub const DOCS_PREFIX: &str = "/docs";
pub const SPEC_PATH: &str = "/openapi.json";

pub fn api_service(server_url: &str) -> OpenApiService<AdmetApi, ()> {
    OpenApiService::new(AdmetApi, "ADMEThyst", env!("CARGO_PKG_VERSION"))
        .server(server_url)
        .description("ADMEThyst: ADME/toxicity property prediction for small molecules")
        .contact(ContactObject::new().name("ADMEThyst maintainers"))
}

pub async fn run_api_service(bind: &str, server_url: &str, pool: ModelPool) -> eyre::Result<()> {
    let api_service = api_service(server_url);
    let ui = api_service.swagger_ui();
    let spec = api_service.spec();

    log::info!(
        "serving on {} with {} model instance(s)",
        bind,
        pool.size()
    );

    Server::new(TcpListener::bind(bind))
        .run(
            Route::new()
                .at(SPEC_PATH, poem::endpoint::make_sync(move |_| spec.clone()))
                .nest(DOCS_PREFIX, ui)
                .nest(API_PREFIX, api_service)
                .data(pool),
        )
        .await?;

    Ok(())
}

pub fn output_spec(server_url: &str, output: &str) -> eyre::Result<()> {
    let spec = api_service(server_url).spec();
    std::fs::write(output, spec)?;

    Ok(())
}
