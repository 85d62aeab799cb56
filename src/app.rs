use crate::{
    config::Config,
    error::{ApiError, Result},
    routes::api_routes,
    services::{CompletionClient, RecommendationService, SuggestionService},
};
use actix_cors::Cors;
use actix_web::{error::JsonPayloadError, middleware::Logger, web, App, HttpRequest, HttpServer};
use log::info;
use std::net::TcpListener;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for Docker/Render compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        // One HTTP client shared by both services
        let completion = CompletionClient::new(&self.config);

        let recommendation_service = web::Data::new(RecommendationService::new(completion.clone()));
        let suggestion_service = web::Data::new(SuggestionService::new(completion));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(recommendation_service.clone())
                .app_data(suggestion_service.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}

/// Malformed request bodies get the same `{error}` shape as validation
/// failures instead of actix's plain-text default.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidInput(err.to_string()).into()
}
