use actix_cors::Cors;
use actix_web::{
    Error, HttpRequest,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    web,
};

use crate::handlers;
use crate::utils::helpers::bad_request;

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let response = bad_request(&err);
    InternalError::from_response(err, response).into()
}

pub fn scoped_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(
            web::resource("/")
                .route(web::get().to(handlers::index::index))
                .default_service(web::to(handlers::method_not_allowed)),
        )
        .service(
            web::resource("/qris")
                .route(web::post().to(handlers::donations::create_qris))
                .default_service(web::to(handlers::method_not_allowed)),
        )
        .service(
            web::resource("/status/{donation_id}")
                .route(web::get().to(handlers::donations::check_status))
                .default_service(web::to(handlers::method_not_allowed)),
        )
        .service(
            web::resource("/balance")
                .route(web::get().to(handlers::balance::check_balance))
                .default_service(web::to(handlers::method_not_allowed)),
        );
}
