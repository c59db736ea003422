//! HTTP inbound adapter exposing the catalogue routes.
//!
//! [`configure`] registers every route in matching order: fixed paths such as
//! `/catalogue/size` come before the `/catalogue/{id}` pattern.

pub mod catalogue;
pub mod codec;
pub mod error;
pub mod health;
pub mod images;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every catalogue route on `cfg`.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use catalogue::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState) -> App<
///     impl actix_web::dev::ServiceFactory<
///         actix_web::dev::ServiceRequest,
///         Config = (),
///         Response = actix_web::dev::ServiceResponse,
///         Error = actix_web::Error,
///         InitError = (),
///     >,
/// > {
///     App::new().app_data(web::Data::new(state)).configure(configure)
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(images::get_image)
        .service(catalogue::count_catalogue)
        .service(catalogue::get_catalogue_item)
        .service(catalogue::list_catalogue)
        .service(catalogue::list_tags)
        .service(health::health);
}
