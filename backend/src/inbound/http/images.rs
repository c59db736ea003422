//! Static catalogue images.
//!
//! ```text
//! GET /catalogue/images/{name}
//! ```
//!
//! Files are read through a `cap_std` directory handle, so names cannot
//! escape the configured image root.

use std::io;
use std::path::Path;
use std::sync::Arc;

use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, get, web};
use tracing::debug;

use crate::domain::{Error, NOT_FOUND_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Any file the image root cannot hand back is reported as missing.
fn map_read_error(name: &str, err: &io::Error) -> Error {
    debug!(image = %name, kind = ?err.kind(), error = %err, "image read failed");
    Error::not_found(NOT_FOUND_MESSAGE)
}

/// Serve one image file.
#[utoipa::path(
    get,
    path = "/catalogue/images/{name}",
    params(("name" = String, Path, description = "Image file name", example = "cross_1.jpeg")),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/jpeg"),
        (status = 404, description = "No such image", body = ErrorBody)
    ),
    tags = ["images"],
    operation_id = "getImage"
)]
#[get("/catalogue/images/{name}")]
pub async fn get_image(
    state: web::Data<HttpState>,
    name: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = name.into_inner();
    let Some(images) = state.images.as_ref().map(Arc::clone) else {
        return Err(Error::not_found(NOT_FOUND_MESSAGE));
    };
    let file_name = name.clone();
    let bytes = web::block(move || images.read(file_name))
        .await
        .map_err(|err| Error::internal(format!("image read task failed: {err}")))?
        .map_err(|err| map_read_error(&name, &err))?;
    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, content_type_for(&name)))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockCatalogueStore;
    use crate::inbound::http::test_utils::state_over;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use cap_std::ambient_authority;
    use cap_std::fs::Dir;
    use rstest::rstest;

    #[rstest]
    #[case("cross_1.jpeg", "image/jpeg")]
    #[case("logo.PNG", "image/png")]
    #[case("README", "application/octet-stream")]
    fn content_type_follows_extension(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(name), expected);
    }

    async fn fetch(state: HttpState, uri: &str) -> (StatusCode, Vec<u8>) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_image),
        )
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        let status = res.status();
        (status, actix_test::read_body(res).await.to_vec())
    }

    #[actix_web::test]
    async fn serves_existing_file_and_404s_otherwise() {
        let root = tempfile::tempdir().expect("temp dir");
        let dir = Dir::open_ambient_dir(root.path(), ambient_authority()).expect("open dir");
        dir.write("sock.jpeg", b"jpeg-bytes").expect("write image");
        let state = state_over(MockCatalogueStore::new()).with_images(dir);

        let (status, body) = fetch(state.clone(), "/catalogue/images/sock.jpeg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"jpeg-bytes");

        let (status, _) = fetch(state, "/catalogue/images/missing.jpeg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/catalogue/images/sub")]
    #[case("/catalogue/images/..%2Foutside.jpeg")]
    #[actix_web::test]
    async fn directories_and_escaping_names_are_404(#[case] uri: &str) {
        let root = tempfile::tempdir().expect("temp dir");
        let dir = Dir::open_ambient_dir(root.path(), ambient_authority()).expect("open dir");
        dir.create_dir("sub").expect("create subdirectory");
        dir.write("sub/nested.jpeg", b"nested").expect("write nested image");
        let state = state_over(MockCatalogueStore::new()).with_images(dir);

        let (status, body) = fetch(state, uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(body.get("status_code"), Some(&serde_json::json!(404)));
    }

    #[actix_web::test]
    async fn missing_image_root_is_404() {
        let (status, _) = fetch(
            state_over(MockCatalogueStore::new()),
            "/catalogue/images/sock.jpeg",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
