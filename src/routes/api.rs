use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::forms::prices::{APP_TIME_FORMAT, PriceQueryForm};
use crate::repository::DieselRepository;
use crate::routes::problem::problem_response;
use crate::services::ServiceError;
use crate::services::prices::{PriceResolution, PriceView, find_applicable_price};

#[get("/v1/prices")]
/// Return the price that applies to a brand's product at `appTime`.
///
/// Responds with `404 Not Found` when no price list covers the instant and
/// `400 Bad Request` when the parameters are missing or malformed.
pub async fn api_v1_prices(
    req: HttpRequest,
    params: web::Query<PriceQueryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match find_applicable_price(repo.get_ref(), params.into_inner()) {
        Ok(PriceResolution {
            price: Some(price), ..
        }) => HttpResponse::Ok().json(PriceView::from(price)),
        Ok(PriceResolution {
            lookup,
            price: None,
        }) => {
            let detail = format!(
                "Price Not Found for brandId {} and productId {} at {}",
                lookup.brand_id,
                lookup.product_id,
                lookup.at.format(APP_TIME_FORMAT),
            );
            problem_response(StatusCode::NOT_FOUND, detail, req.path())
        }
        Err(ServiceError::Form(message)) => {
            problem_response(StatusCode::BAD_REQUEST, message, req.path())
        }
        Err(err) => {
            log::error!("Failed to resolve price: {err}");
            problem_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve price",
                req.path(),
            )
        }
    }
}
