use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde_json::json;

use crate::domain::listing::ListingKind;
use crate::dto::ListingApiResponse;
use crate::forms::listing::ListingFilterForm;
use crate::repository::ListingReader;
use crate::repository::errors::ListingFetchError;
use crate::services::ServiceError;
use crate::services::storefront::{ListingDefaults, load_listing_page};

fn fetch_failure(err: &ListingFetchError) -> HttpResponse {
    let body = err
        .payload()
        .cloned()
        .unwrap_or_else(|| json!({ "error": err.user_message() }));
    HttpResponse::BadGateway().json(body)
}

#[get("/v1/listing/{kind}")]
pub async fn api_v1_listing(
    kind: web::Path<String>,
    req: HttpRequest,
    reader: web::Data<dyn ListingReader>,
    defaults: web::Data<ListingDefaults>,
) -> impl Responder {
    let Ok(kind) = kind.parse::<ListingKind>() else {
        return HttpResponse::NotFound().json(json!({ "error": "unknown listing" }));
    };

    let form = match serde_html_form::from_str::<ListingFilterForm>(req.query_string()) {
        Ok(form) => form,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match load_listing_page(reader.get_ref(), kind, form, **defaults).await {
        Ok(data) => {
            if let Some(err) = &data.error {
                return fetch_failure(err);
            }
            HttpResponse::Ok().json(ListingApiResponse::from(data))
        }
        Err(ServiceError::Form(err)) => {
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
        }
        Err(err) => {
            log::error!("Failed to load {kind} listing: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
