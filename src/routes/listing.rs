use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::filter::FilterDescriptor;
use crate::domain::listing::{ListingKind, ParamStyle};
use crate::forms::listing::ListingFilterForm;
use crate::repository::{ListingReader, RequestParams};
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::storefront::{ListingDefaults, load_listing_page};

fn listing_url(kind: ListingKind) -> String {
    format!("/listing/{}", kind.slug())
}

/// Query string reproducing the active filters, minus the page number, so
/// page links keep the current selection.
fn filter_query(filters: &FilterDescriptor, par_page: usize) -> String {
    let pairs = RequestParams::build(filters, par_page)
        .query_pairs(ParamStyle::Storefront)
        .into_iter()
        .filter(|(key, value)| *key != "pageNumber" && !value.is_empty())
        .collect::<Vec<_>>();

    serde_html_form::to_string(&pairs).unwrap_or_default()
}

#[get("/")]
pub async fn show_index() -> impl Responder {
    redirect(&listing_url(ListingKind::Products))
}

#[get("/listing/{kind}")]
pub async fn show_listing(
    kind: web::Path<String>,
    req: HttpRequest,
    reader: web::Data<dyn ListingReader>,
    defaults: web::Data<ListingDefaults>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let Ok(kind) = kind.parse::<ListingKind>() else {
        return HttpResponse::NotFound().finish();
    };

    let form = match serde_html_form::from_str::<ListingFilterForm>(req.query_string()) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Unreadable {kind} listing query: {err}");
            FlashMessage::error(format!("Invalid filters: {err}")).send();
            return redirect(&listing_url(kind));
        }
    };

    let data = match load_listing_page(reader.get_ref(), kind, form, **defaults).await {
        Ok(data) => data,
        Err(ServiceError::Form(err)) => {
            FlashMessage::error(format!("Invalid filters: {err}")).send();
            return redirect(&listing_url(kind));
        }
        Err(err) => {
            log::error!("Failed to load {kind} listing: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, kind.slug());
    context.insert("kind", &kind);
    context.insert("title", kind.title());
    let nav = ListingKind::ALL
        .iter()
        .map(|k| (listing_url(*k), k.slug(), k.title()))
        .collect::<Vec<_>>();
    context.insert("nav", &nav);
    context.insert("listing_url", &listing_url(kind));
    context.insert("link_query", &filter_query(&data.filters, data.par_page));
    context.insert("filters", &data.filters);
    context.insert("par_page", &data.par_page);
    context.insert("listing", &data.items);
    if let Some(err) = &data.error {
        context.insert("fetch_error", &err.user_message());
    }

    render_template(&tera, "listing/index.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PriceRange, Rating, SortPrice};

    #[test]
    fn filter_query_skips_empty_values_and_page() {
        let filters = FilterDescriptor::default()
            .category("Men")
            .rating(Rating::new(4).expect("valid rating"))
            .sort_price(SortPrice::LowToHigh)
            .page(3);

        assert_eq!(
            filter_query(&filters, 12),
            "category=Men&rating=4&sortPrice=low-to-high&parPage=12"
        );
    }

    #[test]
    fn filter_query_encodes_search_and_prices() {
        let filters = FilterDescriptor::default()
            .search("red shoes")
            .price_range(PriceRange::try_from_f64(10.0, 99.5).expect("valid range"));

        assert_eq!(
            filter_query(&filters, 5),
            "lowPrice=10&highPrice=99.5&parPage=5&searchValue=red+shoes"
        );
    }
}
