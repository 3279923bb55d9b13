//! In-process stand-in for the listing backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

pub const CATALOG_SIZE: usize = 12;

type QueryLog = Mutex<Vec<String>>;
type Params = web::Query<HashMap<String, String>>;

pub struct FakeBackend {
    pub base_url: String,
    queries: Arc<QueryLog>,
    handle: ServerHandle,
}

impl FakeBackend {
    /// Binds an ephemeral port and serves the fake endpoints until [`stop`].
    ///
    /// [`stop`]: FakeBackend::stop
    pub async fn start() -> Self {
        let queries: Arc<QueryLog> = Arc::default();
        let log = web::Data::from(queries.clone());

        let server = HttpServer::new(move || {
            App::new().app_data(log.clone()).service(
                web::scope("/api")
                    .route("/home/query-products", web::get().to(query_products))
                    .route("/admin/orders", web::get().to(orders))
                    .route("/sellers", web::get().to(failing_sellers))
                    .route("/category-get", web::get().to(broken_categories))
                    .route("/get-deactive-sellers", web::get().to(slow_sellers)),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake backend");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/api"),
            queries,
            handle,
        }
    }

    /// Raw query string of the most recent request.
    pub fn last_query(&self) -> Option<String> {
        self.queries.lock().expect("query log").last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.queries.lock().expect("query log").len()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn record(req: &HttpRequest, log: &QueryLog) {
    log.lock()
        .expect("query log")
        .push(req.query_string().to_string());
}

fn number(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn catalog() -> Vec<Value> {
    (1..=CATALOG_SIZE)
        .map(|id| {
            json!({
                "_id": format!("p{id}"),
                "name": format!("Product {id}"),
                "category": if id % 2 == 0 { "Men" } else { "Women" },
                "price": id * 10,
            })
        })
        .collect()
}

fn page_of(items: Vec<Value>, page: usize, par_page: usize) -> Vec<Value> {
    let skip = page.saturating_sub(1) * par_page;
    items.into_iter().skip(skip).take(par_page).collect()
}

async fn query_products(
    req: HttpRequest,
    params: Params,
    log: web::Data<QueryLog>,
) -> HttpResponse {
    record(&req, &log);

    let search = params.get("searchValue").cloned().unwrap_or_default();
    let category = params.get("category").cloned().unwrap_or_default();
    let matching = catalog()
        .into_iter()
        .filter(|item| {
            search.is_empty() || item["name"].as_str().is_some_and(|n| n.contains(&search))
        })
        .filter(|item| category.is_empty() || item["category"] == category.as_str())
        .collect::<Vec<_>>();

    let total = matching.len();
    let par_page = number(&params, "parPage", 12);
    let page = number(&params, "pageNumber", 1);

    HttpResponse::Ok().json(json!({
        "products": page_of(matching, page, par_page),
        "totalProduct": total,
    }))
}

async fn orders(req: HttpRequest, params: Params, log: web::Data<QueryLog>) -> HttpResponse {
    record(&req, &log);

    let orders = (1..=3)
        .map(|id| json!({ "_id": format!("o{id}"), "price": 99 }))
        .collect::<Vec<_>>();
    let par_page = number(&params, "parPage", 5);
    let page = number(&params, "page", 1);

    HttpResponse::Ok().json(json!({
        "orders": page_of(orders, page, par_page),
        "totalOrder": 3,
        "parPage": par_page,
    }))
}

async fn failing_sellers(req: HttpRequest, log: web::Data<QueryLog>) -> HttpResponse {
    record(&req, &log);
    HttpResponse::InternalServerError().json(json!({ "error": "database down" }))
}

async fn broken_categories(req: HttpRequest, log: web::Data<QueryLog>) -> HttpResponse {
    record(&req, &log);
    HttpResponse::Ok()
        .content_type("application/json")
        .body("not json")
}

async fn slow_sellers(req: HttpRequest, log: web::Data<QueryLog>) -> HttpResponse {
    record(&req, &log);
    actix_web::rt::time::sleep(Duration::from_millis(500)).await;
    HttpResponse::Ok().json(json!({ "sellers": [], "totalSeller": 0 }))
}
