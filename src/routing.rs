//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error,
    dashboard::{
        get_monthly_purchases_endpoint, get_monthly_sales_endpoint, get_summary_endpoint,
        get_top_customers_endpoint, get_top_suppliers_endpoint,
    },
    endpoints,
    error::ErrorBody,
    ledger::{
        create_bill_endpoint, create_purchase_endpoint, get_bills_by_customer_endpoint,
        get_customer_balances_endpoint, get_purchases_by_supplier_endpoint,
        get_supplier_balances_endpoint, list_bills_endpoint, list_purchases_endpoint,
    },
    party::{
        create_customer_endpoint, create_supplier_endpoint, get_customer_endpoint,
        get_supplier_endpoint, list_customers_endpoint, list_suppliers_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let party_routes = Router::new()
        .route(
            endpoints::CUSTOMERS,
            get(list_customers_endpoint).post(create_customer_endpoint),
        )
        .route(endpoints::CUSTOMER, get(get_customer_endpoint))
        .route(
            endpoints::SUPPLIERS,
            get(list_suppliers_endpoint).post(create_supplier_endpoint),
        )
        .route(endpoints::SUPPLIER, get(get_supplier_endpoint));

    let ledger_routes = Router::new()
        .route(
            endpoints::BILLS,
            get(list_bills_endpoint).post(create_bill_endpoint),
        )
        .route(endpoints::BILL_BALANCES, get(get_customer_balances_endpoint))
        .route(
            endpoints::BILLS_BY_CUSTOMER,
            get(get_bills_by_customer_endpoint),
        )
        .route(
            endpoints::PURCHASES,
            get(list_purchases_endpoint).post(create_purchase_endpoint),
        )
        .route(
            endpoints::PURCHASE_BALANCES,
            get(get_supplier_balances_endpoint),
        )
        .route(
            endpoints::PURCHASES_BY_SUPPLIER,
            get(get_purchases_by_supplier_endpoint),
        );

    let dashboard_routes = Router::new()
        .route(endpoints::MONTHLY_SALES, get(get_monthly_sales_endpoint))
        .route(
            endpoints::MONTHLY_PURCHASES,
            get(get_monthly_purchases_endpoint),
        )
        .route(endpoints::DASHBOARD_SUMMARY, get(get_summary_endpoint))
        .route(endpoints::TOP_CUSTOMERS, get(get_top_customers_endpoint))
        .route(endpoints::TOP_SUPPLIERS, get(get_top_suppliers_endpoint));

    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .merge(party_routes)
        .merge(ledger_routes)
        .merge(dashboard_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (
        StatusCode::IM_A_TEAPOT,
        Json(ErrorBody {
            error: "I'm a teapot".to_owned(),
        }),
    )
        .into_response()
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
