//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/customers/{customer_id}', use [format_endpoint].

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";

/// The route to create and list customers.
pub const CUSTOMERS: &str = "/api/customers";
/// The route to fetch a single customer.
pub const CUSTOMER: &str = "/api/customers/{customer_id}";
/// The route to create and list suppliers.
pub const SUPPLIERS: &str = "/api/suppliers";
/// The route to fetch a single supplier.
pub const SUPPLIER: &str = "/api/suppliers/{supplier_id}";

/// The route to create and list bills.
pub const BILLS: &str = "/api/bills";
/// The route for the outstanding balance of every customer.
pub const BILL_BALANCES: &str = "/api/bills/balances";
/// The route for the bills of a single customer.
pub const BILLS_BY_CUSTOMER: &str = "/api/bills/by-customer/{customer_id}";
/// The route to create and list purchases.
pub const PURCHASES: &str = "/api/purchases";
/// The route for the amount owed to every supplier.
pub const PURCHASE_BALANCES: &str = "/api/purchases/balances";
/// The route for the purchases from a single supplier.
pub const PURCHASES_BY_SUPPLIER: &str = "/api/purchases/by-supplier/{supplier_id}";

/// Sales totals per calendar month.
pub const MONTHLY_SALES: &str = "/api/dashboard/monthly-sales";
/// Purchase totals per calendar month.
pub const MONTHLY_PURCHASES: &str = "/api/dashboard/monthly-purchases";
/// All-time and current month totals.
pub const DASHBOARD_SUMMARY: &str = "/api/dashboard/summary";
/// The customers with the largest sales.
pub const TOP_CUSTOMERS: &str = "/api/dashboard/top-customers";
/// The suppliers with the largest purchases.
pub const TOP_SUPPLIERS: &str = "/api/dashboard/top-suppliers";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/customers/{customer_id}', '{customer_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::COFFEE);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMERS);
        assert_endpoint_is_valid_uri(endpoints::CUSTOMER);
        assert_endpoint_is_valid_uri(endpoints::SUPPLIERS);
        assert_endpoint_is_valid_uri(endpoints::SUPPLIER);
        assert_endpoint_is_valid_uri(endpoints::BILLS);
        assert_endpoint_is_valid_uri(endpoints::BILL_BALANCES);
        assert_endpoint_is_valid_uri(endpoints::BILLS_BY_CUSTOMER);
        assert_endpoint_is_valid_uri(endpoints::PURCHASES);
        assert_endpoint_is_valid_uri(endpoints::PURCHASE_BALANCES);
        assert_endpoint_is_valid_uri(endpoints::PURCHASES_BY_SUPPLIER);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_SALES);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_PURCHASES);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_SUMMARY);
        assert_endpoint_is_valid_uri(endpoints::TOP_CUSTOMERS);
        assert_endpoint_is_valid_uri(endpoints::TOP_SUPPLIERS);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        // Parameter with single word should also work.
        let formatted_path = format_endpoint("/hello/{world}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::BILLS_BY_CUSTOMER, 7);

        assert_eq!(formatted_path, "/api/bills/by-customer/7");
    }
}
