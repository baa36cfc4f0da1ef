//! Checkout flow through the full router.

use axum::http::StatusCode;

use essence_integration_tests::TestClient;

const VALID_ORDER: &[(&str, &str)] = &[
    ("email", "jane@example.com"),
    ("first_name", "Jane"),
    ("last_name", "Doe"),
    ("address", "1 Market St"),
    ("apartment", ""),
    ("city", "San Francisco"),
    ("state", "CA"),
    ("zip", "94105"),
    ("country", "United States"),
    ("card_name", "Jane Doe"),
    ("card_number", "4242 4242 4242 4242"),
    ("expiry", "12/30"),
    ("cvv", "123"),
];

fn order_with(field: &str, value: &'static str) -> Vec<(&'static str, &'static str)> {
    VALID_ORDER
        .iter()
        .map(|&(key, current)| if key == field { (key, value) } else { (key, current) })
        .collect()
}

#[tokio::test]
async fn test_empty_cart_checkout_redirects_to_cart() {
    let mut client = TestClient::new();

    let page = client.get("/checkout").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location(), Some("/cart"));

    let submit = client.post_form("/checkout", VALID_ORDER).await;
    assert_eq!(submit.status, StatusCode::SEE_OTHER);
    assert_eq!(submit.location(), Some("/cart"));
}

#[tokio::test]
async fn test_checkout_page_shows_summary() {
    let mut client = TestClient::new();
    client.add_to_cart("4", 1).await;

    let page = client.get("/checkout").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Leather Notebook Cover"));
    assert!(page.body.contains("$69.99"));
    assert!(page.body.contains(r#"value="United States""#));
}

#[tokio::test]
async fn test_invalid_checkout_is_rejected_inline() {
    let mut client = TestClient::new();
    client.add_to_cart("4", 1).await;

    let response = client
        .post_form("/checkout", &order_with("email", "not-an-email"))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body.contains("Please enter a valid email address."));
    assert!(response.body.contains(r#"value="Jane""#));

    let blank_city = client.post_form("/checkout", &order_with("city", "   ")).await;
    assert_eq!(blank_city.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(blank_city.body.contains("City is required."));

    let count = client.get("/cart/count").await;
    assert!(count.body.contains(r#"data-count="1""#));
}

#[tokio::test]
async fn test_placing_order_clears_cart() {
    let mut client = TestClient::new();
    client.add_to_cart("1", 1).await;
    client.add_to_cart("7", 2).await;

    let response = client.post_form("/checkout", VALID_ORDER).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/"));

    let home = client.get("/").await;
    assert!(home.body.contains("Order placed successfully!"));
    assert!(home.body.contains(r#"data-count="0""#));

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}
