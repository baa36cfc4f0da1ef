//! Page rendering, account and seller flows through the full router.

use axum::http::StatusCode;

use essence_integration_tests::TestClient;

#[tokio::test]
async fn test_health_endpoints() {
    let mut client = TestClient::new();

    let health = client.get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body, "ok");

    let ready = client.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_home_page_shows_featured_products() {
    let mut client = TestClient::new();

    let page = client.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Minimal Design."));
    assert!(page.body.contains("Minimalist Desk Lamp"));
    assert!(page.body.contains("Leather Notebook Cover"));
    assert!(!page.body.contains("Handcrafted Ceramic Vase"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let mut client = TestClient::new();

    let page = client.get("/").await;
    assert_eq!(page.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(page.header("x-frame-options"), Some("DENY"));
    assert!(page.header("content-security-policy").is_some());
    assert!(page.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_product_listing_filters() {
    let mut client = TestClient::new();

    let kitchen = client.get("/products?category=Kitchen").await;
    assert_eq!(kitchen.status, StatusCode::OK);
    assert!(kitchen.body.contains("Matte Black Water Bottle"));
    assert!(kitchen.body.contains("Ceramic Pour-Over Coffee Set"));
    assert!(!kitchen.body.contains("Minimalist Desk Lamp"));

    let cheap = client.get("/products?min_price=0&max_price=60").await;
    assert!(cheap.body.contains("Wireless Charging Pad"));
    assert!(!cheap.body.contains("Minimalist Wall Clock"));

    let search = client.get("/products?q=minimalist").await;
    assert!(search.body.contains("Minimalist Desk Lamp"));
    assert!(search.body.contains("Minimalist Wall Clock"));
    assert!(!search.body.contains("Leather Notebook Cover"));

    let none = client.get("/products?q=zzzz").await;
    assert!(none.body.contains("No products found"));
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let mut client = TestClient::new();

    let page = client.get("/product/5").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Wool &amp; Cashmere Throw Blanket"));
    assert!(page.body.contains("$149.99"));
    assert!(page.body.contains("You May Also Like"));
    assert!(page.body.contains("Minimalist Wall Clock"));

    // The only Lighting product has no related products to show.
    let lamp = client.get("/product/1").await;
    assert_eq!(lamp.status, StatusCode::OK);
    assert!(lamp.body.contains("$129.99"));
    assert!(!lamp.body.contains("You May Also Like"));

    let missing = client.get("/product/999").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.contains("Product Not Found"));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let mut client = TestClient::new();

    let page = client.get("/does-not-exist").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Page Not Found"));
}

#[tokio::test]
async fn test_profile_update() {
    let mut client = TestClient::new();

    let page = client.get("/account").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("John Doe"));

    let invalid = client
        .post_form(
            "/account/profile",
            &[
                ("full_name", "Jane Roe"),
                ("email", "nope"),
                ("phone", ""),
                ("address", "1 Market St"),
            ],
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(invalid.body.contains("Please enter a valid email address."));

    let saved = client
        .post_form(
            "/account/profile",
            &[
                ("full_name", "Jane Roe"),
                ("email", "jane@example.com"),
                ("phone", ""),
                ("address", "1 Market St"),
            ],
        )
        .await;
    assert_eq!(saved.status, StatusCode::SEE_OTHER);
    assert_eq!(saved.location(), Some("/account"));

    let page = client.get("/account").await;
    assert!(page.body.contains("Jane Roe"));
    assert!(page.body.contains("Profile Updated"));
}

#[tokio::test]
async fn test_become_seller() {
    let mut client = TestClient::new();

    let page = client.get("/account?tab=seller").await;
    assert!(page.body.contains("Become a Seller"));

    let invalid = client
        .post_form(
            "/account/seller",
            &[
                ("business_name", "Acme Goods"),
                ("business_description", "Quality goods since 1999"),
                ("category", "weapons"),
                ("tax_id", "12-3456789"),
            ],
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);

    let created = client
        .post_form(
            "/account/seller",
            &[
                ("business_name", "Acme Goods"),
                ("business_description", "Quality goods since 1999"),
                ("category", "home"),
                ("tax_id", "12-3456789"),
            ],
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), Some("/account?tab=seller"));

    let page = client.get("/account?tab=seller").await;
    assert!(page.body.contains("Seller Dashboard"));
    assert!(page.body.contains("Acme Goods"));
    assert!(page.body.contains("Seller Account Created"));
}

#[tokio::test]
async fn test_seller_product_forms() {
    let mut client = TestClient::new();

    let list = client.get("/seller/products").await;
    assert_eq!(list.status, StatusCode::OK);
    assert!(list.body.contains("No products yet"));

    let form = client.get("/seller/add-product").await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("Add New Product"));

    let invalid = client
        .post_form(
            "/seller/add-product",
            &[
                ("name", "Desk Organizer"),
                ("description", "Keeps the desk tidy and clear."),
                ("price", "free"),
                ("stock", "5"),
                ("category", "home"),
            ],
        )
        .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(invalid.body.contains("Price must be a positive number."));

    let created = client
        .post_form(
            "/seller/add-product",
            &[
                ("name", "Desk Organizer"),
                ("description", "Keeps the desk tidy and clear."),
                ("price", "24.50"),
                ("stock", "5"),
                ("category", "home"),
            ],
        )
        .await;
    assert_eq!(created.status, StatusCode::SEE_OTHER);
    assert_eq!(created.location(), Some("/seller/products"));

    let edit = client.get("/seller/edit-product/42").await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains("Sample Product"));
    assert!(edit.body.contains("/seller/edit-product/42"));
}

#[tokio::test]
async fn test_seller_dashboard_pages() {
    let mut client = TestClient::new();

    let orders = client.get("/seller/orders").await;
    assert_eq!(orders.status, StatusCode::OK);
    assert!(orders.body.contains("No Orders Yet"));

    let analytics = client.get("/seller/analytics").await;
    assert_eq!(analytics.status, StatusCode::OK);
    assert!(analytics.body.contains("Sales Overview"));
}
