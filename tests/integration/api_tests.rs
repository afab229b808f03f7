//! API integration tests against a running server and database

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn list_page(client: &Client) -> String {
    client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body")
}

/// Ids linked from the list page, in page order
fn book_ids(page: &str) -> Vec<i64> {
    page.split("href=\"/books/")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|id| id.parse().ok())
        .collect()
}

async fn create_book(client: &Client, title: &str, author: &str) -> i64 {
    let response = client
        .post(format!("{}/books/new", BASE_URL))
        .form(&[("title", title), ("author", author), ("genre", ""), ("year", "")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = list_page(client).await;
    *book_ids(&page).first().expect("Created book not listed")
}

async fn delete_book(client: &Client, id: i64) {
    let _ = client
        .post(format!("{}/books/{}/delete", BASE_URL, id))
        .send()
        .await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_root_redirects_to_books() {
    let response = client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/books");
}

#[tokio::test]
#[ignore]
async fn test_create_lists_newest_first_then_delete() {
    let client = client();

    let first = create_book(&client, "Foundation", "Asimov").await;
    let second = create_book(&client, "Dune", "Herbert").await;
    assert_ne!(first, second);

    let page = list_page(&client).await;
    let ids = book_ids(&page);
    assert_eq!(ids.first(), Some(&second));
    let pos_first = ids.iter().position(|id| *id == first).unwrap();
    let pos_second = ids.iter().position(|id| *id == second).unwrap();
    assert!(pos_second < pos_first);

    delete_book(&client, first).await;
    delete_book(&client, second).await;

    let ids = book_ids(&list_page(&client).await);
    assert!(!ids.contains(&first));
    assert!(!ids.contains(&second));
}

#[tokio::test]
#[ignore]
async fn test_create_with_missing_title_persists_nothing() {
    let client = client();
    let before = book_ids(&list_page(&client).await).len();

    let response = client
        .post(format!("{}/books/new", BASE_URL))
        .form(&[("title", ""), ("author", "X")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Title"));
    assert!(body.contains("value=\"X\""));

    let after = book_ids(&list_page(&client).await).len();
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore]
async fn test_update_and_invalid_update() {
    let client = client();
    let id = create_book(&client, "Dune", "Herbert").await;

    // Valid update
    let response = client
        .post(format!("{}/books/{}", BASE_URL, id))
        .form(&[("title", "Dune Messiah"), ("author", "Herbert"), ("year", "1969")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Invalid update leaves the record as it was
    let response = client
        .post(format!("{}/books/{}", BASE_URL, id))
        .form(&[("title", "Children of Dune"), ("author", "")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains(&format!("action=\"/books/{}\"", id)));

    let edit = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(edit.contains("value=\"Dune Messiah\""));
    assert!(edit.contains("value=\"1969\""));

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_missing_book_is_not_found() {
    let client = client();

    let response = client
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(format!("{}/books/999999", BASE_URL))
        .form(&[("title", "Dune"), ("author", "Herbert")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .post(format!("{}/books/999999/delete", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
