use reqwest::Client;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = std::env::var("ASK_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    println!("Testing question answering client against {}", base_url);

    // Static page
    let page = client.get(format!("{}/", base_url)).send().await?;
    println!("\nGET / -> {}", page.status());

    // JSON question
    let response = client
        .post(format!("{}/ask", base_url))
        .json(&json!({ "question": "What is the powerhouse of the cell?" }))
        .send()
        .await?;

    println!("\nPOST /ask (json) -> {}", response.status());
    println!("{}", response.text().await?);

    // Form-encoded question, as the static page submits it
    let response = client
        .post(format!("{}/ask", base_url))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body("question=What+do+mitochondria+produce%3F")
        .send()
        .await?;

    println!("\nPOST /ask (form) -> {}", response.status());
    println!("{}", response.text().await?);

    Ok(())
}
