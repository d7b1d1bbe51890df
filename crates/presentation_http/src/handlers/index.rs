//! Web chat page

use axum::response::Html;

/// Serve the embedded chat page
pub async fn index() -> Html<&'static str> {
    Html(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/index.html"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn page_mentions_the_assistant() {
        let Html(page) = index().await;
        assert!(page.contains("Elendur"));
        assert!(page.contains("/chat"));
    }
}
