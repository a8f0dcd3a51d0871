pub async fn health() -> &'static str {
    "Backend is running!"
}
