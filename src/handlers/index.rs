pub const BANNER: &str = "This is UI project.";

/// GET|POST /ui
pub async fn index_handler() -> &'static str {
    BANNER
}
