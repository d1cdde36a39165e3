//! Document exporter

use crate::adapters::traits::ContentRenderer;
use crate::domain::ids::ContentId;

/// Render one content record to XML
///
/// Renderer failures come back as the message to record on the document.
pub async fn export_document(
    renderer: &dyn ContentRenderer,
    content_id: ContentId,
) -> Result<String, String> {
    renderer
        .render(content_id)
        .await
        .map_err(|e| format!("Error getting XML: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Renderer;

    #[async_trait]
    impl ContentRenderer for Renderer {
        async fn render(&self, content_id: ContentId) -> Result<String, String> {
            match content_id.get() {
                1 => Ok("<item/>".to_string()),
                _ => Err("record missing".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        assert_eq!(
            export_document(&Renderer, ContentId::new(1)).await.unwrap(),
            "<item/>"
        );
    }

    #[tokio::test]
    async fn test_failure_is_described() {
        assert_eq!(
            export_document(&Renderer, ContentId::new(2)).await.unwrap_err(),
            "Error getting XML: record missing"
        );
    }
}
