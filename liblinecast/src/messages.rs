//! Turning a post record into LINE message objects

use crate::types::{Message, PostRecord};

pub fn text_message(text: &str) -> Message {
    Message::Text {
        text: text.to_string(),
    }
}

/// Image message; the preview falls back to the original image
pub fn image_message(image_url: &str, preview_url: Option<&str>) -> Message {
    Message::Image {
        original_content_url: image_url.to_string(),
        preview_image_url: preview_url.unwrap_or(image_url).to_string(),
    }
}

/// Messages for one record, text first then image
///
/// A record with neither field produces no messages.
pub fn build_messages(record: &PostRecord) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2);

    if let Some(text) = &record.text {
        messages.push(text_message(text));
    }
    if let Some(url) = &record.image_url {
        messages.push(image_message(url, None));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_image_in_order() {
        let record = PostRecord::text("Morning!").with_image("https://cdn.example.com/sun.jpg");

        let messages = build_messages(&record);
        assert_eq!(
            messages,
            vec![
                Message::Text {
                    text: "Morning!".to_string()
                },
                Message::Image {
                    original_content_url: "https://cdn.example.com/sun.jpg".to_string(),
                    preview_image_url: "https://cdn.example.com/sun.jpg".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_image_only_record() {
        let record = PostRecord::default().with_image("https://cdn.example.com/cat.png");

        let messages = build_messages(&record);
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            Message::Image {
                original_content_url,
                preview_image_url,
            } => assert_eq!(original_content_url, preview_image_url),
            other => panic!("Expected image message, got {:?}", other),
        }
    }

    #[test]
    fn test_text_only_record() {
        let messages = build_messages(&PostRecord::text("hello"));
        assert_eq!(messages, vec![text_message("hello")]);
    }

    #[test]
    fn test_empty_record_has_no_messages() {
        let record = PostRecord::default().with_date("2024-03-01");
        assert!(build_messages(&record).is_empty());
    }

    #[test]
    fn test_explicit_preview_url() {
        let message = image_message("https://x/full.jpg", Some("https://x/thumb.jpg"));
        assert_eq!(
            message,
            Message::Image {
                original_content_url: "https://x/full.jpg".to_string(),
                preview_image_url: "https://x/thumb.jpg".to_string(),
            }
        );
    }
}
