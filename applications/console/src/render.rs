//! Plain-text rendering for the terminal.

use gallery_console::AlbumCard;
use gallery_core::{Notification, NotificationKind};
use std::fmt::Write;

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
    };
    format!(
        "{} {}: {}",
        marker, notification.title, notification.description
    )
}

pub fn cards(cards: &[AlbumCard<'_>]) -> String {
    if cards.is_empty() {
        return "No albums yet.\n".to_string();
    }

    let mut out = String::new();
    for card in cards {
        let id = card.id.map_or("-", |id| id.as_str());
        let _ = writeln!(
            out,
            "[{}] {} ({}, {})",
            id, card.title, card.album_type, card.date
        );
        for (index, url) in card.images.iter().enumerate() {
            let _ = writeln!(out, "    {:>2}. {}", index, url);
        }
        if card.hidden > 0 {
            let _ = writeln!(out, "    ... {} more (use --all)", card.hidden);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::AlbumId;

    #[test]
    fn test_render_card_with_hidden_images() {
        let id = AlbumId::new("7");
        let images = vec!["https://a/1.jpg".to_string(), "https://a/2.jpg".to_string()];
        let card = AlbumCard {
            id: Some(&id),
            title: "Trip",
            album_type: "Travel",
            date: "2024-06-01",
            images: &images,
            hidden: 3,
            show_all_control: true,
            expanded: false,
        };

        let text = cards(&[card]);
        assert!(text.starts_with("[7] Trip (Travel, 2024-06-01)\n"));
        assert!(text.contains("     0. https://a/1.jpg\n"));
        assert!(text.contains("3 more"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(cards(&[]), "No albums yet.\n");
    }

    #[test]
    fn test_render_notification() {
        assert_eq!(
            notification(&Notification::error("Failed to load albums.")),
            "✗ Error: Failed to load albums."
        );
    }
}
