//! Hosted image reference extraction.
//!
//! Item images live on Cloudinary under the `rmu-exchange/items/` folder.
//! The database only stores delivery URLs, so freeing remote storage at
//! deletion time requires recovering each image's public id from its URL.
//!
//! Extraction is pure and total: anything that is not a string URL
//! containing the item-image folder is silently skipped, and the result
//! preserves input order without de-duplicating (the caller batches the
//! whole list into a single remote deletion call).

use std::sync::LazyLock;

use regex::Regex;

/// Cloudinary folder that holds item images. URLs outside this namespace
/// (avatars, chat attachments) are never deleted by item cleanup.
pub const ITEM_IMAGE_FOLDER: &str = "rmu-exchange/items";

/// Matches `/{folder}/{name}.{ext}` at the end of a URL path, capturing the
/// public id (`folder/name`). A trailing query string or fragment is allowed.
static PUBLIC_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(rmu-exchange/items/[^/?#.]+)\.[A-Za-z0-9]+([?#]|$)")
        .expect("static pattern is valid")
});

/// Extract the item-image public id from a single delivery URL.
///
/// Returns `None` for URLs outside the item-image namespace or without a
/// recognizable `{name}.{ext}` tail.
pub fn extract_public_id(url: &str) -> Option<String> {
    PUBLIC_ID_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// Collect all item-image public ids referenced by an item record.
///
/// `image_urls` is the stored JSON array (which may contain non-string
/// junk from older clients); `legacy_url` is the deprecated single-URL
/// column, considered last for backward compatibility.
pub fn collect_item_image_ids(
    image_urls: Option<&serde_json::Value>,
    legacy_url: Option<&str>,
) -> Vec<String> {
    let mut ids = Vec::new();

    if let Some(serde_json::Value::Array(urls)) = image_urls {
        for entry in urls {
            if let Some(id) = entry.as_str().and_then(extract_public_id) {
                ids.push(id);
            }
        }
    }

    if let Some(id) = legacy_url.and_then(extract_public_id) {
        ids.push(id);
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_public_id_from_delivery_url() {
        let url = "https://res.cloudinary.com/demo/image/upload/v1710000000/rmu-exchange/items/abc123.jpg";
        assert_eq!(
            extract_public_id(url),
            Some("rmu-exchange/items/abc123".to_string())
        );
    }

    #[test]
    fn extracts_from_minimal_host() {
        let urls = serde_json::json!(["https://host/rmu-exchange/items/abc123.jpg"]);
        assert_eq!(
            collect_item_image_ids(Some(&urls), None),
            vec!["rmu-exchange/items/abc123".to_string()]
        );
    }

    #[test]
    fn ignores_urls_outside_item_namespace() {
        let urls = serde_json::json!([
            "https://host/rmu-exchange/avatars/u1.jpg",
            "https://host/other-app/items/x.png",
        ]);
        assert!(collect_item_image_ids(Some(&urls), None).is_empty());
    }

    #[test]
    fn skips_non_string_entries_without_panicking() {
        let urls = serde_json::json!([
            42,
            null,
            { "url": "https://host/rmu-exchange/items/x.jpg" },
            "https://host/rmu-exchange/items/kept.png",
        ]);
        assert_eq!(
            collect_item_image_ids(Some(&urls), None),
            vec!["rmu-exchange/items/kept".to_string()]
        );
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let urls = serde_json::json!([
            "https://host/rmu-exchange/items/b.jpg",
            "https://host/rmu-exchange/items/a.jpg",
            "https://host/rmu-exchange/items/b.jpg",
        ]);
        assert_eq!(
            collect_item_image_ids(Some(&urls), None),
            vec![
                "rmu-exchange/items/b".to_string(),
                "rmu-exchange/items/a".to_string(),
                "rmu-exchange/items/b".to_string(),
            ]
        );
    }

    #[test]
    fn legacy_url_is_considered_last() {
        let urls = serde_json::json!(["https://host/rmu-exchange/items/first.jpg"]);
        let legacy = "https://host/rmu-exchange/items/old.webp";
        assert_eq!(
            collect_item_image_ids(Some(&urls), Some(legacy)),
            vec![
                "rmu-exchange/items/first".to_string(),
                "rmu-exchange/items/old".to_string(),
            ]
        );
    }

    #[test]
    fn handles_query_strings_and_fragments() {
        assert_eq!(
            extract_public_id("https://host/rmu-exchange/items/q.jpg?w=400&h=300"),
            Some("rmu-exchange/items/q".to_string())
        );
        assert_eq!(
            extract_public_id("https://host/rmu-exchange/items/f.png#main"),
            Some("rmu-exchange/items/f".to_string())
        );
    }

    #[test]
    fn empty_and_missing_inputs_yield_empty() {
        assert!(collect_item_image_ids(None, None).is_empty());
        let empty = serde_json::json!([]);
        assert!(collect_item_image_ids(Some(&empty), None).is_empty());
        // A non-array value (corrupt column) is treated as no URLs.
        let not_array = serde_json::json!("https://host/rmu-exchange/items/x.jpg");
        assert!(collect_item_image_ids(Some(&not_array), None).is_empty());
    }

    #[test]
    fn malformed_urls_are_skipped() {
        assert_eq!(extract_public_id(""), None);
        assert_eq!(extract_public_id("rmu-exchange/items"), None);
        assert_eq!(extract_public_id("https://host/rmu-exchange/items/"), None);
        assert_eq!(
            extract_public_id("https://host/rmu-exchange/items/noextension"),
            None
        );
    }
}
