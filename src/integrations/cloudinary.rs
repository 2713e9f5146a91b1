// src/integrations/cloudinary.rs
//
// URL builders for the legacy image CDN. Older listings still reference
// CDN-hosted galleries; these helpers derive delivery URLs with automatic
// format/quality negotiation so the presentation layer never hand-builds
// transformation strings.

/// Build a delivery URL for `public_id`, optionally resized to `width`.
pub fn image_url(cloud_name: &str, public_id: &str, width: Option<u32>) -> String {
    let mut transformations: Vec<String> = Vec::new();
    if let Some(width) = width {
        transformations.push(format!("w_{}", width));
    }
    // Auto format (WebP/AVIF where supported) and auto quality
    transformations.push("f_auto".to_string());
    transformations.push("q_auto".to_string());

    format!(
        "https://res.cloudinary.com/{}/image/upload/{}/{}",
        cloud_name,
        transformations.join(","),
        public_id
    )
}

/// Gallery thumbnail (400px wide).
pub fn thumbnail_url(cloud_name: &str, public_id: &str) -> String {
    image_url(cloud_name, public_id, Some(400))
}
