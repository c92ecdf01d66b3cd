use crate::config::AppConfig;
use crate::utils::validation::display_name;
use axum::response::Html;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Everything a URL path segment cannot carry verbatim.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%')
    .add(b'/')
    .add(b'\\');

/// Render model for one object in the listing.
pub struct ImageEntry {
    pub key: String,
    pub name: String,
    pub url: String,
}

impl ImageEntry {
    pub fn from_key(key: &str, config: &AppConfig) -> Self {
        Self {
            key: key.to_string(),
            name: display_name(key).to_string(),
            url: object_url(key, config),
        }
    }
}

/// Public URL of an object, path-style for custom endpoints and
/// virtual-hosted style for plain AWS.
pub fn object_url(key: &str, config: &AppConfig) -> String {
    let encoded = utf8_percent_encode(key, PATH_SEGMENT);
    match &config.endpoint_url {
        Some(endpoint) => format!(
            "{}/{}/{}",
            endpoint.trim_end_matches('/'),
            config.bucket,
            encoded
        ),
        None => format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            config.bucket, config.region, encoded
        ),
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Server-side rendered gallery page: upload form plus one card per object.
pub fn listing_page(bucket: &str, entries: &[ImageEntry]) -> Html<String> {
    let mut cards = String::new();
    for entry in entries {
        cards.push_str(&format!(
            r#"      <li class="card">
        <img src="{url}" alt="{name}">
        <span class="name">{name}</span>
        <form method="post" action="/delete">
          <input type="hidden" name="key" value="{key}">
          <button type="submit">Delete</button>
        </form>
      </li>
"#,
            url = escape(&entry.url),
            name = escape(&entry.name),
            key = escape(&entry.key),
        ));
    }

    if cards.is_empty() {
        cards.push_str("      <li class=\"empty\">No images yet.</li>\n");
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{bucket} gallery</title>
    <link rel="stylesheet" href="/public/style.css">
  </head>
  <body>
    <h1>{bucket}</h1>
    <form method="post" action="/upload" enctype="multipart/form-data">
      <input type="file" name="image" accept="image/*">
      <button type="submit">Upload</button>
    </form>
    <ul class="gallery">
{cards}    </ul>
  </body>
</html>
"#,
        bucket = escape(bucket),
        cards = cards,
    ))
}
