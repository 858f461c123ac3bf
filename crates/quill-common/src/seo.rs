//! Structured-data (JSON-LD) assembly and plain-text excerpt helpers.

use serde_json::{Value, json};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonLdKind {
    #[default]
    Article,
    BlogPosting,
    WebPage,
}

impl JsonLdKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Article => "Article",
            Self::BlogPosting => "BlogPosting",
            Self::WebPage => "WebPage",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonLdInput {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
    pub date_published: Option<OffsetDateTime>,
    pub date_modified: Option<OffsetDateTime>,
    pub kind: JsonLdKind,
}

/// Build a schema.org JSON-LD object. `@context`, `@type` and `headline`
/// are always present; everything else only when supplied.
pub fn generate_json_ld(input: &JsonLdInput) -> Value {
    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": input.kind.as_str(),
        "headline": input.title,
    });

    let obj = doc.as_object_mut().expect("json_ld root is an object");

    if let Some(description) = &input.description {
        obj.insert("description".into(), json!(description));
    }
    if let Some(url) = &input.url {
        obj.insert("url".into(), json!(url));
    }
    if let Some(image) = &input.image {
        obj.insert("image".into(), json!(image));
    }
    if let Some(author) = &input.author {
        obj.insert(
            "author".into(),
            json!({ "@type": "Person", "name": author }),
        );
    }
    if let Some(at) = input.date_published
        && let Ok(ts) = at.format(&Rfc3339)
    {
        obj.insert("datePublished".into(), json!(ts));
    }
    if let Some(at) = input.date_modified
        && let Ok(ts) = at.format(&Rfc3339)
    {
        obj.insert("dateModified".into(), json!(ts));
    }

    doc
}

/// `"{title} | {site_name}"`, or just the title when no site name is set.
pub fn generate_title(title: &str, site_name: Option<&str>) -> String {
    match site_name {
        Some(site) => format!("{title} | {site}"),
        None => title.to_string(),
    }
}

/// Strip HTML tags and truncate to `max_len` at the last whitespace
/// boundary, never mid-word. Appends `...` when truncated.
pub fn generate_description(html: &str, max_len: usize) -> String {
    let plain = strip_tags(html);
    if plain.chars().count() <= max_len {
        return plain;
    }

    let head: String = plain.chars().take(max_len).collect();
    match head.trim_end().rfind(char::is_whitespace) {
        Some(cut) => format!("{}...", head[..cut].trim_end()),
        // One unbroken word longer than the limit; nothing to cut back to.
        None => format!("{}...", head.trim_end()),
    }
}

pub const DEFAULT_DESCRIPTION_LEN: usize = 160;

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn json_ld_required_fields() {
        let doc = generate_json_ld(&JsonLdInput {
            title: "A headline".into(),
            ..Default::default()
        });
        assert_eq!(doc["@context"], "https://schema.org");
        assert_eq!(doc["@type"], "Article");
        assert_eq!(doc["headline"], "A headline");
        assert!(doc.get("description").is_none());
        assert!(doc.get("author").is_none());
    }

    #[test]
    fn json_ld_optional_fields() {
        let doc = generate_json_ld(&JsonLdInput {
            title: "T".into(),
            description: Some("d".into()),
            author: Some("Jane Doe".into()),
            date_published: Some(datetime!(2024-05-01 12:00 UTC)),
            kind: JsonLdKind::BlogPosting,
            ..Default::default()
        });
        assert_eq!(doc["@type"], "BlogPosting");
        assert_eq!(doc["author"]["@type"], "Person");
        assert_eq!(doc["author"]["name"], "Jane Doe");
        assert_eq!(doc["datePublished"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn description_strips_tags() {
        assert_eq!(
            generate_description("<p>Hello <b>world</b></p>", 160),
            "Hello world"
        );
    }

    #[test]
    fn description_truncates_at_word_boundary() {
        let text = "one two three four five";
        let out = generate_description(text, 12);
        assert_eq!(out, "one two...");
        assert!(out.len() <= 12 + 3);
    }

    #[test]
    fn description_short_input_untouched() {
        assert_eq!(generate_description("short", 160), "short");
    }

    #[test]
    fn site_title_join() {
        assert_eq!(generate_title("Post", Some("My Blog")), "Post | My Blog");
        assert_eq!(generate_title("Post", None), "Post");
    }
}
