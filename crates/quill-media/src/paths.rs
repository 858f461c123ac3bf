use rand::distr::{Alphanumeric, SampleString};
use time::OffsetDateTime;

/// `{folder | blog/{id} | uploads}/{yyyy}/{mm}/{dd}/{filename}`.
pub fn generate_file_path(filename: &str, blog_id: Option<i64>, folder: Option<&str>) -> String {
    let prefix = match (folder, blog_id) {
        (Some(folder), _) => folder.to_string(),
        (None, Some(blog_id)) => format!("blog/{blog_id}"),
        (None, None) => "uploads".to_string(),
    };
    let now = OffsetDateTime::now_utc();
    format!(
        "{prefix}/{:04}/{:02}/{:02}/{filename}",
        now.year(),
        u8::from(now.month()),
        now.day()
    )
}

/// Sanitized stem + epoch millis + random token keeps concurrent uploads of
/// the same original name from colliding.
pub fn generate_unique_filename(original: &str, format: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => original,
    };
    let mut clean: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    clean.truncate(50);
    if clean.is_empty() {
        clean.push_str("file");
    }

    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    let token = Alphanumeric.sample_string(&mut rand::rng(), 8).to_lowercase();
    format!("{clean}_{millis}_{token}.{format}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_prefers_folder_over_blog() {
        let path = generate_file_path("a.jpg", Some(7), Some("banners"));
        assert!(path.starts_with("banners/"));
        assert!(path.ends_with("/a.jpg"));
    }

    #[test]
    fn path_uses_blog_scope() {
        let path = generate_file_path("a.jpg", Some(7), None);
        assert!(path.starts_with("blog/7/"));
    }

    #[test]
    fn path_defaults_to_uploads_with_dated_segments() {
        let path = generate_file_path("a.jpg", None, None);
        let segments: Vec<&str> = path.split('/').collect();
        assert_eq!(segments[0], "uploads");
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[1].len(), 4);
        assert_eq!(segments[2].len(), 2);
        assert_eq!(segments[3].len(), 2);
    }

    #[test]
    fn unique_filename_sanitizes_and_keeps_format() {
        let name = generate_unique_filename("Summer Sale (2024)!.PNG", "png");
        assert!(name.starts_with("SummerSale2024_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn unique_filename_truncates_long_stems() {
        let long = "x".repeat(120);
        let name = generate_unique_filename(&long, "txt");
        let stem = name.split('_').next().unwrap();
        assert_eq!(stem.len(), 50);
    }

    #[test]
    fn unique_filename_differs_between_calls() {
        let a = generate_unique_filename("same.jpg", "jpg");
        let b = generate_unique_filename("same.jpg", "jpg");
        assert_ne!(a, b);
    }
}
