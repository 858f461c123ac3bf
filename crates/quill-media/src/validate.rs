use serde::{Deserialize, Serialize};

const MB: i64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Audio,
    Video,
    Image,
    Document,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Audio => "audio",
            FileType::Video => "video",
            FileType::Image => "image",
            FileType::Document => "document",
        }
    }

    /// Inclusive size ceiling.
    pub fn max_size(self) -> i64 {
        match self {
            FileType::Audio => 50 * MB,
            FileType::Video => 100 * MB,
            FileType::Image => 10 * MB,
            FileType::Document => 20 * MB,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileValidation {
    pub is_valid: bool,
    pub file_type: Option<FileType>,
    pub file_format: Option<String>,
    pub error: Option<String>,
}

impl FileValidation {
    fn reject(error: String) -> Self {
        Self {
            is_valid: false,
            file_type: None,
            file_format: None,
            error: Some(error),
        }
    }
}

/// MIME -> (type, canonical extension). Anything absent is rejected.
fn classify(mime: &str) -> Option<(FileType, &'static str)> {
    let entry = match mime {
        "audio/mpeg" => (FileType::Audio, "mp3"),
        "audio/ogg" => (FileType::Audio, "ogg"),
        "video/mp4" => (FileType::Video, "mp4"),
        "image/jpeg" => (FileType::Image, "jpg"),
        "image/png" => (FileType::Image, "png"),
        "image/webp" => (FileType::Image, "webp"),
        "application/pdf" => (FileType::Document, "pdf"),
        "application/msword" => (FileType::Document, "doc"),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
            (FileType::Document, "docx")
        }
        "application/vnd.ms-excel" => (FileType::Document, "xls"),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
            (FileType::Document, "xlsx")
        }
        "text/plain" => (FileType::Document, "txt"),
        _ => return None,
    };
    Some(entry)
}

pub fn validate_file(
    name: &str,
    mime: &str,
    size: i64,
    allowed: Option<&[FileType]>,
) -> FileValidation {
    let Some((file_type, file_format)) = classify(mime) else {
        return FileValidation::reject(format!("Unsupported file type: {mime} ({name})"));
    };

    if let Some(allowed) = allowed
        && !allowed.contains(&file_type)
    {
        return FileValidation::reject(format!(
            "File type {} is not allowed here",
            file_type.as_str()
        ));
    }

    if size > file_type.max_size() {
        return FileValidation::reject(format!(
            "File size exceeds the maximum of {}MB for {} files",
            file_type.max_size() / MB,
            file_type.as_str()
        ));
    }

    FileValidation {
        is_valid: true,
        file_type: Some(file_type),
        file_format: Some(file_format.to_string()),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_image() {
        let result = validate_file("photo.jpg", "image/jpeg", MB, None);
        assert!(result.is_valid);
        assert_eq!(result.file_type, Some(FileType::Image));
        assert_eq!(result.file_format.as_deref(), Some("jpg"));
    }

    #[test]
    fn exactly_at_ceiling_is_valid() {
        let result = validate_file("photo.png", "image/png", 10 * MB, None);
        assert!(result.is_valid);
        let result = validate_file("photo.png", "image/png", 10 * MB + 1, None);
        assert!(!result.is_valid);
        assert!(result.error.unwrap().contains("10MB"));
    }

    #[test]
    fn rejects_unknown_mime() {
        let result = validate_file("archive.zip", "application/zip", MB, None);
        assert!(!result.is_valid);
        assert!(result.file_type.is_none());
    }

    #[test]
    fn allowed_filter_applies() {
        let result = validate_file("clip.mp4", "video/mp4", MB, Some(&[FileType::Image]));
        assert!(!result.is_valid);
        let result = validate_file("clip.mp4", "video/mp4", MB, Some(&[FileType::Video]));
        assert!(result.is_valid);
    }

    #[test]
    fn ceilings_differ_per_type() {
        assert!(validate_file("a.mp3", "audio/mpeg", 50 * MB, None).is_valid);
        assert!(!validate_file("a.mp3", "audio/mpeg", 51 * MB, None).is_valid);
        assert!(validate_file("v.mp4", "video/mp4", 100 * MB, None).is_valid);
        assert!(validate_file("d.pdf", "application/pdf", 20 * MB, None).is_valid);
        assert!(!validate_file("d.pdf", "application/pdf", 21 * MB, None).is_valid);
    }
}
