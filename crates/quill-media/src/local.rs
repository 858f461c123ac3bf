use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::paths::{generate_file_path, generate_unique_filename};
use crate::provider::{
    MediaError, MediaResult, ProcessedVersion, StorageProvider, StoredFile, UploadRequest,
};
use crate::validate::{FileType, validate_file};

const THUMBNAIL_EDGE: u32 = 200;
const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Filesystem-backed provider rooted at the uploads directory. Stored paths
/// are relative to the root; the api layer maps them to `/uploads/*` URLs.
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn encode_jpeg(image: &DynamicImage, quality: u8) -> MediaResult<Vec<u8>> {
        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
        image.to_rgb8().write_with_encoder(encoder)?;
        Ok(buf)
    }

    async fn write_file(&self, relative: &str, data: &[u8]) -> MediaResult<()> {
        let absolute = self.root.join(relative);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, data).await?;
        Ok(())
    }

    /// Thumbnail always; recompressed variant when enabled, at the caller's
    /// quality. Video and audio have no processing pipeline, they are stored
    /// as-is.
    async fn process_image(
        &self,
        data: &[u8],
        relative: &str,
        compress: bool,
        quality: u8,
    ) -> MediaResult<Vec<ProcessedVersion>> {
        let image = image::load_from_memory(data)?;
        let stem = relative.strip_suffix(extension_of(relative)).unwrap_or(relative);
        let stem = stem.strip_suffix('.').unwrap_or(stem);
        let mut versions = Vec::new();

        let thumb = image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
        let thumb_bytes = Self::encode_jpeg(&thumb, DEFAULT_JPEG_QUALITY)?;
        let thumb_path = format!("{stem}_thumb.jpg");
        self.write_file(&thumb_path, &thumb_bytes).await?;
        versions.push(ProcessedVersion {
            kind: "thumbnail".to_string(),
            path: thumb_path,
            size: thumb_bytes.len() as i64,
        });

        if compress {
            let compressed_bytes = Self::encode_jpeg(&image, quality)?;
            let compressed_path = format!("{stem}_compressed.jpg");
            self.write_file(&compressed_path, &compressed_bytes).await?;
            versions.push(ProcessedVersion {
                kind: "compressed".to_string(),
                path: compressed_path,
                size: compressed_bytes.len() as i64,
            });
        }

        Ok(versions)
    }
}

fn extension_of(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

#[async_trait]
impl StorageProvider for LocalProvider {
    async fn store(&self, request: UploadRequest) -> MediaResult<StoredFile> {
        let validation = validate_file(
            &request.original_name,
            &request.mime_type,
            request.data.len() as i64,
            request.allowed.as_deref(),
        );
        if !validation.is_valid {
            let reason = validation
                .error
                .unwrap_or_else(|| "invalid file".to_string());
            return Err(MediaError::Invalid(reason));
        }
        if let Some(quality) = request.quality
            && !(1..=100).contains(&quality)
        {
            return Err(MediaError::Invalid(
                "quality must be between 1 and 100".to_string(),
            ));
        }
        let file_type = validation.file_type.unwrap_or(FileType::Document);
        let file_format = validation.file_format.unwrap_or_default();

        let filename = generate_unique_filename(&request.original_name, &file_format);
        let relative = generate_file_path(&filename, request.blog_id, request.folder.as_deref());
        self.write_file(&relative, &request.data).await?;

        let processed_versions = if file_type == FileType::Image {
            let quality = request.quality.unwrap_or(DEFAULT_JPEG_QUALITY);
            self.process_image(&request.data, &relative, request.compress_images, quality)
                .await?
        } else {
            Vec::new()
        };

        Ok(StoredFile {
            filename,
            path: relative,
            size: request.data.len() as i64,
            mime_type: request.mime_type,
            file_type,
            file_format,
            processed_versions,
        })
    }

    async fn delete(&self, path: &str) -> MediaResult<()> {
        let absolute = self.root.join(path);
        tokio::fs::remove_file(&absolute).await?;

        // Derivatives share the primary's stem prefix. Their removal is best
        // effort; a leftover thumbnail is not worth failing the request.
        let Some(parent) = absolute.parent() else {
            return Ok(());
        };
        let Some(stem) = absolute
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| format!("{stem}_"))
        else {
            return Ok(());
        };
        let mut entries = match tokio::fs::read_dir(parent).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path, error = %err, "failed to scan for derivatives");
                return Ok(());
            }
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with(&stem)
                && let Err(err) = tokio::fs::remove_file(entry.path()).await
            {
                tracing::warn!(derivative = name, error = %err, "failed to remove derivative");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 40, 200]),
        ));
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn upload(name: &str, mime: &str, data: Vec<u8>) -> UploadRequest {
        UploadRequest {
            original_name: name.to_string(),
            mime_type: mime.to_string(),
            data: Bytes::from(data),
            blog_id: None,
            folder: None,
            allowed: None,
            compress_images: true,
            quality: None,
        }
    }

    #[tokio::test]
    async fn stores_document_without_derivatives() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let stored = provider
            .store(upload("notes.txt", "text/plain", b"hello".to_vec()))
            .await
            .unwrap();
        assert_eq!(stored.file_type, FileType::Document);
        assert!(stored.processed_versions.is_empty());
        assert!(dir.path().join(&stored.path).exists());
    }

    #[tokio::test]
    async fn image_upload_writes_thumbnail_and_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let stored = provider
            .store(upload("big.png", "image/png", png_bytes(400, 300)))
            .await
            .unwrap();
        let kinds: Vec<&str> = stored
            .processed_versions
            .iter()
            .map(|version| version.kind.as_str())
            .collect();
        assert_eq!(kinds, ["thumbnail", "compressed"]);
        for version in &stored.processed_versions {
            assert!(dir.path().join(&version.path).exists());
        }
        let thumb = image::open(dir.path().join(&stored.processed_versions[0].path)).unwrap();
        assert!(thumb.width() <= 200 && thumb.height() <= 200);
    }

    #[tokio::test]
    async fn compression_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let mut request = upload("big.png", "image/png", png_bytes(50, 50));
        request.compress_images = false;
        let stored = provider.store(request).await.unwrap();
        assert_eq!(stored.processed_versions.len(), 1);
        assert_eq!(stored.processed_versions[0].kind, "thumbnail");
    }

    #[tokio::test]
    async fn caller_quality_drives_compressed_size() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        // A gradient so the jpeg quality setting actually moves the size.
        let image = DynamicImage::ImageRgb8(image::RgbImage::from_fn(400, 300, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }));
        let mut data = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
            .unwrap();

        let mut low = upload("low.png", "image/png", data.clone());
        low.quality = Some(10);
        let mut high = upload("high.png", "image/png", data);
        high.quality = Some(95);

        let low = provider.store(low).await.unwrap();
        let high = provider.store(high).await.unwrap();
        let size_of = |stored: &StoredFile| {
            stored
                .processed_versions
                .iter()
                .find(|version| version.kind == "compressed")
                .map(|version| version.size)
                .unwrap()
        };
        assert!(size_of(&low) < size_of(&high));
    }

    #[tokio::test]
    async fn out_of_range_quality_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let mut request = upload("pic.png", "image/png", png_bytes(50, 50));
        request.quality = Some(0);
        let err = provider.store(request).await.unwrap_err();
        assert!(matches!(err, MediaError::Invalid(_)));
    }

    #[tokio::test]
    async fn delete_removes_primary_and_derivatives() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let stored = provider
            .store(upload("pic.png", "image/png", png_bytes(300, 300)))
            .await
            .unwrap();
        provider.delete(&stored.path).await.unwrap();
        assert!(!dir.path().join(&stored.path).exists());
        for version in &stored.processed_versions {
            assert!(!dir.path().join(&version.path).exists());
        }
    }

    #[tokio::test]
    async fn rejects_oversize_upload() {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalProvider::new(dir.path());
        let request = upload("huge.txt", "text/plain", vec![0u8; 21 * 1024 * 1024]);
        let err = provider.store(request).await.unwrap_err();
        assert!(matches!(err, MediaError::Invalid(_)));
    }
}
