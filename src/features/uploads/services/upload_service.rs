use std::path::{Path, PathBuf};

use axum::body::Bytes;
use chrono::Utc;
use futures::{pin_mut, Stream, StreamExt};
use rand::Rng;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::shared::constants::{is_image_type_allowed, ALLOWED_IMAGE_TYPES, UPLOADS_PATH};

const TOKEN_LEN: usize = 5;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_EXTENSION_LEN: usize = 10;

/// Streams uploaded images into the content directory
pub struct UploadService {
    dir: PathBuf,
    public_base_url: String,
    max_file_size: usize,
}

impl UploadService {
    /// Create the service, creating the content directory if it does not exist yet
    pub async fn new(
        dir: impl Into<PathBuf>,
        public_base_url: impl Into<String>,
        max_file_size: usize,
    ) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_file_size,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn public_url(&self, filename: &str) -> String {
        format!("{}{}/{}", self.public_base_url, UPLOADS_PATH, filename)
    }

    /// Validate the media type, then stream `chunks` into a freshly named file.
    ///
    /// Nothing is created for a rejected media type. If the stream fails or
    /// exceeds the size limit the partial file is removed before returning.
    pub async fn save<S, E>(
        &self,
        original_name: &str,
        content_type: &str,
        chunks: S,
    ) -> Result<UploadResponseDto>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: Into<AppError>,
    {
        if !is_image_type_allowed(content_type) {
            return Err(AppError::BadRequest(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            )));
        }

        let filename = generate_filename(original_name);
        let path = self.dir.join(&filename);

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let written = write_stream(&mut file, chunks, self.max_file_size).await;
        drop(file);

        let size = match written {
            Ok(size) => size,
            Err(e) => {
                if let Err(remove_err) = fs::remove_file(&path).await {
                    warn!(
                        "Failed to remove partial upload {}: {}",
                        path.display(),
                        remove_err
                    );
                }
                return Err(e);
            }
        };

        info!(
            "Upload stored: filename={}, original_name={}, size={}",
            filename, original_name, size
        );

        Ok(UploadResponseDto {
            success: true,
            image_url: self.public_url(&filename),
            filename,
            original_name: original_name.to_string(),
            size,
        })
    }
}

async fn write_stream<S, E>(file: &mut File, chunks: S, max_file_size: usize) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<AppError>,
{
    pin_mut!(chunks);

    let mut received: usize = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(Into::<AppError>::into)?;
        received = received.saturating_add(chunk.len());
        if received > max_file_size {
            debug!("Upload aborted after {} bytes", received);
            return Err(AppError::PayloadTooLarge(format!(
                "File too large. Maximum size is {} bytes ({} MB)",
                max_file_size,
                max_file_size / 1024 / 1024
            )));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(file.metadata().await?.len())
}

/// `<epoch millis>-<5 base36 chars><original extension>`
fn generate_filename(original_name: &str) -> String {
    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        random_token(),
        file_extension(original_name)
    )
}

fn random_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Dot-prefixed extension of `name`, or empty when it has none or it is not plain alphanumeric
fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
