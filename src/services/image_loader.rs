use crate::error::LoadRejection;

/// A file as submitted by the upload control.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// An upload that passed validation and decodes as an image.
#[derive(Debug)]
pub struct VerifiedImage {
    pub name: Option<String>,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Validates uploads before anything is allocated for them.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    max_bytes: usize,
}

impl ImageLoader {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Check presence, media type and size, then decode on the blocking pool.
    pub async fn verify(&self, file: Option<SelectedFile>) -> Result<VerifiedImage, LoadRejection> {
        let file = file.ok_or(LoadRejection::NoFile)?;

        // An empty part with no name is what a form sends with no file chosen
        if file.bytes.is_empty() && file.name.as_deref().unwrap_or("").is_empty() {
            return Err(LoadRejection::NoFile);
        }

        let mime = file.content_type.clone().unwrap_or_default();
        if !mime.starts_with("image/") {
            return Err(LoadRejection::NotAnImage(mime));
        }

        if file.bytes.len() > self.max_bytes {
            return Err(LoadRejection::TooLarge {
                size: file.bytes.len(),
                max: self.max_bytes,
            });
        }

        let SelectedFile { name, bytes, .. } = file;
        let (bytes, decoded) = tokio::task::spawn_blocking(move || {
            let decoded = image::load_from_memory(&bytes).map(|img| (img.width(), img.height()));
            (bytes, decoded)
        })
        .await
        .map_err(|e| LoadRejection::Undecodable(e.to_string()))?;

        let (width, height) = decoded.map_err(|e| LoadRejection::Undecodable(e.to_string()))?;

        tracing::debug!(?name, %mime, width, height, "Verified uploaded image");
        Ok(VerifiedImage {
            name,
            mime,
            bytes,
            width,
            height,
        })
    }
}
