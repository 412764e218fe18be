//! Media attachment endpoints
//!
//! Upload goes to `api/v2/media` as `multipart/form-data` with fixed field
//! names (`file`, `description`, `focus`, `thumbnail`). The status lookup at
//! `api/v1/media/{id}` is the one endpoint class with a flavour decode
//! override: Mastodon answers 206 while the attachment is still processing,
//! which decodes to "no attachment yet" rather than an error.

use crate::flavour::EndpointClass;
use crate::models::MediaAttachment;
use crate::request::{HttpMethod, MultipartPart};
use crate::{Result, TootClient};

/// Parameters for uploading a media attachment
#[derive(Debug, Clone)]
pub struct UploadMediaParams {
    /// Raw file bytes
    pub file: Vec<u8>,
    /// Alternate text for accessibility
    pub description: Option<String>,
    /// Focal point, as "x,y" within [-1.0, 1.0]
    pub focus: Option<String>,
    /// Custom thumbnail bytes
    pub thumbnail: Option<Vec<u8>>,
}

impl UploadMediaParams {
    /// Create upload parameters for a file
    pub fn new(file: Vec<u8>) -> Self {
        Self { file, description: None, focus: None, thumbnail: None }
    }

    /// Set the alternate text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the focal point
    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }

    /// Set a custom thumbnail
    pub fn with_thumbnail(mut self, thumbnail: Vec<u8>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }
}

impl TootClient {
    /// Upload a media file so it can be attached when publishing posts
    pub async fn upload_media(
        &self,
        params: UploadMediaParams,
        mime_type: &str,
    ) -> Result<MediaAttachment> {
        let mut parts = vec![MultipartPart::new(
            [
                ("Content-Disposition", "form-data; name=\"file\"; filename=\"file\"".to_string()),
                ("Content-Type", mime_type.to_string()),
            ],
            params.file,
        )];
        if let Some(description) = params.description {
            parts.push(MultipartPart::new(
                [("Content-Disposition", "form-data; name=\"description\"")],
                description.into_bytes(),
            ));
        }
        if let Some(focus) = params.focus {
            parts.push(MultipartPart::new(
                [("Content-Disposition", "form-data; name=\"focus\"")],
                focus.into_bytes(),
            ));
        }
        if let Some(thumbnail) = params.thumbnail {
            parts.push(MultipartPart::new(
                [
                    (
                        "Content-Disposition",
                        "form-data; name=\"thumbnail\"; filename=\"thumbnail\"".to_string(),
                    ),
                    ("Content-Type", mime_type.to_string()),
                ],
                thumbnail,
            ));
        }

        let spec = self
            .request(HttpMethod::Post)
            .path(["api", "v2", "media"])
            .multipart_body(parts)?
            .build()?;
        self.fetch(spec).await
    }

    /// Retrieve the details of a media attachment by id
    ///
    /// On the Mastodon flavour this returns `Ok(None)` until the attachment
    /// has finished processing; other flavours decode the response normally.
    pub async fn get_media(&self, id: &str) -> Result<Option<MediaAttachment>> {
        let spec = self
            .request(HttpMethod::Get)
            .path(["api", "v1", "media", id])
            .build()?;
        self.fetch_with_class(spec, EndpointClass::MediaStatus).await
    }
}
