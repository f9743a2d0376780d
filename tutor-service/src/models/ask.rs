use axum::{
    async_trait,
    extract::{multipart::Field, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use service_core::error::AppError;

const QUERY_FIELD: &str = "query";
const IMAGE_FIELD: &str = "image";

/// Fields of a question submitted to `/api/ask`.
///
/// Accepts both `application/x-www-form-urlencoded` and `multipart/form-data`
/// bodies. Any other body is treated as a submission without fields.
#[derive(Debug, Default)]
pub struct AskSubmission {
    pub query: Option<String>,
    pub image: Option<ImageAttachment>,
}

/// Metadata of an uploaded image. The bytes are dropped after reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: usize,
}

impl AskSubmission {
    /// The submitted query, unless it is absent or blank.
    ///
    /// The text is returned untrimmed so it can be echoed back verbatim.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|query| !query.trim().is_empty())
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                // Like a form lookup, the first `query` part wins.
                Some(QUERY_FIELD) if submission.query.is_some() => {
                    tracing::debug!("Ignoring repeated query field");
                }
                Some(QUERY_FIELD) => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::bad_request(e.body_text()))?;
                    submission.query = Some(text);
                }
                Some(IMAGE_FIELD) => {
                    submission.image = read_image(field).await?;
                }
                other => {
                    tracing::debug!(field = ?other, "Ignoring unknown form field");
                }
            }
        }

        Ok(submission)
    }
}

/// Drain an image part chunk by chunk, keeping only its size.
async fn read_image(mut field: Field<'_>) -> Result<Option<ImageAttachment>, AppError> {
    let file_name = field.file_name().map(str::to_owned);
    let content_type = field.content_type().map(str::to_owned);

    let mut size_bytes = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        size_bytes += chunk.len();
    }

    // Browsers send an empty part when the file input was left untouched.
    if size_bytes == 0 {
        return Ok(None);
    }

    Ok(Some(ImageAttachment {
        file_name,
        content_type,
        size_bytes,
    }))
}

#[async_trait]
impl<S> FromRequest<S> for AskSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            // Pairs rather than a struct so repeated keys are not an error.
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            let query = pairs
                .into_iter()
                .find(|(name, _)| name == QUERY_FIELD)
                .map(|(_, value)| value);
            Ok(Self { query, image: None })
        } else {
            Ok(Self::default())
        }
    }
}
