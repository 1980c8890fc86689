use axum::{
    Form,
    body::Body,
    extract::{FromRequest, Multipart, multipart::Field},
    http::{self, header},
};

use crate::{
    error::TranscribeError,
    types::{TranscriptionForm, UploadedFile},
};

/// Used when the upload part carries no content type
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Extractor for `/api` submissions
///
/// Accepts `multipart/form-data` (required for uploads) and
/// `application/x-www-form-urlencoded`.
pub struct ExtractForm(pub TranscriptionForm);

impl<S> FromRequest<S> for ExtractForm
where
    S: Send + Sync,
{
    type Rejection = TranscribeError;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| TranscribeError::InvalidRequest(format!("Failed to parse multipart form: {e}")))?;

            return read_multipart(multipart).await.map(Self);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(request, state)
                .await
                .map_err(|e| TranscribeError::InvalidRequest(format!("Failed to parse form: {}", e.body_text())))?;

            let mut form = TranscriptionForm::default();
            for (name, value) in fields {
                assign_text(&mut form, &name, value);
            }

            return Ok(Self(form));
        }

        Err(TranscribeError::InvalidRequest(
            "Unsupported Content-Type, expected multipart/form-data or application/x-www-form-urlencoded".to_string(),
        ))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<TranscriptionForm, TranscribeError> {
    let mut form = TranscriptionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TranscribeError::InvalidRequest(format!("Failed to read multipart form: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" && field.file_name().is_some() {
            form.file = read_upload(field).await?;
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| TranscribeError::InvalidRequest(format!("Failed to read {name} field: {}", e.body_text())))?;

        assign_text(&mut form, &name, value);
    }

    Ok(form)
}

/// Browsers send an empty part when no file was chosen; that is not an upload
async fn read_upload(field: Field<'_>) -> Result<Option<UploadedFile>, TranscribeError> {
    let content_type = field
        .content_type()
        .filter(|ct| !ct.is_empty())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| TranscribeError::InvalidRequest(format!("Failed to read audio data: {}", e.body_text())))?;

    if data.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile { content_type, data }))
}

/// Empty values count as absent, except `tier` which `whisper` forwards verbatim;
/// unknown fields are skipped
fn assign_text(form: &mut TranscriptionForm, name: &str, value: String) {
    let slot = match name {
        "tier" => {
            form.tier = Some(value);
            return;
        }
        "url" => &mut form.url,
        "features" => &mut form.features,
        "model" => &mut form.model,
        "version" => &mut form.version,
        _ => return,
    };

    *slot = Some(value).filter(|v| !v.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_absent() {
        let mut form = TranscriptionForm::default();
        assign_text(&mut form, "version", String::new());
        assign_text(&mut form, "model", "general".to_string());
        assign_text(&mut form, "colour", "blue".to_string());

        assert_eq!(form.version, None);
        assert_eq!(form.model.as_deref(), Some("general"));
    }

    #[test]
    fn empty_tier_is_kept() {
        let mut form = TranscriptionForm::default();
        assign_text(&mut form, "tier", String::new());

        assert_eq!(form.tier.as_deref(), Some(""));
    }
}
