//! Response handler: the single chokepoint where HTTP outcomes become domain results.

use super::error::ErrorPayload;
use super::models::Record;
use super::wire::{Envelope, ErrorBody};
use super::VinterError;

/// Read an async response and hand back its `data` array, or the error it describes.
pub(crate) async fn handle_response(resp: reqwest::Response) -> Result<Vec<Record>, VinterError> {
    let status = resp.status().as_u16();
    let body = resp.text().await?;
    decode_response(status, &body)
}

/// Blocking counterpart of [`handle_response`].
pub(crate) fn handle_blocking_response(
    resp: reqwest::blocking::Response,
) -> Result<Vec<Record>, VinterError> {
    let status = resp.status().as_u16();
    let body = resp.text()?;
    decode_response(status, &body)
}

/// Decide the outcome from a status code and raw body.
///
/// Non-2xx statuses become [`VinterError::Api`] carrying `{result, message, status_code}`;
/// a success body must be a JSON envelope with a `data` array.
pub(crate) fn decode_response(status: u16, body: &str) -> Result<Vec<Record>, VinterError> {
    if !(200..300).contains(&status) {
        let payload = error_payload(status, body);
        #[cfg(feature = "tracing")]
        tracing::debug!(status, message = ?payload.message, "api request failed");
        return Err(VinterError::Api(payload));
    }

    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| VinterError::Decode(format!("response json parse: {e}")))?;
    env.data
        .ok_or_else(|| VinterError::Decode("response is missing the `data` field".into()))
}

fn error_payload(status_code: u16, body: &str) -> ErrorPayload {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    ErrorPayload {
        result: parsed.result,
        message: parsed.message,
        status_code,
    }
}
