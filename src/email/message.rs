use std::collections::HashMap;

use secrecy::Secret;

/// One email to be dispatched.
///
/// `to`, `subject` and `html` are required; everything else is either
/// optional message content or a per-call override of the environment
/// defaults in [`crate::configuration::Settings`].
#[derive(Clone, Debug, Default)]
pub struct SendRequest {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub from: Option<String>,
    pub reply_to: Option<String>,
    pub attachments: Vec<Attachment>,
    pub headers: HashMap<String, String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<Secret<String>>,
    pub aws_session_token: Option<Secret<String>>,
    pub region: Option<String>,
}

impl SendRequest {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            html: html.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// A message after validation and configuration resolution, ready for a
/// transport.
#[derive(Clone, Debug)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub headers: HashMap<String, String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SendResponse {
    pub status: u16,
    pub result: SendResult,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SendResult {
    pub info: SendInfo,
}

/// What the transport reported back for an accepted message.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SendInfo {
    pub message_id: Option<String>,
    /// Retrieval URL for the captured message; sandbox transport only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl SendResponse {
    pub(crate) fn accepted(info: SendInfo) -> Self {
        Self {
            status: 200,
            result: SendResult { info },
        }
    }
}
