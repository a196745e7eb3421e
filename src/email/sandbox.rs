use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use secrecy::Secret;
use uuid::Uuid;

use super::{Attachment, MailTransport, OutgoingEmail, SendInfo};

const MESSAGE_URL_PREFIX: &str = "sandbox://messages/";

/// In-memory mail-capture service backing the sandboxed transport mode.
///
/// Messages are captured, not delivered. Each accepted message gets a
/// retrieval URL so tests can inspect exactly what would have gone out.
#[derive(Clone, Default)]
pub struct Sandbox {
    inbox: Arc<Mutex<Vec<CapturedEmail>>>,
    reject_with: Arc<Mutex<Option<String>>>,
}

/// A disposable account provisioned for a single sandboxed send.
#[derive(Clone)]
pub struct SandboxAccount {
    pub user: String,
    pub password: Secret<String>,
}

impl SandboxAccount {
    pub fn address(&self) -> String {
        format!("{}@sandbox.email", self.user)
    }
}

#[derive(Clone, Debug)]
pub struct CapturedEmail {
    pub id: String,
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub headers: HashMap<String, String>,
    pub attachments: Vec<Attachment>,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh throwaway account, as the capture service does on
    /// demand.
    pub fn provision_account(&self) -> SandboxAccount {
        SandboxAccount {
            user: random_token(16).to_lowercase(),
            password: Secret::new(random_token(24)),
        }
    }

    /// Arrange for the next submission to be rejected with the given
    /// provider message.
    pub fn reject_next(&self, message: impl Into<String>) {
        *self.reject_with.lock().unwrap() = Some(message.into());
    }

    pub fn messages(&self) -> Vec<CapturedEmail> {
        self.inbox.lock().unwrap().clone()
    }

    /// Fetch a captured message by the retrieval URL handed back in
    /// [`SendInfo`].
    pub fn retrieve(&self, url: &str) -> Option<CapturedEmail> {
        let id = url.strip_prefix(MESSAGE_URL_PREFIX)?;
        self.inbox
            .lock()
            .unwrap()
            .iter()
            .find(|message| message.id == id)
            .cloned()
    }

    fn capture(&self, email: &OutgoingEmail) -> Result<SendInfo, anyhow::Error> {
        if let Some(message) = self.reject_with.lock().unwrap().take() {
            return Err(anyhow::anyhow!(message));
        }
        let id = Uuid::new_v4().to_string();
        self.inbox.lock().unwrap().push(CapturedEmail {
            id: id.clone(),
            from: email.from.clone(),
            to: email.to.clone(),
            reply_to: email.reply_to.clone(),
            subject: email.subject.clone(),
            html: email.html.clone(),
            text: email.text.clone(),
            headers: email.headers.clone(),
            attachments: email.attachments.clone(),
        });
        Ok(SendInfo {
            message_id: Some(id.clone()),
            preview_url: Some(format!("{MESSAGE_URL_PREFIX}{id}")),
        })
    }
}

pub(crate) struct SandboxTransport {
    sandbox: Sandbox,
}

impl SandboxTransport {
    pub(crate) fn new(sandbox: Sandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait]
impl MailTransport for SandboxTransport {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<SendInfo, anyhow::Error> {
        self.sandbox.capture(email)
    }
}

fn random_token(length: usize) -> String {
    let mut rng = thread_rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric))
        .map(char::from)
        .take(length)
        .collect()
}
