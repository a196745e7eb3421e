use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2 as sesv2;
use aws_sdk_sesv2::config::Credentials;
use aws_sdk_sesv2::error::ProvideErrorMetadata;
use aws_sdk_sesv2::primitives::Blob;
use aws_sdk_sesv2::types::{
    Attachment, Body, Content, Destination, EmailContent, Message, MessageHeader,
};
use secrecy::{ExposeSecret, Secret};

use super::{MailTransport, OutgoingEmail, SendInfo};

/// Static credential set and region a provider client is scoped to.
pub struct SesCredentials {
    pub access_key_id: String,
    pub secret_access_key: Secret<String>,
    pub session_token: Option<Secret<String>>,
    pub region: String,
}

pub struct SesTransport {
    client: sesv2::Client,
}

impl SesTransport {
    pub fn new(credentials: &SesCredentials) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.expose_secret().clone(),
            credentials
                .session_token
                .as_ref()
                .map(|token| token.expose_secret().clone()),
            None,
            "mailroom",
        );
        let config = sesv2::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(provider)
            .build();
        Self {
            client: sesv2::Client::from_conf(config),
        }
    }
}

#[async_trait]
impl MailTransport for SesTransport {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<SendInfo, anyhow::Error> {
        let destination = Destination::builder()
            .set_to_addresses(Some(email.to.clone()))
            .build();

        let subject = Content::builder()
            .data(email.subject.clone())
            .charset("UTF-8")
            .build()?;
        let html = Content::builder()
            .data(email.html.clone())
            .charset("UTF-8")
            .build()?;
        let text = Content::builder()
            .data(email.text.clone())
            .charset("UTF-8")
            .build()?;
        let body = Body::builder().html(html).text(text).build();

        let mut message = Message::builder().subject(subject).body(body);
        for (name, value) in &email.headers {
            message = message.headers(
                MessageHeader::builder()
                    .name(name.clone())
                    .value(value.clone())
                    .build()?,
            );
        }
        for attachment in &email.attachments {
            message = message.attachments(
                Attachment::builder()
                    .file_name(attachment.filename.clone())
                    .raw_content(Blob::new(attachment.content.clone()))
                    .build()?,
            );
        }
        let content = EmailContent::builder().simple(message.build()).build();

        let mut operation = self
            .client
            .send_email()
            .from_email_address(email.from.as_str())
            .destination(destination)
            .content(content);
        if let Some(reply_to) = &email.reply_to {
            operation = operation.reply_to_addresses(reply_to.clone());
        }

        let output = operation.send().await.map_err(|e| {
            let service_error = e.into_service_error();
            let message = service_error
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| service_error.to_string());
            anyhow::anyhow!(message)
        })?;

        Ok(SendInfo {
            message_id: output.message_id().map(str::to_owned),
            preview_url: None,
        })
    }
}
