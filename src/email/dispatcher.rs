use secrecy::{ExposeSecret, Secret};

use crate::configuration::{Environment, Settings};
use crate::error::DispatchError;

use super::sandbox::SandboxTransport;
use super::ses::{SesCredentials, SesTransport};
use super::text::plain_text_from_html;
use super::{MailTransport, OutgoingEmail, Sandbox, SendRequest, SendResponse};

/// Which transport a dispatcher drives, selected explicitly instead of via
/// ambient process state so tests and production share one code path.
pub enum TransportConfig {
    /// Capture messages in an in-memory sandbox instead of delivering them.
    Sandboxed(Sandbox),
    /// Send through SES with the given environment-sourced defaults.
    Provider(Settings),
}

impl TransportConfig {
    pub fn resolve(environment: Environment, settings: Settings) -> Self {
        match environment {
            Environment::Test => TransportConfig::Sandboxed(Sandbox::new()),
            Environment::Production => TransportConfig::Provider(settings),
        }
    }
}

enum Mode {
    Configured(TransportConfig),
    Injected {
        transport: Box<dyn MailTransport>,
        sender: String,
    },
}

pub struct MailDispatcher {
    mode: Mode,
}

impl MailDispatcher {
    pub fn new(transport: TransportConfig) -> Self {
        Self {
            mode: Mode::Configured(transport),
        }
    }

    /// Route every send through a caller-supplied transport, with `sender`
    /// as the default from-address.
    pub fn with_transport(transport: Box<dyn MailTransport>, sender: impl Into<String>) -> Self {
        Self {
            mode: Mode::Injected {
                transport,
                sender: sender.into(),
            },
        }
    }

    /// Validate the request, resolve configuration, derive the text part
    /// and submit.
    ///
    /// Exactly one submission is attempted; a transport failure is terminal
    /// for the call.
    #[tracing::instrument(
        name = "Dispatching an email",
        skip(self, request),
        fields(subject = %request.subject)
    )]
    pub async fn send(&self, request: &SendRequest) -> Result<SendResponse, DispatchError> {
        validate(request)?;

        let sandbox_transport;
        let ses_transport;
        let (transport, from): (&dyn MailTransport, String) = match &self.mode {
            Mode::Configured(TransportConfig::Sandboxed(sandbox)) => {
                let account = sandbox.provision_account();
                let from = resolved(request.from.as_deref())
                    .map(str::to_owned)
                    .unwrap_or_else(|| account.address());
                sandbox_transport = SandboxTransport::new(sandbox.clone());
                (&sandbox_transport, from)
            }
            Mode::Configured(TransportConfig::Provider(settings)) => {
                let (from, credentials) = resolve_provider(settings, request)?;
                ses_transport = SesTransport::new(&credentials);
                (&ses_transport, from)
            }
            Mode::Injected { transport, sender } => {
                let from = resolved(request.from.as_deref())
                    .map(str::to_owned)
                    .unwrap_or_else(|| sender.clone());
                (transport.as_ref(), from)
            }
        };

        let email = OutgoingEmail {
            from,
            to: request.to.clone(),
            reply_to: request.reply_to.clone(),
            subject: request.subject.clone(),
            html: request.html.clone(),
            text: plain_text_from_html(&request.html),
            headers: request.headers.clone(),
            attachments: request.attachments.clone(),
        };

        match transport.send_email(&email).await {
            Ok(info) => Ok(SendResponse::accepted(info)),
            Err(error) => Err(classify(error)),
        }
    }
}

fn validate(request: &SendRequest) -> Result<(), DispatchError> {
    let recipients_missing = request.to.iter().all(|to| to.is_empty());
    if recipients_missing || request.subject.is_empty() || request.html.is_empty() {
        return Err(DispatchError::Validation(
            "Missing params: to, subject and html are required.".into(),
        ));
    }
    Ok(())
}

/// Merge per-call overrides over environment defaults. The first missing
/// item wins, checked in a fixed order.
fn resolve_provider(
    settings: &Settings,
    request: &SendRequest,
) -> Result<(String, SesCredentials), DispatchError> {
    let from = resolved(request.from.as_deref())
        .or_else(|| resolved(settings.from_email_address.as_deref()))
        .ok_or_else(|| DispatchError::missing_configuration("FROM_EMAIL_ADDRESS"))?;

    let access_key_id = resolved(request.aws_access_key_id.as_deref())
        .or_else(|| resolved(settings.aws_access_key_id.as_deref()))
        .ok_or_else(|| DispatchError::missing_configuration("AWS_ACCESS_KEY_ID"))?;

    let secret_access_key = resolved_secret(request.aws_secret_access_key.as_ref())
        .or_else(|| resolved_secret(settings.aws_secret_access_key.as_ref()))
        .ok_or_else(|| DispatchError::missing_configuration("AWS_SECRET_ACCESS_KEY"))?;

    let region = resolved(request.region.as_deref())
        .or_else(|| resolved(settings.aws_region.as_deref()))
        .ok_or_else(|| DispatchError::missing_configuration("AWS_REGION"))?;

    Ok((
        from.to_owned(),
        SesCredentials {
            access_key_id: access_key_id.to_owned(),
            secret_access_key: secret_access_key.clone(),
            session_token: request.aws_session_token.clone(),
            region: region.to_owned(),
        },
    ))
}

/// Empty values behave like absent ones, for overrides and environment
/// defaults alike.
fn resolved(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn resolved_secret(value: Option<&Secret<String>>) -> Option<&Secret<String>> {
    value.filter(|v| !v.expose_secret().is_empty())
}

/// Transport failures that already carry a category pass through untouched;
/// anything else is reported as a provider-side rejection.
fn classify(error: anyhow::Error) -> DispatchError {
    match error.downcast::<DispatchError>() {
        Ok(typed) => typed,
        Err(other) => DispatchError::Internal(format!("Email sending error: {other}")),
    }
}
