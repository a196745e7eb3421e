mod dispatcher;
mod message;
mod sandbox;
mod ses;
mod text;

use async_trait::async_trait;

pub use dispatcher::{MailDispatcher, TransportConfig};
pub use message::{Attachment, OutgoingEmail, SendInfo, SendRequest, SendResponse, SendResult};
pub use sandbox::{CapturedEmail, Sandbox, SandboxAccount};
pub use ses::{SesCredentials, SesTransport};
pub use text::plain_text_from_html;

/// A connection to a mail provider, able to submit one fully resolved
/// message.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<SendInfo, anyhow::Error>;
}
