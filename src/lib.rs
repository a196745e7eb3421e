pub mod configuration;
pub mod credentials;
pub mod email;
pub mod error;
pub mod telemetry;

pub use configuration::{get_configuration, Environment, Settings};
pub use credentials::{assume_role, AssumeRoleRequest, AssumedCredentials};
pub use email::{
    Attachment, CapturedEmail, MailDispatcher, MailTransport, OutgoingEmail, Sandbox,
    SandboxAccount, SendInfo, SendRequest, SendResponse, TransportConfig,
};
pub use error::{DispatchError, ErrorKind};
