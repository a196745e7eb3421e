use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::config::Credentials;
use aws_sdk_sts::error::ProvideErrorMetadata;
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use crate::configuration::Settings;
use crate::error::DispatchError;

/// Input to [`assume_role`]. Both fields are required; empty strings count
/// as missing.
#[derive(Clone, Debug, Default)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub region: String,
}

/// Short-lived credentials returned by the token service. Requested fresh
/// on every call, never cached.
#[derive(Debug)]
pub struct AssumedCredentials {
    pub access_key_id: String,
    pub secret_access_key: Secret<String>,
    pub session_token: Secret<String>,
}

/// Exchange the process-wide long-lived credentials plus a role ARN for
/// short-lived delegated credentials.
///
/// The long-lived credentials come from `settings` only; there is no
/// per-call override at this layer.
#[tracing::instrument(
    name = "Assuming a role",
    skip(settings, request),
    fields(role_arn = %request.role_arn)
)]
pub async fn assume_role(
    settings: &Settings,
    request: &AssumeRoleRequest,
) -> Result<AssumedCredentials, DispatchError> {
    let access_key_id = settings
        .aws_access_key_id
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DispatchError::missing_configuration("AWS_ACCESS_KEY_ID"))?;
    let secret_access_key = settings
        .aws_secret_access_key
        .as_ref()
        .filter(|v| !v.expose_secret().is_empty())
        .ok_or_else(|| DispatchError::missing_configuration("AWS_SECRET_ACCESS_KEY"))?;

    if request.role_arn.is_empty() {
        return Err(DispatchError::Validation("Missing variable: roleArn".into()));
    }
    if request.region.is_empty() {
        return Err(DispatchError::Validation("Missing variable: region".into()));
    }

    let provider = Credentials::new(
        access_key_id,
        secret_access_key.expose_secret().clone(),
        None,
        None,
        "mailroom",
    );
    let config = aws_sdk_sts::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(request.region.clone()))
        .credentials_provider(provider)
        .build();
    let client = aws_sdk_sts::Client::from_conf(config);

    let output = client
        .assume_role()
        .role_arn(request.role_arn.as_str())
        .role_session_name(format!("mailroom-{}", Uuid::new_v4()))
        .send()
        .await
        .map_err(|e| {
            let service_error = e.into_service_error();
            let message = service_error
                .message()
                .map(str::to_owned)
                .unwrap_or_else(|| service_error.to_string());
            DispatchError::Internal(format!("Role assumption error: {message}"))
        })?;

    let credentials = output.credentials().ok_or_else(|| {
        DispatchError::Internal("Role assumption error: response carried no credentials".into())
    })?;

    Ok(AssumedCredentials {
        access_key_id: credentials.access_key_id().to_owned(),
        secret_access_key: Secret::new(credentials.secret_access_key().to_owned()),
        session_token: Secret::new(credentials.session_token().to_owned()),
    })
}
