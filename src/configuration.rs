use secrecy::Secret;

pub enum Environment {
    Test,
    Production,
}

/// Process-wide defaults for the production transport, read from the
/// environment once at startup.
///
/// Every field is optional at load time; completeness is enforced per call,
/// after request-level overrides have been merged in. An empty value counts
/// as absent.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct Settings {
    pub from_email_address: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<Secret<String>>,
    pub aws_region: Option<String>,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'test' or 'production'.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::default())
        .build()?;
    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::{get_configuration, Environment};

    #[test]
    fn configuration_picks_up_environment_values() {
        std::env::set_var("FROM_EMAIL_ADDRESS", "config-test@example.com");

        let settings = get_configuration().expect("Failed to read configuration.");

        assert_eq!(
            Some("config-test@example.com"),
            settings.from_email_address.as_deref()
        );
    }

    #[test]
    fn known_environment_names_parse() {
        assert_eq!("test", Environment::try_from("TEST".to_string()).unwrap().as_str());
        assert_eq!(
            "production",
            Environment::try_from("production".to_string()).unwrap().as_str()
        );
    }

    #[test]
    fn unknown_environment_names_are_rejected() {
        assert!(Environment::try_from("staging".to_string()).is_err());
    }
}
