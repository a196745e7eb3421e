use claims::assert_err;
use mailroom::{assume_role, AssumeRoleRequest, DispatchError, ErrorKind, Settings};

use crate::helpers::complete_settings;

fn request() -> AssumeRoleRequest {
    AssumeRoleRequest {
        role_arn: "arn:aws:iam::123456789012:role/mailer".into(),
        region: "us-east-1".into(),
    }
}

#[tokio::test]
async fn a_missing_access_key_is_reported_first() {
    // arrange
    let settings = Settings::default();

    // act
    let error = assert_err!(assume_role(&settings, &request()).await);

    // assert
    match &error {
        DispatchError::Internal(message) => {
            assert_eq!("Missing environment variable: AWS_ACCESS_KEY_ID", message)
        }
        other => panic!("expected an internal error, got {:?}", other),
    }
    assert_eq!(ErrorKind::InternalServerError, error.kind());
}

#[tokio::test]
async fn a_missing_secret_key_is_reported_after_the_access_key() {
    // arrange
    let settings = Settings {
        aws_secret_access_key: None,
        ..complete_settings()
    };

    // act
    let error = assert_err!(assume_role(&settings, &request()).await);

    // assert
    match error {
        DispatchError::Internal(message) => {
            assert_eq!("Missing environment variable: AWS_SECRET_ACCESS_KEY", message)
        }
        other => panic!("expected an internal error, got {:?}", other),
    }
}

#[tokio::test]
async fn a_missing_role_arn_is_rejected_before_the_region() {
    // arrange
    let settings = complete_settings();
    let request = AssumeRoleRequest {
        role_arn: "".into(),
        region: "".into(),
    };

    // act
    let error = assert_err!(assume_role(&settings, &request).await);

    // assert
    match error {
        DispatchError::Validation(message) => assert_eq!("Missing variable: roleArn", message),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn a_missing_region_is_rejected_once_the_role_arn_passes() {
    // arrange
    let settings = complete_settings();
    let request = AssumeRoleRequest {
        region: "".into(),
        ..request()
    };

    // act
    let error = assert_err!(assume_role(&settings, &request).await);

    // assert
    match error {
        DispatchError::Validation(message) => assert_eq!("Missing variable: region", message),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_configuration_values_count_as_missing() {
    // arrange
    let settings = Settings {
        aws_access_key_id: Some("".into()),
        ..complete_settings()
    };

    // act
    let error = assert_err!(assume_role(&settings, &request()).await);

    // assert
    match error {
        DispatchError::Internal(message) => {
            assert_eq!("Missing environment variable: AWS_ACCESS_KEY_ID", message)
        }
        other => panic!("expected an internal error, got {:?}", other),
    }
}
