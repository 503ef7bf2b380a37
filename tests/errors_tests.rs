use std::error::Error;

use chatcbi::core::models::ChatResult;
use chatcbi::errors::{AuthError, ChatRequestError, ConfigError};

#[test]
fn test_errors_implement_error_trait() {
    fn assert_error<T: Error + Send + Sync + 'static>(_: &T) {}

    assert_error(&AuthError::MissingToken);
    assert_error(&ChatRequestError::EmptyQuestion);
    assert_error(&ConfigError::Missing("CBI_CLIENT_ID"));
}

#[test]
fn test_error_display() {
    let error = AuthError::Rejected {
        status: 401,
        body: "nope".to_string(),
    };
    assert_eq!(format!("{error}"), "Failed to obtain token (401): nope");

    let error = ChatRequestError::Status {
        status: 502,
        body: "bad gateway".to_string(),
    };
    assert_eq!(format!("{error}"), "Request failed (502): bad gateway");

    let error = ConfigError::Missing("CBI_CLIENT_SECRET");
    assert_eq!(
        format!("{error}"),
        "Missing required configuration: CBI_CLIENT_SECRET"
    );
}

#[test]
fn test_status_codes_for_results() {
    assert_eq!(ChatRequestError::EmptyQuestion.status_code(), 400);
    assert_eq!(ChatRequestError::Http("refused".into()).status_code(), 500);
    assert_eq!(
        ChatRequestError::from(AuthError::Rejected {
            status: 403,
            body: String::new()
        })
        .status_code(),
        403
    );
    assert_eq!(
        ChatRequestError::from(AuthError::Http("timeout".into())).status_code(),
        500
    );
}

#[test]
fn test_chat_error_converts_into_error_result() {
    let result = ChatResult::from(ChatRequestError::Status {
        status: 404,
        body: String::new(),
    });
    assert_eq!(
        result,
        ChatResult::Error {
            code: 404,
            msg: "Request failed (404): ".to_string()
        }
    );

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> ChatRequestError {
        ChatRequestError::from(err)
    }
}
