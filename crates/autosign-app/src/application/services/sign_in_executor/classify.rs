use autosign_domain::SignOutcome;
use autosign_infrastructure::http::{ApiError, LoginResponse, SignResponse};

/// Where a login answer leaves the sign-in
#[derive(Debug, PartialEq)]
pub(super) enum LoginStep<'a> {
    /// Logged in; sign with this CSRF token
    Proceed(&'a str),
    /// Terminal answer, no sign call
    Done(SignOutcome),
}

pub(super) fn classify_login(resp: &LoginResponse) -> Result<LoginStep<'_>, ApiError> {
    let message = match resp.status {
        200 => return resp.token().map(LoginStep::Proceed),
        403 => "Wrong Password (403)".to_string(),
        404 => "User doesn't exist (404)".to_string(),
        500 => "Internal Server Error (500)".to_string(),
        other => unknown_status(other),
    };

    Ok(LoginStep::Done(SignOutcome::failure(message)))
}

pub(super) fn classify_sign(resp: &SignResponse) -> Result<SignOutcome, ApiError> {
    let outcome = match resp.status {
        200 => SignOutcome::Success {
            message: resp.message(),
            signed_flow: resp.signed_flow()?,
            total_flow: resp.total_flow()?,
        },
        403 => SignOutcome::AlreadySigned,
        404 => SignOutcome::failure("Token Expired (404)"),
        500 => SignOutcome::failure("Internal Server Error (500)"),
        other => SignOutcome::failure(unknown_status(other)),
    };

    Ok(outcome)
}

fn unknown_status(status: i64) -> String {
    format!("Unknown error code: {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login(value: serde_json::Value) -> LoginResponse {
        serde_json::from_value(value).unwrap()
    }

    fn sign(value: serde_json::Value) -> SignResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_login_ok_proceeds_with_token() {
        let resp = login(json!({"status": 200, "token": "T1"}));
        assert_eq!(classify_login(&resp).unwrap(), LoginStep::Proceed("T1"));
    }

    #[test]
    fn test_login_ok_without_token_is_error() {
        let resp = login(json!({"status": 200}));
        assert!(matches!(
            classify_login(&resp),
            Err(ApiError::MissingField("token"))
        ));
    }

    #[test]
    fn test_login_rejections() {
        let cases = [
            (403, "Wrong Password (403)"),
            (404, "User doesn't exist (404)"),
            (500, "Internal Server Error (500)"),
            (418, "Unknown error code: 418"),
        ];

        for (status, expected) in cases {
            let resp = login(json!({"status": status}));
            assert_eq!(
                classify_login(&resp).unwrap(),
                LoginStep::Done(SignOutcome::failure(expected)),
                "status {}",
                status
            );
        }
    }

    #[test]
    fn test_sign_success() {
        let resp = sign(json!({"status": 200, "message": "ok", "signflow": 5, "flow": 105}));
        assert_eq!(
            classify_sign(&resp).unwrap(),
            SignOutcome::Success {
                message: "ok".to_string(),
                signed_flow: 5.0,
                total_flow: 105.0,
            }
        );
    }

    #[test]
    fn test_sign_success_requires_flow() {
        let resp = sign(json!({"status": 200, "message": "ok"}));
        assert!(matches!(
            classify_sign(&resp),
            Err(ApiError::MissingField("flow"))
        ));
    }

    #[test]
    fn test_odd_fields_do_not_change_status_outcome() {
        let resp = sign(json!({"status": 403, "message": "already", "flow": ""}));
        assert_eq!(classify_sign(&resp).unwrap(), SignOutcome::AlreadySigned);

        let resp = sign(json!({"status": 403, "message": {"code": 1}}));
        assert_eq!(classify_sign(&resp).unwrap(), SignOutcome::AlreadySigned);

        let resp = login(json!({"status": 403, "token": 12345}));
        assert_eq!(
            classify_login(&resp).unwrap(),
            LoginStep::Done(SignOutcome::failure("Wrong Password (403)"))
        );
    }

    #[test]
    fn test_sign_other_statuses() {
        assert_eq!(
            classify_sign(&sign(json!({"status": 403}))).unwrap(),
            SignOutcome::AlreadySigned
        );
        assert_eq!(
            classify_sign(&sign(json!({"status": 404}))).unwrap(),
            SignOutcome::failure("Token Expired (404)")
        );
        assert_eq!(
            classify_sign(&sign(json!({"status": 500}))).unwrap(),
            SignOutcome::failure("Internal Server Error (500)")
        );
        assert_eq!(
            classify_sign(&sign(json!({"status": 201}))).unwrap(),
            SignOutcome::failure("Unknown error code: 201")
        );
    }
}
