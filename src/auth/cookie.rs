//! Session cookie rendering.

use url::Url;

use super::{SESSION_COOKIE_NAME, SESSION_TTL_SECONDS};

/// Build the `Set-Cookie` value carrying a freshly issued session token.
///
/// `Secure` is only set when the request URL parses as https; an
/// unparsable URL degrades to the `HttpOnly` + `SameSite=Strict` baseline
/// without `Secure`. `Max-Age` matches the token's own validity window.
#[must_use]
pub fn build_session_cookie(token: &str, request_url: &str) -> String {
    let secure_flag = if is_https(request_url) { " Secure;" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly;{secure_flag} Path=/; SameSite=Strict; Max-Age={SESSION_TTL_SECONDS}"
    )
}

/// Build the cookie that clears the session on logout.
#[must_use]
pub fn clear_session_cookie(request_url: &str) -> String {
    let secure_flag = if is_https(request_url) { " Secure;" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}=; HttpOnly;{secure_flag} Path=/; SameSite=Strict; Max-Age=0"
    )
}

fn is_https(request_url: &str) -> bool {
    Url::parse(request_url)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_request_sets_secure() {
        let cookie = build_session_cookie("tok", "https://mail.example.com/login");
        assert_eq!(
            cookie,
            "iding-session=tok; HttpOnly; Secure; Path=/; SameSite=Strict; Max-Age=86400"
        );
    }

    #[test]
    fn http_request_omits_secure() {
        let cookie = build_session_cookie("tok", "http://localhost:8080/login");
        assert_eq!(
            cookie,
            "iding-session=tok; HttpOnly; Path=/; SameSite=Strict; Max-Age=86400"
        );
    }

    #[test]
    fn unparsable_url_degrades_to_no_secure() {
        let cookie = build_session_cookie("tok", "not a url");
        assert_eq!(
            cookie,
            "iding-session=tok; HttpOnly; Path=/; SameSite=Strict; Max-Age=86400"
        );
        assert_eq!(cookie, build_session_cookie("tok", ""));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie("https://mail.example.com/logout");
        assert_eq!(
            cookie,
            "iding-session=; HttpOnly; Secure; Path=/; SameSite=Strict; Max-Age=0"
        );
    }
}
