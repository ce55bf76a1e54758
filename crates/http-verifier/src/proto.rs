use mime::Mime;

pub const VERIFY_TEXT_PATH: &str = "/api/verify-text";
pub const HEALTH_PATH: &str = "/";

/// Returns `true` for `application/json` and `application/*+json`.
pub fn is_json(content_type: &str) -> bool {
    let Ok(mime) = content_type.parse::<Mime>() else {
        return false;
    };
    mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("application/problem+json"));
        assert!(!is_json("text/html"));
        assert!(!is_json("text/json-ish"));
        assert!(!is_json(""));
    }
}
