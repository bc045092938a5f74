//! HTTP status classification

use serde::{Deserialize, Serialize};

/// Severity bucket for an observed HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Bad,
}

/// Classify any integer as a status severity.
///
/// 2xx is `Ok`, 3xx is `Info`, everything else (including nonsense values)
/// is `Bad`.
pub fn classify(code: i64) -> Severity {
    match code {
        200..=299 => Severity::Ok,
        300..=399 => Severity::Info,
        _ => Severity::Bad,
    }
}

/// Short reason phrase for the codes the dashboard knows about, empty otherwise
pub fn reason_phrase(code: i64) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        301 => "Moved Permanently",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(199), Severity::Bad);
        assert_eq!(classify(200), Severity::Ok);
        assert_eq!(classify(299), Severity::Ok);
        assert_eq!(classify(300), Severity::Info);
        assert_eq!(classify(399), Severity::Info);
        assert_eq!(classify(400), Severity::Bad);
    }

    #[test]
    fn test_classify_out_of_range() {
        assert_eq!(classify(0), Severity::Bad);
        assert_eq!(classify(-1), Severity::Bad);
        assert_eq!(classify(i64::MIN), Severity::Bad);
        assert_eq!(classify(i64::MAX), Severity::Bad);
        assert_eq!(classify(503), Severity::Bad);
    }

    #[test]
    fn test_reason_phrases() {
        let known = [
            (200, "OK"),
            (204, "No Content"),
            (301, "Moved Permanently"),
            (304, "Not Modified"),
            (307, "Temporary Redirect"),
            (400, "Bad Request"),
            (401, "Unauthorized"),
            (403, "Forbidden"),
            (404, "Not Found"),
            (405, "Method Not Allowed"),
        ];
        for (code, phrase) in known {
            assert_eq!(reason_phrase(code), phrase, "code {}", code);
        }

        assert_eq!(reason_phrase(418), "");
        assert_eq!(reason_phrase(500), "");
        assert_eq!(reason_phrase(-200), "");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&classify(204)).unwrap(), "\"ok\"");
        assert_eq!(serde_json::to_string(&classify(307)).unwrap(), "\"info\"");
        assert_eq!(serde_json::to_string(&classify(404)).unwrap(), "\"bad\"");
    }
}
