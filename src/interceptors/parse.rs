//! Extraction of backend error codes from failure bodies.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::HttpFailure;
use crate::traits::Translator;

/// `[err:CODE] message` inside an `ErrExec` entry.
static DB_ERROR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[err:([^\[\]]+)\]\s(.+)").expect("Invalid db error regex"));

/// `err:CODE` anywhere in a plain-text body.
static TEXT_ERROR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"err:(.*)").expect("Invalid text error regex"));

/// Code used for `ErrExec` messages that do not carry `[err:CODE]`.
pub const UNKNOWN_CODE: &str = "unknown";

/// A backend error code with the backend's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedError {
    pub code: String,
    pub message: String,
}

fn error_key(code: &str) -> String {
    format!("errors.{}", code)
}

/// Parse one `ErrExec` message.
///
/// Returns `None` when the message does not follow `[err:CODE] text`.
pub fn parse_db_error(message: &str) -> Option<CodedError> {
    DB_ERROR_REGEX.captures(message).map(|caps| CodedError {
        code: caps[1].to_string(),
        message: caps[2].to_string(),
    })
}

/// Every `ErrExec` entry of the failure body as `(code, message)`.
///
/// Entries that do not match the pattern become `unknown` with the raw
/// entry as message, and are logged under their own target. `None` when
/// there are no `ErrExec` entries.
pub fn database_errors(failure: &HttpFailure) -> Option<Vec<CodedError>> {
    let body = failure.body()?;
    let errors: Vec<CodedError> = body
        .errors()
        .iter()
        .filter(|entry| entry.is_exec())
        .map(|entry| {
            parse_db_error(&entry.message).unwrap_or_else(|| {
                tracing::warn!(
                    target: "credportal::malformed_error",
                    status = ?failure.status(),
                    "ErrExec message without [err:CODE]: {}",
                    entry.raw_text()
                );
                CodedError {
                    code: UNKNOWN_CODE.to_string(),
                    message: entry.raw_text(),
                }
            })
        })
        .collect();

    (!errors.is_empty()).then_some(errors)
}

/// Localized message for the structured `ErrExec` errors in the body.
///
/// Each code is translated when a translation exists, otherwise the
/// backend message is used. Results are joined with newlines.
pub fn extract_structured_db_error_message(
    failure: &HttpFailure,
    translator: &dyn Translator,
) -> Option<String> {
    let errors = database_errors(failure)?;
    let messages: Vec<String> = errors
        .into_iter()
        .map(|e| translator.try_translate(&error_key(&e.code)).unwrap_or(e.message))
        .collect();
    Some(messages.join("\n"))
}

/// Localized message for an `err:CODE` plain-text body.
///
/// Only returns something when the code has a translation; the caller
/// falls back to its generic message otherwise.
pub fn extract_textual_error_code(
    failure: &HttpFailure,
    translator: &dyn Translator,
) -> Option<String> {
    let text = failure.body()?.plain_text()?;
    let caps = TEXT_ERROR_REGEX.captures(text)?;
    let code = caps[1].trim();
    if code.is_empty() {
        return None;
    }
    translator.try_translate(&error_key(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MapTranslator;
    use crate::error::{BackendError, ErrorBody};

    fn http(status: u16, body: ErrorBody) -> HttpFailure {
        HttpFailure::Http { status, body }
    }

    fn exec(message: &str) -> BackendError {
        BackendError::new("ErrExec", message)
    }

    #[test]
    fn test_parse_db_error() {
        assert_eq!(
            parse_db_error("[err:DUP_ENTRY] duplicate row"),
            Some(CodedError {
                code: "DUP_ENTRY".to_string(),
                message: "duplicate row".to_string()
            })
        );
        assert_eq!(parse_db_error("duplicate row"), None);
        assert_eq!(parse_db_error("[err:] x"), None);
        assert_eq!(parse_db_error("[err:A[B] x"), None);
    }

    #[test]
    fn test_structured_without_translation_uses_message() {
        let failure = http(422, ErrorBody::Structured(vec![exec("[err:DUP_ENTRY] duplicate row")]));
        let message = extract_structured_db_error_message(&failure, &MapTranslator::new());
        assert_eq!(message.as_deref(), Some("duplicate row"));
    }

    #[test]
    fn test_structured_with_translation() {
        let failure = http(422, ErrorBody::Structured(vec![exec("[err:DUP_ENTRY] duplicate row")]));
        let translator = MapTranslator::new().with("errors.DUP_ENTRY", "Entry already exists");
        let message = extract_structured_db_error_message(&failure, &translator);
        assert_eq!(message.as_deref(), Some("Entry already exists"));
    }

    #[test]
    fn test_structured_joins_and_filters() {
        let failure = http(
            422,
            ErrorBody::Structured(vec![
                exec("[err:A] first"),
                BackendError::new("ErrValidation", "[err:B] ignored"),
                exec("no code here"),
            ]),
        );
        let translator = MapTranslator::new().with("errors.A", "Translated A");
        let message = extract_structured_db_error_message(&failure, &translator);
        assert_eq!(message.as_deref(), Some("Translated A\nno code here"));
    }

    #[test]
    fn test_unknown_code_can_be_translated() {
        let failure = http(404, ErrorBody::Structured(vec![exec("garbled")]));
        let translator = MapTranslator::new().with("errors.unknown", "Something went wrong");
        let errors = database_errors(&failure).unwrap();
        assert_eq!(errors[0].code, "unknown");
        assert_eq!(
            extract_structured_db_error_message(&failure, &translator).as_deref(),
            Some("Something went wrong")
        );
    }

    #[test]
    fn test_exec_entry_without_string_message_falls_back_to_unknown() {
        let body = ErrorBody::from_bytes(
            br#"{"errors":[{"type":"ErrExec","message":null},{"type":"ErrExec","message":{"detail":"x"}}]}"#,
        );
        let failure = http(422, body);

        let errors = database_errors(&failure).unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.code == UNKNOWN_CODE));
        assert!(errors[0].message.contains("null"));
        assert!(errors[1].message.contains("detail"));

        let message = extract_structured_db_error_message(&failure, &MapTranslator::new()).unwrap();
        assert_eq!(message.lines().count(), 2);

        let translator = MapTranslator::new().with("errors.unknown", "Something went wrong");
        assert_eq!(
            extract_structured_db_error_message(&failure, &translator).as_deref(),
            Some("Something went wrong\nSomething went wrong")
        );
    }

    #[test]
    fn test_structured_none_cases() {
        let translator = MapTranslator::new();
        let empty = http(404, ErrorBody::Structured(vec![]));
        assert_eq!(extract_structured_db_error_message(&empty, &translator), None);

        let no_exec = http(422, ErrorBody::Structured(vec![BackendError::new("Other", "x")]));
        assert_eq!(extract_structured_db_error_message(&no_exec, &translator), None);

        let text = http(422, ErrorBody::PlainText("[err:A] x".into()));
        assert_eq!(extract_structured_db_error_message(&text, &translator), None);

        let network = HttpFailure::from_transport(&crate::traits::HttpError::Timeout("t".into()));
        assert_eq!(extract_structured_db_error_message(&network, &translator), None);
    }

    #[test]
    fn test_textual_code_with_translation() {
        let failure = http(400, ErrorBody::PlainText("err:INVALID_HASH".into()));
        let translator = MapTranslator::new().with("errors.INVALID_HASH", "Bad hash");
        assert_eq!(
            extract_textual_error_code(&failure, &translator).as_deref(),
            Some("Bad hash")
        );
    }

    #[test]
    fn test_textual_code_without_translation() {
        let failure = http(400, ErrorBody::PlainText("err:INVALID_HASH".into()));
        assert_eq!(extract_textual_error_code(&failure, &MapTranslator::new()), None);
    }

    #[test]
    fn test_textual_code_requires_pattern() {
        let translator = MapTranslator::new().with("errors.INVALID_HASH", "Bad hash");
        let failure = http(400, ErrorBody::PlainText("INVALID_HASH".into()));
        assert_eq!(extract_textual_error_code(&failure, &translator), None);

        let failure = http(400, ErrorBody::PlainText("err:".into()));
        assert_eq!(extract_textual_error_code(&failure, &translator), None);

        let failure = http(400, ErrorBody::Empty);
        assert_eq!(extract_textual_error_code(&failure, &translator), None);
    }
}
