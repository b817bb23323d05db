//! Discovering what the grammar accepts at the caret
//!
//! The probe never parses anything itself. It appends a sentinel that no grammar position
//! accepts to the text before the caret, hands the result to the external expression checker,
//! and reads the expectations off the parse error that comes back.

use crate::error::{CompletionError, CompletionResult};
use crate::types::Expectations;
use tracing::debug;

/// Default sentinel appended to the prefix to force a parse error
pub const DEFAULT_SENTINEL: &str = "**";

/// Failure reported by an [`ExpressionChecker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// Syntax error carrying what the parser expected at the failure point
    Parse(Expectations),
    /// Any other failure; the message is only logged
    Other(String),
}

/// Validates class-expression text
pub trait ExpressionChecker {
    /// Returns `Ok(())` for a syntactically valid expression
    fn check(&self, text: &str) -> Result<(), CheckError>;
}

impl<T: ExpressionChecker + ?Sized> ExpressionChecker for Box<T> {
    fn check(&self, text: &str) -> Result<(), CheckError> {
        (**self).check(text)
    }
}

/// Result of probing a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The parser stopped at the sentinel and reported these expectations
    Expected(Expectations),
    /// The poisoned prefix parsed; there is no completion context
    ParseOk,
}

/// Asks the expression checker what may legally follow a prefix
pub struct ContextProbe {
    checker: Box<dyn ExpressionChecker>,
    sentinel: String,
}

impl ContextProbe {
    pub fn new(checker: Box<dyn ExpressionChecker>) -> Self {
        Self::with_sentinel(checker, DEFAULT_SENTINEL)
    }

    pub fn with_sentinel(checker: Box<dyn ExpressionChecker>, sentinel: impl Into<String>) -> Self {
        Self {
            checker,
            sentinel: sentinel.into(),
        }
    }

    /// Probe the text preceding the partial token
    pub fn probe(&self, prefix: &str) -> CompletionResult<ProbeOutcome> {
        let poisoned = format!("{}{}", prefix, self.sentinel);
        match self.checker.check(&poisoned) {
            Err(CheckError::Parse(expectations)) => {
                debug!(
                    kinds = ?expectations.kinds,
                    keywords = expectations.keywords.len(),
                    "Probe collected expectations"
                );
                Ok(ProbeOutcome::Expected(expectations))
            }
            Ok(()) => {
                debug!(sentinel = %self.sentinel, "Checker accepted poisoned prefix");
                Ok(ProbeOutcome::ParseOk)
            }
            Err(CheckError::Other(message)) => Err(CompletionError::Checker(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityKind, ExpectedKinds};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingChecker {
        seen: Rc<RefCell<Vec<String>>>,
        result: Result<(), CheckError>,
    }

    impl ExpressionChecker for RecordingChecker {
        fn check(&self, text: &str) -> Result<(), CheckError> {
            self.seen.borrow_mut().push(text.to_string());
            self.result.clone()
        }
    }

    fn probe_with(result: Result<(), CheckError>) -> (ContextProbe, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let checker = RecordingChecker {
            seen: Rc::clone(&seen),
            result,
        };
        (ContextProbe::new(Box::new(checker)), seen)
    }

    #[test]
    fn test_probe_appends_sentinel() {
        let expectations = Expectations::new(
            ExpectedKinds::none().with(EntityKind::Class),
            vec!["not".to_string()],
        );
        let (probe, seen) = probe_with(Err(CheckError::Parse(expectations.clone())));

        let outcome = probe.probe("Person and ").unwrap();

        assert_eq!(seen.borrow().as_slice(), ["Person and **"]);
        assert_eq!(outcome, ProbeOutcome::Expected(expectations));
    }

    #[test]
    fn test_probe_parse_ok() {
        let (probe, _) = probe_with(Ok(()));
        assert_eq!(probe.probe("Person").unwrap(), ProbeOutcome::ParseOk);
    }

    #[test]
    fn test_probe_opaque_failure() {
        let (probe, _) = probe_with(Err(CheckError::Other("ontology not loaded".to_string())));
        let err = probe.probe("Person").unwrap_err();
        assert!(matches!(err, CompletionError::Checker(msg) if msg == "ontology not loaded"));
    }

    #[test]
    fn test_custom_sentinel() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let checker = RecordingChecker {
            seen: Rc::clone(&seen),
            result: Ok(()),
        };
        let probe = ContextProbe::with_sentinel(Box::new(checker), "#!#");
        probe.probe("").unwrap();
        assert_eq!(seen.borrow().as_slice(), ["#!#"]);
    }
}
