//! Request state for a single form (analyze, compare, GEO)
//!
//! A form allows one outstanding request at a time. A failed request clears
//! whatever result the form was showing and leaves a dismissible notice.

use crate::error::ClientError;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("a request is already in flight for this form")]
    InFlight,
    #[error("no request is in flight for this form")]
    NotInFlight,
}

#[derive(Debug)]
pub struct Form<T> {
    name: &'static str,
    /// Notice text used when the provider gives no message
    fallback: &'static str,
    in_flight: bool,
    result: Option<T>,
    notice: Option<String>,
}

impl<T> Form<T> {
    pub fn new(name: &'static str, fallback: &'static str) -> Self {
        Self {
            name,
            fallback,
            in_flight: false,
            result: None,
            notice: None,
        }
    }

    /// Start a request. The previous result and notice are cleared.
    pub fn begin(&mut self) -> Result<(), FormError> {
        if self.in_flight {
            return Err(FormError::InFlight);
        }
        debug!(form = self.name, "request started");
        self.in_flight = true;
        self.result = None;
        self.notice = None;
        Ok(())
    }

    /// Complete the outstanding request
    pub fn finish(&mut self, outcome: Result<T, ClientError>) -> Result<(), FormError> {
        if !self.in_flight {
            return Err(FormError::NotInFlight);
        }
        self.in_flight = false;
        match outcome {
            Ok(value) => {
                debug!(form = self.name, "request succeeded");
                self.result = Some(value);
            }
            Err(err) => {
                debug!(form = self.name, error = %err, "request failed");
                self.result = None;
                self.notice = Some(err.display_message(self.fallback));
            }
        }
        Ok(())
    }

    /// `begin`, run `request`, `finish`
    pub fn submit<F>(&mut self, request: F) -> Result<Option<&T>, FormError>
    where
        F: FnOnce() -> Result<T, ClientError>,
    {
        self.begin()?;
        let outcome = request();
        self.finish(outcome)?;
        Ok(self.result.as_ref())
    }

    /// Abandon the outstanding request (navigation away); nothing is shown
    pub fn abandon(&mut self) {
        self.in_flight = false;
        self.result = None;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

/// Fallback notices per form
pub const ANALYZE_FALLBACK: &str = "Failed to analyze URL. Please try again.";
pub const COMPARE_FALLBACK: &str = "Failed to compare URLs. Please try again.";
pub const GEO_FALLBACK: &str = "Failed to analyze location. Please try again.";
pub const SUGGEST_FALLBACK: &str = "Failed to fetch keyword suggestions. Please try again.";
pub const PERFORMANCE_FALLBACK: &str = "Failed to analyze performance. Please try again.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_while_in_flight_is_rejected() {
        let mut form: Form<u32> = Form::new("analyze", ANALYZE_FALLBACK);
        form.begin().unwrap();
        assert_eq!(form.begin(), Err(FormError::InFlight));
        assert!(form.is_in_flight());
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut form: Form<u32> = Form::new("analyze", ANALYZE_FALLBACK);
        assert_eq!(form.finish(Ok(1)), Err(FormError::NotInFlight));
    }

    #[test]
    fn success_shows_result() {
        let mut form = Form::new("analyze", ANALYZE_FALLBACK);
        let shown = form.submit(|| Ok(42)).unwrap();
        assert_eq!(shown, Some(&42));
        assert!(!form.is_in_flight());
        assert_eq!(form.notice(), None);
    }

    #[test]
    fn failure_clears_previous_result() {
        let mut form = Form::new("analyze", ANALYZE_FALLBACK);
        form.submit(|| Ok(42)).unwrap();

        let shown = form
            .submit(|| Err(ClientError::provider(500, None)))
            .unwrap();
        assert_eq!(shown, None);
        assert_eq!(form.result(), None);
        assert_eq!(form.notice(), Some(ANALYZE_FALLBACK));
    }

    #[test]
    fn provider_message_becomes_notice_and_is_dismissible() {
        let mut form: Form<u32> = Form::new("geo", GEO_FALLBACK);
        form.submit(|| Err(ClientError::provider(400, Some("Unknown location".into()))))
            .unwrap();
        assert_eq!(form.notice(), Some("Unknown location"));

        form.dismiss_notice();
        assert_eq!(form.notice(), None);
    }

    #[test]
    fn resubmit_after_failure_clears_notice() {
        let mut form = Form::new("compare", COMPARE_FALLBACK);
        form.submit(|| Err(ClientError::Timeout(30))).unwrap();
        assert!(form.notice().is_some());
        form.submit(|| Ok("ok")).unwrap();
        assert_eq!(form.notice(), None);
        assert_eq!(form.result(), Some(&"ok"));
    }

    #[test]
    fn abandon_releases_the_form() {
        let mut form: Form<u32> = Form::new("analyze", ANALYZE_FALLBACK);
        form.begin().unwrap();
        form.abandon();
        assert!(!form.is_in_flight());
        assert!(form.begin().is_ok());
    }
}
