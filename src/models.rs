use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Enquiry-type label applied when the form does not supply one.
pub const DEFAULT_ENQUIRY_TYPE: &str = "Utilities Comparison";

/// A lead-generation form submission, as posted by the website.
///
/// Request-scoped only; submissions are never persisted. Unknown fields are
/// ignored so the relay tolerates front-end additions.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnquirySubmission {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub current_supplier: Option<String>,
    pub enquiry_type: Option<String>,
    pub message: Option<String>,
    pub marketing_opt_in: bool,
    /// Honeypot field. Hidden from human visitors; any non-blank value marks
    /// the submission as a bot.
    pub company_website: Option<String>,
    /// Client-reported epoch milliseconds at which the form was first
    /// rendered. Arrives as a number or a numeric string.
    pub form_started_at: Option<Value>,
}

impl EnquirySubmission {
    /// The enquiry-type label used in outbound emails: the trimmed
    /// `enquiryType` when non-blank, else [`DEFAULT_ENQUIRY_TYPE`].
    pub fn resolved_enquiry_type(&self) -> &str {
        match self.enquiry_type.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_ENQUIRY_TYPE,
        }
    }

    /// `currentSupplier` is required exactly when no explicit enquiry type
    /// was supplied (the default utilities-comparison flow).
    pub fn requires_current_supplier(&self) -> bool {
        self.enquiry_type
            .as_deref()
            .map_or(true, |t| t.trim().is_empty())
    }

    /// Enforces required-field presence.
    ///
    /// `name`, `businessName`, `email` and `phone` are always required;
    /// `currentSupplier` only on the default flow. Email format is not
    /// checked here; that is the submitting page's concern.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);

        if missing(&self.name)
            || missing(&self.business_name)
            || missing(&self.email)
            || missing(&self.phone)
            || (self.requires_current_supplier() && missing(&self.current_supplier))
        {
            return Err(ValidationError);
        }

        Ok(())
    }

    /// Parses `formStartedAt` the way JS `Number(...)` would, yielding a
    /// finite epoch-millis value or `None`.
    pub fn form_started_at_millis(&self) -> Option<f64> {
        let parsed = match self.form_started_at.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }
}

/// Required-field validation failure. Deliberately carries no per-field
/// detail; the caller surfaces a single generic message.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationError;

/// Uniform success body returned for accepted (and silently dropped)
/// submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryResponse {
    pub success: bool,
    pub message: String,
}

impl EnquiryResponse {
    /// The one success shape both endpoints return, for genuine submissions
    /// and silently rejected bots alike.
    pub fn submitted() -> Self {
        Self {
            success: true,
            message: "Enquiry submitted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_submission() -> EnquirySubmission {
        EnquirySubmission {
            name: Some("Jane Doe".to_string()),
            business_name: Some("Acme Ltd".to_string()),
            email: Some("jane@acme.com".to_string()),
            phone: Some("07000000000".to_string()),
            current_supplier: Some("EDF".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn complete_default_flow_submission_is_valid() {
        assert!(complete_submission().validate().is_ok());
    }

    #[test]
    fn each_core_field_is_required() {
        let strips: [fn(&mut EnquirySubmission); 4] = [
            |s| s.name = None,
            |s| s.business_name = None,
            |s| s.email = Some(String::new()),
            |s| s.phone = None,
        ];
        for strip in strips {
            let mut submission = complete_submission();
            strip(&mut submission);
            assert_eq!(submission.validate(), Err(ValidationError));
        }
    }

    #[test]
    fn supplier_required_only_on_default_flow() {
        let mut submission = complete_submission();
        submission.current_supplier = None;
        assert_eq!(submission.validate(), Err(ValidationError));

        submission.enquiry_type = Some("Sub-broker Partnership".to_string());
        assert!(submission.validate().is_ok());

        // Blank enquiry type does not excuse the supplier field
        submission.enquiry_type = Some("  ".to_string());
        assert_eq!(submission.validate(), Err(ValidationError));
    }

    #[test]
    fn enquiry_type_resolution() {
        let mut submission = complete_submission();
        assert_eq!(submission.resolved_enquiry_type(), DEFAULT_ENQUIRY_TYPE);

        submission.enquiry_type = Some("  Partnership Enquiry  ".to_string());
        assert_eq!(submission.resolved_enquiry_type(), "Partnership Enquiry");

        submission.enquiry_type = Some(String::new());
        assert_eq!(submission.resolved_enquiry_type(), DEFAULT_ENQUIRY_TYPE);
    }

    #[test]
    fn form_started_at_accepts_number_or_numeric_string() {
        let mut submission = complete_submission();
        submission.form_started_at = Some(json!(1700000000000u64));
        assert_eq!(submission.form_started_at_millis(), Some(1700000000000.0));

        submission.form_started_at = Some(json!("1700000000000"));
        assert_eq!(submission.form_started_at_millis(), Some(1700000000000.0));

        submission.form_started_at = Some(json!("not a number"));
        assert_eq!(submission.form_started_at_millis(), None);

        submission.form_started_at = None;
        assert_eq!(submission.form_started_at_millis(), None);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let submission: EnquirySubmission = serde_json::from_value(json!({
            "name": "Jane Doe",
            "businessName": "Acme Ltd",
            "email": "jane@acme.com",
            "phone": "07000000000",
            "currentSupplier": "EDF",
            "marketingOptIn": true,
            "formStartedAt": 1700000000000u64,
            "someFutureField": "ignored"
        }))
        .unwrap();

        assert_eq!(submission.business_name.as_deref(), Some("Acme Ltd"));
        assert!(submission.marketing_opt_in);
        assert!(submission.validate().is_ok());
    }
}
