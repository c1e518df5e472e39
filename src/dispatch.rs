use crate::email_client::ResendClient;
use crate::errors::AppError;
use crate::models::EnquirySubmission;
use chrono::Utc;

/// Sender for business notifications.
pub const BUSINESS_SENDER: &str = "website@revo-utilities.com";

/// Sender for customer confirmations.
pub const CUSTOMER_SENDER: &str = "reducemybills@revo-utilities.com";

/// Callback number quoted in the customer confirmation.
const CALLBACK_NUMBER: &str = "0141 280 9986";

/// Provider message ids for the two emails sent per accepted enquiry.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub business_message_id: String,
    pub customer_message_id: String,
}

/// Sends the business notification followed by the customer confirmation.
///
/// The sends are sequential, business first, so a degraded provider fails
/// before the customer is told anything. Either failure is terminal for the
/// request; a confirmation failure after the notification already went out
/// is logged as a partial delivery but still surfaces as a failure.
pub async fn send_enquiry_emails(
    email_client: &ResendClient,
    business_inbox: &str,
    submission: &EnquirySubmission,
) -> Result<DispatchResult, AppError> {
    let enquiry_type = submission.resolved_enquiry_type();

    tracing::info!("Sending business notification to: {}", business_inbox);
    let business_message_id = email_client
        .send(
            BUSINESS_SENDER,
            business_inbox,
            &format!("New Website Enquiry ({})", enquiry_type),
            &business_notification_html(submission),
        )
        .await?;

    let customer_email = submission.email.as_deref().unwrap_or_default();
    let customer_message_id = match email_client
        .send(
            CUSTOMER_SENDER,
            customer_email,
            "Thank you for your enquiry - Revo Utilities",
            &customer_confirmation_html(submission),
        )
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(
                "Partial dispatch: business notification {} delivered but customer confirmation failed",
                business_message_id
            );
            return Err(e);
        }
    };

    Ok(DispatchResult {
        business_message_id,
        customer_message_id,
    })
}

/// HTML body embedding every submitted field. The current-supplier row only
/// appears on the default flow where the field was required, and the message
/// row only when free text was provided.
fn business_notification_html(submission: &EnquirySubmission) -> String {
    let enquiry_type = submission.resolved_enquiry_type();

    let supplier_row = if submission.requires_current_supplier() {
        format!(
            "<p><strong>Current Supplier:</strong> {}</p>\n        ",
            submission.current_supplier.as_deref().unwrap_or_default()
        )
    } else {
        String::new()
    };

    let message_row = match submission.message.as_deref() {
        Some(message) if !message.is_empty() => {
            format!("<p><strong>Message:</strong> {}</p>\n        ", message)
        }
        _ => String::new(),
    };

    format!(
        r#"
        <h2>New Enquiry from Website</h2>
        <p><strong>Enquiry type:</strong> {enquiry_type}</p>
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Business Name:</strong> {business_name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Phone:</strong> {phone}</p>
        {supplier_row}{message_row}<p><strong>Marketing opt-in:</strong> {opt_in}</p>
        <p><strong>Submitted:</strong> {submitted}</p>
      "#,
        enquiry_type = enquiry_type,
        name = submission.name.as_deref().unwrap_or_default(),
        business_name = submission.business_name.as_deref().unwrap_or_default(),
        email = submission.email.as_deref().unwrap_or_default(),
        phone = submission.phone.as_deref().unwrap_or_default(),
        supplier_row = supplier_row,
        message_row = message_row,
        opt_in = if submission.marketing_opt_in { "Yes" } else { "No" },
        submitted = Utc::now().format("%d/%m/%Y, %H:%M:%S"),
    )
}

/// Fixed thank-you template referencing the resolved enquiry type and the
/// office callback number.
fn customer_confirmation_html(submission: &EnquirySubmission) -> String {
    format!(
        r#"
        <h2>Thank you for your enquiry, {name}!</h2>
        <p>We've received your enquiry regarding {enquiry_type} for {business_name}.</p>
        <p>Our team will review your requirements and get back to you within 24 hours with a tailored quote.</p>
        <p>If you have any urgent questions, please call us on <strong>{callback}</strong>.</p>
        <br>
        <p>Best regards,<br>The Revo Utilities Team</p>
      "#,
        name = submission.name.as_deref().unwrap_or_default(),
        enquiry_type = submission.resolved_enquiry_type(),
        business_name = submission.business_name.as_deref().unwrap_or_default(),
        callback = CALLBACK_NUMBER,
    )
}
