use crate::models::EnquirySubmission;

/// Submissions completed faster than this are treated as automated.
pub const MIN_FORM_FILL_TIME_MS: f64 = 1_500.0;

/// Zero-friction bot classification for a submission.
///
/// Rules, short-circuiting on first match:
/// 1. a non-blank honeypot (`companyWebsite`) value marks a bot;
/// 2. a parseable `formStartedAt` closer to `now_millis` than the minimum
///    plausible fill time marks a bot.
///
/// Pure function; `now_millis` is injected so tests control the clock.
/// Callers respond to a positive classification by faking success, never by
/// rejecting, so scripts get no signal they were caught.
pub fn is_likely_bot(submission: &EnquirySubmission, now_millis: f64) -> bool {
    if submission
        .company_website
        .as_deref()
        .is_some_and(|w| !w.trim().is_empty())
    {
        return true;
    }

    if let Some(started_at) = submission.form_started_at_millis() {
        return now_millis - started_at < MIN_FORM_FILL_TIME_MS;
    }

    false
}
