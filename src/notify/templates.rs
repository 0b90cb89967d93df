//! Message templates, one per notification trigger.

/// Chat message for the first visit from an IP within the trailing hour.
#[must_use]
pub fn new_visitor(ip: &str, href: &str, referrer: &str) -> String {
    let referrer = if referrer.is_empty() {
        "direct"
    } else {
        referrer
    };
    format!("🆕 New visitor from {ip} on {href} (via {referrer})")
}

/// Chat message for an auth success event.
#[must_use]
pub fn login(email: &str, role: &str) -> String {
    let email = if email.is_empty() { "unknown" } else { email };
    let role = if role.is_empty() { "unknown" } else { role };
    format!("🔑 Login: {email} ({role})")
}

/// Subject and HTML body for a contact form submission, addressed to
/// the admin inbox.
#[must_use]
pub fn contact_email(from: &str, subject: &str, message: &str) -> (String, String) {
    let full_subject = format!("[Contact] {subject}");
    let html = format!(
        "<p><strong>From:</strong> {from}</p>\
         <p><strong>Subject:</strong> {subject}</p>\
         <hr><p>{message}</p>"
    );
    (full_subject, html)
}

/// Chat message mirroring a contact form submission.
#[must_use]
pub fn contact_webhook(from: &str, subject: &str) -> String {
    format!("📬 Contact form from {from}: {subject}")
}

/// Chat message relaying an inbound email-provider event.
#[must_use]
pub fn inbound_event(event_type: &str, detail: &str) -> String {
    format!("📨 Email event `{event_type}`: {detail}")
}

/// HTML body wrapping an admin-composed plain-text message.
#[must_use]
pub fn admin_message(message: &str) -> String {
    let paragraphs: Vec<String> = message
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("<p>{l}</p>"))
        .collect();
    paragraphs.join("")
}
