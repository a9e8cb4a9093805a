//! HTML bodies for the two outbound emails.
//!
//! All interpolated user input goes through [`html_escape`]; the
//! message body additionally turns newlines into `<br>` so multi-line
//! enquiries survive the HTML rendering.

use frontdesk_core::Enquiry;

/// Subject line for the submitter confirmation.
pub fn confirmation_subject(site_name: &str) -> String {
    format!("Enquiry Received - {site_name}")
}

/// HTML body for the submitter confirmation.
pub fn confirmation_body(site_name: &str, name: &str, subject: &str) -> String {
    let name = html_escape(name);
    let subject = html_escape(subject);
    let site = html_escape(site_name);
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 10px;">
    <div style="background: #0E766C; color: white; padding: 20px; text-align: center; border-radius: 10px 10px 0 0;">
        <h1 style="margin: 0;">{site}</h1>
    </div>
    <div style="padding: 30px;">
        <h2 style="color: #0E766C;">Thank you for your enquiry, {name}!</h2>
        <p>We have received your enquiry regarding: <strong>{subject}</strong></p>
        <p>Our team will review your request and get back to you within 24-48 hours during business hours.</p>
        <div style="background: #f8f9fa; padding: 15px; border-radius: 5px; margin: 20px 0; border-left: 4px solid #D4B483;">
            <h4 style="margin-top: 0; color: #0E766C;">What happens next?</h4>
            <ul style="margin-bottom: 0;">
                <li>Our team will assess your requirements</li>
                <li>We'll contact you to discuss your needs</li>
                <li>We'll provide a tailored solution proposal</li>
            </ul>
        </div>
        <hr style="border: none; border-top: 1px solid #eee; margin: 30px 0;">
        <p style="color: #666; font-size: 14px;">
            This is an automated confirmation. Please do not reply to this email.
        </p>
    </div>
</div>"#
    )
}

/// Subject line for the admin notification.
pub fn admin_subject(subject: &str) -> String {
    format!("New Enquiry Received: {subject}")
}

/// HTML body for the admin notification: every submitted field, the
/// received time, and a link into the admin dashboard.
pub fn admin_body(enquiry: &Enquiry, dashboard_url: &str) -> String {
    let message = html_escape(&enquiry.message).replace('\n', "<br>");
    let phone = enquiry.phone.as_deref().unwrap_or("Not provided");
    let service = enquiry.service_type.as_deref().unwrap_or("Not specified");
    let ip = enquiry.ip_address.as_deref().unwrap_or("Unknown");
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2 style="color: #0E766C;">New Enquiry Received</h2>
    <div style="background: #f8f9fa; padding: 20px; border-radius: 5px; border-left: 4px solid #0E766C;">
        <h3 style="margin-top: 0;">Enquiry Details</h3>
        <table style="width: 100%; border-collapse: collapse;">
            <tr><td style="padding: 8px 0;"><strong>ID:</strong></td><td style="padding: 8px 0;">{id}</td></tr>
            <tr><td style="padding: 8px 0;"><strong>Name:</strong></td><td style="padding: 8px 0;">{name}</td></tr>
            <tr><td style="padding: 8px 0;"><strong>Email:</strong></td><td style="padding: 8px 0;">{email}</td></tr>
            <tr><td style="padding: 8px 0;"><strong>Phone:</strong></td><td style="padding: 8px 0;">{phone}</td></tr>
            <tr><td style="padding: 8px 0;"><strong>Service:</strong></td><td style="padding: 8px 0;">{service}</td></tr>
            <tr><td style="padding: 8px 0;"><strong>Received:</strong></td><td style="padding: 8px 0;">{received}</td></tr>
        </table>
        <h4 style="margin: 20px 0 10px; color: #0E766C;">Message:</h4>
        <div style="background: white; padding: 15px; border-radius: 5px; border: 1px solid #ddd;">{message}</div>
    </div>
    <div style="margin-top: 30px; text-align: center;">
        <a href="{dashboard_url}" style="background: #0E766C; color: white; padding: 12px 30px; text-decoration: none; border-radius: 5px; display: inline-block;">View in Dashboard</a>
    </div>
    <p style="color: #666; font-size: 12px; margin-top: 30px;">Enquiry ID: {id} &bull; IP: {ip}</p>
</div>"#,
        id = enquiry.id,
        name = html_escape(&enquiry.name),
        email = html_escape(&enquiry.email),
        phone = html_escape(phone),
        service = html_escape(service),
        received = enquiry.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        ip = html_escape(ip),
    )
}

/// Minimal HTML entity escaping for interpolated user input.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
