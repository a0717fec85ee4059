//! Plain-text message templates.
//!
//! Dates are rendered day/month/year.

use chrono::NaiveDate;

use crate::domain::foundation::format_day_month_year;

pub fn late_for_intervenant(title: &str, due_date: NaiveDate) -> String {
    format!(
        "Your intervention '{}' has been late since {}",
        title,
        format_day_month_year(due_date)
    )
}

pub fn late_for_admin(title: &str, due_date: NaiveDate, intervenant: Option<&str>) -> String {
    format!(
        "Intervention automatically flagged late: {} (due {}, intervenant: {})",
        title,
        format_day_month_year(due_date),
        intervenant.unwrap_or("unassigned")
    )
}

pub fn mission_assigned(title: &str) -> String {
    format!("You have been assigned to the mission: {}", title)
}

pub fn intervention_assigned(title: &str) -> String {
    format!("New intervention assigned: {}", title)
}

pub fn report_validated(title: &str, comment: &str) -> String {
    let mut message = format!("Your report for intervention '{}' has been validated.", title);
    if !comment.trim().is_empty() {
        message.push(' ');
        message.push_str(comment.trim());
    }
    message
}

pub fn report_rejected(title: &str, reason: &str) -> String {
    format!(
        "Your report for intervention '{}' has been rejected. Reason: {}",
        title, reason
    )
}

pub fn report_submitted(mission_title: &str) -> String {
    format!("New intervention report submitted for the mission: {}", mission_title)
}

pub fn field_report_submitted(title: &str) -> String {
    format!("Field report submitted for intervention '{}'", title)
}

pub fn delay_reported(title: &str) -> String {
    format!("New delay reported for intervention: {}", title)
}
