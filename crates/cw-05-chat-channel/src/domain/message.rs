//! Human-readable rendering of case events.
//!
//! Internal cases use a condensed template without the requester line.
//! Every other kind gets the full template.

use serde::{Deserialize, Serialize};
use shared_bus::CaseEvent;
use shared_types::{CaseKind, Timestamp};
use std::fmt;
use std::str::FromStr;

use crate::error::ChannelError;

const TIME_FORMAT: &str = "%d/%m/%Y %H:%M UTC";

/// Rendering mode sent along with the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    Plain,
    #[default]
    Html,
}

impl ParseMode {
    /// Value for the API's `parse_mode` field. Plain text sends none.
    pub fn api_value(&self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Html => Some("HTML"),
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Html => "html",
        })
    }
}

impl FromStr for ParseMode {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "html" => Ok(Self::Html),
            other => Err(ChannelError::Config(format!("unknown parse mode: {other}"))),
        }
    }
}

/// A rendered message ready for a transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub parse_mode: ParseMode,
}

struct Lines {
    mode: ParseMode,
    out: Vec<String>,
}

impl Lines {
    fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            out: Vec::new(),
        }
    }

    fn header(&mut self, text: &str) {
        let line = match self.mode {
            ParseMode::Plain => text.to_string(),
            ParseMode::Html => format!("<b>{}</b>", escape_html(text)),
        };
        self.out.push(line);
    }

    fn field(&mut self, label: &str, value: &str) {
        let line = match self.mode {
            ParseMode::Plain => format!("{label}: {value}"),
            ParseMode::Html => format!("<b>{label}:</b> {}", escape_html(value)),
        };
        self.out.push(line);
    }

    fn finish(self) -> String {
        self.out.join("\n")
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_time(at: Timestamp) -> String {
    at.format(TIME_FORMAT).to_string()
}

fn headline(event: &CaseEvent) -> String {
    let case = event.case();
    match event {
        CaseEvent::CaseCreated { .. } => format!("New {}", case.kind.label().to_lowercase()),
        CaseEvent::CaseTransitioned { from, to, .. } => format!(
            "{}: {} → {}",
            case.kind.label(),
            case.kind.status_label(*from),
            case.kind.status_label(*to)
        ),
        CaseEvent::CaseAssigned { .. } => format!("{} reassigned", case.kind.label()),
        CaseEvent::StaleCaseDetected { .. } => {
            format!("Overdue {}", case.kind.label().to_lowercase())
        }
    }
}

/// Render an event for the external destination.
pub fn render(event: &CaseEvent, mode: ParseMode) -> ChatMessage {
    let case = event.case();
    let handler = case
        .handler
        .as_ref()
        .map(|h| h.display())
        .unwrap_or_else(|| "Unassigned".to_string());

    let mut lines = Lines::new(mode);
    lines.header(&headline(event));

    if case.kind == CaseKind::Internal {
        lines.field("Title", &case.title);
        lines.field("Handler", &handler);
    } else {
        lines.field("Type", case.kind.label());
        lines.field("Title", &case.title);
        lines.field("Description", &case.description);
        lines.field("Requester", &case.requester.display());
        lines.field("Handler", &handler);
        if let Some(counterparty) = &case.counterparty_name {
            lines.field("Counterparty", counterparty);
        }
    }

    if let CaseEvent::StaleCaseDetected { age_hours, .. } = event {
        lines.field("Open for", &format!("{age_hours} hours"));
    }
    lines.field("Status", case.kind.status_label(case.status));
    lines.field("Time", &format_time(event.occurred_at()));

    ChatMessage {
        text: lines.finish(),
        parse_mode: mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared_bus::{CaseSummary, PersonRef};
    use shared_types::{CaseId, CaseStatus, PersonId, UserId};

    fn created(kind: CaseKind, title: &str) -> CaseEvent {
        CaseEvent::CaseCreated {
            case: CaseSummary {
                case_id: CaseId::new(),
                kind,
                title: title.to_string(),
                description: "Cannot print invoices".to_string(),
                status: CaseStatus::Received,
                requester: PersonRef {
                    id: PersonId::new(),
                    name: Some("Nguyen Van A".to_string()),
                },
                handler: None,
                counterparty_name: None,
                start_date: Utc::now(),
                end_date: None,
                version: 1,
            },
            actor: UserId::new(),
            occurred_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_full_template_has_requester() {
        let message = render(&created(CaseKind::Warranty, "Printer"), ParseMode::Plain);
        assert_eq!(
            message.text,
            "New warranty case\n\
             Type: Warranty case\n\
             Title: Printer\n\
             Description: Cannot print invoices\n\
             Requester: Nguyen Van A\n\
             Handler: Unassigned\n\
             Status: Received\n\
             Time: 01/05/2024 08:30 UTC"
        );
        assert_eq!(message.parse_mode.api_value(), None);
    }

    #[test]
    fn test_internal_template_is_condensed() {
        let message = render(&created(CaseKind::Internal, "Printer"), ParseMode::Plain);
        assert!(!message.text.contains("Requester"));
        assert!(!message.text.contains("Description"));
        assert!(message.text.contains("Title: Printer"));
        assert!(message.text.contains("Handler: Unassigned"));
    }

    #[test]
    fn test_html_escapes_user_text() {
        let message = render(&created(CaseKind::Incident, "<script> & co"), ParseMode::Html);
        assert!(message.text.starts_with("<b>New incident case</b>"));
        assert!(message.text.contains("<b>Title:</b> &lt;script&gt; &amp; co"));
        assert_eq!(message.parse_mode.api_value(), Some("HTML"));
    }

    #[test]
    fn test_parse_mode_from_str() {
        assert_eq!("HTML".parse::<ParseMode>().unwrap(), ParseMode::Html);
        assert_eq!("plain".parse::<ParseMode>().unwrap(), ParseMode::Plain);
        assert!("markdown".parse::<ParseMode>().is_err());
    }
}
