//! Event document and workshop HTML assembly

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};

pub const EVENT_TYPE: &str = "CoderDojo Virtual";
pub const EVENT_LOCATION: &str = "CoderDojo Online";
/// Appended to the location by callers that publish an event before its
/// workshops are known.
pub const WORKSHOPS_PENDING_SUFFIX: &str = " - Themen werden noch bekannt gegeben";

// Keys of a workshop record as stored in the event document
pub const FIELD_TITLE: &str = "title";
pub const FIELD_BEGIN_TIME: &str = "begintime";
pub const FIELD_END_TIME: &str = "endtime";
pub const FIELD_TARGET_AUDIENCE: &str = "targetAudience";
pub const FIELD_DESCRIPTION: &str = "description";

/// A calendar entry for one dojo date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDocument {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: String,
    pub location: String,
    pub workshops: Vec<Value>,
}

impl EventDocument {
    /// Caller-side fallback for dates whose workshops are not announced yet.
    /// Leaves documents that already have workshops untouched.
    pub fn mark_workshops_pending(&mut self) {
        if self.workshops.is_empty() {
            self.location.push_str(WORKSHOPS_PENDING_SUFFIX);
        }
    }
}

/// Builds the event document for `date`. Workshops are kept in the order
/// given, and an empty list is kept empty.
pub fn build_event_document(date: NaiveDate, workshops: Vec<Value>) -> EventDocument {
    EventDocument {
        date,
        event_type: EVENT_TYPE.to_string(),
        location: EVENT_LOCATION.to_string(),
        workshops,
    }
}

fn required_field<'a>(workshop: &'a Value, field: &'static str) -> Result<&'a str> {
    workshop
        .get(field)
        .and_then(Value::as_str)
        .ok_or(PlannerError::MissingField(field))
}

/// Appends the schedule block of one workshop to `target`.
///
/// Values are inserted verbatim: no HTML escaping and no markdown rendering.
/// Every field must be present as a string, otherwise `MissingField` is
/// returned and `target` is left unchanged.
pub fn build_workshop_html(target: &mut String, workshop: &Value) -> Result<()> {
    let title = required_field(workshop, FIELD_TITLE)?;
    let begin_time = required_field(workshop, FIELD_BEGIN_TIME)?;
    let end_time = required_field(workshop, FIELD_END_TIME)?;
    let target_audience = required_field(workshop, FIELD_TARGET_AUDIENCE)?;
    let description = required_field(workshop, FIELD_DESCRIPTION)?;

    target.push_str("\n<h3>");
    target.push_str(title);
    target.push_str("</h3>\n<p class=subtitle'>");
    target.push_str(begin_time);
    target.push_str(end_time);
    target.push_str("<br/>\n");
    target.push_str(target_audience);
    target.push_str("</p>\n<p><b>");
    target.push_str(description);
    target.push_str("<b/></p>");

    Ok(())
}

/// Renders the blocks of all `workshops` in order.
pub fn render_workshops_html(workshops: &[Value]) -> Result<String> {
    let mut html = String::new();
    for workshop in workshops {
        build_workshop_html(&mut html, workshop)?;
    }
    Ok(html)
}
