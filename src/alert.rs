//! Alert projection for the notification banner.
//!
//! The client keeps a list of transient alerts; [`render_alerts`] maps that
//! state to one notification element per alert. The state is passed in
//! explicitly rather than read from a process-wide store.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "msg", alias = "message")]
    pub message: String,
    #[serde(rename = "alertType")]
    pub alert_type: String,
}

/// Ordered alert list, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertState {
    pub alerts: Vec<Alert>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an alert and return its generated id
    pub fn push(&mut self, message: impl Into<String>, alert_type: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.alerts.push(Alert {
            id,
            message: message.into(),
            alert_type: alert_type.into(),
        });
        id
    }

    pub fn remove(&mut self, id: Uuid) {
        self.alerts.retain(|alert| alert.id != id);
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

impl From<&ApiError> for AlertState {
    /// One `danger` alert per violated field, or a single one for other errors
    fn from(err: &ApiError) -> Self {
        let mut state = AlertState::new();
        match err {
            ApiError::ValidationError(errors) => {
                for error in errors {
                    state.push(error.msg.clone(), "danger");
                }
            }
            other => {
                state.push(other.message(), "danger");
            }
        }
        state
    }
}

/// A rendered notification: `<div class="alert alert-{type}">{message}</div>`
#[derive(Debug, Clone, PartialEq)]
pub struct AlertElement<'a> {
    pub key: Uuid,
    pub class_name: String,
    pub message: &'a str,
}

impl<'a> From<&'a Alert> for AlertElement<'a> {
    fn from(alert: &'a Alert) -> Self {
        Self {
            key: alert.id,
            class_name: format!("alert alert-{}", alert.alert_type),
            message: &alert.message,
        }
    }
}

impl fmt::Display for AlertElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<div class=\"{}\">{}</div>",
            escape_html(&self.class_name),
            escape_html(self.message)
        )
    }
}

/// Lazily project alert state into elements, preserving input order.
/// Absent or empty state yields nothing.
pub fn render_alerts(state: Option<&AlertState>) -> impl Iterator<Item = AlertElement<'_>> {
    state
        .into_iter()
        .flat_map(|state| state.alerts.iter())
        .map(AlertElement::from)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;
    use serde_json::json;

    #[test]
    fn absent_or_empty_state_renders_nothing() {
        assert_eq!(render_alerts(None).count(), 0);
        assert_eq!(render_alerts(Some(&AlertState::new())).count(), 0);
    }

    #[test]
    fn renders_one_element_per_alert_in_order() {
        let mut state = AlertState::new();
        let first = state.push("Profile updated", "success");
        let second = state.push("Server Error", "danger");

        let elements: Vec<_> = render_alerts(Some(&state)).collect();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].key, first);
        assert_eq!(elements[0].class_name, "alert alert-success");
        assert_eq!(elements[1].key, second);
        assert_eq!(elements[1].class_name, "alert alert-danger");
        assert_eq!(elements[1].to_string(), "<div class=\"alert alert-danger\">Server Error</div>");
    }

    #[test]
    fn message_text_is_escaped() {
        let mut state = AlertState::new();
        state.push("<script>alert('x')</script>", "danger");
        let html = render_alerts(Some(&state)).next().unwrap().to_string();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn state_deserializes_from_client_shape() {
        let id = Uuid::new_v4();
        let state: AlertState = serde_json::from_value(json!([
            { "id": id, "msg": "Invalid credentials", "alertType": "danger" }
        ]))
        .unwrap();
        assert_eq!(state.alerts[0].id, id);
        assert_eq!(state.alerts[0].message, "Invalid credentials");
    }

    #[test]
    fn validation_errors_become_danger_alerts() {
        let err = ApiError::validation_error(vec![
            FieldError { param: "status".into(), msg: "Status is required".into(), value: None },
            FieldError { param: "skills".into(), msg: "Skills is required".into(), value: None },
        ]);
        let state = AlertState::from(&err);
        let messages: Vec<_> = render_alerts(Some(&state)).map(|e| e.message.to_string()).collect();
        assert_eq!(messages, vec!["Status is required", "Skills is required"]);

        let mut state = AlertState::from(&ApiError::not_found("Profile not found"));
        assert_eq!(state.alerts.len(), 1);
        let id = state.alerts[0].id;
        state.remove(id);
        assert!(state.is_empty());
    }
}
