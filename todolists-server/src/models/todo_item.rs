//! Todo item embedded in a list, plus create/update payloads
//!
//! Field coercion follows the wire contract:
//! - `dueDate`: `YYYY-MM-DD` (unpadded month/day allowed) or RFC 3339
//! - `finished`: JSON bool, `"true"`/`"false"`/`"1"`/`"0"`, or 1/0
//! - null is the same as absent

use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ValidationError;

/// An item inside a list's `todos` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub text: String,
    #[serde(rename = "dueDate")]
    pub due_date: bson::DateTime,
    pub finished: bool,
}

/// Validated fields for a new item (all three required).
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub text: String,
    pub due_date: bson::DateTime,
    pub finished: bool,
}

impl NewItem {
    /// Assign a fresh id.
    pub fn into_item(self) -> TodoItem {
        TodoItem {
            id: ObjectId::new(),
            text: self.text,
            due_date: self.due_date,
            finished: self.finished,
        }
    }
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub text: Option<String>,
    pub due_date: Option<bson::DateTime>,
    pub finished: Option<bool>,
}

impl ItemPatch {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.due_date.is_none() && self.finished.is_none()
    }

    /// Apply to an item in place. Returns whether any value changed.
    pub fn apply(&self, item: &mut TodoItem) -> bool {
        let mut changed = false;
        if let Some(text) = &self.text {
            changed |= item.text != *text;
            item.text.clone_from(text);
        }
        if let Some(due_date) = self.due_date {
            changed |= item.due_date != due_date;
            item.due_date = due_date;
        }
        if let Some(finished) = self.finished {
            changed |= item.finished != finished;
            item.finished = finished;
        }
        changed
    }
}

/// Body of item create/update requests, before coercion.
#[derive(Debug, Default, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default, rename = "dueDate")]
    due_date: Option<Value>,
    #[serde(default)]
    finished: Option<Value>,
}

impl ItemFields {
    /// Collection create: every field is required.
    pub fn into_new_item(self) -> Result<NewItem, ValidationError> {
        let patch = self.into_patch()?;
        Ok(NewItem {
            text: patch
                .text
                .ok_or(ValidationError::MissingField { field: "text" })?,
            due_date: patch
                .due_date
                .ok_or(ValidationError::MissingField { field: "dueDate" })?,
            finished: patch
                .finished
                .ok_or(ValidationError::MissingField { field: "finished" })?,
        })
    }

    /// Single-item update: every field is optional.
    pub fn into_patch(self) -> Result<ItemPatch, ValidationError> {
        Ok(ItemPatch {
            text: present(self.text).map(parse_text).transpose()?,
            due_date: present(self.due_date).map(parse_due_date).transpose()?,
            finished: present(self.finished).map(parse_finished).transpose()?,
        })
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

fn parse_text(value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(text) => Ok(text),
        other => Err(ValidationError::invalid(
            "text",
            format!("expected a string, got {other}"),
        )),
    }
}

fn parse_due_date(value: Value) -> Result<bson::DateTime, ValidationError> {
    let raw = match value {
        Value::String(raw) => raw,
        other => {
            return Err(ValidationError::invalid(
                "dueDate",
                format!("expected a date string, got {other}"),
            ))
        }
    };
    let raw = raw.trim();

    if !has_four_digit_year(raw) {
        return Err(ValidationError::invalid(
            "dueDate",
            format!("Invalid date literal: {raw}"),
        ));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        return Ok(bson::DateTime::from_chrono(midnight));
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(bson::DateTime::from_chrono(instant.with_timezone(&Utc)));
    }

    Err(ValidationError::invalid(
        "dueDate",
        format!("Invalid date literal: {raw}"),
    ))
}

/// chrono's `%Y` takes any width and a sign; the wire format wants `YYYY`.
fn has_four_digit_year(raw: &str) -> bool {
    raw.split('-')
        .next()
        .is_some_and(|year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_finished(value: Value) -> Result<bool, ValidationError> {
    let parsed = match &value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed.ok_or_else(|| {
        ValidationError::invalid(
            "finished",
            format!("Invalid literal for boolean(): {value}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(json: &str) -> ItemFields {
        serde_json::from_str(json).unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> bson::DateTime {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        bson::DateTime::from_chrono(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    #[test]
    fn new_item_requires_every_field() {
        let err = fields(r#"{"dueDate":"2019-02-12","finished":false}"#)
            .into_new_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "text" });

        let err = fields(r#"{"text":"milk","finished":false}"#)
            .into_new_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "dueDate" });

        let err = fields(r#"{"text":"milk","dueDate":"2019-02-12","finished":null}"#)
            .into_new_item()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "finished" });
    }

    #[test]
    fn new_item_parses_all_fields() {
        let item = fields(r#"{"text":"milk","dueDate":"2019-2-12","finished":"true"}"#)
            .into_new_item()
            .unwrap();
        assert_eq!(item.text, "milk");
        assert_eq!(item.due_date, midnight(2019, 2, 12));
        assert!(item.finished);
    }

    #[test]
    fn into_item_assigns_fresh_ids() {
        let new = NewItem {
            text: "milk".into(),
            due_date: midnight(2019, 2, 12),
            finished: false,
        };
        let a = new.clone().into_item();
        let b = new.into_item();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn patch_skips_absent_and_null_fields() {
        let patch = fields(r#"{"finished":true,"text":null}"#).into_patch().unwrap();
        assert_eq!(
            patch,
            ItemPatch {
                finished: Some(true),
                ..ItemPatch::default()
            }
        );
        assert!(fields("{}").into_patch().unwrap().is_empty());
    }

    #[test]
    fn due_date_accepts_rfc3339() {
        let patch = fields(r#"{"dueDate":"2019-02-12T10:30:00+02:00"}"#)
            .into_patch()
            .unwrap();
        let expected = Utc.with_ymd_and_hms(2019, 2, 12, 8, 30, 0).unwrap();
        assert_eq!(patch.due_date, Some(bson::DateTime::from_chrono(expected)));
    }

    #[test]
    fn rejects_bad_due_date() {
        let err = fields(r#"{"dueDate":"next tuesday"}"#).into_patch().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "dueDate", .. }));

        let err = fields(r#"{"dueDate":20190212}"#).into_patch().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "dueDate", .. }));
    }

    #[test]
    fn due_date_year_must_have_four_digits() {
        for raw in ["19-2-12", "0-1-1", "+2019-02-12", "20190-02-12"] {
            let err = fields(&format!(r#"{{"dueDate":"{raw}"}}"#))
                .into_patch()
                .unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidField { field: "dueDate", .. }),
                "literal {raw}"
            );
        }
    }

    #[test]
    fn finished_literals() {
        for (raw, expected) in [
            ("true", true),
            ("false", false),
            (r#""True""#, true),
            (r#""0""#, false),
            ("1", true),
        ] {
            let patch = fields(&format!(r#"{{"finished":{raw}}}"#)).into_patch().unwrap();
            assert_eq!(patch.finished, Some(expected), "literal {raw}");
        }

        let err = fields(r#"{"finished":"maybe"}"#).into_patch().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidField { field: "finished", .. }));
    }

    #[test]
    fn apply_reports_changes() {
        let mut item = NewItem {
            text: "milk".into(),
            due_date: midnight(2019, 2, 12),
            finished: false,
        }
        .into_item();

        let same = ItemPatch {
            text: Some("milk".into()),
            ..ItemPatch::default()
        };
        assert!(!same.apply(&mut item));

        let done = ItemPatch {
            finished: Some(true),
            ..ItemPatch::default()
        };
        assert!(done.apply(&mut item));
        assert!(item.finished);
        assert_eq!(item.text, "milk");
        assert_eq!(item.due_date, midnight(2019, 2, 12));
    }
}
