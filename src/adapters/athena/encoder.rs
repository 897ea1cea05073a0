//! Request parameter encoding
//!
//! Each request shape declares a `const` table of [`FieldDescriptor`]s: the
//! wire key plus a function producing the field's [`FieldValue`], or `None`
//! when the field is absent. The encoder turns those values into query
//! parameters, a JSON object, a url-encoded form or a multipart form.
//!
//! Wire rules:
//! - dates render as `MM/dd/yyyy` unless the field picks another [`DateFormat`]
//! - integer lists render comma-delimited, and an empty list is omitted
//! - absent fields are omitted, never sent as `""` or `null`
//! - an attachment turns a body into multipart; it cannot appear in a query

use crate::adapters::http::{Attachment, MultipartForm, RequestBody};
use crate::domain::{AthenaError, Result};
use crate::models::enums::WireEnum;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt::Write as _;

/// Rendering of a date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `MM/dd/yyyy`
    Date,
    /// `MM/dd/yyyy HH:mm:ss`
    DateTime,
    /// Any `chrono` strftime pattern
    Custom(&'static str),
}

impl DateFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::Date => "%m/%d/%Y",
            DateFormat::DateTime => "%m/%d/%Y %H:%M:%S",
            DateFormat::Custom(pattern) => pattern,
        }
    }
}

/// Typed value of a single request field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Flag(bool),
    Date(NaiveDateTime, DateFormat),
    IntList(Vec<i64>),
    Attachment(Attachment),
}

impl FieldValue {
    pub fn date(date: NaiveDate) -> Self {
        FieldValue::Date(date.and_time(NaiveTime::default()), DateFormat::Date)
    }

    pub fn date_time(value: NaiveDateTime) -> Self {
        FieldValue::Date(value, DateFormat::DateTime)
    }

    pub fn date_as(value: NaiveDateTime, format: DateFormat) -> Self {
        FieldValue::Date(value, format)
    }

    pub fn wire<E: WireEnum>(value: E) -> Self {
        FieldValue::Text(value.as_wire().to_string())
    }

    pub fn int_list<I>(values: &[I]) -> Self
    where
        I: Copy + Into<i64>,
    {
        FieldValue::IntList(values.iter().map(|v| (*v).into()).collect())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(i64::from(value))
    }
}

impl From<Attachment> for FieldValue {
    fn from(value: Attachment) -> Self {
        FieldValue::Attachment(value)
    }
}

/// Wire key and value producer for one field of `T`
pub struct FieldDescriptor<T> {
    pub key: &'static str,
    pub encode: fn(&T) -> Option<FieldValue>,
}

impl<T> FieldDescriptor<T> {
    pub const fn new(key: &'static str, encode: fn(&T) -> Option<FieldValue>) -> Self {
        Self { key, encode }
    }
}

/// Page window merged into the query of paged filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Paging {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// A filter or request body with a static descriptor table
pub trait RequestShape: Sized + 'static {
    const FIELDS: &'static [FieldDescriptor<Self>];

    /// Paged filters return their window here
    fn paging(&self) -> Option<Paging> {
        None
    }
}

/// Where encoded fields go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    #[default]
    Json,
    Form,
    Multipart,
}

/// Ordered key/value list; inserting an existing key replaces its value in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// Collects the present fields of a shape, paging last
pub fn fields_of<S: RequestShape>(shape: &S) -> Vec<(String, FieldValue)> {
    let mut fields: Vec<(String, FieldValue)> = S::FIELDS
        .iter()
        .filter_map(|descriptor| {
            (descriptor.encode)(shape).map(|value| (descriptor.key.to_string(), value))
        })
        .collect();

    if let Some(paging) = shape.paging() {
        if let Some(limit) = paging.limit {
            fields.push(("limit".to_string(), FieldValue::from(limit)));
        }
        if let Some(offset) = paging.offset {
            fields.push(("offset".to_string(), FieldValue::from(offset)));
        }
    }

    fields
}

/// Renders a value as query or form text; `None` means omit the key
///
/// # Errors
///
/// Returns [`AthenaError::Encode`] for attachments and unusable date patterns
pub fn render_text(key: &str, value: &FieldValue) -> Result<Option<String>> {
    match value {
        FieldValue::Text(text) => Ok(Some(text.clone())),
        FieldValue::Number(number) => Ok(Some(number.to_string())),
        FieldValue::Flag(flag) => Ok(Some(flag.to_string())),
        FieldValue::Date(value, format) => format_date(key, value, *format).map(Some),
        FieldValue::IntList(values) if values.is_empty() => Ok(None),
        FieldValue::IntList(values) => Ok(Some(
            values
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )),
        FieldValue::Attachment(_) => Err(AthenaError::Encode(format!(
            "Field '{key}' is an attachment and can only be sent in a multipart body"
        ))),
    }
}

fn format_date(key: &str, value: &NaiveDateTime, format: DateFormat) -> Result<String> {
    let mut rendered = String::new();
    write!(rendered, "{}", value.format(format.pattern())).map_err(|_| {
        AthenaError::Encode(format!(
            "Field '{key}' has an invalid date pattern '{}'",
            format.pattern()
        ))
    })?;
    Ok(rendered)
}

/// Encodes fields as query parameters
///
/// # Errors
///
/// Returns [`AthenaError::Encode`] if a field cannot be rendered as text
pub fn encode_query(fields: Vec<(String, FieldValue)>) -> Result<QueryParams> {
    let mut query = QueryParams::default();
    for (key, value) in fields {
        if let Some(text) = render_text(&key, &value)? {
            query.insert(key, text);
        }
    }
    Ok(query)
}

/// Encodes fields as a request body
///
/// An attachment switches any encoding to multipart.
///
/// # Errors
///
/// Returns [`AthenaError::Encode`] for more than one attachment or a value
/// that cannot be rendered.
pub fn encode_body(fields: Vec<(String, FieldValue)>, encoding: BodyEncoding) -> Result<RequestBody> {
    let has_attachment = fields
        .iter()
        .any(|(_, value)| matches!(value, FieldValue::Attachment(_)));

    match encoding {
        _ if has_attachment => encode_multipart(fields),
        BodyEncoding::Multipart => encode_multipart(fields),
        BodyEncoding::Form => Ok(RequestBody::Form(encode_query(fields)?.into_pairs())),
        BodyEncoding::Json => encode_json(fields),
    }
}

fn encode_json(fields: Vec<(String, FieldValue)>) -> Result<RequestBody> {
    let mut object = serde_json::Map::new();
    for (key, value) in fields {
        let json = match value {
            FieldValue::Text(text) => serde_json::Value::String(text),
            FieldValue::Number(number) => serde_json::Value::from(number),
            FieldValue::Flag(flag) => serde_json::Value::Bool(flag),
            other => match render_text(&key, &other)? {
                Some(text) => serde_json::Value::String(text),
                None => continue,
            },
        };
        object.insert(key, json);
    }
    Ok(RequestBody::Json(serde_json::Value::Object(object)))
}

fn encode_multipart(fields: Vec<(String, FieldValue)>) -> Result<RequestBody> {
    let mut form = MultipartForm::default();
    let mut text_fields = QueryParams::default();

    for (key, value) in fields {
        match value {
            FieldValue::Attachment(mut attachment) => {
                if form.file.is_some() {
                    return Err(AthenaError::Encode(format!(
                        "Only one attachment per request is supported, found another at '{key}'"
                    )));
                }
                if attachment.file_name.trim().is_empty() {
                    attachment.file_name = key.clone();
                }
                form.file = Some((key, attachment));
            }
            other => {
                if let Some(text) = render_text(&key, &other)? {
                    text_fields.insert(key, text);
                }
            }
        }
    }

    form.fields = text_fields.into_pairs();
    Ok(RequestBody::Multipart(form))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        department_ids: Vec<u32>,
        start_date: NaiveDate,
        modified_after: Option<NaiveDateTime>,
        patient_id: Option<u32>,
        show_cancelled: bool,
        limit: Option<u32>,
        offset: Option<u32>,
    }

    impl RequestShape for Sample {
        const FIELDS: &'static [FieldDescriptor<Self>] = &[
            FieldDescriptor::new("departmentid", |s: &Self| {
                Some(FieldValue::int_list(&s.department_ids))
            }),
            FieldDescriptor::new("startdate", |s: &Self| Some(FieldValue::date(s.start_date))),
            FieldDescriptor::new("startlastmodified", |s: &Self| {
                s.modified_after.map(FieldValue::date_time)
            }),
            FieldDescriptor::new("patientid", |s: &Self| s.patient_id.map(FieldValue::from)),
            FieldDescriptor::new("showcancelled", |s: &Self| Some(s.show_cancelled.into())),
        ];

        fn paging(&self) -> Option<Paging> {
            Some(Paging {
                limit: self.limit,
                offset: self.offset,
            })
        }
    }

    fn sample() -> Sample {
        Sample {
            department_ids: vec![1, 2, 3],
            start_date: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            modified_after: None,
            patient_id: None,
            show_cancelled: false,
            limit: None,
            offset: None,
        }
    }

    #[test]
    fn test_query_encoding_rules() {
        let query = encode_query(fields_of(&sample())).unwrap();
        assert_eq!(query.get("departmentid"), Some("1,2,3"));
        assert_eq!(query.get("startdate"), Some("03/07/2024"));
        assert_eq!(query.get("showcancelled"), Some("false"));
        assert_eq!(query.get("patientid"), None);
        assert_eq!(query.get("startlastmodified"), None);
    }

    #[test]
    fn test_date_time_override() {
        let mut shape = sample();
        shape.modified_after = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 5, 9);
        let query = encode_query(fields_of(&shape)).unwrap();
        assert_eq!(query.get("startlastmodified"), Some("12/31/2024 23:05:09"));
    }

    #[test]
    fn test_empty_list_omitted() {
        let mut shape = sample();
        shape.department_ids.clear();
        let query = encode_query(fields_of(&shape)).unwrap();
        assert_eq!(query.get("departmentid"), None);
    }

    #[test]
    fn test_paging_limit_without_offset() {
        let mut shape = sample();
        shape.limit = Some(500);
        let query = encode_query(fields_of(&shape)).unwrap();
        assert_eq!(query.get("limit"), Some("500"));
        assert_eq!(query.get("offset"), None);
    }

    #[test]
    fn test_duplicate_key_replaced_in_place() {
        let mut query = QueryParams::default();
        query.insert("limit", "10");
        query.insert("offset", "0");
        query.insert("limit", "20");
        assert_eq!(
            query.into_pairs(),
            vec![
                ("limit".to_string(), "20".to_string()),
                ("offset".to_string(), "0".to_string())
            ]
        );
    }

    #[test]
    fn test_json_body_keeps_types() {
        let body = encode_body(fields_of(&sample()), BodyEncoding::Json).unwrap();
        let RequestBody::Json(value) = body else {
            panic!("expected json body");
        };
        assert_eq!(value["showcancelled"], serde_json::Value::Bool(false));
        assert_eq!(value["departmentid"], "1,2,3");
        assert_eq!(value["startdate"], "03/07/2024");
        assert!(value.get("patientid").is_none());
    }

    #[test]
    fn test_attachment_switches_to_multipart() {
        let fields = vec![
            ("departmentid".to_string(), FieldValue::from(1u32)),
            (
                "attachmentcontents".to_string(),
                FieldValue::Attachment(Attachment::new("", b"data".to_vec())),
            ),
        ];
        let body = encode_body(fields, BodyEncoding::Json).unwrap();
        let RequestBody::Multipart(form) = body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.fields, vec![("departmentid".to_string(), "1".to_string())]);
        let (key, attachment) = form.file.unwrap();
        assert_eq!(key, "attachmentcontents");
        assert_eq!(attachment.file_name, "attachmentcontents");
    }

    #[test]
    fn test_attachment_in_query_rejected() {
        let fields = vec![(
            "attachmentcontents".to_string(),
            FieldValue::Attachment(Attachment::new("a.pdf", vec![])),
        )];
        assert!(matches!(encode_query(fields), Err(AthenaError::Encode(_))));
    }

    #[test]
    fn test_invalid_custom_pattern_is_encode_error() {
        let value = FieldValue::date_as(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_time(NaiveTime::default()),
            DateFormat::Custom("%Q"),
        );
        assert!(matches!(
            render_text("when", &value),
            Err(AthenaError::Encode(_))
        ));
    }
}
