//! Attribute values and their wire form

use crate::file::FieldFile;
use crate::geometry::Geometry;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Timelike, Utc};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::fmt;
use uuid::Uuid;

/// A value read from a record attribute
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	Text(String),
	Date(NaiveDate),
	Time(NaiveTime),
	DateTime(DateTime<Utc>),
	Uuid(Uuid),
	/// A JSON document
	Json(Value),
	File(FieldFile),
	Geometry(Geometry),
	/// Any other value, already rendered to its string form
	Other(String),
}

impl FieldValue {
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// Convert to a JSON primitive
	///
	/// Numbers, booleans, strings and null keep their type. Decimals, temporal
	/// values and UUIDs become strings the same way a JSON encoder for web
	/// frameworks renders them: dates as `YYYY-MM-DD`, times and datetimes
	/// with at most millisecond precision and datetimes in UTC with a `Z`
	/// suffix. Everything else is forced to its string form.
	///
	/// # Examples
	///
	/// ```
	/// use chrono::{TimeZone, Utc};
	/// use restcast_orm::FieldValue;
	/// use rust_decimal::Decimal;
	/// use serde_json::json;
	///
	/// assert_eq!(FieldValue::Int(3).to_wire(), json!(3));
	/// assert_eq!(FieldValue::Decimal(Decimal::new(1999, 2)).to_wire(), json!("19.99"));
	///
	/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
	/// assert_eq!(FieldValue::DateTime(at).to_wire(), json!("2024-05-01T12:30:00Z"));
	/// ```
	pub fn to_wire(&self) -> Value {
		match self {
			FieldValue::Null => Value::Null,
			FieldValue::Bool(b) => Value::Bool(*b),
			FieldValue::Int(i) => Value::from(*i),
			FieldValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
			FieldValue::Decimal(d) => Value::String(d.to_string()),
			FieldValue::Text(s) | FieldValue::Other(s) => Value::String(s.clone()),
			FieldValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
			FieldValue::Time(t) => Value::String(format_time(t)),
			FieldValue::DateTime(dt) => Value::String(format_datetime(dt)),
			FieldValue::Uuid(u) => Value::String(u.to_string()),
			FieldValue::Json(v) => match v {
				Value::Array(_) | Value::Object(_) => Value::String(v.to_string()),
				scalar => scalar.clone(),
			},
			FieldValue::File(file) => Value::String(file.name().to_string()),
			FieldValue::Geometry(geom) => Value::String(geom.to_string()),
		}
	}

	/// Hand the value over untouched as JSON, as stored by a JSON column
	pub fn into_json(self) -> Value {
		match self {
			FieldValue::Json(v) => v,
			other => other.to_wire(),
		}
	}
}

fn format_time(t: &NaiveTime) -> String {
	let millis = t.nanosecond() / 1_000_000;
	if t.nanosecond() == 0 {
		t.format("%H:%M:%S").to_string()
	} else {
		format!("{}.{:03}", t.format("%H:%M:%S"), millis)
	}
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
	let precision = if dt.nanosecond() == 0 {
		SecondsFormat::Secs
	} else {
		SecondsFormat::Millis
	};
	dt.to_rfc3339_opts(precision, true)
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::Null => f.write_str("None"),
			FieldValue::Text(s) | FieldValue::Other(s) => f.write_str(s),
			FieldValue::Json(v) => write!(f, "{}", v),
			FieldValue::File(file) => write!(f, "{}", file),
			FieldValue::Geometry(geom) => write!(f, "{}", geom),
			other => match other.to_wire() {
				Value::String(s) => f.write_str(&s),
				v => write!(f, "{}", v),
			},
		}
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for FieldValue {
				fn from(value: $ty) -> Self {
					FieldValue::$variant(value.into())
				}
			}
		)*
	};
}

impl_from! {
	bool => Bool,
	i32 => Int,
	i64 => Int,
	u32 => Int,
	f32 => Float,
	f64 => Float,
	String => Text,
	&str => Text,
	Decimal => Decimal,
	NaiveDate => Date,
	NaiveTime => Time,
	DateTime<Utc> => DateTime,
	Uuid => Uuid,
	FieldFile => File,
	Geometry => Geometry,
}

impl From<&String> for FieldValue {
	fn from(value: &String) -> Self {
		FieldValue::Text(value.clone())
	}
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(FieldValue::Null, Into::into)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FieldValue::Null, json!(null))]
	#[case(FieldValue::Bool(false), json!(false))]
	#[case(FieldValue::Int(-7), json!(-7))]
	#[case(FieldValue::Float(1.5), json!(1.5))]
	#[case(FieldValue::Float(f64::NAN), json!(null))]
	#[case(FieldValue::Text("abc".into()), json!("abc"))]
	#[case(FieldValue::Other("<Tag: x>".into()), json!("<Tag: x>"))]
	fn test_primitive_values_keep_their_type(#[case] value: FieldValue, #[case] expected: Value) {
		assert_eq!(value.to_wire(), expected);
	}

	#[rstest]
	fn test_temporal_values() {
		let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();
		assert_eq!(FieldValue::from(date).to_wire(), json!("2023-01-09"));

		let time = NaiveTime::from_hms_micro_opt(8, 5, 3, 123_456).unwrap();
		assert_eq!(FieldValue::from(time).to_wire(), json!("08:05:03.123"));

		let whole = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
		assert_eq!(FieldValue::from(whole).to_wire(), json!("23:59:00"));

		let at = Utc
			.with_ymd_and_hms(2020, 2, 29, 6, 0, 1)
			.unwrap()
			.with_nanosecond(250_000_000)
			.unwrap();
		assert_eq!(
			FieldValue::from(at).to_wire(),
			json!("2020-02-29T06:00:01.250Z")
		);
	}

	#[rstest]
	fn test_uuid_and_decimal_become_strings() {
		let id = Uuid::nil();
		assert_eq!(
			FieldValue::from(id).to_wire(),
			json!("00000000-0000-0000-0000-000000000000")
		);
		assert_eq!(FieldValue::from(Decimal::new(-5, 1)).to_wire(), json!("-0.5"));
	}

	#[rstest]
	fn test_json_documents_are_stringified_unless_passed_through() {
		let doc = json!({"a": [1, 2]});
		let value = FieldValue::Json(doc.clone());
		assert_eq!(value.to_wire(), json!(r#"{"a":[1,2]}"#));
		assert_eq!(value.into_json(), doc);
		assert_eq!(FieldValue::Json(json!(4)).to_wire(), json!(4));
	}

	#[rstest]
	fn test_option_conversion_and_display() {
		assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
		assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".into()));
		assert_eq!(FieldValue::Null.to_string(), "None");
		assert_eq!(FieldValue::Int(12).to_string(), "12");
		assert_eq!(FieldValue::Decimal(Decimal::new(100, 2)).to_string(), "1.00");
	}
}
