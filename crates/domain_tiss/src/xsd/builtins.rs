//! XML Schema built-in simple types

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveTime};

/// Built-in datatypes the validator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    String,
    NormalizedString,
    Token,
    AnyUri,
    Date,
    DateTime,
    Decimal,
    Integer,
    Int,
    Long,
    PositiveInteger,
    NonNegativeInteger,
    Boolean,
    AnySimpleType,
}

impl Builtin {
    /// Looks up a type by its local name in the XML Schema namespace
    pub fn from_local_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "string" => Builtin::String,
            "normalizedString" => Builtin::NormalizedString,
            "token" => Builtin::Token,
            "anyURI" => Builtin::AnyUri,
            "date" => Builtin::Date,
            "dateTime" => Builtin::DateTime,
            "decimal" => Builtin::Decimal,
            "integer" => Builtin::Integer,
            "int" => Builtin::Int,
            "long" => Builtin::Long,
            "positiveInteger" => Builtin::PositiveInteger,
            "nonNegativeInteger" => Builtin::NonNegativeInteger,
            "boolean" => Builtin::Boolean,
            "anySimpleType" => Builtin::AnySimpleType,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn local_name(&self) -> &'static str {
        match self {
            Builtin::String => "string",
            Builtin::NormalizedString => "normalizedString",
            Builtin::Token => "token",
            Builtin::AnyUri => "anyURI",
            Builtin::Date => "date",
            Builtin::DateTime => "dateTime",
            Builtin::Decimal => "decimal",
            Builtin::Integer => "integer",
            Builtin::Int => "int",
            Builtin::Long => "long",
            Builtin::PositiveInteger => "positiveInteger",
            Builtin::NonNegativeInteger => "nonNegativeInteger",
            Builtin::Boolean => "boolean",
            Builtin::AnySimpleType => "anySimpleType",
        }
    }

    /// Applies the type's whitespace facet
    pub fn normalize<'v>(&self, value: &'v str) -> Cow<'v, str> {
        match self {
            Builtin::String | Builtin::AnySimpleType => Cow::Borrowed(value),
            Builtin::NormalizedString => {
                if value.contains(['\t', '\n', '\r']) {
                    Cow::Owned(value.replace(['\t', '\n', '\r'], " "))
                } else {
                    Cow::Borrowed(value)
                }
            }
            _ => collapse(value),
        }
    }

    /// Checks the lexical space; `value` must already be normalized
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Builtin::String
            | Builtin::NormalizedString
            | Builtin::Token
            | Builtin::AnyUri
            | Builtin::AnySimpleType => true,
            Builtin::Date => is_date(value),
            Builtin::DateTime => is_date_time(value),
            Builtin::Decimal => is_decimal(value),
            Builtin::Integer => is_integer(value),
            Builtin::Int => value.parse::<i32>().is_ok() && is_integer(value),
            Builtin::Long => value.parse::<i64>().is_ok() && is_integer(value),
            Builtin::PositiveInteger => {
                is_integer(value)
                    && !value.starts_with('-')
                    && value.bytes().any(|b| (b'1'..=b'9').contains(&b))
            }
            Builtin::NonNegativeInteger => {
                is_integer(value)
                    && (!value.starts_with('-') || value[1..].bytes().all(|b| b == b'0'))
            }
            Builtin::Boolean => matches!(value, "true" | "false" | "1" | "0"),
        }
    }
}

fn collapse(value: &str) -> Cow<'_, str> {
    let collapsed = value.split_ascii_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed == value {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(collapsed)
    }
}

fn strip_sign(value: &str) -> &str {
    value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value)
}

fn is_integer(value: &str) -> bool {
    let digits = strip_sign(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_decimal(value: &str) -> bool {
    let unsigned = strip_sign(value);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    (!whole.is_empty() || !fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Removes a trailing `Z` or `+HH:MM` / `-HH:MM` zone designator
fn strip_timezone(value: &str) -> &str {
    if let Some(stripped) = value.strip_suffix('Z') {
        return stripped;
    }
    let bytes = value.as_bytes();
    let n = bytes.len();
    if n > 6
        && matches!(bytes[n - 6], b'+' | b'-')
        && bytes[n - 3] == b':'
        && [n - 5, n - 4, n - 2, n - 1].iter().all(|&i| bytes[i].is_ascii_digit())
    {
        return &value[..n - 6];
    }
    value
}

fn is_plain_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
        && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn is_date(value: &str) -> bool {
    is_plain_date(strip_timezone(value))
}

fn is_date_time(value: &str) -> bool {
    let Some((date, time)) = strip_timezone(value).split_once('T') else {
        return false;
    };
    is_plain_date(date) && time.len() >= 8 && NaiveTime::parse_from_str(time, "%H:%M:%S%.f").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_lexical_space() {
        assert!(Builtin::Date.accepts("2024-03-15"));
        assert!(Builtin::Date.accepts("2024-03-15Z"));
        assert!(Builtin::Date.accepts("2024-03-15-03:00"));
        assert!(!Builtin::Date.accepts("2024-3-15"));
        assert!(!Builtin::Date.accepts("2024-02-30"));
        assert!(!Builtin::Date.accepts("15/03/2024"));
        assert!(!Builtin::Date.accepts(""));
    }

    #[test]
    fn test_date_time_lexical_space() {
        assert!(Builtin::DateTime.accepts("2024-03-15T10:30:00"));
        assert!(Builtin::DateTime.accepts("2024-03-15T10:30:00.250Z"));
        assert!(!Builtin::DateTime.accepts("2024-03-15 10:30:00"));
        assert!(!Builtin::DateTime.accepts("2024-03-15T25:00:00"));
    }

    #[test]
    fn test_decimal_lexical_space() {
        for ok in ["250.00", "-1.5", "+3", ".5", "7."] {
            assert!(Builtin::Decimal.accepts(ok), "{ok}");
        }
        for bad in ["", ".", "1,50", "1e3", "abc", "--1"] {
            assert!(!Builtin::Decimal.accepts(bad), "{bad}");
        }
    }

    #[test]
    fn test_integer_family() {
        assert!(Builtin::Integer.accepts("-42"));
        assert!(!Builtin::Integer.accepts("4.2"));
        assert!(Builtin::PositiveInteger.accepts("007"));
        assert!(!Builtin::PositiveInteger.accepts("0"));
        assert!(Builtin::NonNegativeInteger.accepts("0"));
        assert!(!Builtin::NonNegativeInteger.accepts("-1"));
        assert!(!Builtin::Int.accepts("3000000000"));
        assert!(Builtin::Long.accepts("3000000000"));
    }

    #[test]
    fn test_whitespace_facets() {
        assert_eq!(Builtin::String.normalize(" a  b "), " a  b ");
        assert_eq!(Builtin::NormalizedString.normalize("a\tb"), "a b");
        assert_eq!(Builtin::Token.normalize("  a \n b "), "a b");
        assert_eq!(Builtin::Decimal.normalize(" 1.00\n"), "1.00");
    }

    #[test]
    fn test_names_round_trip() {
        for name in ["string", "date", "decimal", "anyURI", "boolean"] {
            assert_eq!(Builtin::from_local_name(name).unwrap().local_name(), name);
        }
        assert!(Builtin::from_local_name("duration").is_none());
    }
}
