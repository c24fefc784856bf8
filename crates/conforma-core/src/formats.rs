//! Named string-shape formats
//!
//! A [`Format`] is either a compiled regular expression or a predicate over
//! the JSON value. The core table ships email, ip-address, ipv6, date-time,
//! date, time, color, host-name, utc-millisec, and regex; the extension
//! table ships url. Formats are only consulted for string-resolved values,
//! so predicate formats written against other shapes (utc-millisec) can
//! never pass there.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

/// Format predicate over the JSON value being checked.
pub type FormatFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named format's implementation.
#[derive(Clone)]
pub enum Format {
    Pattern(Regex),
    Predicate(FormatFn),
}

impl Format {
    /// Wrap a compiled pattern.
    pub fn pattern(re: Regex) -> Self {
        Format::Pattern(re)
    }

    /// Wrap a predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Format::Predicate(Arc::new(f))
    }

    /// Test a value against the format. Pattern formats match string values
    /// only; predicate formats see the raw value.
    pub fn test(&self, value: &Value) -> bool {
        match self {
            Format::Pattern(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Format::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            Format::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<Regex> for Format {
    fn from(re: Regex) -> Self {
        Format::Pattern(re)
    }
}

const EMAIL: &str = r"(?i)^((([a-z]|\d|[!#$%&'*+\-/=?^_`{|}~]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])+(\.([a-z]|\d|[!#$%&'*+\-/=?^_`{|}~]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])+)*)|((\x22)((((\x20|\x09)*(\x0d\x0a))?(\x20|\x09)+)?(([\x01-\x08\x0b\x0c\x0e-\x1f\x7f]|\x21|[\x23-\x5b]|[\x5d-\x7e]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(\\([\x01-\x09\x0b\x0c\x0d-\x7f]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}]))))*(((\x20|\x09)*(\x0d\x0a))?(\x20|\x09)+)?(\x22)))@((([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])*([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])))\.)+(([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])*([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])))\.?$";

const IP_ADDRESS: &str = r"(?i)^(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$";

const IPV6: &str = r"^([0-9A-Fa-f]{1,4}:){7}[0-9A-Fa-f]{1,4}$";

// The unescaped dot before the fractional seconds is long-standing behavior;
// schemas in the wild rely on the permissive separator.
const DATE_TIME: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:.\d{1,3})?Z$";

const DATE: &str = r"^\d{4}-\d{2}-\d{2}$";

const TIME: &str = r"^\d{2}:\d{2}:\d{2}$";

const COLOR: &str = r"(?i)^(#([0-9a-f]{3}){1,2}|rgb\((\s*(\d{1,2}|[01][0-9][0-9]|2[0-4][0-9]|25[0-5])\s*,){2}\s*(\d{1,2}|[01][0-9][0-9]|2[0-4][0-9]|25[0-5])\s*\)|aqua|black|blue|fuchsia|gray|green|lime|maroon|navy|olive|orange|purple|red|silver|teal|white|yellow)$";

// Anchored at the start only; a hostname prefix is enough.
const HOST_NAME: &str = r"^(([a-zA-Z]|[a-zA-Z][a-zA-Z0-9\-]*[a-zA-Z0-9])\.)*([A-Za-z]|[A-Za-z][A-Za-z0-9\-]*[A-Za-z0-9])";

const URL: &str = r"(?i)^(https?|ftp|git)://(((([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(%[\da-f]{2})|[!$&'()*+,;=]|:)*@)?(((\d|[1-9]\d|1\d\d|2[0-4]\d|25[0-5])\.(\d|[1-9]\d|1\d\d|2[0-4]\d|25[0-5])\.(\d|[1-9]\d|1\d\d|2[0-4]\d|25[0-5])\.(\d|[1-9]\d|1\d\d|2[0-4]\d|25[0-5]))|((([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])*([a-z]|\d|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])))\.)+(([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])*([a-z]|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])))\.?)(:\d*)?)(/((([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(%[\da-f]{2})|[!$&'()*+,;=]|:|@)+(/(([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(%[\da-f]{2})|[!$&'()*+,;=]|:|@)*)*)?)?(\?((([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(%[\da-f]{2})|[!$&'()*+,;=]|:|@)|[\u{E000}-\u{F8FF}]|/|\?)*)?(#((([a-z]|\d|-|\.|_|~|[\u{00A0}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])|(%[\da-f]{2})|[!$&'()*+,;=]|:|@)|/|\?)*)?$";

fn pattern(source: &str) -> Format {
    Format::Pattern(Regex::new(source).unwrap())
}

/// The seeded core format table.
pub(crate) fn core_formats() -> Vec<(&'static str, Format)> {
    vec![
        ("email", pattern(EMAIL)),
        ("ip-address", pattern(IP_ADDRESS)),
        ("ipv6", pattern(IPV6)),
        ("date-time", pattern(DATE_TIME)),
        ("date", pattern(DATE)),
        ("time", pattern(TIME)),
        ("color", pattern(COLOR)),
        ("host-name", pattern(HOST_NAME)),
        (
            "utc-millisec",
            Format::predicate(|value| value.as_f64().is_some_and(|n| n >= 0.0)),
        ),
        (
            "regex",
            Format::predicate(|value| {
                value.as_str().is_some_and(|s| Regex::new(s).is_ok())
            }),
        ),
    ]
}

/// The seeded extension format table.
pub(crate) fn extension_formats() -> Vec<(&'static str, Format)> {
    vec![("url", pattern(URL))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn core(name: &str) -> Format {
        core_formats()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
            .unwrap()
    }

    #[test]
    fn test_email() {
        let email = core("email");
        assert!(email.test(&json!("obelix@gaul.org")));
        assert!(email.test(&json!("Asterix.The.Gaul@armorica.info")));
        assert!(!email.test(&json!("not-an-email")));
        assert!(!email.test(&json!(42)));
    }

    #[test]
    fn test_ip_address() {
        let ip = core("ip-address");
        assert!(ip.test(&json!("192.168.0.1")));
        assert!(ip.test(&json!("255.255.255.255")));
        assert!(!ip.test(&json!("256.0.0.1")));
        assert!(!ip.test(&json!("192.168.0")));
    }

    #[test]
    fn test_ipv6() {
        let ipv6 = core("ipv6");
        assert!(ipv6.test(&json!("2001:0db8:85a3:0000:0000:8a2e:0370:7334")));
        assert!(!ipv6.test(&json!("2001:db8::1")));
    }

    #[test]
    fn test_date_time_and_parts() {
        assert!(core("date-time").test(&json!("2013-01-09T12:30:00Z")));
        assert!(core("date-time").test(&json!("2013-01-09T12:30:00.123Z")));
        assert!(!core("date-time").test(&json!("2013-01-09 12:30:00")));
        assert!(core("date").test(&json!("2013-01-09")));
        assert!(!core("date").test(&json!("01/09/2013")));
        assert!(core("time").test(&json!("12:30:00")));
        assert!(!core("time").test(&json!("12:30")));
    }

    #[test]
    fn test_color() {
        let color = core("color");
        assert!(color.test(&json!("red")));
        assert!(color.test(&json!("#f00")));
        assert!(color.test(&json!("#FF0000")));
        assert!(color.test(&json!("rgb(255, 0, 0)")));
        assert!(!color.test(&json!("puce")));
    }

    #[test]
    fn test_host_name() {
        let host = core("host-name");
        assert!(host.test(&json!("www.example.com")));
        assert!(host.test(&json!("localhost")));
    }

    #[test]
    fn test_utc_millisec_is_numeric_only() {
        let fmt = core("utc-millisec");
        assert!(fmt.test(&json!(123456789)));
        assert!(fmt.test(&json!(0)));
        assert!(!fmt.test(&json!(-5)));
        assert!(!fmt.test(&json!("123456789")));
    }

    #[test]
    fn test_regex_format() {
        let fmt = core("regex");
        assert!(fmt.test(&json!("^ab+$")));
        assert!(!fmt.test(&json!("(unclosed")));
    }

    #[test]
    fn test_url_extension() {
        let url = extension_formats()
            .into_iter()
            .find(|(n, _)| *n == "url")
            .map(|(_, f)| f)
            .unwrap();
        assert!(url.test(&json!("http://www.example.com/")));
        assert!(url.test(&json!("https://example.com/search?q=hello")));
        assert!(url.test(&json!("ftp://files.example.com/pub")));
        assert!(url.test(&json!("git://github.com/example/repo")));
        assert!(!url.test(&json!("example.com")));
        assert!(!url.test(&json!("mailto:someone@example.com")));
    }
}
