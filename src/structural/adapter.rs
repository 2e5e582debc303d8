// Adapter
//
// Intent: let objects with incompatible interfaces collaborate by wrapping
// one of them in an object that speaks the other's interface.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::transcript::Transcript;

// ============================================================================
// Conceptual example
// ============================================================================

/// The interface the client code expects.
pub trait Target {
    fn request(&self) -> String;
}

/// Useful behaviour behind an interface the client can't use directly.
pub struct Adaptee;

impl Adaptee {
    pub fn specific_request(&self) -> String {
        "Specific request.".chars().rev().collect()
    }
}

pub struct Adapter {
    adaptee: Adaptee,
}

impl Adapter {
    pub fn new(adaptee: Adaptee) -> Self {
        Self { adaptee }
    }
}

impl Target for Adapter {
    fn request(&self) -> String {
        let reversed: String = self.adaptee.specific_request().chars().rev().collect();
        format!("This is '{}'", reversed)
    }
}

pub fn conceptual_demo() -> Transcript {
    let target: Box<dyn Target> = Box::new(Adapter::new(Adaptee));
    let mut out = Transcript::new();
    out.line("Adaptee interface is incompatible with the client.");
    out.line(format!("Adaptee: {}", Adaptee.specific_request()));
    out.line("But with adapter client can call its method.");
    out.line(target.request());
    out
}

// ============================================================================
// Real-world example: XML market data into a JSON analytics library
// ============================================================================

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("malformed XML: {0}")]
    MalformedXml(String),

    #[error("invalid JSON handed to analytics: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("invalid tag pattern: {0}")]
    TagPattern(#[from] regex::Error),
}

pub trait AnalyticsLibrary {
    fn analyze_data(&self, data: &str) -> Result<String, AdapterError>;
}

/// Only understands JSON.
pub struct JsonAnalytics;

impl AnalyticsLibrary for JsonAnalytics {
    fn analyze_data(&self, json: &str) -> Result<String, AdapterError> {
        let value: Value = serde_json::from_str(json)?;
        let fields = match &value {
            Value::Object(map) => map.keys().cloned().collect::<Vec<_>>().join(", "),
            _ => String::new(),
        };
        Ok(format!("Analyzing JSON data: {} (fields: {})", value, fields))
    }
}

/// Accepts XML, converts it and hands JSON to the wrapped library.
pub struct XmlToJsonAdapter<L> {
    library: L,
}

impl<L: AnalyticsLibrary> XmlToJsonAdapter<L> {
    pub fn new(library: L) -> Self {
        Self { library }
    }
}

impl<L: AnalyticsLibrary> AnalyticsLibrary for XmlToJsonAdapter<L> {
    fn analyze_data(&self, xml: &str) -> Result<String, AdapterError> {
        debug!(xml, "converting XML to JSON");
        let json = xml_to_json(xml)?.to_string();
        self.library.analyze_data(&json)
    }
}

const TAG_PATTERN: &str = r"<(/?)([A-Za-z_][\w.\-]*)\s*>";

/// Compiled once; a compile failure is kept and reported on every call.
fn tag_regex() -> Result<&'static Regex, AdapterError> {
    static TAG: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(TAG_PATTERN))
        .as_ref()
        .map_err(|err| AdapterError::TagPattern(err.clone()))
}

/// Converts element-only XML (no attributes, no mixed content) to JSON.
/// Leaf elements become strings, repeated siblings become arrays.
pub fn xml_to_json(xml: &str) -> Result<Value, AdapterError> {
    let map = parse_children(xml.trim())?;
    if map.is_empty() {
        return Err(AdapterError::MalformedXml("document has no elements".to_string()));
    }
    Ok(Value::Object(map))
}

fn parse_children(mut rest: &str) -> Result<Map<String, Value>, AdapterError> {
    let mut map = Map::new();

    while !rest.is_empty() {
        let open = tag_regex()?
            .captures(rest)
            .filter(|caps| caps.get(0).map_or(false, |m| m.start() == 0) && &caps[1] != "/")
            .ok_or_else(|| {
                AdapterError::MalformedXml(format!("expected an opening tag at '{}'", preview(rest)))
            })?;
        let name = open[2].to_string();
        let after = &rest[open.get(0).map_or(0, |m| m.end())..];

        let (inner, remainder) = split_at_closing_tag(after, &name)?;
        let value = if inner.contains('<') {
            Value::Object(parse_children(inner.trim())?)
        } else {
            Value::String(inner.trim().to_string())
        };
        insert_value(&mut map, name, value);
        rest = remainder.trim_start();
    }

    Ok(map)
}

/// Finds the closing tag for `name`, honouring nested elements of the same
/// name. Returns (content, text after the closing tag).
fn split_at_closing_tag<'a>(after: &'a str, name: &str) -> Result<(&'a str, &'a str), AdapterError> {
    let mut depth = 0usize;
    for caps in tag_regex()?.captures_iter(after) {
        if &caps[2] != name {
            continue;
        }
        let Some(whole) = caps.get(0) else { continue };
        if &caps[1] == "/" {
            if depth == 0 {
                return Ok((&after[..whole.start()], &after[whole.end()..]));
            }
            depth -= 1;
        } else {
            depth += 1;
        }
    }
    Err(AdapterError::MalformedXml(format!("<{}> is never closed", name)))
}

fn insert_value(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

fn preview(s: &str) -> String {
    s.chars().take(20).collect()
}

pub struct StockMarketApp {
    analytics: Box<dyn AnalyticsLibrary>,
}

impl StockMarketApp {
    pub fn new(analytics: Box<dyn AnalyticsLibrary>) -> Self {
        Self { analytics }
    }

    pub fn process_market_data(&self, market_data: &str) -> Result<Vec<String>, AdapterError> {
        let analysis = self.analytics.analyze_data(market_data)?;
        Ok(vec![
            format!("Received XML market data: {}", market_data),
            analysis,
        ])
    }
}

pub fn real_world_demo() -> Result<Transcript, AdapterError> {
    let adapter = XmlToJsonAdapter::new(JsonAnalytics);
    let app = StockMarketApp::new(Box::new(adapter));

    let xml = "<marketData><symbol>ABC</symbol><price>100</price></marketData>";
    let mut out = Transcript::new();
    out.lines(app.process_market_data(xml)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adapter_unreverses_adaptee() {
        let adapter = Adapter::new(Adaptee);
        assert_eq!(Adaptee.specific_request(), ".tseuqer cificepS");
        assert_eq!(adapter.request(), "This is 'Specific request.'");
    }

    #[test]
    fn test_tag_pattern_compiles_and_errors_convert() {
        assert!(tag_regex().is_ok());
        let err: AdapterError = Regex::new("<(").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid tag pattern"));
    }

    #[test]
    fn test_xml_to_json_nested() {
        let value =
            xml_to_json("<marketData><symbol>ABC</symbol><price>100</price></marketData>").unwrap();
        assert_eq!(
            value,
            json!({"marketData": {"symbol": "ABC", "price": "100"}})
        );
    }

    #[test]
    fn test_xml_to_json_repeated_siblings_become_array() {
        let value = xml_to_json("<t><q>1</q><q>2</q><q>3</q></t>").unwrap();
        assert_eq!(value, json!({"t": {"q": ["1", "2", "3"]}}));
    }

    #[test]
    fn test_xml_to_json_same_name_nesting() {
        let value = xml_to_json("<a><a>inner</a></a>").unwrap();
        assert_eq!(value, json!({"a": {"a": "inner"}}));
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        for bad in ["", "plain text", "<a>1", "<a><b>1</a></b>", "<a>1</a>junk"] {
            assert!(
                matches!(xml_to_json(bad), Err(AdapterError::MalformedXml(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_json_library_rejects_xml_without_adapter() {
        let app = StockMarketApp::new(Box::new(JsonAnalytics));
        let err = app.process_market_data("<a>1</a>").unwrap_err();
        assert!(matches!(err, AdapterError::InvalidJson(_)));
    }

    #[test]
    fn test_stock_app_through_adapter() {
        let out = real_world_demo().unwrap();
        assert!(out.contains("Received XML market data"));
        assert!(out.contains("fields: marketData"));
    }
}
