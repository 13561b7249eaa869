/// Embedded JSON-LD block lookup and loosely-typed field access.
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("Invalid JSON-LD selector")
});

/// Locates the first JSON-LD block in `document` and parses its payload.
///
/// Returns `None` when there is no block, when it is empty, or when the
/// payload is not well-formed JSON. Callers treat all three the same way:
/// move on to the markup fallback.
pub fn extract_structured_data(document: &Html) -> Option<Value> {
    let script = document.select(&JSON_LD_SELECTOR).next()?;
    let payload: String = script.text().collect();

    if payload.trim().is_empty() {
        tracing::debug!("structured data block is empty");
        return None;
    }

    match serde_json::from_str(&payload) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "structured data block is not valid JSON");
            None
        }
    }
}

/// Optional-field accessors over a JSON-LD tree.
///
/// Every accessor returns `None` instead of failing when the field is
/// missing, has the wrong type or the receiver is not an object at all.
pub trait JsonLdExt {
    /// Raw access to a field of an object
    fn field(&self, key: &str) -> Option<&Value>;

    /// Non-empty string field with HTML entities decoded
    fn str_field(&self, key: &str) -> Option<String>;

    /// Strictly positive integer given as number or numeric string
    fn positive_int_field(&self, key: &str) -> Option<u32>;

    /// Floating point number given as number or numeric string
    fn number_field(&self, key: &str) -> Option<f64>;
}

impl JsonLdExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key)
    }

    fn str_field(&self, key: &str) -> Option<String> {
        let raw = self.field(key)?.as_str()?;
        // IMDb entity-encodes names inside the JSON payload (`&amp;`, `&apos;`)
        let decoded = html_escape::decode_html_entities(raw).trim().to_string();
        (!decoded.is_empty()).then_some(decoded)
    }

    fn positive_int_field(&self, key: &str) -> Option<u32> {
        let n = match self.field(key)? {
            Value::Number(n) => match n.as_u64() {
                Some(n) => n,
                // `3.0` is as good as `3`
                None => n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0)? as u64,
            },
            Value::String(s) => s.trim().parse::<u64>().ok()?,
            _ => return None,
        };
        u32::try_from(n).ok().filter(|n| *n > 0)
    }

    fn number_field(&self, key: &str) -> Option<f64> {
        match self.field(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}
