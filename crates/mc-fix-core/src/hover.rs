//! `show_entity` hover event UUID normalization.
//!
//! Older servers and plugins emit the entity UUID of a `show_entity` hover
//! event as an int array, a byte array or a `most`/`least` object. Clients
//! expect canonical text and disconnect on anything else. [`normalize`]
//! rewrites those `id` fields and touches nothing else in the document.

use std::borrow::Cow;

use serde_json::{Map, Value};
use tracing::trace;

use crate::identifier::EntityUuid;
use crate::walker::{walk, FieldHook};

const HOVER_EVENT_KEY: &str = "hoverEvent";
const ACTION_KEY: &str = "action";
const SHOW_ENTITY: &str = "show_entity";
/// Legacy and modern locations of the tooltip payload.
const PAYLOAD_KEYS: [&str; 2] = ["value", "contents"];
const ID_KEY: &str = "id";

/// Which non-canonical encodings may be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationOptions {
    /// Four 32-bit ints or sixteen bytes.
    pub convert_int_arrays: bool,
    /// `{"most": .., "least": ..}`.
    pub convert_uuid_objects: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            convert_int_arrays: true,
            convert_uuid_objects: true,
        }
    }
}

/// One successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRecord {
    /// Compact JSON of the `id` value before rewriting.
    pub original: String,
    /// Canonical UUID text written in its place.
    pub normalized: String,
}

/// Receives a [`NormalizationRecord`] per rewritten identifier.
pub trait RecordSink {
    fn record(&mut self, record: NormalizationRecord);
}

impl<F: FnMut(NormalizationRecord)> RecordSink for F {
    fn record(&mut self, record: NormalizationRecord) {
        self(record)
    }
}

/// Normalize every `show_entity` UUID in a chat-component document.
///
/// Returns the input borrowed when it does not parse or when nothing was
/// rewritten, so untouched documents keep their exact bytes. Otherwise the
/// mutated document is re-serialized compactly with its key order intact.
pub fn normalize<'a>(
    json: &'a str,
    options: NormalizationOptions,
    sink: Option<&mut dyn RecordSink>,
) -> Cow<'a, str> {
    let mut document: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(_) => return Cow::Borrowed(json),
    };

    let mut normalizer = HoverEventNormalizer { options, sink };
    if !walk(&mut document, &mut normalizer, 0) {
        return Cow::Borrowed(json);
    }

    match serde_json::to_string(&document) {
        Ok(text) => Cow::Owned(text),
        Err(_) => Cow::Borrowed(json),
    }
}

struct HoverEventNormalizer<'s> {
    options: NormalizationOptions,
    sink: Option<&'s mut dyn RecordSink>,
}

impl FieldHook for HoverEventNormalizer<'_> {
    fn visit_field(&mut self, key: &str, value: &mut Value, depth: usize) -> Option<bool> {
        if key != HOVER_EVENT_KEY {
            return None;
        }
        match value {
            Value::Object(hover) => Some(self.hover_event(hover, depth + 1)),
            _ => None,
        }
    }
}

impl HoverEventNormalizer<'_> {
    fn hover_event(&mut self, hover: &mut Map<String, Value>, depth: usize) -> bool {
        let show_entity = hover
            .get(ACTION_KEY)
            .and_then(Value::as_str)
            .is_some_and(|action| action.eq_ignore_ascii_case(SHOW_ENTITY));

        let mut changed = false;
        for (key, child) in hover.iter_mut() {
            changed |= if show_entity && PAYLOAD_KEYS.contains(&key.as_str()) {
                self.tooltip_payload(child, depth + 1)
            } else {
                walk(child, self, depth + 1)
            };
        }
        changed
    }

    /// A payload is one tooltip object or an array of them.
    fn tooltip_payload(&mut self, payload: &mut Value, depth: usize) -> bool {
        match payload {
            Value::Object(tooltip) => self.tooltip(tooltip, depth),
            Value::Array(items) => {
                let mut changed = false;
                for item in items.iter_mut() {
                    changed |= match item {
                        Value::Object(tooltip) => self.tooltip(tooltip, depth + 1),
                        other => walk(other, self, depth + 1),
                    };
                }
                changed
            }
            other => walk(other, self, depth),
        }
    }

    fn tooltip(&mut self, tooltip: &mut Map<String, Value>, depth: usize) -> bool {
        let mut changed = false;

        if let Some(id) = tooltip.get_mut(ID_KEY) {
            if let Some(uuid) = self.extract(id) {
                let original = id.to_string();
                let normalized = uuid.to_string();
                trace!("hover event id {original} -> {normalized}");
                *id = Value::String(normalized.clone());
                changed = true;

                if let Some(sink) = self.sink.as_deref_mut() {
                    sink.record(NormalizationRecord {
                        original,
                        normalized,
                    });
                }
            }
        }

        // Tooltip names and other fields can hold nested components.
        for (key, child) in tooltip.iter_mut() {
            if key != ID_KEY {
                changed |= walk(child, self, depth + 1);
            }
        }
        changed
    }

    /// Strings are left alone: either already canonical or not ours to fix.
    fn extract(&self, id: &Value) -> Option<EntityUuid> {
        match id {
            Value::Array(items) if self.options.convert_int_arrays => match items.len() {
                4 => EntityUuid::from_int_quad(items).ok(),
                16 => EntityUuid::from_byte_sequence(items).ok(),
                _ => None,
            },
            Value::Object(fields) if self.options.convert_uuid_objects => {
                EntityUuid::from_halves(fields).ok()
            }
            _ => None,
        }
    }
}
