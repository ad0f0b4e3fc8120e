//! Merging of layered config documents.

use serde_json::Value;
use serde_json::map::Entry;

/// Apply a later layer on top of the documents read so far.
///
/// Sections present in both layers combine; a setting from the later layer
/// wins, including arrays and explicit `null`s.
pub(super) fn merge_documents(accumulated: &mut Value, layer: Value) {
    match (accumulated.as_object_mut(), layer) {
        (Some(sections), Value::Object(layer_sections)) => {
            for (key, value) in layer_sections {
                match sections.entry(key) {
                    Entry::Occupied(mut slot) => merge_documents(slot.get_mut(), value),
                    Entry::Vacant(slot) => {
                        slot.insert(value);
                    }
                }
            }
        }
        (_, layer) => *accumulated = layer,
    }
}
