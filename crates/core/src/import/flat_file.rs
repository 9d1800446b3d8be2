//! Post-processing of converted flat files.

use serde_json::Value;

/// Key of the application-info records in a flat file.
pub const APP_INFO_KEY: &str = "app-info";

/// Set `name` on the first application-info record.
///
/// Returns false, leaving the flat file untouched, when there is no such
/// record or it is not an object.
pub fn inject_name(flat_file: &mut Value, name: &str) -> bool {
    let record = flat_file
        .get_mut(APP_INFO_KEY)
        .and_then(Value::as_array_mut)
        .and_then(|records| records.first_mut())
        .and_then(Value::as_object_mut);

    match record {
        Some(record) => {
            record.insert("name".to_string(), Value::String(name.to_string()));
            true
        }
        None => false,
    }
}
