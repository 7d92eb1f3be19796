//! Deep merge for configuration values
//!
//! Combines a default configuration with a user-supplied overlay. Objects
//! merge recursively, arrays concatenate (defaults first), and every other
//! pairing is resolved by taking the overlay value.


use crate::value::ConfigValue;

/// Merge `overlay` into `default`, returning a new value.
///
/// Rules, in order:
/// - object + object: union of keys; keys present on both sides merge
///   recursively, keys present on one side are deep-copied as-is.
/// - array + array: concatenation, default elements first. Array-valued
///   fields are additive; an overlay cannot remove a default entry.
/// - anything else (scalar replacement, raw fragments on either side, shape
///   mismatches such as object vs. string): the overlay wins outright.
///
/// Neither input is mutated, and the function is total over well-formed
/// values: it never fails.
pub fn deep_merge(default: &ConfigValue, overlay: &ConfigValue) -> ConfigValue {
    match (default, overlay) {
        (ConfigValue::Object(base), ConfigValue::Object(over)) => {
            let mut merged = base.clone();
            for (key, over_value) in over {
                let next = match base.get(key) {
                    Some(base_value) => deep_merge(base_value, over_value),
                    None => over_value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            ConfigValue::Object(merged)
        }
        (ConfigValue::Array(base), ConfigValue::Array(over)) => {
            let mut merged = Vec::with_capacity(base.len() + over.len());
            merged.extend(base.iter().cloned());
            merged.extend(over.iter().cloned());
            ConfigValue::Array(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}
