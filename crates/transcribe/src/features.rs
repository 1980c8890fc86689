use serde_json::Value;

use crate::{
    error::{Result, TranscribeError},
    types::FeatureMap,
};

/// Parse the `features` form field into a JSON object
pub(crate) fn parse_features(raw: Option<&str>) -> Result<FeatureMap> {
    let raw = raw.ok_or_else(|| TranscribeError::InvalidFeatures("Missing required 'features' field".to_string()))?;

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TranscribeError::InvalidFeatures(format!(
            "features must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(TranscribeError::InvalidFeatures(e.to_string())),
    }
}

/// Merge model, version and tier into the provider options
///
/// Tier defaults depend on the model: `whisper-cloud` falls back to `base`,
/// `general` to `nova-2` (an empty tier counts as missing for both),
/// `whisper` passes the caller's tier through as-is, and any other model
/// gets no tier from the form. A `tier` already inside `features` is left
/// alone for those other models.
pub(crate) fn apply_model_options(features: &mut FeatureMap, model: &str, version: Option<&str>, tier: Option<&str>) {
    features.insert("model".to_string(), Value::from(model));

    if let Some(version) = version {
        features.insert("version".to_string(), Value::from(version));
    }

    let chosen = tier.filter(|t| !t.is_empty());
    let tier = match model {
        "whisper-cloud" => Some(chosen.unwrap_or("base")),
        "whisper" => tier,
        "general" => Some(chosen.unwrap_or("nova-2")),
        _ => None,
    };

    if let Some(tier) = tier {
        features.insert("tier".to_string(), Value::from(tier));
    }
}

/// Flatten provider options into query parameters
///
/// Arrays repeat their key, `null` is dropped, and nested objects are sent
/// as compact JSON.
pub(crate) fn query_pairs(features: &FeatureMap) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(features.len());

    for (key, value) in features {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(encoded) = scalar(item) {
                        pairs.push((key.clone(), encoded));
                    }
                }
            }
            other => {
                if let Some(encoded) = scalar(other) {
                    pairs.push((key.clone(), encoded));
                }
            }
        }
    }

    pairs
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
