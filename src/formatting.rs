use serde_json::{Map, Value};

use crate::prediction::pipeline::{BatchOutcome, LinePrediction, RejectedLine};
use crate::prediction::PredictionRecord;

/// Property id to value, in catalog order. Missing values are `null`.
pub fn format_record(record: &PredictionRecord) -> Map<String, Value> {
    record
        .iter()
        .map(|(property, value)| (property.id.to_string(), value.map_or(Value::Null, Value::from)))
        .collect()
}

pub fn format_records(records: &[PredictionRecord]) -> Vec<Map<String, Value>> {
    records.iter().map(format_record).collect()
}

/// `{"smi": ..., <properties>}`
pub fn format_single(record: &PredictionRecord) -> Value {
    let mut object = Map::new();
    object.insert("smi".to_string(), Value::from(record.smiles().as_str()));
    object.extend(format_record(record));
    Value::Object(object)
}

/// `{"line": ..., "smi": ..., "name"?: ..., <properties>}`
pub fn format_line_prediction(prediction: &LinePrediction) -> Value {
    let mut object = Map::new();
    object.insert("line".to_string(), Value::from(prediction.line));
    object.insert(
        "smi".to_string(),
        Value::from(prediction.record.smiles().as_str()),
    );
    if let Some(name) = &prediction.name {
        object.insert("name".to_string(), Value::from(name.as_str()));
    }
    object.extend(format_record(&prediction.record));
    Value::Object(object)
}

pub fn format_rejected_line(rejected: &RejectedLine) -> Value {
    serde_json::json!({
        "line": rejected.line,
        "smi": rejected.smiles,
        "reason": rejected.reason,
    })
}

/// `{"results": [...], "errors": [...]}`
pub fn format_batch(outcome: &BatchOutcome) -> Value {
    serde_json::json!({
        "results": outcome.predictions.iter().map(format_line_prediction).collect::<Vec<_>>(),
        "errors": outcome.rejected.iter().map(format_rejected_line).collect::<Vec<_>>(),
    })
}
