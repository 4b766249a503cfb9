use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};
use tokio::runtime::Handle;

use crate::molecule::SmilesString;
use crate::prediction::{AdmetModel, PredictionRecord, RowPrediction};

#[derive(Serialize)]
struct PredictRequest<'a> {
    smiles: Vec<&'a str>,
}

/// Client for an ADMET model served over HTTP.
///
/// The server receives `{"smiles": [...]}` and answers with a JSON array
/// holding one entry per molecule: an object keyed by property id, or `null`
/// / `{"error": "..."}` for a molecule it could not featurize.
pub struct RemoteModel {
    client: reqwest::Client,
    url: String,
    runtime: Handle,
}

impl RemoteModel {
    /// Must be called from within the tokio runtime that will serve requests.
    pub fn new(url: &str, timeout: Duration) -> eyre::Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| eyre::eyre!("remote model needs a tokio runtime: {}", e))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            runtime,
        })
    }

    async fn request(&self, smiles: &[SmilesString]) -> eyre::Result<Vec<Value>> {
        let body = PredictRequest {
            smiles: smiles.iter().map(|s| s.as_str()).collect(),
        };

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(eyre::eyre!("model server answered {}: {}", status, text));
        }

        Ok(response.json::<Vec<Value>>().await?)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn object_to_row(smiles: &SmilesString, object: &Map<String, Value>) -> RowPrediction {
    if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
        let reason = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return RowPrediction::failed(smiles, reason);
    }

    let values = object
        .iter()
        .filter_map(|(id, value)| as_number(value).map(|v| (id.as_str(), v)));
    RowPrediction::Predicted(PredictionRecord::from_values(smiles.clone(), values))
}

/// Maps one response entry onto the catalog.
pub fn parse_row(smiles: &SmilesString, value: &Value) -> RowPrediction {
    match value {
        Value::Object(object) => object_to_row(smiles, object),
        Value::Null => RowPrediction::failed(smiles, "model produced no prediction"),
        other => RowPrediction::failed(smiles, format!("unexpected model output {}", other)),
    }
}

impl AdmetModel for RemoteModel {
    fn name(&self) -> &str {
        &self.url
    }

    fn predict(&mut self, smiles: &[SmilesString]) -> eyre::Result<Vec<RowPrediction>> {
        let entries = self.runtime.block_on(self.request(smiles))?;
        if entries.len() != smiles.len() {
            return Err(eyre::eyre!(
                "model server returned {} entries for {} molecules",
                entries.len(),
                smiles.len()
            ));
        }

        Ok(smiles
            .iter()
            .zip(entries.iter())
            .map(|(s, entry)| parse_row(s, entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::molecule::validate;

    #[test]
    fn test_parse_row_values() {
        let smiles = validate("CCO").unwrap();
        let row = parse_row(
            &smiles,
            &json!({"logP": -0.0014, "hERG": 0.1, "PAINS_alert": true, "comment": "ignored"}),
        );

        match row {
            RowPrediction::Predicted(record) => {
                assert_eq!(record.get("logP"), Some(-0.0014));
                assert_eq!(record.get("hERG"), Some(0.1));
                assert_eq!(record.get("AMES"), None);
            }
            failed => panic!("expected a prediction, got {:?}", failed),
        }
    }

    #[test]
    fn test_parse_row_failures() {
        let smiles = validate("CCO").unwrap();

        assert_eq!(
            parse_row(&smiles, &json!({"error": "cannot featurize"})),
            RowPrediction::failed(&smiles, "cannot featurize")
        );
        assert!(matches!(
            parse_row(&smiles, &Value::Null),
            RowPrediction::Failed { .. }
        ));
        assert!(matches!(
            parse_row(&smiles, &json!([1, 2])),
            RowPrediction::Failed { .. }
        ));
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        assert!(RemoteModel::new("http://localhost:1/predict", Duration::from_secs(1)).is_err());
    }
}
