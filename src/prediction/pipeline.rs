use rayon::prelude::*;

use crate::errors::AdmetError;
use crate::molecule::{validate_with, SmilesString, ValidationOptions};
use crate::prediction::{ModelPool, PredictionRecord, RowPrediction};

lazy_static::lazy_static! {
    // SMILES, then an optional molecule name as in .smi files
    static ref SMI_LINE_RE: regex::Regex =
        regex::Regex::new(r"^(?P<smiles>\S+)(?:\s+(?P<name>.*\S))?$").unwrap();
}

/// One non-blank line of an uploaded SMILES file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmilesLine {
    /// 1-based, counting blank lines.
    pub line: usize,
    pub smiles: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePrediction {
    pub line: usize,
    pub name: Option<String>,
    pub record: PredictionRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub line: usize,
    pub smiles: String,
    pub reason: String,
}

/// Predictions and rejections of a batch, each ordered by line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub predictions: Vec<LinePrediction>,
    pub rejected: Vec<RejectedLine>,
}

pub fn parse_lines(text: &str) -> Vec<SmilesLine> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let captures = SMI_LINE_RE.captures(line.trim())?;
            Some(SmilesLine {
                line: idx + 1,
                smiles: captures["smiles"].to_string(),
                name: captures.name("name").map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}

/// Validates, predicts and unwraps a single molecule. Any failure aborts.
pub async fn predict_one(
    pool: &ModelPool,
    raw: &str,
    options: ValidationOptions,
) -> Result<PredictionRecord, AdmetError> {
    let smiles = validate_with(raw, options)?;

    let row = pool
        .predict(vec![smiles])
        .await?
        .pop()
        .ok_or(AdmetError::EmptyInput)?;

    match row {
        RowPrediction::Predicted(record) => Ok(record),
        RowPrediction::Failed { smiles, reason } => Err(AdmetError::Prediction(format!(
            "{}: {}",
            smiles, reason
        ))),
    }
}

/// Predicts every line that validates; malformed lines and molecules the
/// model rejects are reported instead of failing the batch.
pub async fn predict_lines(
    pool: &ModelPool,
    lines: Vec<SmilesLine>,
    options: ValidationOptions,
) -> Result<BatchOutcome, AdmetError> {
    if lines.is_empty() {
        return Err(AdmetError::EmptyInput);
    }

    let validated = tokio::task::spawn_blocking(move || {
        lines
            .into_par_iter()
            .map(|line| {
                let result = validate_with(&line.smiles, options);
                (line, result)
            })
            .collect::<Vec<_>>()
    })
    .await?;

    let mut outcome = BatchOutcome::default();
    let mut accepted: Vec<SmilesLine> = Vec::with_capacity(validated.len());
    let mut batch: Vec<SmilesString> = Vec::with_capacity(validated.len());

    for (line, result) in validated {
        match result {
            Ok(smiles) => {
                batch.push(smiles);
                accepted.push(line);
            }
            Err(e) => outcome.rejected.push(RejectedLine {
                line: line.line,
                smiles: line.smiles,
                reason: e.to_string(),
            }),
        }
    }

    log::info!(
        "batch of {} molecules, {} rejected before prediction",
        accepted.len() + outcome.rejected.len(),
        outcome.rejected.len()
    );

    if batch.is_empty() {
        return Ok(outcome);
    }

    let rows = pool.predict(batch).await?;
    for (line, row) in accepted.into_iter().zip(rows) {
        match row {
            RowPrediction::Predicted(record) => outcome.predictions.push(LinePrediction {
                line: line.line,
                name: line.name,
                record,
            }),
            RowPrediction::Failed { reason, .. } => outcome.rejected.push(RejectedLine {
                line: line.line,
                smiles: line.smiles,
                reason,
            }),
        }
    }
    outcome.rejected.sort_by_key(|rejected| rejected.line);

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::prediction::AdmetModel;

    /// Rejects any molecule containing nitrogen, counts calls.
    struct NoNitrogenModel {
        calls: Arc<AtomicUsize>,
    }

    impl AdmetModel for NoNitrogenModel {
        fn name(&self) -> &str {
            "no-nitrogen"
        }

        fn predict(&mut self, smiles: &[SmilesString]) -> eyre::Result<Vec<RowPrediction>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(smiles
                .iter()
                .map(|s| {
                    if s.as_str().contains('N') {
                        RowPrediction::failed(s, "nitrogen not supported")
                    } else {
                        RowPrediction::Predicted(PredictionRecord::from_values(
                            s.clone(),
                            [("logP", 1.5)],
                        ))
                    }
                })
                .collect())
        }
    }

    fn pool() -> (ModelPool, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let pool = ModelPool::new(vec![Box::new(NoNitrogenModel {
            calls: calls.clone(),
        })])
        .unwrap();
        (pool, calls)
    }

    #[test]
    fn test_parse_lines() {
        let lines = parse_lines("CCO\n\n  garbage$$  \r\nc1ccccc1 benzene ring\n   \n");
        assert_eq!(
            lines,
            vec![
                SmilesLine {
                    line: 1,
                    smiles: "CCO".to_string(),
                    name: None
                },
                SmilesLine {
                    line: 3,
                    smiles: "garbage$$".to_string(),
                    name: None
                },
                SmilesLine {
                    line: 4,
                    smiles: "c1ccccc1".to_string(),
                    name: Some("benzene ring".to_string())
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_partial_failure() {
        let (pool, _) = pool();
        let lines = parse_lines("CCO\n\ngarbage$$\nCCC");
        let outcome = predict_lines(&pool, lines, ValidationOptions::default())
            .await
            .unwrap();

        let predicted = outcome
            .predictions
            .iter()
            .map(|p| (p.line, p.record.smiles().as_str()))
            .collect::<Vec<_>>();
        assert_eq!(predicted, vec![(1, "CCO"), (4, "CCC")]);

        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].line, 3);
        assert_eq!(outcome.rejected[0].smiles, "garbage$$");
    }

    #[tokio::test]
    async fn test_model_rejections_are_reported_in_line_order() {
        let (pool, _) = pool();
        let lines = parse_lines("CCN\nCCO\nC1CC\nc1ccccc1");
        let outcome = predict_lines(&pool, lines, ValidationOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.predictions.len(), 2);
        let rejected = outcome.rejected.iter().map(|r| r.line).collect::<Vec<_>>();
        assert_eq!(rejected, vec![1, 3]);
        assert_eq!(outcome.rejected[0].reason, "nitrogen not supported");
    }

    #[tokio::test]
    async fn test_all_malformed_skips_model() {
        let (pool, calls) = pool();
        let outcome = predict_lines(&pool, parse_lines("foo$\nbar$"), ValidationOptions::default())
            .await
            .unwrap();

        assert!(outcome.predictions.is_empty());
        assert_eq!(outcome.rejected.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_validation_runs_off_the_runtime() {
        let (pool, calls) = pool();
        let text = "C1CC\n".repeat(2000);

        let ran = Arc::new(AtomicBool::new(false));
        let ticker = {
            let ran = ran.clone();
            tokio::spawn(async move { ran.store(true, Ordering::SeqCst) })
        };

        let outcome = predict_lines(&pool, parse_lines(&text), ValidationOptions::default())
            .await
            .unwrap();

        // nothing else awaits when every line is malformed, so on a single
        // threaded runtime the ticker only runs if validation yielded
        assert_eq!(outcome.rejected.len(), 2000);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(ran.load(Ordering::SeqCst));
        ticker.await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_batch_is_empty_input() {
        let (pool, _) = pool();
        let result = predict_lines(&pool, parse_lines("\n  \n"), ValidationOptions::default()).await;
        assert_eq!(result, Err(AdmetError::EmptyInput));
    }

    #[tokio::test]
    async fn test_predict_one() {
        let (pool, calls) = pool();
        let options = ValidationOptions::default();

        let record = predict_one(&pool, "OCC", options).await.unwrap();
        assert_eq!(record.smiles().as_str(), "CCO");
        assert_eq!(record.get("logP"), Some(1.5));

        assert!(matches!(
            predict_one(&pool, "not_a_smiles!!", options).await,
            Err(AdmetError::MalformedSmiles { .. })
        ));
        assert!(matches!(
            predict_one(&pool, "CCN", options).await,
            Err(AdmetError::Prediction(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
