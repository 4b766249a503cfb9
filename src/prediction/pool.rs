use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::errors::AdmetError;
use crate::molecule::SmilesString;
use crate::prediction::{AdmetModel, RowPrediction};

/// Loaded model instances shared by every request handler.
///
/// Each inference call checks one instance out exclusively, so a pool of one
/// serializes all inference behind a single lock. An instance is only
/// returned once its inference call has finished, even if the request that
/// started it has gone away.
#[derive(Clone)]
pub struct ModelPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    slots: Vec<Mutex<Box<dyn AdmetModel>>>,
    idle: Mutex<Vec<usize>>,
    permits: Arc<Semaphore>,
}

struct Checkout {
    pool: Arc<PoolInner>,
    index: usize,
    _permit: OwnedSemaphorePermit,
}

impl Checkout {
    fn predict(&self, smiles: &[SmilesString]) -> eyre::Result<Vec<RowPrediction>> {
        let mut model = self.pool.slots[self.index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        log::debug!("predicting {} molecules with {}", smiles.len(), model.name());
        model.predict(smiles)
    }
}

impl Drop for Checkout {
    // the permit is released after this, so a waiter always finds an idle index
    fn drop(&mut self) {
        self.pool
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(self.index);
    }
}

impl ModelPool {
    pub fn new(models: Vec<Box<dyn AdmetModel>>) -> eyre::Result<Self> {
        if models.is_empty() {
            return Err(eyre::eyre!("model pool needs at least one model"));
        }

        let size = models.len();
        let slots = models.into_iter().map(Mutex::new).collect();

        Ok(Self {
            inner: Arc::new(PoolInner {
                slots,
                idle: Mutex::new((0..size).rev().collect()),
                permits: Arc::new(Semaphore::new(size)),
            }),
        })
    }

    /// Loads `size` instances from `load`, once, at startup.
    pub fn load<F>(size: usize, mut load: F) -> eyre::Result<Self>
    where
        F: FnMut() -> eyre::Result<Box<dyn AdmetModel>>,
    {
        let models = (0..size).map(|_| load()).collect::<eyre::Result<Vec<_>>>()?;
        Self::new(models)
    }

    pub fn size(&self) -> usize {
        self.inner.slots.len()
    }

    async fn checkout(&self) -> Result<Checkout, AdmetError> {
        let permit = self
            .inner
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AdmetError::Prediction(e.to_string()))?;

        let index = self
            .inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .ok_or_else(|| AdmetError::Prediction("no idle model despite permit".to_string()))?;

        Ok(Checkout {
            pool: self.inner.clone(),
            index,
            _permit: permit,
        })
    }

    /// Runs one inference call over `smiles` on a blocking thread.
    ///
    /// Returns exactly one row per input, in input order.
    pub async fn predict(
        &self,
        smiles: Vec<SmilesString>,
    ) -> Result<Vec<RowPrediction>, AdmetError> {
        if smiles.is_empty() {
            return Err(AdmetError::EmptyInput);
        }

        let checkout = self.checkout().await?;
        let expected_rows = smiles.len();

        let rows = tokio::task::spawn_blocking(move || checkout.predict(&smiles))
            .await?
            .map_err(|e| {
                log::error!("inference failed: {:?}", e);
                AdmetError::Prediction(e.to_string())
            })?;

        if rows.len() != expected_rows {
            return Err(AdmetError::Prediction(format!(
                "model returned {} rows for {} molecules",
                rows.len(),
                expected_rows
            )));
        }

        Ok(rows)
    }
}
