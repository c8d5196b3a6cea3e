use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc::{self, Receiver},
    Arc, Mutex, MutexGuard, PoisonError,
};

use crate::{
    difficulty::{CalculationError, ChartAttributes, Difficulty},
    model::chart::Chart,
};

/// Shared flag to abandon an in-flight calculation.
///
/// Clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Identifier of a chart, e.g. its track reference.
pub type ChartKey = String;

/// Keeps the attributes of the currently selected chart and calculates newly
/// requested charts in the background.
///
/// Requesting a new chart cancels the previous request; results of cancelled
/// or superseded requests are never installed.
pub struct ChartSelector {
    difficulty: Difficulty,
    state: Arc<Mutex<SelectorState>>,
    generation: Arc<AtomicU64>,
}

#[derive(Default)]
struct SelectorState {
    selected: Option<(ChartKey, Arc<ChartAttributes>)>,
    requested: Option<(ChartKey, CancellationToken)>,
}

impl ChartSelector {
    /// Create a selector whose calculations use the given configuration.
    ///
    /// Cancellation tokens of `difficulty` are replaced per request.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            state: Arc::default(),
            generation: Arc::default(),
        }
    }

    /// Attributes of the currently installed chart.
    pub fn selected(&self) -> Option<(ChartKey, Arc<ChartAttributes>)> {
        self.lock().selected.clone()
    }

    /// Start calculating `chart` on the rayon thread pool.
    ///
    /// Returns `None` if `key` is already selected or is the most recent
    /// request.
    pub fn request(&self, key: impl Into<ChartKey>, chart: Chart) -> Option<SelectionHandle> {
        let key = key.into();
        let token = CancellationToken::new();

        let generation = {
            let mut state = self.lock();

            let selected = state.selected.as_ref().is_some_and(|(k, _)| *k == key);
            let requested = state.requested.as_ref().is_some_and(|(k, _)| *k == key);

            if selected || requested {
                return None;
            }

            let prev = state.requested.replace((key.clone(), token.clone()));

            if let Some((_prev_key, prev_token)) = prev {
                prev_token.cancel();

                #[cfg(feature = "tracing")]
                tracing::debug!(chart = %_prev_key, "Superseded chart calculation");
            }

            self.generation.fetch_add(1, Ordering::AcqRel) + 1
        };

        let difficulty = self.difficulty.clone().cancellation(token.clone());
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);
        let (tx, rx) = mpsc::channel();

        rayon::spawn(move || {
            let res = difficulty.calculate(&chart).map(Arc::new);

            let outcome = {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);

                let is_latest = latest.load(Ordering::Acquire) == generation;

                match res {
                    Ok(attrs) if is_latest && !token.is_cancelled() => {
                        state.requested = None;
                        state.selected = Some((key, Arc::clone(&attrs)));

                        Ok(attrs)
                    }
                    Ok(_) | Err(CalculationError::Cancelled) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(chart = %key, "Discarded chart calculation");

                        Err(CalculationError::Cancelled)
                    }
                    Err(err) => {
                        if is_latest {
                            state.requested = None;
                        }

                        Err(err)
                    }
                }
            };

            // The handle might have been dropped already
            let _ = tx.send(outcome);
        });

        Some(SelectionHandle { rx })
    }

    fn lock(&self) -> MutexGuard<'_, SelectorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a requested chart calculation.
pub struct SelectionHandle {
    rx: Receiver<Result<Arc<ChartAttributes>, CalculationError>>,
}

impl SelectionHandle {
    /// Block until the calculation finished.
    ///
    /// Returns [`CalculationError::Cancelled`] if the request was superseded.
    pub fn wait(self) -> Result<Arc<ChartAttributes>, CalculationError> {
        self.rx.recv().unwrap_or(Err(CalculationError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();

        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
