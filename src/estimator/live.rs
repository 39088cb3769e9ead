// ============================================================================
// Live Estimator
// Percentage input fed through the debouncer, reset on tab switches
// ============================================================================

use super::fill::{FillEstimate, PercentageInput};
use crate::debounce::Debouncer;
use crate::domain::MarketTab;
use crate::numeric::{DecimalContext, NumericResult};
use crate::stats::DepthStats;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

type Listener = Arc<dyn Fn(&PercentageInput) + Send + Sync>;

struct LiveState {
    input: PercentageInput,
    /// Bumped on every tab switch; deliveries from an older epoch are dropped
    epoch: u64,
}

/// Estimator state driven by raw keystrokes.
///
/// [`input`] feeds the debouncer; only the value that survives the quiet
/// period becomes the committed percentage. [`switch_tab`] clears the
/// committed percentage and discards any value still waiting, so estimates
/// are undefined until the user types again.
///
/// [`input`]: LiveEstimator::input
/// [`switch_tab`]: LiveEstimator::switch_tab
pub struct LiveEstimator {
    state: Arc<Mutex<LiveState>>,
    debouncer: Debouncer<(u64, String)>,
}

impl LiveEstimator {
    pub fn new(tab: MarketTab, quiet_period: Duration) -> Self {
        Self::build(tab, quiet_period, None)
    }

    /// Like [`LiveEstimator::new`], calling `listener` with the updated input
    /// after every committed percentage.
    pub fn with_listener<F>(tab: MarketTab, quiet_period: Duration, listener: F) -> Self
    where
        F: Fn(&PercentageInput) + Send + Sync + 'static,
    {
        Self::build(tab, quiet_period, Some(Arc::new(listener)))
    }

    fn build(tab: MarketTab, quiet_period: Duration, listener: Option<Listener>) -> Self {
        let state = Arc::new(Mutex::new(LiveState {
            input: PercentageInput::new(tab),
            epoch: 0,
        }));

        let target = Arc::clone(&state);
        let debouncer = Debouncer::new(quiet_period, move |(epoch, value): (u64, String)| {
            let committed = {
                let mut state = target.lock();
                if state.epoch != epoch {
                    tracing::trace!("dropping percentage from a previous tab");
                    return;
                }
                state.input.set_percentage(value);
                state.input.clone()
            };

            if let Some(listener) = &listener {
                listener(&committed);
            }
        });

        Self { state, debouncer }
    }

    /// Record a raw percentage keystroke. Must run inside a Tokio runtime.
    pub fn input(&self, raw: impl Into<String>) {
        let epoch = self.state.lock().epoch;
        self.debouncer.submit((epoch, raw.into()));
    }

    /// Activate `tab`. Returns `true` when the tab changed, in which case the
    /// percentage is cleared and any pending input discarded.
    pub fn switch_tab(&self, tab: MarketTab) -> bool {
        let changed = {
            let mut state = self.state.lock();
            let changed = state.input.switch_tab(tab);
            if changed {
                state.epoch += 1;
            }
            changed
        };

        if changed {
            self.debouncer.cancel();
        }
        changed
    }

    pub fn tab(&self) -> MarketTab {
        self.state.lock().input.tab()
    }

    /// The debounced percentage currently driving estimates
    pub fn committed_percentage(&self) -> String {
        self.state.lock().input.percentage().to_string()
    }

    /// A keystroke is still waiting for the quiet period
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Snapshot of the committed input
    pub fn snapshot(&self) -> PercentageInput {
        self.state.lock().input.clone()
    }

    pub fn estimate(
        &self,
        ctx: &DecimalContext,
        depth: &DepthStats,
    ) -> NumericResult<FillEstimate> {
        self.snapshot().estimate(ctx, depth)
    }
}
