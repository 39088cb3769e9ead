// ============================================================================
// Debounce Module
// Coalesce rapid inputs into the last value after a quiet period
// ============================================================================

mod debouncer;

pub use debouncer::Debouncer;
