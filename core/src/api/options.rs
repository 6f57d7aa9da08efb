//! Configuration options for the tally engine.

use crate::evaluator::EvaluatorOptions;

/// Configuration options for the tally engine.
///
/// # Example
///
/// ```
/// use tally_core::api::EngineOptions;
/// use tally_core::evaluator::EvaluatorOptions;
///
/// let options = EngineOptions {
///     arena_capacity: 1 << 16,
///     evaluator: EvaluatorOptions { max_depth: 64 },
///     ..EngineOptions::default()
/// };
/// assert_eq!(options.render_capacity, 512);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Byte budget of the node arena. Each node costs
    /// [`NODE_SIZE`](crate::arena::NODE_SIZE) bytes.
    ///
    /// Default: 4096
    pub arena_capacity: usize,

    /// Limits applied to every evaluation.
    pub evaluator: EvaluatorOptions,

    /// Size of the buffer the canonical rendering is written into,
    /// including the terminating zero byte.
    ///
    /// Default: 512
    pub render_capacity: usize,
}

impl EngineOptions {
    pub const DEFAULT_ARENA_CAPACITY: usize = 4096;
    pub const DEFAULT_RENDER_CAPACITY: usize = 512;
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            arena_capacity: Self::DEFAULT_ARENA_CAPACITY,
            evaluator: EvaluatorOptions::default(),
            render_capacity: Self::DEFAULT_RENDER_CAPACITY,
        }
    }
}
