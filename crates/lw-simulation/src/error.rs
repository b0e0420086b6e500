use lw_core::LwError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Unrecoverable engine errors.
///
/// Bad player input never ends up here; it is logged as a rejected command
/// instead. These variants mean the engine itself was misconfigured.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The world could not be built from its configuration.
    #[error("world configuration rejected: {0}")]
    Config(#[from] LwError),

    /// A passenger was requested for a building with no second floor to go to.
    #[error("cannot pick a destination in a building with {floors} floor(s)")]
    NoDestination {
        /// The building's floor count.
        floors: usize,
    },

    /// The passenger kind pool has a total weight of zero.
    #[error("passenger kind pool has zero total weight")]
    EmptyKindPool,

    /// The weighted walk finished without selecting an entry.
    #[error("weighted draw of {roll} selected no kind (total weight {total})")]
    WeightedDrawMissed {
        /// The value drawn from `[0, total)`.
        roll: u32,
        /// The pool's total weight.
        total: u32,
    },
}
