//! OCN Presenter - reveals a run's explanation list incrementally
//!
//! Three concerns, strictly layered:
//!
//! - [`mask`]: redaction masking with a fixed placeholder; stronger than
//!   any verbosity level and purely display-time.
//! - [`render`]: verbosity projection of an already-revealed record; never
//!   affects which records appear or their order.
//! - [`reveal`]: the timed typewriter reveal with cancelable timers and a
//!   run-generation guard against late callbacks from superseded runs.

pub mod mask;
pub mod render;
pub mod reveal;

pub use mask::{mask_json, MASK_PLACEHOLDER};
pub use render::{render, RenderedDetail, RenderedMessage};
pub use reveal::{ChatPresenter, RevealEvent, RevealTiming};
