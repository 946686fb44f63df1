//! Record classification and icon prompt construction.
pub mod classify;
pub mod constructor;

pub use classify::{classify, Classification, Kind};
pub use constructor::{icon_prompt, proof_prompt, NEGATIVE_PROMPT};
