//! Property-based suites holding every labeler to the same partition.
//!
//! The batch two-pass labeler is the oracle. Streaming insertion in an
//! arbitrary permutation and each baseline must induce the same partition of
//! the foreground, and every output must use the dense label range `1..=K`.

mod equivalence;
mod strategies;
mod structural;
mod types;
