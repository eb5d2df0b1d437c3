//! Property-based tests for the reserves store
//!
//! Property tests check invariants over generated inputs rather than
//! hand-picked cases:
//!
//! - `store_props`: derived counts always match the cached items, and the
//!   reconciliation helpers preserve order and id uniqueness for any
//!   sequence of create/update/remove operations.
//!
//! The case count can be raised with `PROPTEST_CASES`:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod store_props;
