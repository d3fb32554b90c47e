//! Unit test suite for rpcfinder
//!
//! These tests exercise the library crate directly, without going through
//! the binary. They focus on how the pieces compose: a real data directory
//! feeding the repository, cache, and resolver, and the HTTP source talking
//! to an in-process server. Behavior local to one module is tested in that
//! module's own `#[cfg(test)]` block.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod http_source;
