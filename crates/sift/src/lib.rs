//! sift: inspect tolerant search queries.
//!
//! The `sift` binary runs the `sift-query` engine over a query and shows each
//! stage of the pipeline: the repaired token stream, the parsed expression
//! tree, and the words a search backend would receive. Settings come from
//! `.sift.toml` files discovered by `sift-config`.

#![warn(missing_docs)]

pub mod cli;
