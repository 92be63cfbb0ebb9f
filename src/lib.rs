//! Stacklint - Security scanning for cloud infrastructure design graphs
//!
//! Users assemble a graph of cloud resources in an external editor;
//! this crate validates it along two axes:
//!
//! - **structural legality** — which resource types may be nested inside
//!   which container types ([`containment`])
//! - **security posture** — independent rules inspect the graph for
//!   misconfigurations and produce a scored, graded report
//!   ([`rules`], [`scan`])
//!
//! The engine is a pure, synchronous function from a graph snapshot to a
//! report: no I/O, no shared state, no coordination between scans.
//!
//! ```no_run
//! use stacklint::graph::Graph;
//! use stacklint::rules::default_rules;
//! use stacklint::scan::Scanner;
//!
//! let graph = Graph::from_path("design.json")?;
//! let result = Scanner::new(default_rules()).run(&graph)?;
//! println!("score {} grade {}", result.score, result.grade);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod containment;
pub mod context;
pub mod graph;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod scan;

pub use models::{Category, Finding, ScanResult, Severity};
pub use scan::{Scanner, ScannerBuilder};
