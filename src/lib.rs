//! Creative-writing benchmark for language models.
//!
//! Every candidate model writes a response to the same prompt, a separate
//! judge model scores each response on a four-part rubric, and the results
//! come back ranked by total score.
//!
//! ```no_run
//! use cwbench::{config::load_config, BenchmarkOrchestrator};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = load_config(None)?;
//! let bench = BenchmarkOrchestrator::from_config(&loaded.config)?;
//! let results = bench
//!     .run_benchmark(&["openai/gpt-4o-mini", "openai/gpt-4.1-mini"], "Write two sentences about rain.")
//!     .await?;
//! for r in &results {
//!     println!("{:>2}  {}", r.total(), r.model);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod invoker;
pub mod judge;
pub mod orchestrator;
pub mod result;
pub mod score;

pub use error::BenchError;
pub use invoker::ModelInvoker;
pub use orchestrator::BenchmarkOrchestrator;
pub use result::{BenchmarkResult, BenchmarkRun, GenerationResult, ScoreSource};
pub use score::{Dimension, ScoreSet};
