//! # bftree
//!
//! `bftree` is an in-memory, ordered key-value index built as a buffered
//! tree: every node holds an ordered array of containers, each of which
//! buffers recent writes in a small linked list and migrates them down to a
//! child container once it grows past a configurable threshold. The result
//! behaves like an ordered map, but write-heavy workloads amortize their
//! structural cost across many operations instead of paying it on every
//! insert.
//!
//! Keys are compared with a host-supplied comparator rather than requiring
//! [`Ord`] directly, and optional destructors can observe every key/value
//! this tree ever owns and then discards, whether through an overwrite, a
//! migration-time tombstone elision, or the tree itself being dropped.
//!
//! # Example
//!
//! ```rust
//! use bftree::{BufferedTree, BufferedTreeConfig, Error};
//!
//! fn main() -> Result<(), Error> {
//!     let mut t = BufferedTree::<u32, &str>::create(BufferedTreeConfig::default())?;
//!     t.put(1, "one");
//!     t.put(200, "two hundred");
//!     t.put(20, "twenty");
//!
//!     assert_eq!(Some(&"twenty"), t.get(&20));
//!     t.del(20);
//!     assert_eq!(None, t.get(&20));
//!
//!     Ok(())
//! }
//! ```
mod config;
mod error;
mod tree;

pub use config::BufferedTreeConfig;
pub use error::Error;
pub use tree::BufferedTree;
