//! Autocomplete for the local-services marketplace search box.
//!
//! [`PrefixIndex`] is a case-insensitive trie over service and product
//! labels. [`SharedIndex`] publishes one to concurrent readers and swaps in a
//! rebuilt index when the [`LabelSet`] changes.
//!
//! ```
//! use servicesuggest::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert_label("Electrician");
//! index.insert_label("Plumber");
//! index.insert("Wiring", "Electrician");
//!
//! assert_eq!(index.search("ELEC"), vec!["Electrician"]);
//! assert_eq!(index.search("wi"), vec!["Electrician"]);
//! assert!(index.search("z").is_empty());
//! ```

pub mod autocomplete;
pub mod catalog;
pub mod config;
pub mod error;
pub mod perf;
pub mod registry;
pub mod watcher;

pub use autocomplete::PrefixIndex;
pub use catalog::{Label, LabelSet};
pub use config::SuggestConfig;
pub use error::{Result, SuggestError};
pub use registry::SharedIndex;
pub use watcher::{LabelEvent, LabelWatcher};
