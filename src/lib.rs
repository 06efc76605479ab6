//! A bidirectional map: a one-to-one association between keys and values,
//! searchable from either side.
//!
//! Insertions that would give one value two keys are rejected with
//! [`Error::InvalidMapping`] instead of silently breaking the mapping.
//! [`BiMap::inverse`] gives a swapped view over the same storage:
//!
//! ```
//! use bimap::{BiMap, Error};
//!
//! let ids = BiMap::new();
//! let names = ids.inverse();
//!
//! ids.set(1, "one")?.set(2, "two")?;
//! assert_eq!(names.get("two"), Some(2));
//! assert_eq!(ids.set(3, "one").err(), Some(Error::InvalidMapping));
//!
//! names.delete("one");
//! assert!(!ids.has(&1));
//! # Ok::<(), Error>(())
//! ```

pub mod bimap;
pub mod error;
pub mod iter;
mod store;

pub use crate::bimap::BiMap;
pub use crate::error::{Error, Result};
