//! File-backed blob store.
//!
//! Each key maps to `<data_dir>/<name>.json`, where `name` is the key with
//! every byte other than ASCII letters, digits and `-` escaped as `_xx` (hex).
//! The escaping is reversible, so two keys never share a file.
//!
//! Writes go to a temporary file next to the target which is then renamed
//! over it, so a reader never sees a half-written collection.

mod store;

pub use store::FileStore;
