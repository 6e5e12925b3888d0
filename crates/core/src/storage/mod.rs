mod codec;
mod error;
mod events;
mod traits;

pub use codec::{decode_events, encode_events};
pub use error::{Result, StorageError};
pub use events::{load_events, save_events, DEFAULT_STORAGE_KEY};
pub use traits::BlobStore;
