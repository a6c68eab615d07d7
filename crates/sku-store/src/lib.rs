//! Persistence for SKU configurator snapshots.
//!
//! Configuration is stored as one JSON document
//! (`{"inventory": {<category>: {...}}}`). Documents written by older
//! editors are accepted and normalised on load; saves always write the
//! canonical wrapped form.

#![deny(unsafe_code)]

mod defaults;
mod error;
mod fingerprint;
mod store;

pub use defaults::{blast_machine, factory_default};
pub use error::{Result, StoreError};
pub use fingerprint::fingerprint;
pub use store::{
    ConfigStore, JsonFileStore, MemoryStore, encode_configuration, parse_configuration,
};
