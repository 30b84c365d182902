//! Capability model for GL-family native contexts.
//!
//! A [`CapabilitySnapshot`] describes what one native context or connection
//! supports: its [`ApiKind`], [`Version`], optional [`Profile`], and the set of
//! advertised extension names. Snapshots are plain immutable values; they are
//! recomputed whenever the context behind them changes.

/// API flavors and context profiles.
pub mod api;
/// Extension name sets and their native encodings.
pub mod extensions;
/// Capability snapshot value type.
pub mod snapshot;
/// Version numbers and driver version string parsing.
pub mod version;

pub use api::{ApiKind, Profile};
pub use extensions::{ExtensionList, ExtensionSet};
pub use snapshot::CapabilitySnapshot;
pub use version::{Version, VersionParseError, parse_version_string};
