use std::fmt;

use glaze_primitives::{ApiKind, CapabilitySnapshot, ExtensionList, ExtensionSet, Profile, Version, VersionParseError};

/// Introspection calls a native context or connection answers.
///
/// Implementations wrap the driver's standard queries (`glGetString`,
/// `glGetIntegerv`, `glXQueryVersion`, ...). The extension query may come
/// back in either native encoding; [`build_snapshot`] normalizes it.
pub trait ContextIntrospection {
	/// Whether the context is current on the calling thread, or the
	/// connection is open.
	fn is_current(&self) -> bool;

	fn api_version(&self) -> Result<(ApiKind, Version), UnavailableReason>;

	fn profile(&self, api: ApiKind, version: Version) -> Option<Profile>;

	fn extensions(&self, api: ApiKind, version: Version) -> ExtensionList;
}

/// Why no snapshot could be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
	NotCurrent,
	/// The driver returned no version (typically a null `GL_VERSION`).
	NoVersion,
	BadVersion(VersionParseError),
}

impl fmt::Display for UnavailableReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NotCurrent => f.write_str("no context is current"),
			Self::NoVersion => f.write_str("context reported no version"),
			Self::BadVersion(e) => write!(f, "{e}"),
		}
	}
}

/// No valid native context or connection for the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("native context unavailable: {reason}")]
pub struct ContextUnavailable {
	pub reason: UnavailableReason,
}

impl From<UnavailableReason> for ContextUnavailable {
	fn from(reason: UnavailableReason) -> Self {
		Self { reason }
	}
}

/// Computes the capability snapshot of the context behind `ctx`.
///
/// Never falls back to an empty or default snapshot: a context that is not
/// current or reports no usable version is an error.
pub fn build_snapshot<C: ContextIntrospection + ?Sized>(ctx: &C) -> Result<CapabilitySnapshot, ContextUnavailable> {
	if !ctx.is_current() {
		return Err(UnavailableReason::NotCurrent.into());
	}

	let (api, version) = ctx.api_version()?;
	let profile = ctx.profile(api, version);
	let extensions = ExtensionSet::from(ctx.extensions(api, version));

	let snapshot = CapabilitySnapshot::new(api, version)
		.with_profile(profile)
		.with_extensions(extensions);
	tracing::debug!(%snapshot, "captured capability snapshot");
	Ok(snapshot)
}
