use std::fmt;

use serde::Serialize;

use crate::{ApiKind, ExtensionSet, Profile, Version};

/// What a native context or connection supports at one point in time.
///
/// Computed once per context and never mutated. A new snapshot is taken when
/// a different context becomes current or the connection is reinitialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySnapshot {
	api: ApiKind,
	version: Version,
	profile: Option<Profile>,
	extensions: ExtensionSet,
}

impl CapabilitySnapshot {
	pub fn new(api: ApiKind, version: Version) -> Self {
		Self {
			api,
			version,
			profile: None,
			extensions: ExtensionSet::new(),
		}
	}

	pub fn with_profile(mut self, profile: impl Into<Option<Profile>>) -> Self {
		self.profile = profile.into();
		self
	}

	pub fn with_extensions(mut self, extensions: impl Into<ExtensionSet>) -> Self {
		self.extensions = extensions.into();
		self
	}

	pub fn api(&self) -> ApiKind {
		self.api
	}

	pub fn version(&self) -> Version {
		self.version
	}

	pub fn profile(&self) -> Option<Profile> {
		self.profile
	}

	pub fn extensions(&self) -> &ExtensionSet {
		&self.extensions
	}

	pub fn has_extension(&self, name: &str) -> bool {
		self.extensions.contains(name)
	}
}

impl fmt::Display for CapabilitySnapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.api, self.version)?;
		if let Some(profile) = self.profile {
			write!(f, " ({profile})")?;
		}
		write!(f, ", {} extensions", self.extensions.len())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display_summarizes_snapshot() {
		let snap = CapabilitySnapshot::new(ApiKind::Gl, Version::new(4, 6))
			.with_profile(Profile::Core)
			.with_extensions(["GL_KHR_debug"].into_iter().collect::<ExtensionSet>());
		assert_eq!(snap.to_string(), "gl 4.6 (core), 1 extensions");
		assert!(snap.has_extension("GL_KHR_debug"));
		assert!(!snap.has_extension("GL_ARB_debug_output"));
	}
}
