use glaze_primitives::{ApiKind, CapabilitySnapshot, Profile, Version};

/// One set of conditions under which an alias is available.
///
/// All present conditions must hold: the API kind must be equal, the snapshot
/// version at least `min_version`, and the profile and extension (when given)
/// must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feature {
	pub api: ApiKind,
	pub min_version: Version,
	pub profile: Option<Profile>,
	pub extension: Option<&'static str>,
}

impl Feature {
	/// Introduced by core `api` at `major.minor`.
	pub const fn since(api: ApiKind, major: u8, minor: u8) -> Self {
		Self {
			api,
			min_version: Version::new(major, minor),
			profile: None,
			extension: None,
		}
	}

	/// Introduced by the named extension on any version of `api`.
	pub const fn extension(api: ApiKind, name: &'static str) -> Self {
		Self {
			api,
			min_version: Version::new(0, 0),
			profile: None,
			extension: Some(name),
		}
	}

	pub const fn with_profile(mut self, profile: Profile) -> Self {
		self.profile = Some(profile);
		self
	}

	pub fn matches(&self, snapshot: &CapabilitySnapshot) -> bool {
		self.api == snapshot.api()
			&& snapshot.version() >= self.min_version
			&& self.profile.is_none_or(|p| snapshot.profile() == Some(p))
			&& self.extension.is_none_or(|ext| snapshot.has_extension(ext))
	}
}

/// Any-of list of [`Feature`]s.
///
/// An empty predicate never matches. Aliases that are never retired carry an
/// empty `removed_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeaturePredicate {
	pub any_of: &'static [Feature],
}

impl FeaturePredicate {
	pub const NEVER: Self = Self { any_of: &[] };

	pub const fn is_empty(&self) -> bool {
		self.any_of.is_empty()
	}

	pub fn matches(&self, snapshot: &CapabilitySnapshot) -> bool {
		self.any_of.iter().any(|f| f.matches(snapshot))
	}
}

/// Shorthand constructors used by table declarations.
pub mod feature {
	use super::Feature;
	use glaze_primitives::{ApiKind, Profile};

	pub const fn gl(major: u8, minor: u8) -> Feature {
		Feature::since(ApiKind::Gl, major, minor)
	}

	/// Desktop GL core profile at `major.minor` and later.
	pub const fn gl_core(major: u8, minor: u8) -> Feature {
		Feature::since(ApiKind::Gl, major, minor).with_profile(Profile::Core)
	}

	pub const fn gl_ext(name: &'static str) -> Feature {
		Feature::extension(ApiKind::Gl, name)
	}

	pub const fn gles(major: u8, minor: u8) -> Feature {
		Feature::since(ApiKind::Gles, major, minor)
	}

	pub const fn gles_ext(name: &'static str) -> Feature {
		Feature::extension(ApiKind::Gles, name)
	}

	pub const fn glx(major: u8, minor: u8) -> Feature {
		Feature::since(ApiKind::Glx, major, minor)
	}

	pub const fn glx_ext(name: &'static str) -> Feature {
		Feature::extension(ApiKind::Glx, name)
	}
}
