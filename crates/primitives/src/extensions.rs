use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};

/// Extension names as reported by a native driver, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionList {
	/// A single whitespace-delimited string (`GL_EXTENSIONS`,
	/// `glXQueryExtensionsString`, `eglQueryString(EGL_EXTENSIONS)`).
	Delimited(String),
	/// One name per index (`GL_NUM_EXTENSIONS` + `glGetStringi`).
	Indexed(Vec<String>),
}

/// Normalized set of extension names advertised by a context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
	names: FxHashSet<Box<str>>,
}

impl ExtensionSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(name)
	}

	pub fn insert(&mut self, name: impl Into<Box<str>>) -> bool {
		self.names.insert(name.into())
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Names in lexical order.
	pub fn sorted(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.names.iter().map(AsRef::as_ref).collect();
		names.sort_unstable();
		names
	}
}

impl From<ExtensionList> for ExtensionSet {
	fn from(list: ExtensionList) -> Self {
		match list {
			ExtensionList::Delimited(raw) => raw.split_ascii_whitespace().collect(),
			ExtensionList::Indexed(names) => names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()).collect(),
		}
	}
}

impl<S: Into<Box<str>>> FromIterator<S> for ExtensionSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut set = Self::new();
		for name in iter {
			set.insert(name);
		}
		set
	}
}

impl Serialize for ExtensionSet {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.sorted())
	}
}
