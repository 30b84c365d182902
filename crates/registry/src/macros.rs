/// Declares a static [`AliasTable`](crate::AliasTable) and a matching command
/// enum whose discriminants are the commands' [`CommandId`](crate::CommandId)s.
///
/// ```
/// use glaze_registry::alias_table;
/// use glaze_registry::feature::{gl, gl_ext};
///
/// alias_table! {
/// 	pub static DEMO_COMMANDS: "demo";
///
/// 	pub enum DemoCommand {
/// 		/// Generates query object names.
/// 		GenQueries = "gen_queries" {
/// 			"glGenQueries" => [gl(1, 5)],
/// 			"glGenQueriesARB" => [gl_ext("GL_ARB_occlusion_query")],
/// 		}
/// 		Begin = "begin" {
/// 			"glBegin" => [gl(1, 0)] removed_by [glaze_registry::feature::gl_core(3, 2)],
/// 		}
/// 	}
/// }
///
/// assert_eq!(DemoCommand::Begin.command().aliases[0].symbol, "glBegin");
/// assert_eq!(DEMO_COMMANDS.len(), 2);
/// ```
#[macro_export]
macro_rules! alias_table {
	(
		$(#[$table_meta:meta])*
		$vis:vis static $table:ident: $label:literal;

		$(#[$enum_meta:meta])*
		$enum_vis:vis enum $enum:ident {
			$(
				$(#[$meta:meta])*
				$variant:ident = $name:literal {
					$(
						$symbol:literal => [$($intro:expr),+ $(,)?]
						$(removed_by [$($removed:expr),+ $(,)?])?
					),+ $(,)?
				}
			)*
		}
	) => {
		$(#[$enum_meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		#[repr(u16)]
		$enum_vis enum $enum {
			$(
				$(#[$meta])*
				$variant,
			)*
		}

		impl $enum {
			/// Every command of the table in declaration order.
			pub const ALL: &'static [$enum] = &[$($enum::$variant),*];

			pub const fn id(self) -> $crate::CommandId {
				$crate::CommandId::new(self as u16)
			}

			pub fn command(self) -> &'static $crate::LogicalCommand {
				&$table.commands[self as usize]
			}

			pub const fn name(self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}
		}

		impl ::core::convert::From<$enum> for $crate::CommandId {
			fn from(cmd: $enum) -> Self {
				cmd.id()
			}
		}

		$(#[$table_meta])*
		$vis static $table: $crate::AliasTable = $crate::AliasTable {
			label: $label,
			commands: &[
				$(
					$crate::LogicalCommand {
						name: $name,
						aliases: &[
							$(
								$crate::AliasEntry {
									symbol: $symbol,
									introduced_by: $crate::FeaturePredicate { any_of: &[$($intro),+] },
									removed_by: $crate::FeaturePredicate {
										any_of: $crate::__alias_removed!($([$($removed),+])?),
									},
								},
							)+
						],
					},
				)*
			],
		};
	};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __alias_removed {
	() => {
		&[]
	};
	([$($removed:expr),+]) => {
		&[$($removed),+]
	};
}
