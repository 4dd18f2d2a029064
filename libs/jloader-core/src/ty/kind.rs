use std::fmt::{Display, Formatter};

/// A kind represents a type category without any deeper information about the types.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Kind {
	Boolean,
	Byte,
	Short,
	Int,
	Long,
	Char,
	Float,
	Double,
	Reference,
}

impl Kind {
	pub fn is_ref(&self) -> bool {
		matches!(self, Kind::Reference)
	}

	pub fn is_floating(&self) -> bool {
		matches!(self, Kind::Float | Kind::Double)
	}

	/// Whether a value of this kind may be passed where `target` is expected
	/// by widening primitive conversion (or identity).
	pub fn widens_to(&self, target: Kind) -> bool {
		if *self == target {
			return true;
		}

		match self {
			Kind::Byte => matches!(
				target,
				Kind::Short | Kind::Int | Kind::Long | Kind::Float | Kind::Double
			),
			Kind::Short | Kind::Char => {
				matches!(target, Kind::Int | Kind::Long | Kind::Float | Kind::Double)
			}
			Kind::Int => matches!(target, Kind::Long | Kind::Float | Kind::Double),
			Kind::Long => matches!(target, Kind::Float | Kind::Double),
			Kind::Float => matches!(target, Kind::Double),
			Kind::Boolean | Kind::Double | Kind::Reference => false,
		}
	}
}

impl Display for Kind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Kind::Boolean => f.write_str("boolean"),
			Kind::Byte => f.write_str("byte"),
			Kind::Short => f.write_str("short"),
			Kind::Int => f.write_str("int"),
			Kind::Long => f.write_str("long"),
			Kind::Char => f.write_str("char"),
			Kind::Float => f.write_str("float"),
			Kind::Double => f.write_str("double"),
			Kind::Reference => f.write_str("Object"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn widening() {
		assert!(Kind::Int.widens_to(Kind::Int));
		assert!(Kind::Int.widens_to(Kind::Long));
		assert!(Kind::Char.widens_to(Kind::Double));
		assert!(!Kind::Char.widens_to(Kind::Short));
		assert!(!Kind::Long.widens_to(Kind::Int));
		assert!(!Kind::Boolean.widens_to(Kind::Int));
		assert!(!Kind::Short.widens_to(Kind::Char));
	}
}
