use std::fmt::{Display, Formatter, Write};

pub use descriptor::*;
pub use kind::*;

mod descriptor;
mod kind;

/// A field type as written in class file descriptors.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Type {
	Primitive(PrimitiveType),
	Object(ObjectType),
	Array(Box<ArrayType>),
}

impl Type {
	pub const STRING: &'static str = "java/lang/String";
	pub const OBJECT: &'static str = "java/lang/Object";

	pub fn object(name: impl Into<String>) -> Type {
		Type::Object(ObjectType::new(name))
	}

	pub fn string() -> Type {
		Type::object(Self::STRING)
	}

	pub fn array(component: Type) -> Type {
		Type::Array(Box::new(ArrayType { component }))
	}

	pub fn parse(desc: &str) -> Option<Type> {
		match Self::parse_len(desc)? {
			(ty, len) if len == desc.len() => Some(ty),
			_ => None,
		}
	}

	pub fn parse_len(desc: &str) -> Option<(Type, usize)> {
		match desc.as_bytes().first()? {
			b'L' => ObjectType::parse_len(desc).map(|(ty, l)| (Type::Object(ty), l)),
			b'[' => ArrayType::parse_len(desc).map(|(ty, l)| (Type::Array(Box::new(ty)), l)),
			_ => PrimitiveType::parse(desc).map(|v| (Type::Primitive(v), 1)),
		}
	}

	pub fn kind(&self) -> Kind {
		match self {
			Type::Primitive(prim) => prim.kind(),
			Type::Array(_) | Type::Object(_) => Kind::Reference,
		}
	}
}

impl From<PrimitiveType> for Type {
	fn from(value: PrimitiveType) -> Self {
		Type::Primitive(value)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Primitive(v) => v.fmt(f),
			Type::Object(v) => v.fmt(f),
			Type::Array(v) => v.fmt(f),
		}
	}
}

#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveType {
	Boolean,
	Byte,
	Short,
	Int,
	Long,
	Char,
	Float,
	Double,
}

impl PrimitiveType {
	pub fn parse(desc: &str) -> Option<PrimitiveType> {
		Some(match desc.as_bytes().first()? {
			b'Z' => PrimitiveType::Boolean,
			b'B' => PrimitiveType::Byte,
			b'C' => PrimitiveType::Char,
			b'D' => PrimitiveType::Double,
			b'F' => PrimitiveType::Float,
			b'I' => PrimitiveType::Int,
			b'J' => PrimitiveType::Long,
			b'S' => PrimitiveType::Short,
			_ => {
				return None;
			}
		})
	}

	pub fn char(&self) -> char {
		match self {
			PrimitiveType::Boolean => 'Z',
			PrimitiveType::Byte => 'B',
			PrimitiveType::Short => 'S',
			PrimitiveType::Int => 'I',
			PrimitiveType::Long => 'J',
			PrimitiveType::Char => 'C',
			PrimitiveType::Float => 'F',
			PrimitiveType::Double => 'D',
		}
	}

	pub fn kind(&self) -> Kind {
		match self {
			PrimitiveType::Boolean => Kind::Boolean,
			PrimitiveType::Byte => Kind::Byte,
			PrimitiveType::Short => Kind::Short,
			PrimitiveType::Int => Kind::Int,
			PrimitiveType::Long => Kind::Long,
			PrimitiveType::Char => Kind::Char,
			PrimitiveType::Float => Kind::Float,
			PrimitiveType::Double => Kind::Double,
		}
	}
}

impl Display for PrimitiveType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_char(self.char())
	}
}

/// A class type in internal form, `java/lang/String`.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ObjectType {
	pub name: String,
}

impl ObjectType {
	pub fn new(name: impl Into<String>) -> ObjectType {
		ObjectType { name: name.into() }
	}

	pub fn parse_len(string: &str) -> Option<(ObjectType, usize)> {
		if string.as_bytes().first()? != &b'L' {
			return None;
		}

		let end = string.find(';')?;
		if end == 1 {
			return None;
		}

		Some((ObjectType::new(&string[1..end]), end + 1))
	}

	pub fn kind(&self) -> Kind {
		Kind::Reference
	}
}

impl Display for ObjectType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_char('L')?;
		f.write_str(&self.name)?;
		f.write_char(';')
	}
}

#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ArrayType {
	pub component: Type,
}

impl ArrayType {
	/// The most dimensions an array type may have.
	pub const MAX_DIMENSIONS: usize = 255;

	pub fn parse_len(string: &str) -> Option<(ArrayType, usize)> {
		let dimensions = string.bytes().take_while(|b| *b == b'[').count();
		if dimensions == 0 || dimensions > Self::MAX_DIMENSIONS {
			return None;
		}

		let (mut component, length) = Type::parse_len(&string[dimensions..])?;
		for _ in 1..dimensions {
			component = Type::array(component);
		}
		Some((ArrayType { component }, length + dimensions))
	}

	pub fn component(&self) -> &Type {
		&self.component
	}

	pub fn kind(&self) -> Kind {
		Kind::Reference
	}
}

impl Display for ArrayType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_char('[')?;
		self.component.fmt(f)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_types() {
		assert_eq!(Type::parse("I"), Some(Type::Primitive(PrimitiveType::Int)));
		assert_eq!(Type::parse("Ljava/lang/String;"), Some(Type::string()));
		assert_eq!(
			Type::parse("[[J"),
			Some(Type::array(Type::array(PrimitiveType::Long.into())))
		);
		assert_eq!(Type::parse(""), None);
		assert_eq!(Type::parse("L;"), None);
		assert_eq!(Type::parse("Ljava/lang/String"), None);
		assert_eq!(Type::parse("II"), None);
	}

	#[test]
	fn array_dimensions_are_capped() {
		let max = format!("{}I", "[".repeat(ArrayType::MAX_DIMENSIONS));
		let ty = Type::parse(&max).unwrap();
		assert_eq!(ty.to_string(), max);

		let over = format!("{}I", "[".repeat(ArrayType::MAX_DIMENSIONS + 1));
		assert_eq!(Type::parse(&over), None);
		assert_eq!(Type::parse(&format!("{}I", "[".repeat(60_000))), None);
		assert_eq!(Type::parse("["), None);
	}

	#[test]
	fn display_is_descriptor() {
		for desc in ["Z", "Ljava/lang/Object;", "[Lpkg/Widget;", "[[D"] {
			assert_eq!(Type::parse(desc).unwrap().to_string(), desc);
		}
	}
}
