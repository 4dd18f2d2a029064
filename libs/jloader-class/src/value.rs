use std::fmt::{Display, Formatter};
use std::sync::Arc;

use jloader_core::{Kind, PrimitiveType, Type};

use crate::Instance;

/// An argument passed to a constructor.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Boolean(bool),
	Byte(i8),
	Short(i16),
	Char(u16),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	String(Arc<str>),
	Object(Arc<Instance>),
	Null,
}

macro_rules! impl_from {
	($TY:ty, $KIND:ident) => {
		impl From<$TY> for Value {
			fn from(value: $TY) -> Self {
				Value::$KIND(value)
			}
		}
	};
}

impl_from!(bool, Boolean);
impl_from!(i8, Byte);
impl_from!(i16, Short);
impl_from!(u16, Char);
impl_from!(i32, Int);
impl_from!(i64, Long);
impl_from!(f32, Float);
impl_from!(f64, Double);
impl_from!(Arc<Instance>, Object);

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value.into())
	}
}

/// Types a string argument can be passed as.
const STRING_SUPERTYPES: &[&str] = &[
	Type::STRING,
	Type::OBJECT,
	"java/lang/CharSequence",
	"java/lang/Comparable",
	"java/io/Serializable",
];

impl Value {
	pub fn kind(&self) -> Kind {
		match self {
			Value::Boolean(_) => Kind::Boolean,
			Value::Byte(_) => Kind::Byte,
			Value::Short(_) => Kind::Short,
			Value::Char(_) => Kind::Char,
			Value::Int(_) => Kind::Int,
			Value::Long(_) => Kind::Long,
			Value::Float(_) => Kind::Float,
			Value::Double(_) => Kind::Double,
			Value::String(_) | Value::Object(_) | Value::Null => Kind::Reference,
		}
	}

	/// Converts this value for a parameter of type `ty`, following the rules
	/// of reflective invocation: identity or widening for primitives, `null`
	/// for any reference. Returns `None` if the value is not assignable.
	pub fn coerce(&self, ty: &Type) -> Option<Value> {
		match ty {
			Type::Primitive(prim) => self.widen(*prim),
			Type::Object(object) => match self {
				Value::Null => Some(Value::Null),
				Value::String(_) if STRING_SUPERTYPES.contains(&object.name.as_str()) => {
					Some(self.clone())
				}
				Value::Object(instance) if instance.class().is_assignable_to(&object.name) => {
					Some(self.clone())
				}
				_ => None,
			},
			Type::Array(_) => match self {
				Value::Null => Some(Value::Null),
				_ => None,
			},
		}
	}

	fn widen(&self, target: PrimitiveType) -> Option<Value> {
		if !self.kind().widens_to(target.kind()) {
			return None;
		}

		let value = match (self, target) {
			(Value::Boolean(v), PrimitiveType::Boolean) => Value::Boolean(*v),
			(Value::Byte(v), PrimitiveType::Byte) => Value::Byte(*v),
			(Value::Char(v), PrimitiveType::Char) => Value::Char(*v),
			(v, PrimitiveType::Short) => Value::Short(v.as_i64()? as i16),
			(v, PrimitiveType::Int) => Value::Int(v.as_i64()? as i32),
			(v, PrimitiveType::Long) => Value::Long(v.as_i64()?),
			(Value::Float(v), PrimitiveType::Float) => Value::Float(*v),
			(v, PrimitiveType::Float) => Value::Float(v.as_i64()? as f32),
			(Value::Float(v), PrimitiveType::Double) => Value::Double(*v as f64),
			(Value::Double(v), PrimitiveType::Double) => Value::Double(*v),
			(v, PrimitiveType::Double) => Value::Double(v.as_i64()? as f64),
			_ => return None,
		};
		Some(value)
	}

	fn as_i64(&self) -> Option<i64> {
		Some(match self {
			Value::Byte(v) => *v as i64,
			Value::Short(v) => *v as i64,
			Value::Char(v) => *v as i64,
			Value::Int(v) => *v as i64,
			Value::Long(v) => *v,
			_ => return None,
		})
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Boolean(v) => v.fmt(f),
			Value::Byte(v) => v.fmt(f),
			Value::Short(v) => v.fmt(f),
			Value::Char(v) => match char::from_u32(*v as u32) {
				Some(c) => write!(f, "{c:?}"),
				None => write!(f, "'\\u{{{v:04x}}}'"),
			},
			Value::Int(v) => v.fmt(f),
			Value::Long(v) => v.fmt(f),
			Value::Float(v) => v.fmt(f),
			Value::Double(v) => v.fmt(f),
			Value::String(v) => write!(f, "{v:?}"),
			Value::Object(v) => v.fmt(f),
			Value::Null => f.write_str("null"),
		}
	}
}
