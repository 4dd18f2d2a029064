use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use nom::combinator::{map, map_res};
use nom::error::{ErrorKind, ParseError, VerboseError};
use nom::multi::length_data;
use nom::number::complete::{be_f32, be_f64, be_i32, be_i64, be_u16, be_u8};
use nom::sequence::pair;
use tracing::trace;

use crate::IResult;

macro_rules! impl_constant {
	($VARIANT:ident $TY:ty) => {
		impl Constant for $TY {
			fn get(value: &ConstantInfo) -> Option<&Self> {
				match value {
					ConstantInfo::$VARIANT(v) => Some(v),
					_ => None,
				}
			}
		}
	};
}

pub trait Constant {
	fn get(value: &ConstantInfo) -> Option<&Self>;
}

/// A typed index into the constant pool.
pub struct ConstPtr<V: Constant>(u16, PhantomData<V>);

impl<V: Constant> ConstPtr<V> {
	pub fn new(id: u16) -> ConstPtr<V> {
		ConstPtr(id, PhantomData)
	}

	pub fn index(&self) -> u16 {
		self.0
	}

	pub fn get<'a>(&self, cp: &'a ConstantPool) -> Option<&'a V> {
		cp.get(*self)
	}
}

impl<V: Constant> Clone for ConstPtr<V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V: Constant> Copy for ConstPtr<V> {}

impl<V: Constant> Debug for ConstPtr<V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

#[derive(Debug)]
pub struct UTF8Const(pub String);

impl UTF8Const {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

#[derive(Debug)]
pub struct ClassConst {
	pub name: ConstPtr<UTF8Const>,
}

#[derive(Debug)]
pub struct NameAndTypeConst {
	pub name: ConstPtr<UTF8Const>,
	pub descriptor: ConstPtr<UTF8Const>,
}

#[derive(Debug)]
pub struct MemberRefConst {
	pub class: ConstPtr<ClassConst>,
	pub name_and_type: ConstPtr<NameAndTypeConst>,
}

impl_constant!(UTF8 UTF8Const);
impl_constant!(Class ClassConst);
impl_constant!(NameAndType NameAndTypeConst);

#[derive(Debug)]
pub enum ConstantInfo {
	UTF8(UTF8Const),
	Integer(i32),
	Float(f32),
	Long(i64),
	Double(f64),
	Class(ClassConst),
	String(ConstPtr<UTF8Const>),
	Field(MemberRefConst),
	Method(MemberRefConst),
	Interface(MemberRefConst),
	NameAndType(NameAndTypeConst),
	MethodHandle { kind: u8, reference: u16 },
	MethodType(ConstPtr<UTF8Const>),
	Dynamic { bootstrap: u16, name_and_type: ConstPtr<NameAndTypeConst> },
	InvokeDynamic { bootstrap: u16, name_and_type: ConstPtr<NameAndTypeConst> },
	Module(ConstPtr<UTF8Const>),
	Package(ConstPtr<UTF8Const>),
	/// The slot following a long or double.
	Unusable,
}

impl ConstantInfo {
	pub fn parse(input: &[u8]) -> IResult<'_, Self> {
		let (input, variant) = be_u8(input)?;

		trace!("cp_info tag: {variant}");
		match variant {
			1 => map_res(length_data(be_u16), |data: &[u8]| {
				let data = mutf8::mutf8_to_utf8(data).map_err(|_| "invalid modified UTF-8")?;
				String::from_utf8(data.into_owned())
					.map(|v| ConstantInfo::UTF8(UTF8Const(v)))
					.map_err(|_| "invalid UTF-8")
			})(input),
			3 => map(be_i32, ConstantInfo::Integer)(input),
			4 => map(be_f32, ConstantInfo::Float)(input),
			5 => map(be_i64, ConstantInfo::Long)(input),
			6 => map(be_f64, ConstantInfo::Double)(input),
			7 => map(be_u16, |name| {
				ConstantInfo::Class(ClassConst {
					name: ConstPtr::new(name),
				})
			})(input),
			8 => map(be_u16, |string| ConstantInfo::String(ConstPtr::new(string)))(input),
			9 | 10 | 11 => map(pair(be_u16, be_u16), |(class, name_and_type)| {
				let member = MemberRefConst {
					class: ConstPtr::new(class),
					name_and_type: ConstPtr::new(name_and_type),
				};
				match variant {
					9 => ConstantInfo::Field(member),
					10 => ConstantInfo::Method(member),
					_ => ConstantInfo::Interface(member),
				}
			})(input),
			12 => map(pair(be_u16, be_u16), |(name, descriptor)| {
				ConstantInfo::NameAndType(NameAndTypeConst {
					name: ConstPtr::new(name),
					descriptor: ConstPtr::new(descriptor),
				})
			})(input),
			15 => map(pair(be_u8, be_u16), |(kind, reference)| {
				ConstantInfo::MethodHandle { kind, reference }
			})(input),
			16 => map(be_u16, |desc| ConstantInfo::MethodType(ConstPtr::new(desc)))(input),
			17 | 18 => map(pair(be_u16, be_u16), |(bootstrap, name_and_type)| {
				let name_and_type = ConstPtr::new(name_and_type);
				if variant == 17 {
					ConstantInfo::Dynamic {
						bootstrap,
						name_and_type,
					}
				} else {
					ConstantInfo::InvokeDynamic {
						bootstrap,
						name_and_type,
					}
				}
			})(input),
			19 => map(be_u16, |name| ConstantInfo::Module(ConstPtr::new(name)))(input),
			20 => map(be_u16, |name| ConstantInfo::Package(ConstPtr::new(name)))(input),
			_ => Err(nom::Err::Failure(VerboseError::from_error_kind(
				input,
				ErrorKind::Tag,
			))),
		}
	}

	/// Longs and doubles occupy two pool slots.
	pub fn is_wide(&self) -> bool {
		matches!(self, ConstantInfo::Long(_) | ConstantInfo::Double(_))
	}
}

pub struct ConstantPool(Vec<ConstantInfo>);

impl ConstantPool {
	pub fn new(values: Vec<ConstantInfo>) -> ConstantPool {
		ConstantPool(values)
	}

	pub fn parse(input: &[u8]) -> IResult<'_, Self> {
		let (mut input, count) = be_u16(input)?;
		let count = count as usize;

		let mut values = Vec::with_capacity(count);
		while values.len() + 1 < count {
			let (remaining, info) = ConstantInfo::parse(input)?;
			input = remaining;

			let wide = info.is_wide();
			values.push(info);
			if wide {
				values.push(ConstantInfo::Unusable);
			}
		}

		Ok((input, ConstantPool(values)))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn raw_get(&self, index: u16) -> Option<&ConstantInfo> {
		self.0.get((index as usize).checked_sub(1)?)
	}

	pub fn get<V: Constant>(&self, ptr: ConstPtr<V>) -> Option<&V> {
		V::get(self.raw_get(ptr.0)?)
	}

	pub fn utf8(&self, ptr: ConstPtr<UTF8Const>) -> Option<&str> {
		self.get(ptr).map(UTF8Const::as_str)
	}

	/// Resolves a class constant to its internal name.
	pub fn class_name(&self, ptr: ConstPtr<ClassConst>) -> Option<&str> {
		self.utf8(self.get(ptr)?.name)
	}
}
