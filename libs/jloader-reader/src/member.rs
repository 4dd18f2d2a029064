use nom::combinator::map;
use nom::error::context;
use nom::multi::length_count;
use nom::number::complete::be_u16;
use nom::sequence::tuple;

use crate::{AttributeInfo, ConstPtr, IResult, UTF8Const};

//field_info / method_info {
//     u16             access_flags;
//     u16             name_index;
//     u16             descriptor_index;
//     u16             attributes_count;
//     attribute_info attributes[attributes_count];
// }
#[derive(Clone, Debug)]
pub struct MemberInfo {
	pub access_flags: u16,
	pub name: ConstPtr<UTF8Const>,
	pub descriptor: ConstPtr<UTF8Const>,
	pub attributes: Vec<AttributeInfo>,
}

pub type FieldInfo = MemberInfo;
pub type MethodInfo = MemberInfo;

impl MemberInfo {
	pub fn parse(input: &[u8]) -> IResult<Self> {
		map(
			tuple((
				be_u16,
				be_u16,
				be_u16,
				context("Attributes", length_count(be_u16, AttributeInfo::parse)),
			)),
			|(access_flags, name, descriptor, attributes)| MemberInfo {
				access_flags,
				name: ConstPtr::new(name),
				descriptor: ConstPtr::new(descriptor),
				attributes,
			},
		)(input)
	}
}
