use nom::combinator::map;
use nom::multi::length_data;
use nom::number::complete::{be_u16, be_u32};
use nom::sequence::pair;

use crate::{ConstPtr, IResult, UTF8Const};

//attribute_info {
//     u2 attribute_name_index;
//     u4 attribute_length;
//     u1 info[attribute_length];
// }
#[derive(Clone, Debug)]
pub struct AttributeInfo {
	pub name: ConstPtr<UTF8Const>,
	pub data: Vec<u8>,
}

impl AttributeInfo {
	pub fn parse(input: &[u8]) -> IResult<Self> {
		map(pair(be_u16, length_data(be_u32)), |(name, data): (u16, &[u8])| {
			AttributeInfo {
				name: ConstPtr::new(name),
				data: data.to_vec(),
			}
		})(input)
	}
}
