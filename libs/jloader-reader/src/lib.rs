//! Reader for the class file container.
//!
//! Only the structure needed to define a class is decoded: the constant pool,
//! the class header and the field/method tables. Attribute bodies (code,
//! stack maps, annotations) are kept as raw bytes for whoever interprets them.

use nom::error::VerboseError;

pub use attribute::*;
pub use class::*;
pub use consts::*;
pub use member::*;

mod attribute;
mod class;
mod consts;
mod member;

pub type IResult<'a, O> = nom::IResult<&'a [u8], O, VerboseError<&'a [u8]>>;
