use std::fmt::{Display, Formatter};
use std::sync::Arc;

use jloader_core::{MethodDescriptor, Type};
use tracing::debug;

use crate::{Class, ClassError, ClassResult, Value};

/// An object built by [`construct`]: the class handle, the constructor that
/// was selected and the arguments bound to its parameters.
#[derive(Clone, Debug)]
pub struct Instance {
	class: Arc<Class>,
	constructor: MethodDescriptor,
	arguments: Vec<Value>,
}

impl Instance {
	pub fn class(&self) -> &Arc<Class> {
		&self.class
	}

	pub fn constructor(&self) -> &MethodDescriptor {
		&self.constructor
	}

	pub fn arguments(&self) -> &[Value] {
		&self.arguments
	}
}

impl PartialEq for Instance {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.class, &other.class)
			&& self.constructor == other.constructor
			&& self.arguments == other.arguments
	}
}

impl Display for Instance {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}(", self.class.name)?;
		for (i, argument) in self.arguments.iter().enumerate() {
			if i != 0 {
				f.write_str(", ")?;
			}
			argument.fmt(f)?;
		}
		f.write_str(")")
	}
}

/// Builds an instance of `class` through the constructor whose parameter
/// types are exactly `parameters`, binding `arguments` to them in order.
///
/// Nothing is constructed unless every argument is accepted.
pub fn construct(
	class: &Arc<Class>,
	parameters: &[Type],
	arguments: &[Value],
) -> ClassResult<Instance> {
	if arguments.len() != parameters.len() {
		return Err(ClassError::ArgumentArityMismatch {
			expected: parameters.len(),
			found: arguments.len(),
		});
	}

	let Some(constructor) = class.constructor(parameters) else {
		return Err(ClassError::NoMatchingConstructor {
			class: class.name.clone(),
			descriptor: MethodDescriptor::constructor(parameters.to_vec()),
		});
	};

	let arguments = parameters
		.iter()
		.zip(arguments)
		.enumerate()
		.map(|(index, (ty, value))| {
			value
				.coerce(ty)
				.ok_or_else(|| ClassError::ArgumentTypeMismatch {
					index,
					expected: ty.clone(),
					found: value.kind(),
				})
		})
		.collect::<ClassResult<Vec<_>>>()?;

	debug!("Constructed {} via {}", class.name, constructor.descriptor);
	Ok(Instance {
		class: class.clone(),
		constructor: constructor.descriptor.clone(),
		arguments,
	})
}
