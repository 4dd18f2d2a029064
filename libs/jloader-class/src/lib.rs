//! Class path resolution and class definition.
//!
//! A [`ClassLoader`] asks its parent first, then walks its [`LoaderChain`]
//! of [`ClassSource`]s and hands the first bytes found to its
//! [`ClassDefiner`]. Directory sources confine every lookup to their
//! [`ClassRoot`].

mod chain;
mod class;
mod classpath;
mod definer;
mod error;
mod instance;
mod loader;
mod path;
pub mod resource;
mod source;
mod value;

pub use chain::*;
pub use class::*;
pub use classpath::*;
pub use definer::*;
pub use error::*;
pub use instance::*;
pub use loader::*;
pub use path::ClassRoot;
pub use resource::ResolvedResource;
pub use source::*;
pub use value::*;
