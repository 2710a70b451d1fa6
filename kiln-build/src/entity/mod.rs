//! In-memory entity definitions.

mod class;
mod member;
mod name;
pub mod plural;
mod ty;

pub use class::{Class, Index, KeyGroup, KeyKind};
pub use member::{Member, Relation, RenderMeta};
pub use name::Name;
pub use ty::{PrimitiveKind, RenderKind, TypeRef};
