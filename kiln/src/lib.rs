//! kiln runtime library.
//!
//! Support code linked by the sources `kiln-build` generates: the closed [`Value`] set used for mock
//! argument matching, the mock expectation registry, render options and writers, save-state tracking,
//! relation memoisation, the request [`Context`], the SQL executor seam and its read-through cache.

extern crate self as kiln;

pub mod api;
pub mod cache;
pub mod context;
pub mod errors;
pub mod hook;
pub mod mock;
pub mod relation;
pub mod render;
pub mod save_state;
pub mod sql;
pub mod value;

pub use context::{AuditSink, Context};
pub use errors::{Error, Result};
pub use kiln_macros::MockValue;
pub use mock::{Expectation, MockMethod};
pub use relation::{Loader, RelationCell};
pub use render::{
    BeforeRender, RenderOption, RenderOptionBuilder, ToJson, ToJsonWithOption, ToMap, ToMapWithOption,
};
pub use save_state::SaveState;
pub use value::{Order, ToValue, Value};

// Generated code names these through `::kiln` so applications need no direct dependency on them.
pub use chrono;
pub use serde;
pub use serde_json;
