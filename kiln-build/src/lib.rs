//! Code generator for kiln data layers.
//!
//! Entity definitions are read from TOML files, resolved against each other and turned into the
//! entity, data-access, model, repository, mock and API layers of an application crate.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     kiln_build::builder()
//!         .definitions("schema/")
//!         .output("src/generated/")
//!         .run()
//!         .expect("Failed to generate data layer");
//!
//!     println!("cargo:rerun-if-changed=schema/");
//! }
//! ```

pub mod builder;
pub mod config;
pub mod entity;
pub mod error;
pub mod generate;
pub mod ir;
pub mod loader;
pub mod plugin;
pub mod resolver;
pub mod schema;

pub use builder::{Builder, WriteReport, write_files};
pub use config::KilnConfig;
pub use error::{Error, Result};
pub use generate::{GeneratedFile, Generator, Layout};
pub use plugin::PluginRegistry;

/// Create a builder with the default configuration and plugins.
///
/// ```ignore
/// kiln_build::builder()
///     .definitions("schema/")
///     .output("src/generated/")
///     .run()
///     .expect("Failed to generate data layer");
/// ```
pub fn builder() -> Builder {
    Builder::new()
}
