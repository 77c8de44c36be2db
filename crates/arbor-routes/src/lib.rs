//! File-system route compiler.
//!
//! Scans a route root directory and generates two routing artifacts that share
//! one tree shape:
//!
//! - `_main.tsx`: the client view-route table (lazy views, error boundaries,
//!   not-found fallbacks)
//! - `_main.ts`: the server middleware table (one sub-router per directory)
//!
//! # File conventions
//!
//! | File              | Role                                           |
//! |-------------------|------------------------------------------------|
//! | `main.tsx/jsx`    | layout view wrapping the directory             |
//! | `main.ts/js`      | layout handler (the directory's router)        |
//! | `index.*`         | matches the directory path itself              |
//! | `name.*`          | leaf route owning `name` entirely              |
//! | `[id]`            | named parameter segment                        |
//! | `[...]`           | catch-all segment, always matched last         |
//! | `_*`, `*.test.*`  | ignored                                        |
//!
//! # Example
//!
//! ```rust
//! use arbor_routes::{emit, EmitOptions, RouteTree};
//!
//! let tree = RouteTree::from_files(["main.tsx", "index.tsx", "[id]/index.tsx"]);
//! let artifacts = emit(&tree, &EmitOptions::default());
//! assert!(artifacts.client.unwrap().source.contains(r#"path: ":id""#));
//! assert!(artifacts.server.source.contains("export default $0;"));
//! ```

pub mod classify;
pub mod compile;
pub mod emit;
pub mod error;
pub mod format;
pub mod tree;

pub use classify::{classify, Classification, Half, SkipReason, SlotKind};
pub use compile::{
    artifact_paths, compile_routes, write_artifact, CompileReport, CLIENT_ARTIFACT,
    SERVER_ARTIFACT,
};
pub use emit::{emit, emit_client, emit_server, EmitOptions, EmittedModule, RouteArtifacts};
pub use error::{Result, RouteError};
pub use format::{CommandFormatter, Formatter, PassthroughFormatter};
pub use tree::{NodeId, RouteNode, RouteTree, Slot};
