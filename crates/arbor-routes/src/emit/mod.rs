//! Code generation for the two routing artifacts of a route root.
//!
//! Both passes walk the same [`RouteTree`] depth-first in pre-order, visiting
//! children through [`RouteTree::ordered_children`] so the wildcard branch is
//! always last. Each pass numbers its generated identifiers independently,
//! starting at `$0`, and builds its artifact as an oxc AST that is printed by
//! `oxc_codegen`.

mod builder;
mod client;
mod server;

pub use client::emit_client;
pub use server::emit_server;

use crate::tree::{NodeId, RouteTree};
use builder::ModuleBuilder;
use oxc_ast::ast::Expression;

/// Module specifiers referenced by generated imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Exports `lazy`, `withAppErrorBoundary`, `DefaultErrorFallback`, `NotFound`, `RouteFile`
    pub client_runtime: String,
    /// Exports `defaultRouter`, `createApiRouter`, `errorBoundary`
    pub server_runtime: String,
    /// Exports `Outlet` and `RouteObject`
    pub view_router: String,
    /// Exports the middleware `Router`
    pub server_router: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            client_runtime: "@arbor/app".to_string(),
            server_runtime: "@arbor/app/server".to_string(),
            view_router: "react-router-dom".to_string(),
            server_router: "@oak/oak".to_string(),
        }
    }
}

/// Source text of one generated artifact.
#[derive(Debug, Clone)]
pub struct EmittedModule {
    /// Unformatted source
    pub source: String,
    /// Nodes in the order the pass visited them
    pub visited: Vec<NodeId>,
}

/// Both artifacts for one route tree.
#[derive(Debug, Clone)]
pub struct RouteArtifacts {
    /// View table, absent when the tree has no view content
    pub client: Option<EmittedModule>,
    /// Middleware table
    pub server: EmittedModule,
}

/// Run both passes over `tree`.
pub fn emit(tree: &RouteTree, options: &EmitOptions) -> RouteArtifacts {
    RouteArtifacts {
        client: emit_client(tree, options),
        server: emit_server(tree, options),
    }
}

/// Per-pass identifier counter.
#[derive(Debug, Default)]
struct Ids(usize);

impl Ids {
    fn next(&mut self) -> usize {
        let id = self.0;
        self.0 += 1;
        id
    }

    /// Next generated binding name, `$N`.
    fn name(&mut self) -> String {
        format!("${}", self.next())
    }
}

/// `(module as RouteFile).export`
fn route_file<'a>(js: &ModuleBuilder<'a>, module: &str, export: &str) -> Expression<'a> {
    js.member(js.cast(js.ident(module), "RouteFile"), export)
}

/// Join route-relative paths with `/`, treating an empty base as the root.
fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

/// Parse `source` and fail the test on any syntax error.
#[cfg(test)]
fn assert_parses(source: &str, source_type: oxc_span::SourceType) {
    let allocator = oxc_allocator::Allocator::default();
    let parsed = oxc_parser::Parser::new(&allocator, source, source_type).parse();
    assert!(
        parsed.errors.is_empty(),
        "generated code does not parse: {:?}\n{source}",
        parsed.errors
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join() {
        assert_eq!(join("", "index"), "index");
        assert_eq!(join("blog", "[id]"), "blog/[id]");
    }

    #[test]
    fn test_ids_increment_from_zero() {
        let mut ids = Ids::default();
        assert_eq!(ids.next(), 0);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.name(), "$2");
    }
}
