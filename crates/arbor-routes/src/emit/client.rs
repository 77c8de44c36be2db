use super::builder::ModuleBuilder;
use super::{join, route_file, EmitOptions, EmittedModule, Ids};
use crate::classify::client_segment;
use crate::tree::{NodeId, RouteTree};
use oxc_allocator::Allocator;
use oxc_ast::ast::Expression;
use oxc_span::SourceType;

/// Emit the client view-route table, or `None` when nothing renders a view.
pub fn emit_client(tree: &RouteTree, options: &EmitOptions) -> Option<EmittedModule> {
    if !tree.node(tree.root()).has_view() {
        return None;
    }

    let allocator = Allocator::default();
    let mut js = ModuleBuilder::new(&allocator, SourceType::tsx());
    js.named_import(
        &[
            "DefaultErrorFallback",
            "lazy",
            "NotFound",
            "RouteFile",
            "withAppErrorBoundary",
        ],
        &options.client_runtime,
    );
    js.named_import(&["Outlet", "RouteObject"], &options.view_router);

    let mut pass = ClientPass {
        tree,
        js,
        ids: Ids::default(),
        visited: Vec::new(),
    };
    let route = pass.route(tree.root(), "");
    let table = pass.js.cast(route, "RouteObject");
    pass.js.export_default(table);

    Some(EmittedModule {
        visited: pass.visited,
        source: pass.js.generate(),
    })
}

struct ClientPass<'t, 'a> {
    tree: &'t RouteTree,
    js: ModuleBuilder<'a>,
    ids: Ids,
    visited: Vec<NodeId>,
}

impl<'a> ClientPass<'_, 'a> {
    fn route(&mut self, id: NodeId, rel: &str) -> Expression<'a> {
        self.visited.push(id);
        let tree = self.tree;
        let node = tree.node(id);
        let path = if rel.is_empty() {
            "/".to_string()
        } else {
            client_segment(node.name())
        };
        let mut props = vec![("path", self.js.string(&path))];

        if let Some(leaf) = node.leaf() {
            if let Some(view) = leaf.view.as_deref() {
                let element = self.eager_view(view, rel);
                props.push(("element", self.js.element(&element)));
            }
            return self.js.object(props);
        }

        let layout = node.layout().and_then(|slot| slot.view.as_deref());
        let element = match layout {
            Some(view) if rel.is_empty() => self.eager_view(view, rel),
            Some(view) => self.lazy_view(rel, view),
            None if rel.is_empty() => self.root_outlet(),
            None => "Outlet".to_string(),
        };
        props.push(("element", self.js.element(&element)));

        let mut children = Vec::new();
        if let Some(view) = node.index().and_then(|slot| slot.view.as_deref()) {
            let element = self.lazy_view(&join(rel, "index"), view);
            children.push(self.js.object(vec![
                ("index", self.js.boolean(true)),
                ("element", self.js.element(&element)),
            ]));
        }

        let mut has_wildcard = false;
        for child in tree.ordered_children(id) {
            let child_node = tree.node(child);
            if !child_node.has_view() {
                continue;
            }
            has_wildcard |= child_node.is_wildcard();
            let child_rel = join(rel, child_node.name());
            children.push(self.route(child, &child_rel));
        }
        if !has_wildcard {
            children.push(self.js.object(vec![
                ("path", self.js.string("*")),
                ("element", self.js.element("NotFound")),
            ]));
        }

        props.push(("children", self.js.array(children)));
        self.js.object(props)
    }

    /// Deferred view bound to its route path.
    fn lazy_view(&mut self, route: &str, file: &str) -> String {
        let name = self.ids.name();
        let js = &self.js;
        let loader = js.arrow(js.dynamic_import(&format!("./{file}")));
        let init = js.call(
            js.ident("lazy"),
            vec![js.string(&format!("/{route}")), loader],
        );
        let stmt = js.const_decl(&name, init);
        self.js.push(stmt);
        name
    }

    /// Eagerly imported view, wrapped when it exports `ErrorFallback`.
    fn eager_view(&mut self, file: &str, rel: &str) -> String {
        let module = self.ids.name();
        let element = self.ids.name();
        self.js.namespace_import(&module, &format!("./{file}"));

        let js = &self.js;
        let mut options = vec![(
            "FallbackComponent",
            js.non_null(route_file(js, &module, "ErrorFallback")),
        )];
        if !rel.is_empty() {
            options.push(("boundary", js.string(&format!("/{rel}"))));
        }
        let wrapped = js.call(
            js.ident("withAppErrorBoundary"),
            vec![js.member(js.ident(&module), "default"), js.object(options)],
        );
        let init = js.conditional(
            route_file(js, &module, "ErrorFallback"),
            wrapped,
            js.member(js.ident(&module), "default"),
        );
        let stmt = js.const_decl(&element, init);
        self.js.push(stmt);
        element
    }

    /// Pass-through root layout under the default boundary.
    fn root_outlet(&mut self) -> String {
        let name = self.ids.name();
        let js = &self.js;
        let init = js.call(
            js.ident("withAppErrorBoundary"),
            vec![
                js.arrow(js.element("Outlet")),
                js.object(vec![(
                    "FallbackComponent",
                    js.ident("DefaultErrorFallback"),
                )]),
            ],
        );
        let stmt = js.const_decl(&name, init);
        self.js.push(stmt);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::assert_parses;

    fn emit(files: &[&str]) -> Option<String> {
        let tree = RouteTree::from_files(files.iter().copied());
        let source = emit_client(&tree, &EmitOptions::default()).map(|m| m.source);
        if let Some(source) = &source {
            assert_parses(source, SourceType::tsx());
        }
        source
    }

    #[test]
    fn test_no_views_no_client_table() {
        assert!(emit(&["index.ts", "api/users.ts"]).is_none());
    }

    #[test]
    fn test_leaf_view_is_eager() {
        let source = emit(&["about.tsx"]).unwrap();
        assert!(source.contains(r#"import * as $1 from "./about.tsx";"#));
        assert!(source.contains(r#"boundary: "/about""#));
        assert!(source.contains("withAppErrorBoundary($1.default"));
        assert!(!source.contains(r#"import("./about.tsx")"#));
    }

    #[test]
    fn test_implicit_root_outlet() {
        let source = emit(&["index.tsx"]).unwrap();
        assert!(source.contains("const $0 = withAppErrorBoundary("));
        assert!(source.contains("FallbackComponent: DefaultErrorFallback"));
        assert!(source.contains(r#"const $1 = lazy("/index", () => import("./index.tsx"));"#));
        assert!(source.contains("index: true"));
    }

    #[test]
    fn test_not_found_synthesized_without_wildcard() {
        let source = emit(&["index.tsx"]).unwrap();
        assert!(source.contains(r#"path: "*""#));
        assert_eq!(source.matches("<NotFound").count(), 1);
    }

    #[test]
    fn test_wildcard_child_replaces_not_found() {
        let source = emit(&["index.tsx", "[...].tsx"]).unwrap();
        assert!(!source.contains("<NotFound"));
        assert!(source.contains(r#"path: "*""#));
    }

    #[test]
    fn test_handler_only_children_are_omitted() {
        let source = emit(&["index.tsx", "api/users.ts"]).unwrap();
        assert!(!source.contains("api"));
        assert!(!source.contains("users"));
    }

    #[test]
    fn test_quotes_in_file_names_stay_valid() {
        let source = emit(&["say\"hi.tsx", "back\\slash/index.tsx"]).unwrap();
        assert!(!source.contains(r#""./say"hi.tsx""#));
        assert!(!source.contains(r#"path: "say"hi""#));
    }
}
