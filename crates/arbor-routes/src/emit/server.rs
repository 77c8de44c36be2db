use super::builder::ModuleBuilder;
use super::{join, route_file, EmitOptions, EmittedModule, Ids};
use crate::classify::server_segment;
use crate::tree::{NodeId, RouteTree};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, LogicalOperator, Statement};
use oxc_span::SourceType;

/// Emit the server middleware-route table.
///
/// Every directory node gets its own sub-router mounted on its parent's.
/// Unlike the client table, no catch-all is synthesized: unmatched requests
/// fall through to the server's remaining handlers.
pub fn emit_server(tree: &RouteTree, options: &EmitOptions) -> EmittedModule {
    let allocator = Allocator::default();
    let mut js = ModuleBuilder::new(&allocator, SourceType::ts());
    js.named_import(&["Router"], &options.server_router);
    js.named_import(
        &["createApiRouter", "defaultRouter", "errorBoundary"],
        &options.server_runtime,
    );
    js.named_import(&["RouteFile"], &options.client_runtime);

    let mut pass = ServerPass {
        tree,
        js,
        ids: Ids::default(),
        boundaries: Vec::new(),
        visited: Vec::new(),
    };
    pass.directory(None, tree.root(), "");

    EmittedModule {
        visited: pass.visited,
        source: pass.js.generate(),
    }
}

struct ServerPass<'t, 'a> {
    tree: &'t RouteTree,
    js: ModuleBuilder<'a>,
    ids: Ids,
    /// Boundary bindings of the enclosing layouts, innermost last
    boundaries: Vec<String>,
    visited: Vec<NodeId>,
}

impl<'a> ServerPass<'_, 'a> {
    fn node(&mut self, parent: &str, id: NodeId, rel: &str) {
        if self.tree.node(id).leaf().is_some() {
            self.leaf(parent, id, rel);
        } else {
            self.directory(Some(parent), id, rel);
        }
    }

    fn leaf(&mut self, parent: &str, id: NodeId, rel: &str) {
        self.visited.push(id);
        let tree = self.tree;
        let node = tree.node(id);
        let Some(slot) = node.leaf() else {
            return;
        };
        let path = format!("/{}", server_segment(node.name()));

        if let Some(view) = slot.view.as_deref() {
            let module = self.view_import(view);
            let boundary = self.own_boundary(&module, &format!("/{rel}"));
            let stmt = self.guarded_boundary(&module, parent, Some(&path), boundary);
            self.js.push(stmt);
        }

        let router = match slot.handler.as_deref() {
            Some(handler) => self.handler_import(handler),
            None if slot.view.is_some() => "defaultRouter".to_string(),
            None => return,
        };
        let stmt = self.mount(parent, &path, &router);
        self.js.push(stmt);
    }

    fn directory(&mut self, parent: Option<&str>, id: NodeId, rel: &str) {
        self.visited.push(id);
        let tree = self.tree;
        let node = tree.node(id);
        let router = self.ids.name();
        let mut pushed_boundary = false;

        match node.layout() {
            Some(layout) => {
                match layout.handler.as_deref() {
                    Some(handler) => self.js.default_import(&router, &format!("./{handler}")),
                    None => self.new_router(&router),
                }
                if let Some(view) = layout.view.as_deref() {
                    let module = self.view_import(view);
                    let fallback = if rel.is_empty() {
                        String::new()
                    } else {
                        format!("/{rel}")
                    };
                    let boundary = format!("{router}Boundary");

                    // Own identity when the layout declares one, else inherited
                    let js = &self.js;
                    let init = js.conditional(
                        has_boundary(js, &module),
                        self.own_boundary(&module, &fallback),
                        self.current_boundary(),
                    );
                    let declare = js.const_decl(&boundary, init);
                    let install = self.guarded_boundary(
                        &module,
                        &router,
                        None,
                        self.js.ident(&boundary),
                    );
                    self.js.push(declare);
                    self.js.push(install);

                    self.boundaries.push(boundary);
                    pushed_boundary = true;
                }
            }
            None => {
                self.new_router(&router);
                if parent.is_none() && node.has_view() {
                    let stmt = self.use_stmt(
                        &router,
                        vec![self.js.call(self.js.ident("errorBoundary"), Vec::new())],
                    );
                    self.js.push(stmt);
                }
            }
        }

        if let Some(index) = node.index() {
            if let Some(view) = index.view.as_deref() {
                let module = self.view_import(view);
                let boundary = self.own_boundary(&module, &format!("/{}", join(rel, "index")));
                let stmt = self.guarded_boundary(&module, &router, Some("/"), boundary);
                self.js.push(stmt);
            }
            let handler = match index.handler.as_deref() {
                Some(handler) => Some(self.handler_import(handler)),
                None if node.has_view() => Some("defaultRouter".to_string()),
                None => None,
            };
            if let Some(handler) = handler {
                let stmt = self.mount(&router, "/", &handler);
                self.js.push(stmt);
            }
            let stmt = self.use_stmt(
                &router,
                vec![self.js.string("/"), self.error_boundary(self.current_boundary())],
            );
            self.js.push(stmt);
        }

        for child in tree.ordered_children(id) {
            let child_rel = join(rel, tree.node(child).name());
            self.node(&router, child, &child_rel);
        }

        if pushed_boundary {
            self.boundaries.pop();
        }

        match parent {
            None => {
                let root = self.js.ident(&router);
                self.js.export_default(root);
            }
            Some(parent) => {
                let parent_has_view = tree
                    .parent(id)
                    .is_some_and(|p| tree.node(p).has_view());
                let mounted = if parent_has_view && !node.has_view() {
                    self.js
                        .call(self.js.ident("createApiRouter"), vec![self.js.ident(&router)])
                } else {
                    self.js.ident(&router)
                };
                let main = format!("{router}Main");
                let stmt = self.js.const_decl(&main, mounted);
                self.js.push(stmt);
                let path = format!("/{}", server_segment(node.name()));
                let stmt = self.mount(parent, &path, &main);
                self.js.push(stmt);
            }
        }
    }

    fn new_router(&mut self, name: &str) {
        let stmt = self.js.const_decl(name, self.js.construct("Router"));
        self.js.push(stmt);
    }

    fn view_import(&mut self, file: &str) -> String {
        let name = self.ids.name();
        let source = format!("./{file}");
        self.js.side_effect_import(&source);
        self.js.namespace_import(&name, &source);
        name
    }

    fn handler_import(&mut self, file: &str) -> String {
        let name = self.ids.name();
        self.js.default_import(&name, &format!("./{file}"));
        name
    }

    /// `router.use(args)`
    fn use_stmt(&self, router: &str, args: Vec<Expression<'a>>) -> Statement<'a> {
        self.js.expr_stmt(self.js.method(router, "use", args))
    }

    /// `parent.use(path, router.routes(), router.allowedMethods())`
    fn mount(&self, parent: &str, path: &str, router: &str) -> Statement<'a> {
        let js = &self.js;
        self.use_stmt(
            parent,
            vec![
                js.string(path),
                js.method(router, "routes", Vec::new()),
                js.method(router, "allowedMethods", Vec::new()),
            ],
        )
    }

    fn error_boundary(&self, identity: Expression<'a>) -> Expression<'a> {
        self.js.call(self.js.ident("errorBoundary"), vec![identity])
    }

    /// `(module as RouteFile).boundary ?? "fallback"`
    fn own_boundary(&self, module: &str, fallback: &str) -> Expression<'a> {
        self.js.logical(
            route_file(&self.js, module, "boundary"),
            LogicalOperator::Coalesce,
            self.js.string(fallback),
        )
    }

    /// Install `errorBoundary(identity)` on `router` when the view module has one.
    fn guarded_boundary(
        &self,
        module: &str,
        router: &str,
        path: Option<&str>,
        identity: Expression<'a>,
    ) -> Statement<'a> {
        let mut args = Vec::new();
        if let Some(path) = path {
            args.push(self.js.string(path));
        }
        args.push(self.error_boundary(identity));
        let install = self.use_stmt(router, args);
        self.js.if_stmt(has_boundary(&self.js, module), vec![install])
    }

    fn current_boundary(&self) -> Expression<'a> {
        match self.boundaries.last() {
            Some(name) => self.js.ident(name),
            None => self.js.string(""),
        }
    }
}

/// `(module as RouteFile).ErrorFallback || (module as RouteFile).boundary`
fn has_boundary<'a>(js: &ModuleBuilder<'a>, module: &str) -> Expression<'a> {
    js.logical(
        route_file(js, module, "ErrorFallback"),
        LogicalOperator::Or,
        route_file(js, module, "boundary"),
    )
}
