//! Thin statement and expression builder over the oxc AST.
//!
//! Import declarations are collected apart from the body so that they always
//! print ahead of the bindings that reference them.

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast::{AstBuilder, NONE};
use oxc_codegen::Codegen;
use oxc_span::{SPAN, SourceType};

pub(crate) struct ModuleBuilder<'a> {
    alloc: &'a Allocator,
    ast: AstBuilder<'a>,
    imports: Vec<Statement<'a>>,
    body: Vec<Statement<'a>>,
    source_type: SourceType,
}

impl<'a> ModuleBuilder<'a> {
    pub fn new(alloc: &'a Allocator, source_type: SourceType) -> Self {
        Self {
            alloc,
            ast: AstBuilder::new(alloc),
            imports: Vec::new(),
            body: Vec::new(),
            source_type,
        }
    }

    /// Copy `value` into the arena.
    fn atom(&self, value: &str) -> &'a str {
        self.alloc.alloc_str(value)
    }

    pub fn ident(&self, name: &str) -> Expression<'a> {
        self.ast.expression_identifier(SPAN, self.atom(name))
    }

    pub fn string(&self, value: &str) -> Expression<'a> {
        self.ast.expression_string_literal(SPAN, self.atom(value), None)
    }

    pub fn boolean(&self, value: bool) -> Expression<'a> {
        self.ast.expression_boolean_literal(SPAN, value)
    }

    /// `object.property`
    pub fn member(&self, object: Expression<'a>, property: &str) -> Expression<'a> {
        let property = self.ast.identifier_name(SPAN, self.atom(property));
        Expression::from(self.ast.member_expression_static(SPAN, object, property, false))
    }

    pub fn call(&self, callee: Expression<'a>, args: Vec<Expression<'a>>) -> Expression<'a> {
        let args = self.ast.vec_from_iter(args.into_iter().map(Argument::from));
        self.ast.expression_call(SPAN, callee, NONE, args, false)
    }

    /// `object.method(args)` on a named binding.
    pub fn method(&self, object: &str, method: &str, args: Vec<Expression<'a>>) -> Expression<'a> {
        self.call(self.member(self.ident(object), method), args)
    }

    /// `new Class()`
    pub fn construct(&self, class: &str) -> Expression<'a> {
        self.ast.expression_new(SPAN, self.ident(class), NONE, self.ast.vec())
    }

    pub fn object(&self, properties: Vec<(&str, Expression<'a>)>) -> Expression<'a> {
        let properties = properties.into_iter().map(|(key, value)| {
            let key = self.ast.identifier_name(SPAN, self.atom(key));
            self.ast.object_property_kind_object_property(
                SPAN,
                PropertyKind::Init,
                PropertyKey::StaticIdentifier(self.ast.alloc(key)),
                value,
                false,
                false,
                false,
            )
        });
        self.ast.expression_object(SPAN, self.ast.vec_from_iter(properties))
    }

    pub fn array(&self, items: Vec<Expression<'a>>) -> Expression<'a> {
        let items = items.into_iter().map(ArrayExpressionElement::from);
        self.ast.expression_array(SPAN, self.ast.vec_from_iter(items))
    }

    /// `expression as TypeName`
    pub fn cast(&self, expression: Expression<'a>, type_name: &str) -> Expression<'a> {
        let name = self
            .ast
            .ts_type_name_identifier_reference(SPAN, self.atom(type_name));
        let ty = self.ast.ts_type_type_reference(SPAN, name, NONE);
        self.ast.expression_ts_as(SPAN, expression, ty)
    }

    /// `expression!`
    pub fn non_null(&self, expression: Expression<'a>) -> Expression<'a> {
        self.ast.expression_ts_non_null(SPAN, expression)
    }

    pub fn conditional(
        &self,
        test: Expression<'a>,
        consequent: Expression<'a>,
        alternate: Expression<'a>,
    ) -> Expression<'a> {
        self.ast
            .expression_conditional(SPAN, test, consequent, alternate)
    }

    pub fn logical(
        &self,
        left: Expression<'a>,
        operator: LogicalOperator,
        right: Expression<'a>,
    ) -> Expression<'a> {
        self.ast.expression_logical(SPAN, left, operator, right)
    }

    /// `() => body`
    pub fn arrow(&self, body: Expression<'a>) -> Expression<'a> {
        let params = self.ast.formal_parameters(
            SPAN,
            FormalParameterKind::ArrowFormalParameters,
            self.ast.vec(),
            NONE,
        );
        let body = self.ast.function_body(
            SPAN,
            self.ast.vec(),
            self.ast.vec1(self.ast.statement_expression(SPAN, body)),
        );
        self.ast
            .expression_arrow_function(SPAN, true, false, NONE, params, NONE, body)
    }

    /// `import("source")`
    pub fn dynamic_import(&self, source: &str) -> Expression<'a> {
        self.ast
            .expression_import(SPAN, self.string(source), None, None)
    }

    /// Self-closing component element: `<Name />`
    pub fn element(&self, name: &str) -> Expression<'a> {
        let ident = self.ast.jsx_identifier(SPAN, self.atom(name));
        let name = JSXElementName::Identifier(self.ast.alloc(ident));
        let opening = self.ast.jsx_opening_element(SPAN, name, NONE, self.ast.vec());
        let closing: Option<JSXClosingElement<'a>> = None;
        let element = self.ast.jsx_element(
            SPAN,
            opening,
            self.ast.vec(),
            closing.map(|e| self.ast.alloc(e)),
        );
        Expression::JSXElement(self.ast.alloc(element))
    }

    /// `const name = init;`
    pub fn const_decl(&self, name: &str, init: Expression<'a>) -> Statement<'a> {
        let kind = self
            .ast
            .binding_pattern_kind_binding_identifier(SPAN, self.atom(name));
        let id = self.ast.binding_pattern(kind, NONE, false);
        let declarator = self.ast.variable_declarator(
            SPAN,
            VariableDeclarationKind::Const,
            id,
            Some(init),
            false,
        );
        let declaration = self.ast.variable_declaration(
            SPAN,
            VariableDeclarationKind::Const,
            self.ast.vec1(declarator),
            false,
        );
        Statement::VariableDeclaration(self.ast.alloc(declaration))
    }

    pub fn expr_stmt(&self, expression: Expression<'a>) -> Statement<'a> {
        self.ast.statement_expression(SPAN, expression)
    }

    /// `if (test) { body }`
    pub fn if_stmt(&self, test: Expression<'a>, body: Vec<Statement<'a>>) -> Statement<'a> {
        let block = self.ast.statement_block(SPAN, self.ast.vec_from_iter(body));
        self.ast.statement_if(SPAN, test, block, None)
    }

    pub fn push(&mut self, stmt: Statement<'a>) {
        self.body.push(stmt);
    }

    /// `import { a, b } from "source";`
    pub fn named_import(&mut self, names: &[&str], source: &str) {
        let specifiers = names.iter().map(|name| {
            let name = self.atom(name);
            self.ast.import_declaration_specifier_import_specifier(
                SPAN,
                ModuleExportName::IdentifierName(self.ast.identifier_name(SPAN, name)),
                self.ast.binding_identifier(SPAN, name),
                ImportOrExportKind::Value,
            )
        });
        let specifiers = self.ast.vec_from_iter(specifiers);
        self.import(Some(specifiers), source);
    }

    /// `import * as local from "source";`
    pub fn namespace_import(&mut self, local: &str, source: &str) {
        let local = self.ast.binding_identifier(SPAN, self.atom(local));
        let specifier = self
            .ast
            .import_declaration_specifier_import_namespace_specifier(SPAN, local);
        self.import(Some(self.ast.vec1(specifier)), source);
    }

    /// `import local from "source";`
    pub fn default_import(&mut self, local: &str, source: &str) {
        let local = self.ast.binding_identifier(SPAN, self.atom(local));
        let specifier = self
            .ast
            .import_declaration_specifier_import_default_specifier(SPAN, local);
        self.import(Some(self.ast.vec1(specifier)), source);
    }

    /// `import "source";`
    pub fn side_effect_import(&mut self, source: &str) {
        self.import(None, source);
    }

    fn import(
        &mut self,
        specifiers: Option<oxc_allocator::Vec<'a, ImportDeclarationSpecifier<'a>>>,
        source: &str,
    ) {
        let source = self.ast.string_literal(SPAN, self.atom(source), None);
        let declaration = self.ast.import_declaration(
            SPAN,
            specifiers,
            source,
            None,
            NONE,
            ImportOrExportKind::Value,
        );
        self.imports
            .push(Statement::ImportDeclaration(self.ast.alloc(declaration)));
    }

    /// `export default expression;`
    pub fn export_default(&mut self, expression: Expression<'a>) {
        let declaration = self
            .ast
            .export_default_declaration(SPAN, ExportDefaultDeclarationKind::from(expression));
        self.body
            .push(Statement::ExportDefaultDeclaration(self.ast.alloc(declaration)));
    }

    /// Print the module: imports first, then the body in push order.
    pub fn generate(self) -> String {
        let mut statements = self.imports;
        statements.extend(self.body);
        let program = self.ast.program(
            SPAN,
            self.source_type,
            "",
            self.ast.vec(),
            None,
            self.ast.vec(),
            self.ast.vec_from_iter(statements),
        );
        Codegen::new().build(&program).code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_print_before_body() {
        let allocator = Allocator::default();
        let mut js = ModuleBuilder::new(&allocator, SourceType::ts());
        let stmt = js.const_decl("$0", js.construct("Router"));
        js.push(stmt);
        js.named_import(&["Router"], "@oak/oak");

        let code = js.generate();
        let import = code.find("import { Router }").unwrap();
        let binding = code.find("const $0 = new Router()").unwrap();
        assert!(import < binding);
    }

    #[test]
    fn test_string_values_are_escaped() {
        let allocator = Allocator::default();
        let mut js = ModuleBuilder::new(&allocator, SourceType::ts());
        js.side_effect_import("./say\"hi.ts");
        let stmt = js.expr_stmt(js.string("back\\slash"));
        js.push(stmt);

        let code = js.generate();
        assert!(!code.contains("\"./say\"hi.ts\""));
        assert!(code.contains(r"back\\slash"));
        super::super::assert_parses(&code, SourceType::ts());
    }
}
