//! Shared helpers for building position-accurate trees without a parser.
//!
//! [`Layout`] plays the scanner: it hands out start/end positions for each
//! token as if the tokens were written left to right with single spaces, so
//! the trees built in tests carry the spans a real parse would give them.

#![allow(dead_code)]

use sqltree_ast::{
    visit::NodeRef, ColumnList, Comment, CommentGroup, Derived, Expr, Ident, Literal,
    LiteralValue, Node, NonEmpty, ObjectName, Position, Query, Render, Select, SelectItem,
    SetExpr, Span, Statement, Table, TableReference, UnnamedSelectItem,
};

#[derive(Debug)]
pub struct Layout {
    line: u32,
    column: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    pub fn new() -> Self {
        Self { line: 1, column: 1 }
    }

    pub fn pos(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Emit `text` followed by a space. Returns its (start, end).
    pub fn token(&mut self, text: &str) -> (Position, Position) {
        let span = self.tight(text);
        self.column += 1;
        span
    }

    /// Emit `text` with no space after it.
    pub fn tight(&mut self, text: &str) -> (Position, Position) {
        let start = self.pos();
        self.column += u32::try_from(text.chars().count()).unwrap();
        (start, self.pos())
    }

    /// Start of a keyword sequence such as `LEFT JOIN`.
    pub fn kw(&mut self, text: &str) -> Position {
        self.token(text).0
    }

    /// End of a keyword sequence, for closing keywords like `NULL` or `)`.
    pub fn kw_end(&mut self, text: &str) -> Position {
        self.token(text).1
    }

    pub fn ident(&mut self, value: &str) -> Ident {
        let (start, end) = self.token(value);
        Ident::new(value, start, end)
    }

    pub fn ident_tight(&mut self, value: &str) -> Ident {
        let (start, end) = self.tight(value);
        Ident::new(value, start, end)
    }

    /// A dotted name `a.b.c`, written without spaces around the dots.
    pub fn object_name(&mut self, dotted: &str) -> ObjectName {
        let parts: Vec<&str> = dotted.split('.').collect();
        let mut idents = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            if i + 1 == parts.len() {
                idents.push(self.ident(part));
            } else {
                idents.push(self.ident_tight(part));
                self.tight(".");
            }
        }
        ObjectName::new(idents).unwrap()
    }

    pub fn integer(&mut self, n: i64) -> Literal {
        let (start, end) = self.token(&n.to_string());
        Literal::new(LiteralValue::Integer(n), start, end)
    }

    pub fn string(&mut self, s: &str) -> Literal {
        let (start, end) = self.token(&format!("'{s}'"));
        Literal::new(LiteralValue::String(s.to_owned()), start, end)
    }

    /// `(a, b, c)` written tight inside the parentheses.
    pub fn column_list(&mut self, names: &[&str]) -> ColumnList {
        self.tight("(");
        let mut columns = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.token(",");
            }
            columns.push(self.ident_tight(name));
        }
        let rparen_end = self.kw_end(")");
        ColumnList {
            columns: NonEmpty::new("column list", columns).unwrap(),
            rparen_end,
        }
    }

    pub fn line_comment(&mut self, text: &str) -> CommentGroup {
        let (start, end) = self.tight(text);
        CommentGroup::new(vec![Comment::new(text, start, end)]).unwrap()
    }

    /// Move to the start of the next line.
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Undo the space written after the previous token, for `,` and `)`.
    pub fn unspace(&mut self) {
        self.column -= 1;
    }
}

/// `SELECT <column> FROM <table>` at the layout's current position.
pub fn select_query(l: &mut Layout, column: &str, table: &str) -> Query {
    let select_pos = l.kw("SELECT");
    let column = l.ident(column);
    l.kw("FROM");
    let table = l.object_name(table);
    let mut select = Select::new(
        select_pos,
        vec![SelectItem::Unnamed(UnnamedSelectItem {
            expr: Expr::Ident(column),
        })],
    )
    .unwrap();
    select.from = vec![TableReference::Table(Box::new(Table::named(table)))];
    Query::from_body(SetExpr::Select(Box::new(select)))
}

pub fn select_stmt(l: &mut Layout, column: &str, table: &str) -> Statement {
    Statement::Query(Box::new(select_query(l, column, table)))
}

/// A statement over a derived table, broken across two lines:
///
/// ```text
/// SELECT <column> FROM (SELECT <inner>
/// FROM <table>) AS d
/// ```
pub fn derived_select_stmt(l: &mut Layout, column: &str, inner: &str, table: &str) -> Statement {
    let select_pos = l.kw("SELECT");
    let column = l.ident(column);
    l.kw("FROM");
    let lparen_pos = l.tight("(").0;
    let inner_pos = l.kw("SELECT");
    let inner = l.ident(inner);
    l.newline();
    l.kw("FROM");
    let table = l.object_name(table);
    l.unspace();
    let rparen_end = l.kw_end(")");
    l.kw("AS");
    let alias = l.ident("d");

    let mut subquery = Select::new(
        inner_pos,
        vec![SelectItem::Unnamed(UnnamedSelectItem {
            expr: Expr::Ident(inner),
        })],
    )
    .unwrap();
    subquery.from = vec![TableReference::Table(Box::new(Table::named(table)))];

    let mut select = Select::new(
        select_pos,
        vec![SelectItem::Unnamed(UnnamedSelectItem {
            expr: Expr::Ident(column),
        })],
    )
    .unwrap();
    select.from = vec![TableReference::Derived(Box::new(Derived {
        lateral_pos: None,
        lparen_pos,
        subquery: Query::from_body(SetExpr::Select(Box::new(subquery))),
        rparen_end,
        alias: Some(alias),
    }))];
    Statement::Query(Box::new(Query::from_body(SetExpr::Select(Box::new(
        select,
    )))))
}

/// Write the `;` that terminates a statement.
pub fn end_statement(l: &mut Layout) {
    l.unspace();
    l.token(";");
}

/// Check that every node in the subtree has `start <= end`, that every child
/// lies inside its parent, and that siblings appear in source order.
pub fn assert_spans_nested(root: NodeRef<'_>) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let span = node.span();
        assert!(
            span.start <= span.end,
            "{:?} has inverted span {span:?}",
            node.kind()
        );
        let mut children = Vec::new();
        node.for_each_child(&mut |child| children.push(child));
        for child in &children {
            assert!(
                span.contains(child.span()),
                "{:?} {span:?} does not contain {:?} {:?}",
                node.kind(),
                child.kind(),
                child.span()
            );
        }
        for pair in children.windows(2) {
            assert!(
                pair[0].end() <= pair[1].start(),
                "{:?} children out of order: {:?} then {:?}",
                node.kind(),
                pair[0].span(),
                pair[1].span()
            );
        }
        stack.extend(children);
    }
}

/// Check a tree laid out on line 1 against the text it was laid out from:
/// it renders to `sql` exactly, covers every column of it, and its spans nest.
pub fn assert_one_line(root: NodeRef<'_>, sql: &str) {
    assert_eq!(root.to_sql(), sql);
    let len = u32::try_from(sql.chars().count()).unwrap();
    assert_eq!(
        root.span(),
        Span::new(Position::new(1, 1), Position::new(1, len + 1)),
        "span of {:?} does not cover `{sql}`",
        root.kind()
    );
    assert_spans_nested(root);
}
