//! Generic pre-order traversal.
//!
//! [`NodeRef`] is a borrowed handle to any concrete node. The family enums
//! (`Expr`, `Statement`, `TableReference`, ...) are not nodes of their own:
//! converting one into a `NodeRef` yields the concrete node it wraps, so a
//! walk visits each syntactic element exactly once.

use std::hash::{Hash, Hasher};

use crate::comments::{Comment, CommentGroup};
use crate::*;

macro_rules! node_ref {
    ($($kind:ident),* $(,)?) => {
        /// The concrete type of a node.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum NodeKind {
            $($kind,)*
        }

        /// A borrowed reference to any concrete node.
        ///
        /// Equality and hashing are by identity: two references are equal only
        /// when they point at the same node in the same tree.
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $($kind(&'a $kind),)*
        }

        impl NodeRef<'_> {
            pub const fn kind(self) -> NodeKind {
                match self {
                    $(Self::$kind(_) => NodeKind::$kind,)*
                }
            }

            fn addr(self) -> usize {
                match self {
                    $(Self::$kind(node) => node as *const $kind as usize,)*
                }
            }
        }

        impl Node for NodeRef<'_> {
            fn start(&self) -> Position {
                match self {
                    $(Self::$kind(node) => node.start(),)*
                }
            }

            fn end(&self) -> Position {
                match self {
                    $(Self::$kind(node) => node.end(),)*
                }
            }
        }

        impl Render for NodeRef<'_> {
            fn render(&self, out: &mut Sink<'_>) {
                match self {
                    $(Self::$kind(node) => node.render(out),)*
                }
            }
        }

        $(
            impl<'a> From<&'a $kind> for NodeRef<'a> {
                fn from(node: &'a $kind) -> Self {
                    Self::$kind(node)
                }
            }
        )*
    };
}

node_ref!(
    // Naming and leaves
    Ident,
    ObjectName,
    CompoundIdent,
    Wildcard,
    QualifiedWildcard,
    Operator,
    Literal,
    DataType,
    // Expressions
    BinaryExpr,
    UnaryExpr,
    IsNull,
    InList,
    InSubquery,
    Between,
    Cast,
    Nested,
    Function,
    WindowSpec,
    WindowFrame,
    FrameBound,
    CaseExpr,
    Exists,
    Subquery,
    // Queries
    Query,
    With,
    Cte,
    ParenthesizedQuery,
    SetOperation,
    Select,
    UnnamedSelectItem,
    AliasedSelectItem,
    QualifiedWildcardSelectItem,
    WildcardSelectItem,
    OrderByExpr,
    LimitExpr,
    // Table references
    Table,
    Derived,
    CrossJoin,
    QualifiedJoin,
    NaturalJoin,
    PartitionedJoinTable,
    JoinType,
    JoinCondition,
    NamedColumnsJoin,
    // Statements
    Assignment,
    InsertStmt,
    ConstructorSource,
    RowValueExpr,
    SubquerySource,
    UpdateStmt,
    DeleteStmt,
    CreateViewStmt,
    CreateTableStmt,
    ColumnDef,
    ColumnConstraint,
    NotNullColumnSpec,
    UniqueColumnSpec,
    CheckColumnSpec,
    ReferenceKeyExpr,
    TableConstraint,
    UniqueTableConstraint,
    ReferentialTableConstraint,
    CheckTableConstraint,
    AlterTableStmt,
    AddColumnTableAction,
    AddConstraintTableAction,
    DropConstraintTableAction,
    RemoveColumnTableAction,
    AlterColumnTableAction,
    SetDefaultColumnAction,
    DropDefaultColumnAction,
    SetDataTypeColumnAction,
    SetNotNullColumnAction,
    DropNotNullColumnAction,
    DropTableStmt,
    CreateIndexStmt,
    DropIndexStmt,
    ExplainStmt,
    File,
    // Comments
    Comment,
    CommentGroup,
);

/// Identity of a node within a tree: its kind plus its address.
///
/// The kind disambiguates a struct from its first field, which can share an
/// address with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    kind: NodeKind,
    addr: usize,
}

impl<'a> NodeRef<'a> {
    #[must_use]
    pub fn key(self) -> NodeKey {
        NodeKey {
            kind: self.kind(),
            addr: self.addr(),
        }
    }

    /// Whether the node can own trailing comments: statements and queries.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Query(_)
                | Self::InsertStmt(_)
                | Self::UpdateStmt(_)
                | Self::DeleteStmt(_)
                | Self::CreateViewStmt(_)
                | Self::CreateTableStmt(_)
                | Self::AlterTableStmt(_)
                | Self::DropTableStmt(_)
                | Self::CreateIndexStmt(_)
                | Self::DropIndexStmt(_)
                | Self::ExplainStmt(_)
        )
    }

    /// Call `f` on each direct child, in source order.
    #[allow(clippy::too_many_lines)]
    pub fn for_each_child(self, f: &mut dyn FnMut(NodeRef<'a>)) {
        match self {
            Self::Ident(_)
            | Self::Wildcard(_)
            | Self::Operator(_)
            | Self::Literal(_)
            | Self::FrameBound(_)
            | Self::WildcardSelectItem(_)
            | Self::JoinType(_)
            | Self::NotNullColumnSpec(_)
            | Self::UniqueColumnSpec(_)
            | Self::DropDefaultColumnAction(_)
            | Self::SetNotNullColumnAction(_)
            | Self::DropNotNullColumnAction(_)
            | Self::Comment(_) => {}

            Self::ObjectName(n) => each(&n.parts, f),
            Self::CompoundIdent(n) => each(&n.parts, f),
            Self::QualifiedWildcard(n) => f((&n.prefix).into()),
            Self::DataType(n) => match &n.kind {
                TypeKind::Array(element) => f(Self::DataType(element)),
                TypeKind::Custom(name) => f(name.into()),
                _ => {}
            },

            Self::BinaryExpr(n) => {
                f((&n.left).into());
                f((&n.op).into());
                f((&n.right).into());
            }
            Self::UnaryExpr(n) => {
                f((&n.op).into());
                f((&n.expr).into());
            }
            Self::IsNull(n) => f((&n.expr).into()),
            Self::InList(n) => {
                f((&n.expr).into());
                each(&n.list, f);
            }
            Self::InSubquery(n) => {
                f((&n.expr).into());
                f((&n.query).into());
            }
            Self::Between(n) => {
                f((&n.expr).into());
                f((&n.low).into());
                f((&n.high).into());
            }
            Self::Cast(n) => {
                f((&n.expr).into());
                f((&n.data_type).into());
            }
            Self::Nested(n) => f((&n.expr).into()),
            Self::Function(n) => {
                f((&n.name).into());
                each(&n.args, f);
                each(&n.over, f);
            }
            Self::WindowSpec(n) => {
                each(&n.partition_by, f);
                each(&n.order_by, f);
                each(&n.frame, f);
            }
            Self::WindowFrame(n) => {
                f((&n.start_bound).into());
                each(&n.end_bound, f);
            }
            Self::CaseExpr(n) => {
                each(&n.operand, f);
                for (condition, result) in &n.whens {
                    f(condition.into());
                    f(result.into());
                }
                each(&n.else_result, f);
            }
            Self::Exists(n) => f((&n.query).into()),
            Self::Subquery(n) => f((&n.query).into()),

            Self::Query(n) => {
                each(&n.with, f);
                f((&n.body).into());
                each(&n.order_by, f);
                each(&n.limit, f);
            }
            Self::With(n) => each(&n.ctes, f),
            Self::Cte(n) => {
                f((&n.alias).into());
                f((&n.query).into());
            }
            Self::ParenthesizedQuery(n) => f((&n.query).into()),
            Self::SetOperation(n) => {
                f((&n.left).into());
                f((&n.right).into());
            }
            Self::Select(n) => {
                each(&n.projection, f);
                each(&n.from, f);
                each(&n.selection, f);
                each(&n.group_by, f);
                each(&n.having, f);
            }
            Self::UnnamedSelectItem(n) => f((&n.expr).into()),
            Self::AliasedSelectItem(n) => {
                f((&n.expr).into());
                f((&n.alias).into());
            }
            Self::QualifiedWildcardSelectItem(n) => f((&n.prefix).into()),
            Self::OrderByExpr(n) => f((&n.expr).into()),
            Self::LimitExpr(n) => {
                if let LimitValue::Count(count) = &n.value {
                    f(count.into());
                }
                each(&n.offset, f);
            }

            Self::Table(n) => {
                f((&n.name).into());
                if let Some(args) = &n.args {
                    each(&args.args, f);
                }
                each(&n.alias, f);
                if let Some(hints) = &n.hints {
                    each(&hints.hints, f);
                }
            }
            Self::Derived(n) => {
                f((&n.subquery).into());
                each(&n.alias, f);
            }
            Self::CrossJoin(n) => {
                f((&n.left).into());
                f((&n.right).into());
            }
            Self::QualifiedJoin(n) => {
                f((&n.left).into());
                f((&n.join_type).into());
                f((&n.right).into());
                f((&n.spec).into());
            }
            Self::NaturalJoin(n) => {
                f((&n.left).into());
                f((&n.join_type).into());
                f((&n.right).into());
            }
            Self::PartitionedJoinTable(n) => {
                f((&n.table).into());
                each(&n.columns.columns, f);
            }
            Self::JoinCondition(n) => f((&n.condition).into()),
            Self::NamedColumnsJoin(n) => each(&n.columns.columns, f),

            Self::Assignment(n) => {
                f((&n.column).into());
                f((&n.value).into());
            }
            Self::InsertStmt(n) => {
                f((&n.table_name).into());
                each(&n.columns, f);
                f((&n.source).into());
                each(&n.update_assignments, f);
            }
            Self::ConstructorSource(n) => each(&n.rows, f),
            Self::RowValueExpr(n) => each(&n.values, f),
            Self::SubquerySource(n) => f((&n.query).into()),
            Self::UpdateStmt(n) => {
                f((&n.table_name).into());
                each(&n.assignments, f);
                each(&n.selection, f);
            }
            Self::DeleteStmt(n) => {
                f((&n.table_name).into());
                each(&n.selection, f);
            }
            Self::CreateViewStmt(n) => {
                f((&n.name).into());
                f((&n.query).into());
            }
            Self::CreateTableStmt(n) => {
                f((&n.name).into());
                each(&n.elements, f);
                if let Some(external) = &n.external {
                    f((&external.location).into());
                }
            }
            Self::ColumnDef(n) => {
                f((&n.name).into());
                f((&n.data_type).into());
                each(&n.default, f);
                each(&n.constraints, f);
            }
            Self::ColumnConstraint(n) => {
                if let Some(name) = &n.name {
                    f((&name.name).into());
                }
                f((&n.spec).into());
            }
            Self::CheckColumnSpec(n) => f((&n.expr).into()),
            Self::ReferenceKeyExpr(n) => {
                f((&n.table_name).into());
                if let Some(columns) = &n.columns {
                    each(&columns.columns, f);
                }
            }
            Self::TableConstraint(n) => {
                if let Some(name) = &n.name {
                    f((&name.name).into());
                }
                f((&n.spec).into());
            }
            Self::UniqueTableConstraint(n) => each(&n.columns.columns, f),
            Self::ReferentialTableConstraint(n) => {
                each(&n.columns.columns, f);
                f((&n.key).into());
            }
            Self::CheckTableConstraint(n) => f((&n.expr).into()),
            Self::AlterTableStmt(n) => {
                f((&n.table_name).into());
                f((&n.action).into());
            }
            Self::AddColumnTableAction(n) => f((&n.column).into()),
            Self::AddConstraintTableAction(n) => f((&n.constraint).into()),
            Self::DropConstraintTableAction(n) => f((&n.name).into()),
            Self::RemoveColumnTableAction(n) => f((&n.name).into()),
            Self::AlterColumnTableAction(n) => {
                f((&n.column_name).into());
                f((&n.action).into());
            }
            Self::SetDefaultColumnAction(n) => f((&n.default).into()),
            Self::SetDataTypeColumnAction(n) => f((&n.data_type).into()),
            Self::DropTableStmt(n) => each(&n.table_names, f),
            Self::CreateIndexStmt(n) => {
                each(&n.index_name, f);
                f((&n.table_name).into());
                each(&n.method, f);
                each(&n.columns.columns, f);
                each(&n.selection, f);
            }
            Self::DropIndexStmt(n) => each(&n.index_names, f),
            Self::ExplainStmt(n) => f((&n.stmt).into()),
            Self::File(n) => each(&n.statements, f),
            Self::CommentGroup(n) => each(&n.comments, f),
        }
    }
}

fn each<'a, T, I>(items: I, f: &mut dyn FnMut(NodeRef<'a>))
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    &'a T: Into<NodeRef<'a>>,
{
    for item in items {
        f(item.into());
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for NodeRef<'_> {}

impl Hash for NodeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

// ---------------------------------------------------------------------------
// Family enums resolve to the concrete node they wrap
// ---------------------------------------------------------------------------

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Ident(e) => Self::Ident(e),
            Expr::CompoundIdent(e) => Self::CompoundIdent(e),
            Expr::Wildcard(e) => Self::Wildcard(e),
            Expr::QualifiedWildcard(e) => Self::QualifiedWildcard(e),
            Expr::Literal(e) => Self::Literal(e),
            Expr::Binary(e) => Self::BinaryExpr(e),
            Expr::Unary(e) => Self::UnaryExpr(e),
            Expr::IsNull(e) => Self::IsNull(e),
            Expr::InList(e) => Self::InList(e),
            Expr::InSubquery(e) => Self::InSubquery(e),
            Expr::Between(e) => Self::Between(e),
            Expr::Cast(e) => Self::Cast(e),
            Expr::Nested(e) => Self::Nested(e),
            Expr::Function(e) => Self::Function(e),
            Expr::Case(e) => Self::CaseExpr(e),
            Expr::Exists(e) => Self::Exists(e),
            Expr::Subquery(e) => Self::Subquery(e),
        }
    }
}

impl<'a> From<&'a SetExpr> for NodeRef<'a> {
    fn from(body: &'a SetExpr) -> Self {
        match body {
            SetExpr::Select(s) => Self::Select(s),
            SetExpr::Parenthesized(s) => Self::ParenthesizedQuery(s),
            SetExpr::SetOperation(s) => Self::SetOperation(s),
        }
    }
}

impl<'a> From<&'a SelectItem> for NodeRef<'a> {
    fn from(item: &'a SelectItem) -> Self {
        match item {
            SelectItem::Unnamed(i) => Self::UnnamedSelectItem(i),
            SelectItem::Aliased(i) => Self::AliasedSelectItem(i),
            SelectItem::QualifiedWildcard(i) => Self::QualifiedWildcardSelectItem(i),
            SelectItem::Wildcard(i) => Self::WildcardSelectItem(i),
        }
    }
}

impl<'a> From<&'a TableReference> for NodeRef<'a> {
    fn from(table: &'a TableReference) -> Self {
        match table {
            TableReference::Table(t) => Self::Table(t),
            TableReference::Derived(t) => Self::Derived(t),
            TableReference::CrossJoin(t) => Self::CrossJoin(t),
            TableReference::QualifiedJoin(t) => Self::QualifiedJoin(t),
            TableReference::NaturalJoin(t) => Self::NaturalJoin(t),
            TableReference::PartitionedJoin(t) => Self::PartitionedJoinTable(t),
        }
    }
}

impl<'a> From<&'a JoinSpec> for NodeRef<'a> {
    fn from(spec: &'a JoinSpec) -> Self {
        match spec {
            JoinSpec::On(s) => Self::JoinCondition(s),
            JoinSpec::Using(s) => Self::NamedColumnsJoin(s),
        }
    }
}

impl<'a> From<&'a Statement> for NodeRef<'a> {
    fn from(stmt: &'a Statement) -> Self {
        match stmt {
            Statement::Query(s) => Self::Query(s),
            Statement::Insert(s) => Self::InsertStmt(s),
            Statement::Update(s) => Self::UpdateStmt(s),
            Statement::Delete(s) => Self::DeleteStmt(s),
            Statement::CreateView(s) => Self::CreateViewStmt(s),
            Statement::CreateTable(s) => Self::CreateTableStmt(s),
            Statement::AlterTable(s) => Self::AlterTableStmt(s),
            Statement::DropTable(s) => Self::DropTableStmt(s),
            Statement::CreateIndex(s) => Self::CreateIndexStmt(s),
            Statement::DropIndex(s) => Self::DropIndexStmt(s),
            Statement::Explain(s) => Self::ExplainStmt(s),
        }
    }
}

impl<'a> From<&'a InsertSource> for NodeRef<'a> {
    fn from(source: &'a InsertSource) -> Self {
        match source {
            InsertSource::Constructor(s) => Self::ConstructorSource(s),
            InsertSource::Subquery(s) => Self::SubquerySource(s),
        }
    }
}

impl<'a> From<&'a TableElement> for NodeRef<'a> {
    fn from(element: &'a TableElement) -> Self {
        match element {
            TableElement::Column(c) => Self::ColumnDef(c),
            TableElement::Constraint(c) => Self::TableConstraint(c),
        }
    }
}

impl<'a> From<&'a ColumnConstraintSpec> for NodeRef<'a> {
    fn from(spec: &'a ColumnConstraintSpec) -> Self {
        match spec {
            ColumnConstraintSpec::NotNull(s) => Self::NotNullColumnSpec(s),
            ColumnConstraintSpec::Unique(s) => Self::UniqueColumnSpec(s),
            ColumnConstraintSpec::References(s) => Self::ReferenceKeyExpr(s),
            ColumnConstraintSpec::Check(s) => Self::CheckColumnSpec(s),
        }
    }
}

impl<'a> From<&'a TableConstraintSpec> for NodeRef<'a> {
    fn from(spec: &'a TableConstraintSpec) -> Self {
        match spec {
            TableConstraintSpec::Unique(s) => Self::UniqueTableConstraint(s),
            TableConstraintSpec::Referential(s) => Self::ReferentialTableConstraint(s),
            TableConstraintSpec::Check(s) => Self::CheckTableConstraint(s),
        }
    }
}

impl<'a> From<&'a AlterTableAction> for NodeRef<'a> {
    fn from(action: &'a AlterTableAction) -> Self {
        match action {
            AlterTableAction::AddColumn(a) => Self::AddColumnTableAction(a),
            AlterTableAction::AddConstraint(a) => Self::AddConstraintTableAction(a),
            AlterTableAction::DropConstraint(a) => Self::DropConstraintTableAction(a),
            AlterTableAction::RemoveColumn(a) => Self::RemoveColumnTableAction(a),
            AlterTableAction::AlterColumn(a) => Self::AlterColumnTableAction(a),
        }
    }
}

impl<'a> From<&'a AlterColumnAction> for NodeRef<'a> {
    fn from(action: &'a AlterColumnAction) -> Self {
        match action {
            AlterColumnAction::SetDefault(a) => Self::SetDefaultColumnAction(a),
            AlterColumnAction::DropDefault(a) => Self::DropDefaultColumnAction(a),
            AlterColumnAction::SetDataType(a) => Self::SetDataTypeColumnAction(a),
            AlterColumnAction::SetNotNull(a) => Self::SetNotNullColumnAction(a),
            AlterColumnAction::DropNotNull(a) => Self::DropNotNullColumnAction(a),
        }
    }
}

// ---------------------------------------------------------------------------
// Visitor
// ---------------------------------------------------------------------------

/// What [`walk`] does after a visitor has seen a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// Visit the children, then call [`Visitor::leave`].
    Children,
    /// Skip the subtree; `leave` is not called for this node.
    Skip,
}

/// A pre-order tree visitor.
pub trait Visitor<'a> {
    fn enter(&mut self, node: NodeRef<'a>) -> Descend;

    /// Called once all children of `node` have been walked.
    fn leave(&mut self, _node: NodeRef<'a>) {}
}

/// Walk the subtree rooted at `node` in pre-order.
pub fn walk<'a, V>(visitor: &mut V, node: NodeRef<'a>)
where
    V: Visitor<'a> + ?Sized,
{
    if visitor.enter(node) == Descend::Skip {
        return;
    }
    node.for_each_child(&mut |child| walk(&mut *visitor, child));
    visitor.leave(node);
}

/// Walk every statement of `file` in source order.
///
/// The file's free comment groups are not part of any statement and are not
/// visited.
pub fn walk_file<'a, V>(visitor: &mut V, file: &'a File)
where
    V: Visitor<'a> + ?Sized,
{
    walk(visitor, NodeRef::File(file));
}

struct Inspector<F>(F);

impl<'a, F> Visitor<'a> for Inspector<F>
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    fn enter(&mut self, node: NodeRef<'a>) -> Descend {
        if (self.0)(node) {
            Descend::Children
        } else {
            Descend::Skip
        }
    }
}

/// Walk `node` in pre-order calling `f` on each node; returning `false` from
/// `f` skips that node's children.
pub fn inspect<'a, F>(node: NodeRef<'a>, f: F)
where
    F: FnMut(NodeRef<'a>) -> bool,
{
    walk(&mut Inspector(f), node);
}

/// All nodes of the subtree rooted at `node`, in pre-order.
pub fn preorder(node: NodeRef<'_>) -> Vec<NodeRef<'_>> {
    let mut nodes = Vec::new();
    inspect(node, |n| {
        nodes.push(n);
        true
    });
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(column: u32) -> Position {
        Position::new(1, column)
    }

    fn ident(value: &str, column: u32) -> Ident {
        let len = u32::try_from(value.len()).unwrap();
        Ident::new(value, p(column), p(column + len))
    }

    // a + b
    fn sum() -> BinaryExpr {
        BinaryExpr {
            left: Expr::Ident(ident("a", 1)),
            op: Operator::new(OperatorKind::Plus, p(3), p(4)),
            right: Expr::Ident(ident("b", 5)),
        }
    }

    // SELECT a + b FROM t
    fn query() -> Query {
        let mut select = Select::new(
            p(1),
            vec![SelectItem::Unnamed(UnnamedSelectItem {
                expr: Expr::Binary(Box::new(sum())),
            })],
        )
        .unwrap();
        select.from = vec![TableReference::Table(Box::new(Table::named(
            ObjectName::single(ident("t", 19)),
        )))];
        Query::from_body(SetExpr::Select(Box::new(select)))
    }

    #[test]
    fn test_preorder_kinds() {
        let q = query();
        let kinds: Vec<NodeKind> = preorder((&q).into()).into_iter().map(NodeRef::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Query,
                NodeKind::Select,
                NodeKind::UnnamedSelectItem,
                NodeKind::BinaryExpr,
                NodeKind::Ident,
                NodeKind::Operator,
                NodeKind::Ident,
                NodeKind::Table,
                NodeKind::ObjectName,
                NodeKind::Ident,
            ]
        );
    }

    #[test]
    fn test_preorder_is_in_source_order() {
        let q = query();
        let starts: Vec<Position> = preorder((&q).into()).iter().map(Node::start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_inspect_skip_prunes_subtree() {
        let q = query();
        let mut seen = Vec::new();
        inspect((&q).into(), |n| {
            seen.push(n.kind());
            n.kind() != NodeKind::Select
        });
        assert_eq!(seen, vec![NodeKind::Query, NodeKind::Select]);
    }

    #[test]
    fn test_leave_follows_children() {
        struct Trace(Vec<String>);
        impl<'a> Visitor<'a> for Trace {
            fn enter(&mut self, node: NodeRef<'a>) -> Descend {
                self.0.push(format!("+{:?}", node.kind()));
                Descend::Children
            }
            fn leave(&mut self, node: NodeRef<'a>) {
                self.0.push(format!("-{:?}", node.kind()));
            }
        }
        let expr = sum();
        let mut trace = Trace(Vec::new());
        walk(&mut trace, (&expr).into());
        assert_eq!(
            trace.0,
            [
                "+BinaryExpr",
                "+Ident",
                "-Ident",
                "+Operator",
                "-Operator",
                "+Ident",
                "-Ident",
                "-BinaryExpr"
            ]
        );
    }

    #[test]
    fn test_family_enum_resolves_to_inner_node() {
        let expr = Expr::Binary(Box::new(sum()));
        let node = NodeRef::from(&expr);
        assert_eq!(node.kind(), NodeKind::BinaryExpr);
        let Expr::Binary(inner) = &expr else {
            unreachable!()
        };
        assert_eq!(node, NodeRef::from(&**inner));
    }

    #[test]
    fn test_identity_not_structure() {
        let a = ident("x", 1);
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(NodeRef::from(&a), NodeRef::from(&b));
        assert_eq!(NodeRef::from(&a), NodeRef::from(&a));
    }

    #[test]
    fn test_first_field_shares_address_but_not_key() {
        let item = UnnamedSelectItem {
            expr: Expr::Ident(ident("x", 1)),
        };
        let outer = NodeRef::from(&item);
        let inner = NodeRef::from(&item.expr);
        assert_ne!(outer.key(), inner.key());
    }

    #[test]
    fn test_containers() {
        let q = query();
        let nodes = preorder((&q).into());
        let containers: Vec<NodeKind> = nodes
            .iter()
            .filter(|n| n.is_container())
            .map(|n| n.kind())
            .collect();
        assert_eq!(containers, vec![NodeKind::Query]);
    }

    #[test]
    fn test_node_ref_renders_and_spans() {
        let q = query();
        let node = NodeRef::from(&q);
        assert_eq!(node.to_sql(), "SELECT a + b FROM t");
        assert_eq!(node.span(), q.span());
    }

    #[test]
    fn test_walk_file_visits_statements_in_order_without_comments() {
        struct Recorder {
            kinds: Vec<NodeKind>,
            queries: Vec<NodeKey>,
        }

        impl<'a> Visitor<'a> for Recorder {
            fn enter(&mut self, node: NodeRef<'a>) -> Descend {
                self.kinds.push(node.kind());
                if node.kind() == NodeKind::Query {
                    self.queries.push(node.key());
                }
                Descend::Children
            }
        }

        let comment = CommentGroup::new(vec![Comment::new(
            "-- done",
            Position::new(2, 1),
            Position::new(2, 8),
        )])
        .unwrap();
        let file = File::new(
            vec![
                Statement::Query(Box::new(query())),
                Statement::Query(Box::new(query())),
            ],
            vec![comment],
        )
        .unwrap();

        let mut recorder = Recorder {
            kinds: Vec::new(),
            queries: Vec::new(),
        };
        walk_file(&mut recorder, &file);

        assert_eq!(recorder.kinds.first(), Some(&NodeKind::File));
        let expected: Vec<NodeKey> = file
            .statements
            .iter()
            .map(|stmt| NodeRef::from(stmt).key())
            .collect();
        assert_eq!(recorder.queries, expected);
        assert!(!recorder
            .kinds
            .iter()
            .any(|kind| matches!(kind, NodeKind::Comment | NodeKind::CommentGroup)));
    }
}
