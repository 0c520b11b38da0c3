//! Position-tracked SQL syntax tree.
//!
//! Every node exposes a start and end [`Position`] through the [`Node`]
//! trait. Leaf nodes (identifiers, literals, operator tokens) carry the
//! positions the scanner recorded; composite nodes derive theirs from the
//! keyword that introduces them or from their first child, and from the last
//! trailing clause that is actually present. Nothing about a composite span is
//! stored twice, so a span can never drift from the children it covers.
//!
//! Field naming: `*_pos` is the start of a keyword or punctuation token that
//! opens a construct, `*_end` is the position just past a token that closes
//! one (usually a `)`).
//!
//! Rendering lives in [`render`], traversal in [`visit`], and comment
//! attachment in [`comments`].

pub mod comments;
pub mod config;
pub mod render;
pub mod visit;

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
pub use sqltree_error::{AstError, Result};

pub use comments::{build_comment_map, build_comment_map_with, Comment, CommentGroup, CommentMap};
pub use config::CommentMapConfig;
pub use render::{render, Render, Sink};
pub use visit::{inspect, preorder, walk, walk_file, Descend, NodeKey, NodeKind, NodeRef, Visitor};

// ---------------------------------------------------------------------------
// Position and Span: source location tracking
// ---------------------------------------------------------------------------

/// A 1-based line/column location in the original SQL source.
///
/// Positions order by line first, then column.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// A position after every real position. Marks end-of-file.
    pub const INFINITY: Self = Self {
        line: u32::MAX,
        column: u32::MAX,
    };

    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position `columns` further along the same line.
    #[must_use]
    pub const fn advance(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(columns),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A `(start, end)` pair of positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Merge two spans into one that covers both.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source-span accessors implemented by every node.
pub trait Node {
    /// Position of the first character of the node.
    fn start(&self) -> Position;
    /// Position just past the last character of the node.
    fn end(&self) -> Position;

    fn span(&self) -> Span {
        Span::new(self.start(), self.end())
    }
}

impl<T: Node + ?Sized> Node for Box<T> {
    fn start(&self) -> Position {
        (**self).start()
    }

    fn end(&self) -> Position {
        (**self).end()
    }
}

fn last_end<T: Node>(items: &[T]) -> Option<Position> {
    items.last().map(Node::end)
}

// ---------------------------------------------------------------------------
// NonEmpty (required lists)
// ---------------------------------------------------------------------------

/// A list that holds at least one element.
///
/// Composite nodes whose span ends at the last element of a required list use
/// this type, so an empty list is rejected when the node is built instead of
/// producing an inverted span later.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    /// A one-element list.
    #[must_use]
    pub fn single(item: T) -> Self {
        Self(vec![item])
    }

    /// Build a list from a `Vec`, naming the list kind in the error.
    pub fn new(kind: &'static str, items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(AstError::empty_list(kind));
        }
        Ok(Self(items))
    }

    #[must_use]
    pub fn first(&self) -> &T {
        &self.0[0]
    }

    #[must_use]
    pub fn last(&self) -> &T {
        &self.0[self.0.len() - 1]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }
}

impl<T> TryFrom<Vec<T>> for NonEmpty<T> {
    type Error = AstError;

    fn try_from(items: Vec<T>) -> Result<Self> {
        Self::new("required", items)
    }
}

impl<T> Deref for NonEmpty<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// A single identifier exactly as written, including any quote characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub value: String,
    pub from: Position,
    pub to: Position,
}

impl Ident {
    #[must_use]
    pub fn new(value: impl Into<String>, from: Position, to: Position) -> Self {
        Self {
            value: value.into(),
            from,
            to,
        }
    }
}

impl Node for Ident {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

/// A dotted object name such as `public.users`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectName {
    pub parts: NonEmpty<Ident>,
}

impl ObjectName {
    pub fn new(parts: Vec<Ident>) -> Result<Self> {
        Ok(Self {
            parts: NonEmpty::new("object name", parts)?,
        })
    }

    #[must_use]
    pub fn single(ident: Ident) -> Self {
        Self {
            parts: NonEmpty::single(ident),
        }
    }
}

impl Node for ObjectName {
    fn start(&self) -> Position {
        self.parts.first().start()
    }

    fn end(&self) -> Position {
        self.parts.last().end()
    }
}

/// A qualified column reference in expression position, e.g. `t1.id`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundIdent {
    pub parts: NonEmpty<Ident>,
}

impl CompoundIdent {
    pub fn new(parts: Vec<Ident>) -> Result<Self> {
        Ok(Self {
            parts: NonEmpty::new("compound identifier", parts)?,
        })
    }
}

impl Node for CompoundIdent {
    fn start(&self) -> Position {
        self.parts.first().start()
    }

    fn end(&self) -> Position {
        self.parts.last().end()
    }
}

/// A bare `*` in expression position, e.g. `COUNT(*)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wildcard {
    pub star_pos: Position,
}

impl Node for Wildcard {
    fn start(&self) -> Position {
        self.star_pos
    }

    fn end(&self) -> Position {
        self.star_pos.advance(1)
    }
}

/// `prefix.*` in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedWildcard {
    pub prefix: ObjectName,
    pub star_end: Position,
}

impl Node for QualifiedWildcard {
    fn start(&self) -> Position {
        self.prefix.start()
    }

    fn end(&self) -> Position {
        self.star_end
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Operator tags. The set is closed; rendering matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,

    // String
    Concat,

    // Comparison
    Gt,
    Lt,
    GtEq,
    LtEq,
    Eq,
    NotEq,

    // Logical
    And,
    Or,
    Not,

    // Pattern matching
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl OperatorKind {
    /// The operator's SQL spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulus => "%",
            Self::Concat => "||",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
        }
    }

    /// Whether the operator is spelled with a keyword rather than symbols.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::And
                | Self::Or
                | Self::Not
                | Self::Like
                | Self::NotLike
                | Self::ILike
                | Self::NotILike
        )
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator token with its source positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operator {
    pub kind: OperatorKind,
    pub from: Position,
    pub to: Position,
}

impl Operator {
    #[must_use]
    pub const fn new(kind: OperatorKind, from: Position, to: Position) -> Self {
        Self { kind, from, to }
    }
}

impl Node for Operator {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

/// The typed value carried by a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    /// Single-quoted string, already unescaped by the scanner.
    String(String),
    /// `N'...'` national character string.
    NationalString(String),
    Boolean(bool),
    /// `DATE '...'`.
    Date(NaiveDate),
    /// `TIME '...'`.
    Time(NaiveTime),
    /// `TIMESTAMP '...'` without zone.
    DateTime(NaiveDateTime),
    /// `TIMESTAMP WITH TIME ZONE '...'`.
    Timestamp(DateTime<FixedOffset>),
    Null,
}

/// A literal value with the span of the token(s) that spelled it.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub from: Position,
    pub to: Position,
}

impl Literal {
    #[must_use]
    pub const fn new(value: LiteralValue, from: Position, to: Position) -> Self {
        Self { value, from, to }
    }
}

impl Node for Literal {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// SQL type descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// `character[(n)]` or `character varying[(n)]`.
    Char { size: Option<u32>, varying: bool },
    Uuid,
    Clob(Option<u32>),
    Binary(Option<u32>),
    Varbinary(Option<u32>),
    Blob(Option<u32>),
    /// `decimal(p,s)` or `numeric(p,s)`. `scale` is ignored without `precision`.
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
        numeric: bool,
    },
    Float(Option<u32>),
    SmallInt { unsigned: bool },
    Int { unsigned: bool },
    BigInt { unsigned: bool },
    Real,
    Double,
    Boolean,
    Date,
    Time,
    Timestamp { with_time_zone: bool },
    Regclass,
    Text,
    Bytea,
    /// `element[]`.
    Array(Box<DataType>),
    /// A user-defined type referenced by name.
    Custom(ObjectName),
}

/// A type as written in a column definition or `CAST`.
///
/// `from`/`to` cover the type keyword(s) and any size arguments. Array and
/// custom types take their start (and, for custom types, their end) from the
/// nested element or name instead.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub kind: TypeKind,
    pub from: Position,
    pub to: Position,
}

impl DataType {
    #[must_use]
    pub const fn new(kind: TypeKind, from: Position, to: Position) -> Self {
        Self { kind, from, to }
    }
}

impl Node for DataType {
    fn start(&self) -> Position {
        match &self.kind {
            TypeKind::Array(element) => element.start(),
            TypeKind::Custom(name) => name.start(),
            _ => self.from,
        }
    }

    fn end(&self) -> Position {
        match &self.kind {
            TypeKind::Custom(name) => name.end(),
            _ => self.to,
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    CompoundIdent(CompoundIdent),
    Wildcard(Wildcard),
    QualifiedWildcard(QualifiedWildcard),
    Literal(Literal),
    Binary(Box<BinaryExpr>),
    Unary(Box<UnaryExpr>),
    IsNull(Box<IsNull>),
    InList(Box<InList>),
    InSubquery(Box<InSubquery>),
    Between(Box<Between>),
    Cast(Box<Cast>),
    Nested(Box<Nested>),
    Function(Box<Function>),
    Case(Box<CaseExpr>),
    Exists(Box<Exists>),
    Subquery(Box<Subquery>),
}

impl Node for Expr {
    fn start(&self) -> Position {
        match self {
            Self::Ident(e) => e.start(),
            Self::CompoundIdent(e) => e.start(),
            Self::Wildcard(e) => e.start(),
            Self::QualifiedWildcard(e) => e.start(),
            Self::Literal(e) => e.start(),
            Self::Binary(e) => e.start(),
            Self::Unary(e) => e.start(),
            Self::IsNull(e) => e.start(),
            Self::InList(e) => e.start(),
            Self::InSubquery(e) => e.start(),
            Self::Between(e) => e.start(),
            Self::Cast(e) => e.start(),
            Self::Nested(e) => e.start(),
            Self::Function(e) => e.start(),
            Self::Case(e) => e.start(),
            Self::Exists(e) => e.start(),
            Self::Subquery(e) => e.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Ident(e) => e.end(),
            Self::CompoundIdent(e) => e.end(),
            Self::Wildcard(e) => e.end(),
            Self::QualifiedWildcard(e) => e.end(),
            Self::Literal(e) => e.end(),
            Self::Binary(e) => e.end(),
            Self::Unary(e) => e.end(),
            Self::IsNull(e) => e.end(),
            Self::InList(e) => e.end(),
            Self::InSubquery(e) => e.end(),
            Self::Between(e) => e.end(),
            Self::Cast(e) => e.end(),
            Self::Nested(e) => e.end(),
            Self::Function(e) => e.end(),
            Self::Case(e) => e.end(),
            Self::Exists(e) => e.end(),
            Self::Subquery(e) => e.end(),
        }
    }
}

/// `left op right`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: Operator,
    pub right: Expr,
}

impl Node for BinaryExpr {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.right.end()
    }
}

/// `op expr`, e.g. `-x` or `NOT x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Operator,
    pub expr: Expr,
}

impl Node for UnaryExpr {
    fn start(&self) -> Position {
        self.op.start()
    }

    fn end(&self) -> Position {
        self.expr.end()
    }
}

/// `expr IS [NOT] NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsNull {
    pub expr: Expr,
    pub negated: bool,
    /// End of the `NULL` keyword.
    pub null_end: Position,
}

impl Node for IsNull {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.null_end
    }
}

/// `expr [NOT] IN (a, b, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InList {
    pub expr: Expr,
    pub list: NonEmpty<Expr>,
    pub negated: bool,
    pub rparen_end: Position,
}

impl Node for InList {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// `expr [NOT] IN (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InSubquery {
    pub expr: Expr,
    pub query: Query,
    pub negated: bool,
    pub rparen_end: Position,
}

impl Node for InSubquery {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// `expr [NOT] BETWEEN low AND high`.
#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    pub expr: Expr,
    pub negated: bool,
    pub low: Expr,
    pub high: Expr,
}

impl Node for Between {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.high.end()
    }
}

/// `CAST(expr AS type)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    pub cast_pos: Position,
    pub expr: Expr,
    pub data_type: DataType,
    pub rparen_end: Position,
}

impl Node for Cast {
    fn start(&self) -> Position {
        self.cast_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Nested {
    pub lparen_pos: Position,
    pub expr: Expr,
    pub rparen_end: Position,
}

impl Node for Nested {
    fn start(&self) -> Position {
        self.lparen_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// A function call, optionally followed by a window clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: ObjectName,
    pub distinct: bool,
    pub args: Vec<Expr>,
    pub rparen_end: Position,
    pub over: Option<WindowSpec>,
}

impl Node for Function {
    fn start(&self) -> Position {
        self.name.start()
    }

    fn end(&self) -> Position {
        self.over.as_ref().map_or(self.rparen_end, Node::end)
    }
}

/// `OVER ([PARTITION BY ...] [ORDER BY ...] [frame])`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub over_pos: Position,
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub frame: Option<WindowFrame>,
    pub rparen_end: Position,
}

impl Node for WindowSpec {
    fn start(&self) -> Position {
        self.over_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// Window frame units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

impl fmt::Display for FrameUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        })
    }
}

/// `ROWS start` or `ROWS BETWEEN start AND end`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub units: FrameUnits,
    pub units_pos: Position,
    pub start_bound: FrameBound,
    pub end_bound: Option<FrameBound>,
}

impl Node for WindowFrame {
    fn start(&self) -> Position {
        self.units_pos
    }

    fn end(&self) -> Position {
        self.end_bound
            .as_ref()
            .map_or_else(|| self.start_bound.end(), Node::end)
    }
}

/// Frame bound kinds. A `None` offset means `UNBOUNDED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameBoundKind {
    CurrentRow,
    Preceding(Option<u64>),
    Following(Option<u64>),
}

/// A single frame bound token sequence, e.g. `UNBOUNDED PRECEDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameBound {
    pub kind: FrameBoundKind,
    pub from: Position,
    pub to: Position,
}

impl Node for FrameBound {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

/// `CASE [operand] WHEN c THEN r ... [ELSE e] END`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub case_pos: Position,
    pub operand: Option<Expr>,
    /// `(condition, result)` pairs in source order.
    pub whens: NonEmpty<(Expr, Expr)>,
    pub else_result: Option<Expr>,
    /// End of the closing `END` keyword.
    pub end_kw_end: Position,
}

impl Node for CaseExpr {
    fn start(&self) -> Position {
        self.case_pos
    }

    fn end(&self) -> Position {
        self.end_kw_end
    }
}

/// `[NOT] EXISTS (subquery)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exists {
    /// Start of `NOT`, present only for `NOT EXISTS`.
    pub not_pos: Option<Position>,
    pub exists_pos: Position,
    pub query: Query,
    pub rparen_end: Position,
}

impl Exists {
    #[must_use]
    pub const fn negated(&self) -> bool {
        self.not_pos.is_some()
    }
}

impl Node for Exists {
    fn start(&self) -> Position {
        self.not_pos.unwrap_or(self.exists_pos)
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// A scalar subquery: `(SELECT ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub lparen_pos: Position,
    pub query: Query,
    pub rparen_end: Position,
}

impl Node for Subquery {
    fn start(&self) -> Position {
        self.lparen_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

// ---------------------------------------------------------------------------
// Query shape
// ---------------------------------------------------------------------------

/// A query: `[WITH ...] body [ORDER BY ...] [LIMIT ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub with: Option<With>,
    pub body: SetExpr,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<LimitExpr>,
}

impl Query {
    /// A query consisting of a body only.
    #[must_use]
    pub fn from_body(body: SetExpr) -> Self {
        Self {
            with: None,
            body,
            order_by: Vec::new(),
            limit: None,
        }
    }
}

impl Node for Query {
    fn start(&self) -> Position {
        self.with
            .as_ref()
            .map_or_else(|| self.body.start(), Node::start)
    }

    fn end(&self) -> Position {
        self.limit
            .as_ref()
            .map(Node::end)
            .or_else(|| last_end(&self.order_by))
            .unwrap_or_else(|| self.body.end())
    }
}

/// `WITH cte [, cte ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    pub with_pos: Position,
    pub ctes: NonEmpty<Cte>,
}

impl Node for With {
    fn start(&self) -> Position {
        self.with_pos
    }

    fn end(&self) -> Position {
        self.ctes.last().end()
    }
}

/// `alias AS (query)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    pub alias: Ident,
    pub query: Query,
    pub rparen_end: Position,
}

impl Node for Cte {
    fn start(&self) -> Position {
        self.alias.start()
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// The body of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    Select(Box<Select>),
    Parenthesized(Box<ParenthesizedQuery>),
    SetOperation(Box<SetOperation>),
}

impl Node for SetExpr {
    fn start(&self) -> Position {
        match self {
            Self::Select(s) => s.start(),
            Self::Parenthesized(s) => s.start(),
            Self::SetOperation(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Select(s) => s.end(),
            Self::Parenthesized(s) => s.end(),
            Self::SetOperation(s) => s.end(),
        }
    }
}

/// A parenthesized query used as a set-expression operand.
#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedQuery {
    pub lparen_pos: Position,
    pub query: Query,
    pub rparen_end: Position,
}

impl Node for ParenthesizedQuery {
    fn start(&self) -> Position {
        self.lparen_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Union,
    Except,
    Intersect,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "UNION",
            Self::Except => "EXCEPT",
            Self::Intersect => "INTERSECT",
        })
    }
}

/// `left UNION [ALL] right` and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation {
    pub left: SetExpr,
    pub op: SetOperator,
    pub all: bool,
    pub right: SetExpr,
}

impl Node for SetOperation {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.right.end()
    }
}

/// `SELECT [DISTINCT] items [FROM ...] [WHERE ...] [GROUP BY ...] [HAVING ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub select_pos: Position,
    pub distinct: bool,
    pub projection: NonEmpty<SelectItem>,
    pub from: Vec<TableReference>,
    pub selection: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
}

impl Select {
    /// A select with only a projection; the remaining clauses start empty.
    pub fn new(select_pos: Position, projection: Vec<SelectItem>) -> Result<Self> {
        Ok(Self {
            select_pos,
            distinct: false,
            projection: NonEmpty::new("projection", projection)?,
            from: Vec::new(),
            selection: None,
            group_by: Vec::new(),
            having: None,
        })
    }
}

impl Node for Select {
    fn start(&self) -> Position {
        self.select_pos
    }

    fn end(&self) -> Position {
        self.having
            .as_ref()
            .map(Node::end)
            .or_else(|| last_end(&self.group_by))
            .or_else(|| self.selection.as_ref().map(Node::end))
            .or_else(|| last_end(&self.from))
            .unwrap_or_else(|| self.projection.last().end())
    }
}

/// One entry of a `SELECT` projection list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Unnamed(UnnamedSelectItem),
    Aliased(AliasedSelectItem),
    QualifiedWildcard(QualifiedWildcardSelectItem),
    Wildcard(WildcardSelectItem),
}

impl Node for SelectItem {
    fn start(&self) -> Position {
        match self {
            Self::Unnamed(i) => i.start(),
            Self::Aliased(i) => i.start(),
            Self::QualifiedWildcard(i) => i.start(),
            Self::Wildcard(i) => i.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Unnamed(i) => i.end(),
            Self::Aliased(i) => i.end(),
            Self::QualifiedWildcard(i) => i.end(),
            Self::Wildcard(i) => i.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnnamedSelectItem {
    pub expr: Expr,
}

impl Node for UnnamedSelectItem {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.expr.end()
    }
}

/// `expr AS alias`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedSelectItem {
    pub expr: Expr,
    pub alias: Ident,
}

impl Node for AliasedSelectItem {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.alias.end()
    }
}

/// `prefix.*` in a projection.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedWildcardSelectItem {
    pub prefix: ObjectName,
    pub star_end: Position,
}

impl Node for QualifiedWildcardSelectItem {
    fn start(&self) -> Position {
        self.prefix.start()
    }

    fn end(&self) -> Position {
        self.star_end
    }
}

/// `*` in a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WildcardSelectItem {
    pub star_pos: Position,
}

impl Node for WildcardSelectItem {
    fn start(&self) -> Position {
        self.star_pos
    }

    fn end(&self) -> Position {
        self.star_pos.advance(1)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

/// An explicit `ASC`/`DESC` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKeyword {
    pub direction: SortDirection,
    pub keyword_end: Position,
}

/// `expr [ASC|DESC]`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Option<SortKeyword>,
}

impl Node for OrderByExpr {
    fn start(&self) -> Position {
        self.expr.start()
    }

    fn end(&self) -> Position {
        self.direction
            .map_or_else(|| self.expr.end(), |d| d.keyword_end)
    }
}

/// The row count of a `LIMIT` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitValue {
    /// `LIMIT ALL`; `all_end` is the end of the `ALL` keyword.
    All { all_end: Position },
    Count(Literal),
}

/// `LIMIT {n | ALL} [OFFSET m]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitExpr {
    pub limit_pos: Position,
    pub value: LimitValue,
    pub offset: Option<Literal>,
}

impl Node for LimitExpr {
    fn start(&self) -> Position {
        self.limit_pos
    }

    fn end(&self) -> Position {
        match (&self.offset, &self.value) {
            (Some(offset), _) => offset.end(),
            (None, LimitValue::Count(count)) => count.end(),
            (None, LimitValue::All { all_end }) => *all_end,
        }
    }
}

// ---------------------------------------------------------------------------
// Table references
// ---------------------------------------------------------------------------

/// An entry of a `FROM` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableReference {
    Table(Box<Table>),
    Derived(Box<Derived>),
    CrossJoin(Box<CrossJoin>),
    QualifiedJoin(Box<QualifiedJoin>),
    NaturalJoin(Box<NaturalJoin>),
    PartitionedJoin(Box<PartitionedJoinTable>),
}

impl Node for TableReference {
    fn start(&self) -> Position {
        match self {
            Self::Table(t) => t.start(),
            Self::Derived(t) => t.start(),
            Self::CrossJoin(t) => t.start(),
            Self::QualifiedJoin(t) => t.start(),
            Self::NaturalJoin(t) => t.start(),
            Self::PartitionedJoin(t) => t.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Table(t) => t.end(),
            Self::Derived(t) => t.end(),
            Self::CrossJoin(t) => t.end(),
            Self::QualifiedJoin(t) => t.end(),
            Self::NaturalJoin(t) => t.end(),
            Self::PartitionedJoin(t) => t.end(),
        }
    }
}

/// Arguments of a table-valued function: `name(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableArgs {
    pub args: Vec<Expr>,
    pub rparen_end: Position,
}

/// Engine hints: `WITH (hint, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableHints {
    pub with_pos: Position,
    pub hints: NonEmpty<Expr>,
    pub rparen_end: Position,
}

/// A base table: `name[(args)] [AS alias] [WITH (hints)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: ObjectName,
    pub args: Option<TableArgs>,
    pub alias: Option<Ident>,
    pub hints: Option<TableHints>,
}

impl Table {
    /// A plain table reference without arguments, alias or hints.
    #[must_use]
    pub fn named(name: ObjectName) -> Self {
        Self {
            name,
            args: None,
            alias: None,
            hints: None,
        }
    }
}

impl Node for Table {
    fn start(&self) -> Position {
        self.name.start()
    }

    fn end(&self) -> Position {
        self.hints
            .as_ref()
            .map(|h| h.rparen_end)
            .or_else(|| self.alias.as_ref().map(Node::end))
            .or_else(|| self.args.as_ref().map(|a| a.rparen_end))
            .unwrap_or_else(|| self.name.end())
    }
}

/// `[LATERAL] (subquery) [AS alias]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub lateral_pos: Option<Position>,
    pub lparen_pos: Position,
    pub subquery: Query,
    pub rparen_end: Position,
    pub alias: Option<Ident>,
}

impl Derived {
    #[must_use]
    pub const fn lateral(&self) -> bool {
        self.lateral_pos.is_some()
    }
}

impl Node for Derived {
    fn start(&self) -> Position {
        self.lateral_pos.unwrap_or(self.lparen_pos)
    }

    fn end(&self) -> Position {
        self.alias.as_ref().map_or(self.rparen_end, Node::end)
    }
}

/// `left CROSS JOIN right`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossJoin {
    pub left: TableReference,
    pub right: TableReference,
}

impl Node for CrossJoin {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.right.end()
    }
}

/// Join kinds, including whether `OUTER`/`INNER` was spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Bare `JOIN`.
    Implicit,
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Full,
    FullOuter,
}

impl JoinKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implicit => "JOIN",
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::Right => "RIGHT JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::Full => "FULL JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// The join keyword sequence with its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoinType {
    pub kind: JoinKind,
    pub from: Position,
    pub to: Position,
}

impl Node for JoinType {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

/// How a qualified join matches rows.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinSpec {
    On(JoinCondition),
    Using(NamedColumnsJoin),
}

impl Node for JoinSpec {
    fn start(&self) -> Position {
        match self {
            Self::On(s) => s.start(),
            Self::Using(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::On(s) => s.end(),
            Self::Using(s) => s.end(),
        }
    }
}

/// `ON predicate`.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinCondition {
    pub on_pos: Position,
    pub condition: Expr,
}

impl Node for JoinCondition {
    fn start(&self) -> Position {
        self.on_pos
    }

    fn end(&self) -> Position {
        self.condition.end()
    }
}

/// A parenthesized identifier list: `(a, b, c)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnList {
    pub columns: NonEmpty<Ident>,
    pub rparen_end: Position,
}

/// `USING (a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumnsJoin {
    pub using_pos: Position,
    pub columns: ColumnList,
}

impl Node for NamedColumnsJoin {
    fn start(&self) -> Position {
        self.using_pos
    }

    fn end(&self) -> Position {
        self.columns.rparen_end
    }
}

/// `left [INNER|LEFT|RIGHT|FULL [OUTER]] JOIN right spec`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedJoin {
    pub left: TableReference,
    pub join_type: JoinType,
    pub right: TableReference,
    pub spec: JoinSpec,
}

impl Node for QualifiedJoin {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.spec.end()
    }
}

/// `left NATURAL join_type right`.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalJoin {
    pub left: TableReference,
    pub natural_pos: Position,
    pub join_type: JoinType,
    pub right: TableReference,
}

impl Node for NaturalJoin {
    fn start(&self) -> Position {
        self.left.start()
    }

    fn end(&self) -> Position {
        self.right.end()
    }
}

/// `table PARTITION BY (a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionedJoinTable {
    pub table: TableReference,
    pub partition_pos: Position,
    pub columns: ColumnList,
}

impl Node for PartitionedJoinTable {
    fn start(&self) -> Position {
        self.table.start()
    }

    fn end(&self) -> Position {
        self.columns.rparen_end
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// A top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Query(Box<Query>),
    Insert(Box<InsertStmt>),
    Update(Box<UpdateStmt>),
    Delete(Box<DeleteStmt>),
    CreateView(Box<CreateViewStmt>),
    CreateTable(Box<CreateTableStmt>),
    AlterTable(Box<AlterTableStmt>),
    DropTable(Box<DropTableStmt>),
    CreateIndex(Box<CreateIndexStmt>),
    DropIndex(Box<DropIndexStmt>),
    Explain(Box<ExplainStmt>),
}

impl Node for Statement {
    fn start(&self) -> Position {
        match self {
            Self::Query(s) => s.start(),
            Self::Insert(s) => s.start(),
            Self::Update(s) => s.start(),
            Self::Delete(s) => s.start(),
            Self::CreateView(s) => s.start(),
            Self::CreateTable(s) => s.start(),
            Self::AlterTable(s) => s.start(),
            Self::DropTable(s) => s.start(),
            Self::CreateIndex(s) => s.start(),
            Self::DropIndex(s) => s.start(),
            Self::Explain(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Query(s) => s.end(),
            Self::Insert(s) => s.end(),
            Self::Update(s) => s.end(),
            Self::Delete(s) => s.end(),
            Self::CreateView(s) => s.end(),
            Self::CreateTable(s) => s.end(),
            Self::AlterTable(s) => s.end(),
            Self::DropTable(s) => s.end(),
            Self::CreateIndex(s) => s.end(),
            Self::DropIndex(s) => s.end(),
            Self::Explain(s) => s.end(),
        }
    }
}

/// `column = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: Ident,
    pub value: Expr,
}

impl Node for Assignment {
    fn start(&self) -> Position {
        self.column.start()
    }

    fn end(&self) -> Position {
        self.value.end()
    }
}

/// `INSERT INTO name [(cols)] source [ON DUPLICATE KEY UPDATE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStmt {
    pub insert_pos: Position,
    pub table_name: ObjectName,
    pub columns: Vec<Ident>,
    pub source: InsertSource,
    pub update_assignments: Vec<Assignment>,
}

impl Node for InsertStmt {
    fn start(&self) -> Position {
        self.insert_pos
    }

    fn end(&self) -> Position {
        last_end(&self.update_assignments).unwrap_or_else(|| self.source.end())
    }
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Constructor(ConstructorSource),
    Subquery(SubquerySource),
}

impl Node for InsertSource {
    fn start(&self) -> Position {
        match self {
            Self::Constructor(s) => s.start(),
            Self::Subquery(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Constructor(s) => s.end(),
            Self::Subquery(s) => s.end(),
        }
    }
}

/// `VALUES (row), (row), ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorSource {
    pub values_pos: Position,
    pub rows: NonEmpty<RowValueExpr>,
}

impl Node for ConstructorSource {
    fn start(&self) -> Position {
        self.values_pos
    }

    fn end(&self) -> Position {
        self.rows.last().end()
    }
}

/// One parenthesized row of a `VALUES` list.
#[derive(Debug, Clone, PartialEq)]
pub struct RowValueExpr {
    pub lparen_pos: Position,
    pub values: NonEmpty<Expr>,
    pub rparen_end: Position,
}

impl Node for RowValueExpr {
    fn start(&self) -> Position {
        self.lparen_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// `INSERT ... SELECT ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubquerySource {
    pub query: Query,
}

impl Node for SubquerySource {
    fn start(&self) -> Position {
        self.query.start()
    }

    fn end(&self) -> Position {
        self.query.end()
    }
}

/// `UPDATE name SET a = 1, ... [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStmt {
    pub update_pos: Position,
    pub table_name: ObjectName,
    pub assignments: NonEmpty<Assignment>,
    pub selection: Option<Expr>,
}

impl Node for UpdateStmt {
    fn start(&self) -> Position {
        self.update_pos
    }

    fn end(&self) -> Position {
        self.selection
            .as_ref()
            .map_or_else(|| self.assignments.last().end(), Node::end)
    }
}

/// `DELETE FROM name [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStmt {
    pub delete_pos: Position,
    pub table_name: ObjectName,
    pub selection: Option<Expr>,
}

impl Node for DeleteStmt {
    fn start(&self) -> Position {
        self.delete_pos
    }

    fn end(&self) -> Position {
        self.selection
            .as_ref()
            .map_or_else(|| self.table_name.end(), Node::end)
    }
}

/// `CREATE [MATERIALIZED] VIEW name AS query`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStmt {
    pub create_pos: Position,
    pub materialized: bool,
    pub name: ObjectName,
    pub query: Query,
}

impl Node for CreateViewStmt {
    fn start(&self) -> Position {
        self.create_pos
    }

    fn end(&self) -> Position {
        self.query.end()
    }
}

// ---------------------------------------------------------------------------
// DDL: CREATE TABLE
// ---------------------------------------------------------------------------

/// Storage formats for external tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    TextFile,
    SequenceFile,
    Orc,
    Parquet,
    Avro,
    RcFile,
    JsonFile,
}

impl FileFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextFile => "TEXTFILE",
            Self::SequenceFile => "SEQUENCEFILE",
            Self::Orc => "ORC",
            Self::Parquet => "PARQUET",
            Self::Avro => "AVRO",
            Self::RcFile => "RCFILE",
            Self::JsonFile => "JSONFILE",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileFormat {
    type Err = AstError;

    fn from_str(keyword: &str) -> Result<Self> {
        const ALL: [FileFormat; 7] = [
            FileFormat::TextFile,
            FileFormat::SequenceFile,
            FileFormat::Orc,
            FileFormat::Parquet,
            FileFormat::Avro,
            FileFormat::RcFile,
            FileFormat::JsonFile,
        ];
        ALL.into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(keyword))
            .ok_or_else(|| AstError::UnknownFileFormat {
                keyword: keyword.to_owned(),
            })
    }
}

/// `STORED AS format LOCATION 'path'`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalStorage {
    pub stored_pos: Position,
    pub format: FileFormat,
    pub location: Literal,
}

/// `CREATE TABLE [IF NOT EXISTS] name (elements) [STORED AS ... LOCATION ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    pub create_pos: Position,
    pub if_not_exists: bool,
    pub name: ObjectName,
    pub elements: NonEmpty<TableElement>,
    pub rparen_end: Position,
    pub external: Option<ExternalStorage>,
}

impl Node for CreateTableStmt {
    fn start(&self) -> Position {
        self.create_pos
    }

    fn end(&self) -> Position {
        self.external
            .as_ref()
            .map_or(self.rparen_end, |e| e.location.end())
    }
}

/// An entry inside the parentheses of `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDef),
    Constraint(TableConstraint),
}

impl Node for TableElement {
    fn start(&self) -> Position {
        match self {
            Self::Column(c) => c.start(),
            Self::Constraint(c) => c.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Column(c) => c.end(),
            Self::Constraint(c) => c.end(),
        }
    }
}

/// `name type [DEFAULT expr] [constraint ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: DataType,
    pub default: Option<Expr>,
    pub constraints: Vec<ColumnConstraint>,
}

impl Node for ColumnDef {
    fn start(&self) -> Position {
        self.name.start()
    }

    fn end(&self) -> Position {
        last_end(&self.constraints)
            .or_else(|| self.default.as_ref().map(Node::end))
            .unwrap_or_else(|| self.data_type.end())
    }
}

/// `CONSTRAINT name`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintName {
    pub constraint_pos: Position,
    pub name: Ident,
}

/// A column-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    pub name: Option<ConstraintName>,
    pub spec: ColumnConstraintSpec,
}

impl ColumnConstraint {
    #[must_use]
    pub const fn unnamed(spec: ColumnConstraintSpec) -> Self {
        Self { name: None, spec }
    }
}

impl Node for ColumnConstraint {
    fn start(&self) -> Position {
        self.name
            .as_ref()
            .map_or_else(|| self.spec.start(), |n| n.constraint_pos)
    }

    fn end(&self) -> Position {
        self.spec.end()
    }
}

/// Column constraint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintSpec {
    NotNull(NotNullColumnSpec),
    Unique(UniqueColumnSpec),
    References(ReferenceKeyExpr),
    Check(CheckColumnSpec),
}

impl Node for ColumnConstraintSpec {
    fn start(&self) -> Position {
        match self {
            Self::NotNull(s) => s.start(),
            Self::Unique(s) => s.start(),
            Self::References(s) => s.start(),
            Self::Check(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::NotNull(s) => s.end(),
            Self::Unique(s) => s.end(),
            Self::References(s) => s.end(),
            Self::Check(s) => s.end(),
        }
    }
}

/// `NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotNullColumnSpec {
    pub not_pos: Position,
    pub null_end: Position,
}

impl Node for NotNullColumnSpec {
    fn start(&self) -> Position {
        self.not_pos
    }

    fn end(&self) -> Position {
        self.null_end
    }
}

/// `UNIQUE` or `PRIMARY KEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniqueColumnSpec {
    pub primary_key: bool,
    pub from: Position,
    pub to: Position,
}

impl Node for UniqueColumnSpec {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

/// `CHECK (expr)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckColumnSpec {
    pub check_pos: Position,
    pub expr: Expr,
    pub rparen_end: Position,
}

impl Node for CheckColumnSpec {
    fn start(&self) -> Position {
        self.check_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

/// `REFERENCES table [(cols)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceKeyExpr {
    pub references_pos: Position,
    pub table_name: ObjectName,
    pub columns: Option<ColumnList>,
}

impl Node for ReferenceKeyExpr {
    fn start(&self) -> Position {
        self.references_pos
    }

    fn end(&self) -> Position {
        self.columns
            .as_ref()
            .map_or_else(|| self.table_name.end(), |c| c.rparen_end)
    }
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<ConstraintName>,
    pub spec: TableConstraintSpec,
}

impl Node for TableConstraint {
    fn start(&self) -> Position {
        self.name
            .as_ref()
            .map_or_else(|| self.spec.start(), |n| n.constraint_pos)
    }

    fn end(&self) -> Position {
        self.spec.end()
    }
}

/// Table constraint kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintSpec {
    Unique(UniqueTableConstraint),
    Referential(ReferentialTableConstraint),
    Check(CheckTableConstraint),
}

impl Node for TableConstraintSpec {
    fn start(&self) -> Position {
        match self {
            Self::Unique(s) => s.start(),
            Self::Referential(s) => s.start(),
            Self::Check(s) => s.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::Unique(s) => s.end(),
            Self::Referential(s) => s.end(),
            Self::Check(s) => s.end(),
        }
    }
}

/// `UNIQUE (cols)` or `PRIMARY KEY (cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueTableConstraint {
    pub primary_key: bool,
    pub keyword_pos: Position,
    pub columns: ColumnList,
}

impl Node for UniqueTableConstraint {
    fn start(&self) -> Position {
        self.keyword_pos
    }

    fn end(&self) -> Position {
        self.columns.rparen_end
    }
}

/// `FOREIGN KEY (cols) REFERENCES table [(cols)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferentialTableConstraint {
    pub foreign_pos: Position,
    pub columns: ColumnList,
    pub key: ReferenceKeyExpr,
}

impl Node for ReferentialTableConstraint {
    fn start(&self) -> Position {
        self.foreign_pos
    }

    fn end(&self) -> Position {
        self.key.end()
    }
}

/// `CHECK (expr)` at table level.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckTableConstraint {
    pub check_pos: Position,
    pub expr: Expr,
    pub rparen_end: Position,
}

impl Node for CheckTableConstraint {
    fn start(&self) -> Position {
        self.check_pos
    }

    fn end(&self) -> Position {
        self.rparen_end
    }
}

// ---------------------------------------------------------------------------
// DDL: ALTER TABLE
// ---------------------------------------------------------------------------

/// `ALTER TABLE name action`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStmt {
    pub alter_pos: Position,
    pub table_name: ObjectName,
    pub action: AlterTableAction,
}

impl Node for AlterTableStmt {
    fn start(&self) -> Position {
        self.alter_pos
    }

    fn end(&self) -> Position {
        self.action.end()
    }
}

/// ALTER TABLE action variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    AddColumn(AddColumnTableAction),
    AddConstraint(AddConstraintTableAction),
    DropConstraint(DropConstraintTableAction),
    RemoveColumn(RemoveColumnTableAction),
    AlterColumn(AlterColumnTableAction),
}

impl Node for AlterTableAction {
    fn start(&self) -> Position {
        match self {
            Self::AddColumn(a) => a.start(),
            Self::AddConstraint(a) => a.start(),
            Self::DropConstraint(a) => a.start(),
            Self::RemoveColumn(a) => a.start(),
            Self::AlterColumn(a) => a.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::AddColumn(a) => a.end(),
            Self::AddConstraint(a) => a.end(),
            Self::DropConstraint(a) => a.end(),
            Self::RemoveColumn(a) => a.end(),
            Self::AlterColumn(a) => a.end(),
        }
    }
}

/// `ADD COLUMN column_def`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddColumnTableAction {
    pub add_pos: Position,
    pub column: ColumnDef,
}

impl Node for AddColumnTableAction {
    fn start(&self) -> Position {
        self.add_pos
    }

    fn end(&self) -> Position {
        self.column.end()
    }
}

/// `ADD table_constraint`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddConstraintTableAction {
    pub add_pos: Position,
    pub constraint: TableConstraint,
}

impl Node for AddConstraintTableAction {
    fn start(&self) -> Position {
        self.add_pos
    }

    fn end(&self) -> Position {
        self.constraint.end()
    }
}

/// `DROP CONSTRAINT name [CASCADE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropConstraintTableAction {
    pub drop_pos: Position,
    pub name: Ident,
    pub cascade_end: Option<Position>,
}

impl Node for DropConstraintTableAction {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.cascade_end.unwrap_or_else(|| self.name.end())
    }
}

/// `DROP COLUMN name [CASCADE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveColumnTableAction {
    pub drop_pos: Position,
    pub name: Ident,
    pub cascade_end: Option<Position>,
}

impl Node for RemoveColumnTableAction {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.cascade_end.unwrap_or_else(|| self.name.end())
    }
}

/// `ALTER COLUMN name action`.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterColumnTableAction {
    pub alter_pos: Position,
    pub column_name: Ident,
    pub action: AlterColumnAction,
}

impl Node for AlterColumnTableAction {
    fn start(&self) -> Position {
        self.alter_pos
    }

    fn end(&self) -> Position {
        self.action.end()
    }
}

/// Sub-actions of `ALTER COLUMN`.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterColumnAction {
    SetDefault(SetDefaultColumnAction),
    DropDefault(DropDefaultColumnAction),
    SetDataType(SetDataTypeColumnAction),
    SetNotNull(SetNotNullColumnAction),
    DropNotNull(DropNotNullColumnAction),
}

impl Node for AlterColumnAction {
    fn start(&self) -> Position {
        match self {
            Self::SetDefault(a) => a.start(),
            Self::DropDefault(a) => a.start(),
            Self::SetDataType(a) => a.start(),
            Self::SetNotNull(a) => a.start(),
            Self::DropNotNull(a) => a.start(),
        }
    }

    fn end(&self) -> Position {
        match self {
            Self::SetDefault(a) => a.end(),
            Self::DropDefault(a) => a.end(),
            Self::SetDataType(a) => a.end(),
            Self::SetNotNull(a) => a.end(),
            Self::DropNotNull(a) => a.end(),
        }
    }
}

/// `SET DEFAULT expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetDefaultColumnAction {
    pub set_pos: Position,
    pub default: Expr,
}

impl Node for SetDefaultColumnAction {
    fn start(&self) -> Position {
        self.set_pos
    }

    fn end(&self) -> Position {
        self.default.end()
    }
}

/// `DROP DEFAULT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropDefaultColumnAction {
    pub drop_pos: Position,
    pub default_end: Position,
}

impl Node for DropDefaultColumnAction {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.default_end
    }
}

/// `TYPE data_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetDataTypeColumnAction {
    pub type_pos: Position,
    pub data_type: DataType,
}

impl Node for SetDataTypeColumnAction {
    fn start(&self) -> Position {
        self.type_pos
    }

    fn end(&self) -> Position {
        self.data_type.end()
    }
}

/// `SET NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetNotNullColumnAction {
    pub set_pos: Position,
    pub null_end: Position,
}

impl Node for SetNotNullColumnAction {
    fn start(&self) -> Position {
        self.set_pos
    }

    fn end(&self) -> Position {
        self.null_end
    }
}

/// `DROP NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropNotNullColumnAction {
    pub drop_pos: Position,
    pub null_end: Position,
}

impl Node for DropNotNullColumnAction {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.null_end
    }
}

// ---------------------------------------------------------------------------
// DDL: DROP TABLE, CREATE/DROP INDEX, EXPLAIN
// ---------------------------------------------------------------------------

/// `DROP TABLE [IF EXISTS] a, b [CASCADE]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTableStmt {
    pub drop_pos: Position,
    pub if_exists: bool,
    pub table_names: NonEmpty<ObjectName>,
    pub cascade_end: Option<Position>,
}

impl Node for DropTableStmt {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.cascade_end
            .unwrap_or_else(|| self.table_names.last().end())
    }
}

/// `CREATE [UNIQUE] INDEX [name] ON table [USING method] (cols) [WHERE ...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStmt {
    pub create_pos: Position,
    pub unique: bool,
    pub index_name: Option<Ident>,
    pub table_name: ObjectName,
    pub method: Option<Ident>,
    pub columns: ColumnList,
    pub selection: Option<Expr>,
}

impl Node for CreateIndexStmt {
    fn start(&self) -> Position {
        self.create_pos
    }

    fn end(&self) -> Position {
        self.selection
            .as_ref()
            .map_or(self.columns.rparen_end, Node::end)
    }
}

/// `DROP INDEX a, b`.
#[derive(Debug, Clone, PartialEq)]
pub struct DropIndexStmt {
    pub drop_pos: Position,
    pub index_names: NonEmpty<Ident>,
}

impl Node for DropIndexStmt {
    fn start(&self) -> Position {
        self.drop_pos
    }

    fn end(&self) -> Position {
        self.index_names.last().end()
    }
}

/// `EXPLAIN statement`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainStmt {
    pub explain_pos: Position,
    pub stmt: Statement,
}

impl Node for ExplainStmt {
    fn start(&self) -> Position {
        self.explain_pos
    }

    fn end(&self) -> Position {
        self.stmt.end()
    }
}

// ---------------------------------------------------------------------------
// File
// ---------------------------------------------------------------------------

/// The parse result: statements plus the comment groups found between them.
///
/// Built once by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub statements: NonEmpty<Statement>,
    /// Free comment groups, sorted by position.
    pub comments: Vec<CommentGroup>,
}

impl File {
    /// Fails if `statements` is empty or `comments` is not in position order.
    pub fn new(statements: Vec<Statement>, comments: Vec<CommentGroup>) -> Result<Self> {
        if let Some(pair) = comments.windows(2).find(|w| w[1].start() < w[0].end()) {
            return Err(AstError::internal(format!(
                "comment group at {} precedes the group ending at {}",
                pair[1].start(),
                pair[0].end()
            )));
        }
        Ok(Self {
            statements: NonEmpty::new("statement", statements)?,
            comments,
        })
    }
}

impl Node for File {
    fn start(&self) -> Position {
        let first = self.statements.first().start();
        self.comments
            .first()
            .map_or(first, |c| first.min(c.start()))
    }

    fn end(&self) -> Position {
        let last = self.statements.last().end();
        self.comments.last().map_or(last, |c| last.max(c.end()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    fn ident(value: &str, line: u32, column: u32) -> Ident {
        let len = u32::try_from(value.len()).unwrap();
        Ident::new(value, p(line, column), p(line, column + len))
    }

    fn int(n: i64, line: u32, column: u32, len: u32) -> Literal {
        Literal::new(LiteralValue::Integer(n), p(line, column), p(line, column + len))
    }

    fn column_item(value: &str, line: u32, column: u32) -> SelectItem {
        SelectItem::Unnamed(UnnamedSelectItem {
            expr: Expr::Ident(ident(value, line, column)),
        })
    }

    #[test]
    fn test_position_orders_line_then_column() {
        assert!(p(1, 80) < p(2, 1));
        assert!(p(3, 4) < p(3, 5));
        assert!(p(u32::MAX - 1, 1) < Position::INFINITY);
        assert_eq!(format!("{}", p(4, 7)), "4:7");
    }

    #[test]
    fn test_span_merge_and_contains() {
        let a = Span::new(p(1, 1), p(1, 10));
        let b = Span::new(p(1, 5), p(2, 3));
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(p(1, 1), p(2, 3)));
        assert!(merged.contains(a));
        assert!(merged.contains(b));
        assert!(!a.contains(b));
        assert!(Span::new(p(1, 1), p(1, 1)).is_empty());
    }

    #[test]
    fn test_non_empty_rejects_empty() {
        let err = NonEmpty::<Expr>::new("projection", Vec::new()).unwrap_err();
        assert!(matches!(err, AstError::EmptyList { kind: "projection" }));
        assert!(ObjectName::new(Vec::new()).is_err());
        assert!(CompoundIdent::new(Vec::new()).is_err());
        assert!(Select::new(p(1, 1), Vec::new()).is_err());
        assert!(File::new(Vec::new(), Vec::new()).is_err());
    }

    #[test]
    fn test_non_empty_accessors() {
        let list = NonEmpty::new("n", vec![1, 2, 3]).unwrap();
        assert_eq!(*list.first(), 1);
        assert_eq!(*list.last(), 3);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().sum::<i32>(), 6);
        let single = NonEmpty::single("x");
        assert_eq!(single.first(), single.last());
    }

    #[test]
    fn test_non_empty_from_vec() {
        let err = NonEmpty::<i32>::try_from(Vec::new()).unwrap_err();
        assert!(matches!(err, AstError::EmptyList { kind: "required" }));

        let mut list = NonEmpty::try_from(vec![4, 5]).unwrap();
        list.push(6);
        assert_eq!(list.as_slice(), &[4, 5, 6]);
        assert_eq!(list.into_vec(), vec![4, 5, 6]);
    }

    #[test]
    fn test_object_name_span() {
        let name = ObjectName::new(vec![ident("public", 1, 1), ident("users", 1, 8)]).unwrap();
        assert_eq!(name.start(), p(1, 1));
        assert_eq!(name.end(), p(1, 13));
    }

    #[test]
    fn test_wildcard_span_is_one_column() {
        let w = Wildcard { star_pos: p(2, 8) };
        assert_eq!(w.span(), Span::new(p(2, 8), p(2, 9)));
    }

    // SELECT a FROM t WHERE a > 1 GROUP BY a HAVING a < 9
    fn full_select() -> Select {
        let mut select = Select::new(p(1, 1), vec![column_item("a", 1, 8)]).unwrap();
        select.from = vec![TableReference::Table(Box::new(Table::named(
            ObjectName::single(ident("t", 1, 15)),
        )))];
        select.selection = Some(Expr::Binary(Box::new(BinaryExpr {
            left: Expr::Ident(ident("a", 1, 23)),
            op: Operator::new(OperatorKind::Gt, p(1, 25), p(1, 26)),
            right: Expr::Literal(int(1, 1, 27, 1)),
        })));
        select.group_by = vec![Expr::Ident(ident("a", 1, 38))];
        select.having = Some(Expr::Binary(Box::new(BinaryExpr {
            left: Expr::Ident(ident("a", 1, 47)),
            op: Operator::new(OperatorKind::Lt, p(1, 49), p(1, 50)),
            right: Expr::Literal(int(9, 1, 51, 1)),
        })));
        select
    }

    #[test]
    fn test_select_end_follows_last_present_clause() {
        let mut select = full_select();
        assert_eq!(select.end(), p(1, 52));
        select.having = None;
        assert_eq!(select.end(), p(1, 39));
        select.group_by.clear();
        assert_eq!(select.end(), p(1, 28));
        select.selection = None;
        assert_eq!(select.end(), p(1, 16));
        select.from.clear();
        assert_eq!(select.end(), p(1, 9));
        assert_eq!(select.start(), p(1, 1));
    }

    #[test]
    fn test_query_end_prefers_limit_then_order_by() {
        let select = full_select();
        let mut query = Query::from_body(SetExpr::Select(Box::new(select)));
        assert_eq!(query.end(), p(1, 52));

        query.order_by = vec![OrderByExpr {
            expr: Expr::Ident(ident("a", 1, 62)),
            direction: Some(SortKeyword {
                direction: SortDirection::Desc,
                keyword_end: p(1, 68),
            }),
        }];
        assert_eq!(query.end(), p(1, 68));

        query.limit = Some(LimitExpr {
            limit_pos: p(1, 69),
            value: LimitValue::Count(int(10, 1, 75, 2)),
            offset: Some(int(5, 1, 85, 1)),
        });
        assert_eq!(query.end(), p(1, 86));

        query.limit = Some(LimitExpr {
            limit_pos: p(1, 69),
            value: LimitValue::All { all_end: p(1, 78) },
            offset: None,
        });
        assert_eq!(query.end(), p(1, 78));
    }

    #[test]
    fn test_query_start_prefers_with() {
        let inner = Query::from_body(SetExpr::Select(Box::new(
            Select::new(p(1, 11), vec![column_item("x", 1, 18)]).unwrap(),
        )));
        let cte = Cte {
            alias: ident("c", 1, 6),
            query: inner,
            rparen_end: p(1, 20),
        };
        let body = Select::new(p(2, 1), vec![column_item("x", 2, 8)]).unwrap();
        let mut query = Query::from_body(SetExpr::Select(Box::new(body)));
        assert_eq!(query.start(), p(2, 1));
        query.with = Some(With {
            with_pos: p(1, 1),
            ctes: NonEmpty::single(cte),
        });
        assert_eq!(query.start(), p(1, 1));
        assert_eq!(query.with.as_ref().unwrap().end(), p(1, 20));
    }

    #[test]
    fn test_exists_start_includes_not() {
        let inner = Query::from_body(SetExpr::Select(Box::new(
            Select::new(p(1, 13), vec![column_item("x", 1, 20)]).unwrap(),
        )));
        let mut exists = Exists {
            not_pos: None,
            exists_pos: p(1, 5),
            query: inner,
            rparen_end: p(1, 22),
        };
        assert!(!exists.negated());
        assert_eq!(exists.start(), p(1, 5));
        exists.not_pos = Some(p(1, 1));
        assert!(exists.negated());
        assert_eq!(exists.start(), p(1, 1));
    }

    #[test]
    fn test_data_type_span_for_array_and_custom() {
        let int_type = DataType::new(TypeKind::Int { unsigned: false }, p(1, 10), p(1, 13));
        let array = DataType::new(TypeKind::Array(Box::new(int_type)), p(1, 13), p(1, 15));
        assert_eq!(array.span(), Span::new(p(1, 10), p(1, 15)));

        let custom = DataType::new(
            TypeKind::Custom(ObjectName::single(ident("mood", 3, 4))),
            Position::default(),
            Position::default(),
        );
        assert_eq!(custom.span(), Span::new(p(3, 4), p(3, 8)));
    }

    #[test]
    fn test_table_end_precedence() {
        let mut table = Table::named(ObjectName::single(ident("f", 1, 1)));
        assert_eq!(table.end(), p(1, 2));
        table.args = Some(TableArgs {
            args: vec![Expr::Literal(int(1, 1, 3, 1))],
            rparen_end: p(1, 5),
        });
        assert_eq!(table.end(), p(1, 5));
        table.alias = Some(ident("x", 1, 9));
        assert_eq!(table.end(), p(1, 10));
        table.hints = Some(TableHints {
            with_pos: p(1, 11),
            hints: NonEmpty::single(Expr::Ident(ident("nolock", 1, 17))),
            rparen_end: p(1, 24),
        });
        assert_eq!(table.end(), p(1, 24));
    }

    #[test]
    fn test_column_def_end_precedence() {
        let mut column = ColumnDef {
            name: ident("id", 1, 1),
            data_type: DataType::new(TypeKind::Int { unsigned: false }, p(1, 4), p(1, 7)),
            default: None,
            constraints: Vec::new(),
        };
        assert_eq!(column.end(), p(1, 7));
        column.default = Some(Expr::Literal(int(0, 1, 16, 1)));
        assert_eq!(column.end(), p(1, 17));
        column.constraints.push(ColumnConstraint::unnamed(ColumnConstraintSpec::NotNull(
            NotNullColumnSpec {
                not_pos: p(1, 18),
                null_end: p(1, 26),
            },
        )));
        assert_eq!(column.end(), p(1, 26));
    }

    #[test]
    fn test_named_constraint_starts_at_constraint_keyword() {
        let constraint = TableConstraint {
            name: Some(ConstraintName {
                constraint_pos: p(4, 3),
                name: ident("pk", 4, 14),
            }),
            spec: TableConstraintSpec::Unique(UniqueTableConstraint {
                primary_key: true,
                keyword_pos: p(4, 17),
                columns: ColumnList {
                    columns: NonEmpty::single(ident("id", 4, 30)),
                    rparen_end: p(4, 33),
                },
            }),
        };
        assert_eq!(constraint.span(), Span::new(p(4, 3), p(4, 33)));
    }

    #[test]
    fn test_file_format_from_str() {
        assert_eq!("parquet".parse::<FileFormat>().unwrap(), FileFormat::Parquet);
        assert_eq!("TEXTFILE".parse::<FileFormat>().unwrap(), FileFormat::TextFile);
        let err = "xlsx".parse::<FileFormat>().unwrap_err();
        assert!(matches!(err, AstError::UnknownFileFormat { ref keyword } if keyword == "xlsx"));
        assert!(!err.is_defect());
    }

    #[test]
    fn test_file_span_covers_comments() {
        let select = Select::new(p(2, 1), vec![column_item("a", 2, 8)]).unwrap();
        let stmt = Statement::Query(Box::new(Query::from_body(SetExpr::Select(Box::new(select)))));
        let leading = CommentGroup::new(vec![Comment::new("-- head", p(1, 1), p(1, 8))]).unwrap();
        let trailing = CommentGroup::new(vec![Comment::new("-- tail", p(3, 1), p(3, 8))]).unwrap();
        let file = File::new(vec![stmt.clone()], vec![leading, trailing]).unwrap();
        assert_eq!(file.span(), Span::new(p(1, 1), p(3, 8)));

        let bare = File::new(vec![stmt], Vec::new()).unwrap();
        assert_eq!(bare.span(), Span::new(p(2, 1), p(2, 9)));
    }

    #[test]
    fn test_file_rejects_unordered_comments() {
        let select = Select::new(p(2, 1), vec![column_item("a", 2, 8)]).unwrap();
        let stmt = Statement::Query(Box::new(Query::from_body(SetExpr::Select(Box::new(select)))));
        let late = CommentGroup::new(vec![Comment::new("-- b", p(3, 1), p(3, 5))]).unwrap();
        let early = CommentGroup::new(vec![Comment::new("-- a", p(1, 1), p(1, 5))]).unwrap();
        let err = File::new(vec![stmt], vec![late, early]).unwrap_err();
        assert!(err.is_defect());
    }

    #[test]
    fn test_operator_kind_spelling() {
        assert_eq!(OperatorKind::NotEq.as_str(), "<>");
        assert_eq!(OperatorKind::NotILike.to_string(), "NOT ILIKE");
        assert!(OperatorKind::And.is_keyword());
        assert!(!OperatorKind::Concat.is_keyword());
    }
}
