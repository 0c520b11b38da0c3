//! Canonical SQL rendering.
//!
//! Rendering is a pure function of the node: no positions are consulted and
//! comments are not emitted. Output goes through a [`Sink`], which commits
//! bytes to the underlying writer in order and latches the first write fault.
//! Once a fault is latched every later append is skipped, so a renderer never
//! has to check for errors between fragments; the caller sees the fault (and
//! how many bytes made it out) from [`Sink::finish`].

use std::fmt;
use std::io;

use tracing::debug;

use crate::comments::{Comment, CommentGroup};
use crate::*;

/// Append-only output with a sticky first error.
pub struct Sink<'w> {
    out: &'w mut dyn io::Write,
    written: usize,
    error: Option<io::Error>,
}

impl<'w> Sink<'w> {
    pub fn new(out: &'w mut dyn io::Write) -> Self {
        Self {
            out,
            written: 0,
            error: None,
        }
    }

    /// Append `text`. No-op once a fault has been latched.
    pub fn put(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        let mut bytes = text.as_bytes();
        while !bytes.is_empty() {
            match self.out.write(bytes) {
                Ok(0) => {
                    self.fail(io::ErrorKind::WriteZero.into());
                    return;
                }
                Ok(n) => {
                    self.written += n;
                    bytes = &bytes[n..];
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.fail(e);
                    return;
                }
            }
        }
    }

    /// Render a child node into this sink.
    pub fn node<R: Render + ?Sized>(&mut self, node: &R) {
        node.render(self);
    }

    /// Render `items` separated by `sep`.
    pub fn list<'a, R>(&mut self, items: impl IntoIterator<Item = &'a R>, sep: &str)
    where
        R: Render + 'a,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.put(sep);
            }
            item.render(self);
        }
    }

    /// Render `items` as `(a, b, c)`.
    pub fn parenthesized<'a, R>(&mut self, items: impl IntoIterator<Item = &'a R>)
    where
        R: Render + 'a,
    {
        self.put("(");
        self.list(items, ", ");
        self.put(")");
    }

    /// Bytes committed to the writer so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Consume the sink, reporting the byte count or the latched fault.
    pub fn finish(self) -> Result<usize> {
        match self.error {
            Some(source) => Err(AstError::render(self.written, source)),
            None => Ok(self.written),
        }
    }

    fn fail(&mut self, error: io::Error) {
        debug!(
            target: "sqltree.render",
            written = self.written,
            error = %error,
            "render sink failed; skipping remaining output"
        );
        self.error = Some(error);
    }
}

/// Canonical SQL text for a node.
pub trait Render {
    fn render(&self, out: &mut Sink<'_>);

    /// Render into an owned string.
    fn to_sql(&self) -> String {
        let mut buf = Vec::new();
        {
            let mut sink = Sink::new(&mut buf);
            self.render(&mut sink);
        }
        // Every fragment is a `&str`, so the buffer is valid UTF-8.
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, out: &mut Sink<'_>) {
        (**self).render(out);
    }
}

/// Render `node` into `out`, returning the number of bytes written.
pub fn render<R: Render + ?Sized>(node: &R, out: &mut dyn io::Write) -> Result<usize> {
    let span = tracing::debug_span!(
        target: "sqltree.render",
        "render",
        written = tracing::field::Empty,
    );
    let _guard = span.enter();

    let mut sink = Sink::new(out);
    node.render(&mut sink);
    let written = sink.written();
    span.record("written", written);
    sink.finish()
}

fn keyword(out: &mut Sink<'_>, flag: bool, text: &str) {
    if flag {
        out.put(text);
    }
}

// ---------------------------------------------------------------------------
// Naming, operators, literals, types
// ---------------------------------------------------------------------------

impl Render for Ident {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(&self.value);
    }
}

impl Render for ObjectName {
    fn render(&self, out: &mut Sink<'_>) {
        out.list(&self.parts, ".");
    }
}

impl Render for CompoundIdent {
    fn render(&self, out: &mut Sink<'_>) {
        out.list(&self.parts, ".");
    }
}

impl Render for Wildcard {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("*");
    }
}

impl Render for QualifiedWildcard {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.prefix);
        out.put(".*");
    }
}

impl Render for Operator {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(self.kind.as_str());
    }
}

fn render_float(v: f64) -> String {
    let text = v.to_string();
    if !v.is_finite() || text.contains(['.', 'e', 'E']) {
        text
    } else {
        text + ".0"
    }
}

impl Render for Literal {
    fn render(&self, out: &mut Sink<'_>) {
        match &self.value {
            LiteralValue::Integer(n) => out.put(&n.to_string()),
            LiteralValue::Float(v) => out.put(&render_float(*v)),
            LiteralValue::String(s) => {
                out.put("'");
                out.put(s);
                out.put("'");
            }
            LiteralValue::NationalString(s) => {
                out.put("N'");
                out.put(s);
                out.put("'");
            }
            LiteralValue::Boolean(true) => out.put("TRUE"),
            LiteralValue::Boolean(false) => out.put("FALSE"),
            LiteralValue::Date(d) => out.put(&format!("DATE '{}'", d.format("%Y-%m-%d"))),
            LiteralValue::Time(t) => out.put(&format!("TIME '{}'", t.format("%H:%M:%S%.f"))),
            LiteralValue::DateTime(dt) => out.put(&format!(
                "TIMESTAMP '{}'",
                dt.format("%Y-%m-%d %H:%M:%S%.f")
            )),
            LiteralValue::Timestamp(ts) => out.put(&format!(
                "TIMESTAMP WITH TIME ZONE '{}'",
                ts.format("%Y-%m-%d %H:%M:%S%.f%:z")
            )),
            LiteralValue::Null => out.put("NULL"),
        }
    }
}

fn sized(out: &mut Sink<'_>, name: &str, size: Option<u32>) {
    out.put(name);
    if let Some(n) = size {
        out.put(&format!("({n})"));
    }
}

fn unsigned(out: &mut Sink<'_>, name: &str, unsigned: bool) {
    out.put(name);
    keyword(out, unsigned, " unsigned");
}

impl Render for DataType {
    fn render(&self, out: &mut Sink<'_>) {
        match &self.kind {
            TypeKind::Char { size, varying } => sized(
                out,
                if *varying {
                    "character varying"
                } else {
                    "character"
                },
                *size,
            ),
            TypeKind::Uuid => out.put("uuid"),
            TypeKind::Clob(size) => sized(out, "clob", *size),
            TypeKind::Binary(size) => sized(out, "binary", *size),
            TypeKind::Varbinary(size) => sized(out, "varbinary", *size),
            TypeKind::Blob(size) => sized(out, "blob", *size),
            TypeKind::Decimal {
                precision,
                scale,
                numeric,
            } => {
                out.put(if *numeric { "numeric" } else { "decimal" });
                match (precision, scale) {
                    (Some(p), Some(s)) => out.put(&format!("({p},{s})")),
                    (Some(p), None) => out.put(&format!("({p})")),
                    (None, _) => {}
                }
            }
            TypeKind::Float(size) => sized(out, "float", *size),
            TypeKind::SmallInt { unsigned: u } => unsigned(out, "smallint", *u),
            TypeKind::Int { unsigned: u } => unsigned(out, "int", *u),
            TypeKind::BigInt { unsigned: u } => unsigned(out, "bigint", *u),
            TypeKind::Real => out.put("real"),
            TypeKind::Double => out.put("double precision"),
            TypeKind::Boolean => out.put("boolean"),
            TypeKind::Date => out.put("date"),
            TypeKind::Time => out.put("time"),
            TypeKind::Timestamp { with_time_zone } => {
                out.put("timestamp");
                keyword(out, *with_time_zone, " with time zone");
            }
            TypeKind::Regclass => out.put("regclass"),
            TypeKind::Text => out.put("text"),
            TypeKind::Bytea => out.put("bytea"),
            TypeKind::Array(element) => {
                out.node(element);
                out.put("[]");
            }
            TypeKind::Custom(name) => out.node(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

impl Render for Expr {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Ident(e) => out.node(e),
            Self::CompoundIdent(e) => out.node(e),
            Self::Wildcard(e) => out.node(e),
            Self::QualifiedWildcard(e) => out.node(e),
            Self::Literal(e) => out.node(e),
            Self::Binary(e) => out.node(e),
            Self::Unary(e) => out.node(e),
            Self::IsNull(e) => out.node(e),
            Self::InList(e) => out.node(e),
            Self::InSubquery(e) => out.node(e),
            Self::Between(e) => out.node(e),
            Self::Cast(e) => out.node(e),
            Self::Nested(e) => out.node(e),
            Self::Function(e) => out.node(e),
            Self::Case(e) => out.node(e),
            Self::Exists(e) => out.node(e),
            Self::Subquery(e) => out.node(e),
        }
    }
}

impl Render for BinaryExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.left);
        out.put(" ");
        out.node(&self.op);
        out.put(" ");
        out.node(&self.right);
    }
}

impl Render for UnaryExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.op);
        keyword(out, self.op.kind.is_keyword(), " ");
        out.node(&self.expr);
    }
}

impl Render for IsNull {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        out.put(if self.negated {
            " IS NOT NULL"
        } else {
            " IS NULL"
        });
    }
}

impl Render for InList {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        keyword(out, self.negated, " NOT");
        out.put(" IN ");
        out.parenthesized(&self.list);
    }
}

impl Render for InSubquery {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        keyword(out, self.negated, " NOT");
        out.put(" IN (");
        out.node(&self.query);
        out.put(")");
    }
}

impl Render for Between {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        keyword(out, self.negated, " NOT");
        out.put(" BETWEEN ");
        out.node(&self.low);
        out.put(" AND ");
        out.node(&self.high);
    }
}

impl Render for Cast {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CAST(");
        out.node(&self.expr);
        out.put(" AS ");
        out.node(&self.data_type);
        out.put(")");
    }
}

impl Render for Nested {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("(");
        out.node(&self.expr);
        out.put(")");
    }
}

impl Render for Function {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.name);
        out.put("(");
        keyword(out, self.distinct, "DISTINCT ");
        out.list(&self.args, ", ");
        out.put(")");
        if let Some(over) = &self.over {
            out.put(" ");
            out.node(over);
        }
    }
}

impl Render for WindowSpec {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("OVER (");
        let mut sep = "";
        if !self.partition_by.is_empty() {
            out.put("PARTITION BY ");
            out.list(&self.partition_by, ", ");
            sep = " ";
        }
        if !self.order_by.is_empty() {
            out.put(sep);
            out.put("ORDER BY ");
            out.list(&self.order_by, ", ");
            sep = " ";
        }
        if let Some(frame) = &self.frame {
            out.put(sep);
            out.node(frame);
        }
        out.put(")");
    }
}

impl Render for WindowFrame {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(&self.units.to_string());
        out.put(" ");
        match &self.end_bound {
            Some(end) => {
                out.put("BETWEEN ");
                out.node(&self.start_bound);
                out.put(" AND ");
                out.node(end);
            }
            None => out.node(&self.start_bound),
        }
    }
}

impl Render for FrameBound {
    fn render(&self, out: &mut Sink<'_>) {
        match self.kind {
            FrameBoundKind::CurrentRow => out.put("CURRENT ROW"),
            FrameBoundKind::Preceding(None) => out.put("UNBOUNDED PRECEDING"),
            FrameBoundKind::Preceding(Some(n)) => out.put(&format!("{n} PRECEDING")),
            FrameBoundKind::Following(None) => out.put("UNBOUNDED FOLLOWING"),
            FrameBoundKind::Following(Some(n)) => out.put(&format!("{n} FOLLOWING")),
        }
    }
}

impl Render for CaseExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CASE ");
        if let Some(operand) = &self.operand {
            out.node(operand);
            out.put(" ");
        }
        for (condition, result) in &self.whens {
            out.put("WHEN ");
            out.node(condition);
            out.put(" THEN ");
            out.node(result);
            out.put(" ");
        }
        if let Some(else_result) = &self.else_result {
            out.put("ELSE ");
            out.node(else_result);
            out.put(" ");
        }
        out.put("END");
    }
}

impl Render for Exists {
    fn render(&self, out: &mut Sink<'_>) {
        keyword(out, self.negated(), "NOT ");
        out.put("EXISTS (");
        out.node(&self.query);
        out.put(")");
    }
}

impl Render for Subquery {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("(");
        out.node(&self.query);
        out.put(")");
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

impl Render for Query {
    fn render(&self, out: &mut Sink<'_>) {
        if let Some(with) = &self.with {
            out.node(with);
            out.put(" ");
        }
        out.node(&self.body);
        if !self.order_by.is_empty() {
            out.put(" ORDER BY ");
            out.list(&self.order_by, ", ");
        }
        if let Some(limit) = &self.limit {
            out.put(" ");
            out.node(limit);
        }
    }
}

impl Render for With {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("WITH ");
        out.list(&self.ctes, ", ");
    }
}

impl Render for Cte {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.alias);
        out.put(" AS (");
        out.node(&self.query);
        out.put(")");
    }
}

impl Render for SetExpr {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Select(s) => out.node(s),
            Self::Parenthesized(s) => out.node(s),
            Self::SetOperation(s) => out.node(s),
        }
    }
}

impl Render for ParenthesizedQuery {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("(");
        out.node(&self.query);
        out.put(")");
    }
}

impl Render for SetOperation {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.left);
        out.put(" ");
        out.put(&self.op.to_string());
        keyword(out, self.all, " ALL");
        out.put(" ");
        out.node(&self.right);
    }
}

impl Render for Select {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("SELECT ");
        keyword(out, self.distinct, "DISTINCT ");
        out.list(&self.projection, ", ");
        if !self.from.is_empty() {
            out.put(" FROM ");
            out.list(&self.from, ", ");
        }
        if let Some(selection) = &self.selection {
            out.put(" WHERE ");
            out.node(selection);
        }
        if !self.group_by.is_empty() {
            out.put(" GROUP BY ");
            out.list(&self.group_by, ", ");
        }
        if let Some(having) = &self.having {
            out.put(" HAVING ");
            out.node(having);
        }
    }
}

impl Render for SelectItem {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Unnamed(i) => out.node(i),
            Self::Aliased(i) => out.node(i),
            Self::QualifiedWildcard(i) => out.node(i),
            Self::Wildcard(i) => out.node(i),
        }
    }
}

impl Render for UnnamedSelectItem {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
    }
}

impl Render for AliasedSelectItem {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        out.put(" AS ");
        out.node(&self.alias);
    }
}

impl Render for QualifiedWildcardSelectItem {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.prefix);
        out.put(".*");
    }
}

impl Render for WildcardSelectItem {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("*");
    }
}

impl Render for OrderByExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.expr);
        if let Some(keyword) = &self.direction {
            out.put(" ");
            out.put(&keyword.direction.to_string());
        }
    }
}

impl Render for LimitExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("LIMIT ");
        match &self.value {
            LimitValue::All { .. } => out.put("ALL"),
            LimitValue::Count(count) => out.node(count),
        }
        if let Some(offset) = &self.offset {
            out.put(" OFFSET ");
            out.node(offset);
        }
    }
}

// ---------------------------------------------------------------------------
// Table references
// ---------------------------------------------------------------------------

fn alias(out: &mut Sink<'_>, alias: Option<&Ident>) {
    if let Some(alias) = alias {
        out.put(" AS ");
        out.node(alias);
    }
}

impl Render for ColumnList {
    fn render(&self, out: &mut Sink<'_>) {
        out.parenthesized(&self.columns);
    }
}

impl Render for TableReference {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Table(t) => out.node(t),
            Self::Derived(t) => out.node(t),
            Self::CrossJoin(t) => out.node(t),
            Self::QualifiedJoin(t) => out.node(t),
            Self::NaturalJoin(t) => out.node(t),
            Self::PartitionedJoin(t) => out.node(t),
        }
    }
}

impl Render for Table {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.name);
        if let Some(args) = &self.args {
            out.parenthesized(&args.args);
        }
        alias(out, self.alias.as_ref());
        if let Some(hints) = &self.hints {
            out.put(" WITH ");
            out.parenthesized(&hints.hints);
        }
    }
}

impl Render for Derived {
    fn render(&self, out: &mut Sink<'_>) {
        keyword(out, self.lateral(), "LATERAL ");
        out.put("(");
        out.node(&self.subquery);
        out.put(")");
        alias(out, self.alias.as_ref());
    }
}

impl Render for CrossJoin {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.left);
        out.put(" CROSS JOIN ");
        out.node(&self.right);
    }
}

impl Render for JoinType {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(self.kind.as_str());
    }
}

impl Render for JoinSpec {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::On(s) => out.node(s),
            Self::Using(s) => out.node(s),
        }
    }
}

impl Render for JoinCondition {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("ON ");
        out.node(&self.condition);
    }
}

impl Render for NamedColumnsJoin {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("USING ");
        out.node(&self.columns);
    }
}

impl Render for QualifiedJoin {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.left);
        out.put(" ");
        out.node(&self.join_type);
        out.put(" ");
        out.node(&self.right);
        out.put(" ");
        out.node(&self.spec);
    }
}

impl Render for NaturalJoin {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.left);
        out.put(" NATURAL ");
        out.node(&self.join_type);
        out.put(" ");
        out.node(&self.right);
    }
}

impl Render for PartitionedJoinTable {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.table);
        out.put(" PARTITION BY ");
        out.node(&self.columns);
    }
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

impl Render for Statement {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Query(s) => out.node(s),
            Self::Insert(s) => out.node(s),
            Self::Update(s) => out.node(s),
            Self::Delete(s) => out.node(s),
            Self::CreateView(s) => out.node(s),
            Self::CreateTable(s) => out.node(s),
            Self::AlterTable(s) => out.node(s),
            Self::DropTable(s) => out.node(s),
            Self::CreateIndex(s) => out.node(s),
            Self::DropIndex(s) => out.node(s),
            Self::Explain(s) => out.node(s),
        }
    }
}

impl Render for Assignment {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.column);
        out.put(" = ");
        out.node(&self.value);
    }
}

impl Render for InsertStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("INSERT INTO ");
        out.node(&self.table_name);
        if !self.columns.is_empty() {
            out.put(" ");
            out.parenthesized(&self.columns);
        }
        out.put(" ");
        out.node(&self.source);
        if !self.update_assignments.is_empty() {
            out.put(" ON DUPLICATE KEY UPDATE ");
            out.list(&self.update_assignments, ", ");
        }
    }
}

impl Render for InsertSource {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Constructor(s) => out.node(s),
            Self::Subquery(s) => out.node(s),
        }
    }
}

impl Render for ConstructorSource {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("VALUES ");
        out.list(&self.rows, ", ");
    }
}

impl Render for RowValueExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.parenthesized(&self.values);
    }
}

impl Render for SubquerySource {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.query);
    }
}

impl Render for UpdateStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("UPDATE ");
        out.node(&self.table_name);
        out.put(" SET ");
        out.list(&self.assignments, ", ");
        if let Some(selection) = &self.selection {
            out.put(" WHERE ");
            out.node(selection);
        }
    }
}

impl Render for DeleteStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DELETE FROM ");
        out.node(&self.table_name);
        if let Some(selection) = &self.selection {
            out.put(" WHERE ");
            out.node(selection);
        }
    }
}

impl Render for CreateViewStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CREATE ");
        keyword(out, self.materialized, "MATERIALIZED ");
        out.put("VIEW ");
        out.node(&self.name);
        out.put(" AS ");
        out.node(&self.query);
    }
}

impl Render for CreateTableStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CREATE TABLE ");
        keyword(out, self.if_not_exists, "IF NOT EXISTS ");
        out.node(&self.name);
        out.put(" ");
        out.parenthesized(&self.elements);
        if let Some(external) = &self.external {
            out.put(" STORED AS ");
            out.put(external.format.as_str());
            out.put(" LOCATION ");
            out.node(&external.location);
        }
    }
}

impl Render for TableElement {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Column(c) => out.node(c),
            Self::Constraint(c) => out.node(c),
        }
    }
}

impl Render for ColumnDef {
    fn render(&self, out: &mut Sink<'_>) {
        out.node(&self.name);
        out.put(" ");
        out.node(&self.data_type);
        if let Some(default) = &self.default {
            out.put(" DEFAULT ");
            out.node(default);
        }
        for constraint in &self.constraints {
            out.put(" ");
            out.node(constraint);
        }
    }
}

fn constraint_name(out: &mut Sink<'_>, name: Option<&ConstraintName>) {
    if let Some(name) = name {
        out.put("CONSTRAINT ");
        out.node(&name.name);
        out.put(" ");
    }
}

impl Render for ColumnConstraint {
    fn render(&self, out: &mut Sink<'_>) {
        constraint_name(out, self.name.as_ref());
        out.node(&self.spec);
    }
}

impl Render for ColumnConstraintSpec {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::NotNull(s) => out.node(s),
            Self::Unique(s) => out.node(s),
            Self::References(s) => out.node(s),
            Self::Check(s) => out.node(s),
        }
    }
}

impl Render for NotNullColumnSpec {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("NOT NULL");
    }
}

impl Render for UniqueColumnSpec {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(if self.primary_key {
            "PRIMARY KEY"
        } else {
            "UNIQUE"
        });
    }
}

impl Render for CheckColumnSpec {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CHECK (");
        out.node(&self.expr);
        out.put(")");
    }
}

impl Render for ReferenceKeyExpr {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("REFERENCES ");
        out.node(&self.table_name);
        if let Some(columns) = &self.columns {
            out.put(" ");
            out.node(columns);
        }
    }
}

impl Render for TableConstraint {
    fn render(&self, out: &mut Sink<'_>) {
        constraint_name(out, self.name.as_ref());
        out.node(&self.spec);
    }
}

impl Render for TableConstraintSpec {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::Unique(s) => out.node(s),
            Self::Referential(s) => out.node(s),
            Self::Check(s) => out.node(s),
        }
    }
}

impl Render for UniqueTableConstraint {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(if self.primary_key {
            "PRIMARY KEY "
        } else {
            "UNIQUE "
        });
        out.node(&self.columns);
    }
}

impl Render for ReferentialTableConstraint {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("FOREIGN KEY ");
        out.node(&self.columns);
        out.put(" ");
        out.node(&self.key);
    }
}

impl Render for CheckTableConstraint {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CHECK (");
        out.node(&self.expr);
        out.put(")");
    }
}

impl Render for AlterTableStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("ALTER TABLE ");
        out.node(&self.table_name);
        out.put(" ");
        out.node(&self.action);
    }
}

impl Render for AlterTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::AddColumn(a) => out.node(a),
            Self::AddConstraint(a) => out.node(a),
            Self::DropConstraint(a) => out.node(a),
            Self::RemoveColumn(a) => out.node(a),
            Self::AlterColumn(a) => out.node(a),
        }
    }
}

impl Render for AddColumnTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("ADD COLUMN ");
        out.node(&self.column);
    }
}

impl Render for AddConstraintTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("ADD ");
        out.node(&self.constraint);
    }
}

impl Render for DropConstraintTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP CONSTRAINT ");
        out.node(&self.name);
        keyword(out, self.cascade_end.is_some(), " CASCADE");
    }
}

impl Render for RemoveColumnTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP COLUMN ");
        out.node(&self.name);
        keyword(out, self.cascade_end.is_some(), " CASCADE");
    }
}

impl Render for AlterColumnTableAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("ALTER COLUMN ");
        out.node(&self.column_name);
        out.put(" ");
        out.node(&self.action);
    }
}

impl Render for AlterColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        match self {
            Self::SetDefault(a) => out.node(a),
            Self::DropDefault(a) => out.node(a),
            Self::SetDataType(a) => out.node(a),
            Self::SetNotNull(a) => out.node(a),
            Self::DropNotNull(a) => out.node(a),
        }
    }
}

impl Render for SetDefaultColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("SET DEFAULT ");
        out.node(&self.default);
    }
}

impl Render for DropDefaultColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP DEFAULT");
    }
}

impl Render for SetDataTypeColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("TYPE ");
        out.node(&self.data_type);
    }
}

impl Render for SetNotNullColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("SET NOT NULL");
    }
}

impl Render for DropNotNullColumnAction {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP NOT NULL");
    }
}

impl Render for DropTableStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP TABLE ");
        keyword(out, self.if_exists, "IF EXISTS ");
        out.list(&self.table_names, ", ");
        keyword(out, self.cascade_end.is_some(), " CASCADE");
    }
}

impl Render for CreateIndexStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("CREATE ");
        keyword(out, self.unique, "UNIQUE ");
        out.put("INDEX ");
        if let Some(name) = &self.index_name {
            out.node(name);
            out.put(" ");
        }
        out.put("ON ");
        out.node(&self.table_name);
        if let Some(method) = &self.method {
            out.put(" USING ");
            out.node(method);
        }
        out.put(" ");
        out.node(&self.columns);
        if let Some(selection) = &self.selection {
            out.put(" WHERE ");
            out.node(selection);
        }
    }
}

impl Render for DropIndexStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("DROP INDEX ");
        out.list(&self.index_names, ", ");
    }
}

impl Render for ExplainStmt {
    fn render(&self, out: &mut Sink<'_>) {
        out.put("EXPLAIN ");
        out.node(&self.stmt);
    }
}

impl Render for File {
    fn render(&self, out: &mut Sink<'_>) {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                out.put("\n");
            }
            out.node(stmt);
            out.put(";");
        }
    }
}

impl Render for Comment {
    fn render(&self, out: &mut Sink<'_>) {
        out.put(&self.text);
    }
}

impl Render for CommentGroup {
    fn render(&self, out: &mut Sink<'_>) {
        out.list(&self.comments, "\n");
    }
}

// ---------------------------------------------------------------------------
// Display bridge
// ---------------------------------------------------------------------------

macro_rules! display_via_render {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.to_sql())
                }
            }
        )*
    };
}

display_via_render!(
    Ident,
    ObjectName,
    CompoundIdent,
    Wildcard,
    QualifiedWildcard,
    Operator,
    Literal,
    DataType,
    Expr,
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
    Query,
    With,
    Cte,
    SetExpr,
    ParenthesizedQuery,
    SetOperation,
    Select,
    SelectItem,
    UnnamedSelectItem,
    AliasedSelectItem,
    QualifiedWildcardSelectItem,
    WildcardSelectItem,
    OrderByExpr,
    LimitExpr,
    ColumnList,
    TableReference,
    Table,
    Derived,
    CrossJoin,
    JoinType,
    JoinSpec,
    JoinCondition,
    NamedColumnsJoin,
    QualifiedJoin,
    NaturalJoin,
    PartitionedJoinTable,
    Statement,
    Assignment,
    InsertStmt,
    InsertSource,
    ConstructorSource,
    RowValueExpr,
    SubquerySource,
    UpdateStmt,
    DeleteStmt,
    CreateViewStmt,
    CreateTableStmt,
    TableElement,
    ColumnDef,
    ColumnConstraint,
    ColumnConstraintSpec,
    NotNullColumnSpec,
    UniqueColumnSpec,
    CheckColumnSpec,
    ReferenceKeyExpr,
    TableConstraint,
    TableConstraintSpec,
    UniqueTableConstraint,
    ReferentialTableConstraint,
    CheckTableConstraint,
    AlterTableStmt,
    AlterTableAction,
    AddColumnTableAction,
    AddConstraintTableAction,
    DropConstraintTableAction,
    RemoveColumnTableAction,
    AlterColumnTableAction,
    AlterColumnAction,
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
    Comment,
    CommentGroup,
);
