//! Comments and the comment-attachment index.
//!
//! The scanner hands over comments as free, position-ordered groups. A
//! [`CommentMap`] assigns each group to the one node it belongs to, either as
//! a trailing comment of the statement or node just before it or as a leading
//! comment of the node that follows.
//!
//! The builder makes one forward pass over the pre-order node sequence of all
//! statements, followed by an end-of-file sentinel, with a second cursor over
//! the comment groups. A stack of open containers (statements and queries)
//! tracks which one a comment could trail.

use std::collections::{HashMap, HashSet};

use tracing::{error, trace};

use crate::config::CommentMapConfig;
use crate::visit::{preorder, NodeKey, NodeRef};
use crate::{AstError, File, Node, NonEmpty, Position, Result};

/// One lexical comment, text exactly as scanned (markers included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: String,
    pub from: Position,
    pub to: Position,
}

impl Comment {
    #[must_use]
    pub fn new(text: impl Into<String>, from: Position, to: Position) -> Self {
        Self {
            text: text.into(),
            from,
            to,
        }
    }
}

impl Node for Comment {
    fn start(&self) -> Position {
        self.from
    }

    fn end(&self) -> Position {
        self.to
    }
}

/// Adjacent comments with no code between them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentGroup {
    pub comments: NonEmpty<Comment>,
}

impl CommentGroup {
    pub fn new(comments: Vec<Comment>) -> Result<Self> {
        Ok(Self {
            comments: NonEmpty::new("comment group", comments)?,
        })
    }
}

impl Node for CommentGroup {
    fn start(&self) -> Position {
        self.comments.first().start()
    }

    fn end(&self) -> Position {
        self.comments.last().end()
    }
}

/// Identity-keyed index from nodes to the comment groups attached to them.
///
/// Borrows the tree it was built from and never outlives it.
#[derive(Debug, Clone, Default)]
pub struct CommentMap<'a> {
    groups: HashMap<NodeKey, Vec<&'a CommentGroup>>,
    /// Nodes with at least one group, in first-attachment order.
    nodes: Vec<NodeRef<'a>>,
}

impl<'a> CommentMap<'a> {
    fn attach(&mut self, node: NodeRef<'a>, group: &'a CommentGroup) {
        let groups = self.groups.entry(node.key()).or_default();
        if groups.is_empty() {
            self.nodes.push(node);
        }
        groups.push(group);
    }

    /// Groups attached to `node`, in source order. Empty if none.
    pub fn lookup<'n>(&self, node: impl Into<NodeRef<'n>>) -> &[&'a CommentGroup] {
        self.groups
            .get(&node.into().key())
            .map_or(&[], Vec::as_slice)
    }

    pub fn contains<'n>(&self, node: impl Into<NodeRef<'n>>) -> bool {
        self.groups.contains_key(&node.into().key())
    }

    /// Number of nodes with attached comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of attached comment groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Nodes with attached comments, in first-attachment order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeRef<'a>] {
        &self.nodes
    }

    /// Every attached group, sorted by position.
    #[must_use]
    pub fn comments(&self) -> Vec<&'a CommentGroup> {
        let mut all: Vec<&'a CommentGroup> = self.groups.values().flatten().copied().collect();
        all.sort_by_key(|group| group.start());
        all
    }

    /// Node/group pairs in first-attachment order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeRef<'a>, &[&'a CommentGroup])> + '_ {
        self.nodes.iter().map(|node| (*node, self.lookup(*node)))
    }

    /// The sub-map of attachments that fall inside the subtree rooted at `node`.
    #[must_use]
    pub fn filter(&self, node: NodeRef<'a>) -> Self {
        let subtree: HashSet<NodeKey> = preorder(node).into_iter().map(NodeRef::key).collect();
        let mut filtered = Self::default();
        for &n in &self.nodes {
            if subtree.contains(&n.key()) {
                for group in self.lookup(n) {
                    filtered.attach(n, group);
                }
            }
        }
        filtered
    }
}

/// Which rule placed a comment group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Enclosing,
    Previous,
    Following,
}

impl Rule {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Enclosing => "enclosing",
            Self::Previous => "previous",
            Self::Following => "following",
        }
    }
}

/// Build the comment map for `file` with the default attachment rules.
pub fn build_comment_map(file: &File) -> Result<CommentMap<'_>> {
    build_comment_map_with(file, &CommentMapConfig::default())
}

/// Build the comment map for `file` with explicit attachment rules.
///
/// Fails only on an invalid `config` or an internal inconsistency; a valid
/// tree always produces a map in which every comment group appears once.
pub fn build_comment_map_with<'a>(
    file: &'a File,
    config: &CommentMapConfig,
) -> Result<CommentMap<'a>> {
    config.validate()?;

    let mut map = CommentMap::default();
    if file.comments.is_empty() {
        return Ok(map);
    }

    let span = tracing::debug_span!(
        target: "sqltree.comments",
        "build_comment_map",
        nodes = tracing::field::Empty,
        comment_groups = file.comments.len(),
        attached = tracing::field::Empty,
    );
    let _guard = span.enter();

    let nodes: Vec<NodeRef<'a>> = file
        .statements
        .iter()
        .flat_map(|stmt| preorder(stmt.into()))
        .collect();
    span.record("nodes", nodes.len());

    let mut groups = file.comments.iter();
    let mut current = groups.next();
    let mut prev: Option<NodeRef<'a>> = None;
    let mut enclosing: Option<NodeRef<'a>> = None;
    let mut open: Vec<NodeRef<'a>> = Vec::new();

    // `None` is the end-of-file sentinel.
    let sequence = nodes.iter().copied().map(Some).chain(std::iter::once(None));
    for q in sequence {
        let qpos = q.map_or(Position::INFINITY, |node| node.start());

        while let Some(group) = current {
            if group.end() > qpos {
                break;
            }

            while let Some(&top) = open.last() {
                if top.end() > group.start() {
                    break;
                }
                enclosing = open.pop();
            }

            let (target, rule) = match (enclosing, prev, q) {
                (Some(e), _, _) if config.trails(e.end(), group, qpos) => (e, Rule::Enclosing),
                (_, Some(p), _) if q.is_none() || config.trails(p.end(), group, qpos) => {
                    (p, Rule::Previous)
                }
                (_, _, Some(next)) => (next, Rule::Following),
                (_, _, None) => {
                    error!(
                        target: "sqltree.comments",
                        start = %group.start(),
                        "comment group reached end of input with no node to attach to"
                    );
                    return Err(AstError::internal(format!(
                        "comment group at {} has no node to attach to",
                        group.start()
                    )));
                }
            };

            trace!(
                target: "sqltree.comments",
                rule = rule.as_str(),
                node = ?target.kind(),
                comment = %group.start(),
                "attached comment group"
            );
            map.attach(target, group);
            current = groups.next();
        }

        if current.is_none() {
            break;
        }
        if let Some(node) = q {
            prev = Some(node);
            if node.is_container() {
                open.push(node);
            }
        }
    }

    span.record("attached", map.group_count());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    fn p(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    fn ident(value: &str, line: u32, column: u32) -> Ident {
        let len = u32::try_from(value.len()).unwrap();
        Ident::new(value, p(line, column), p(line, column + len))
    }

    fn line_comment(text: &str, line: u32, column: u32) -> CommentGroup {
        let len = u32::try_from(text.len()).unwrap();
        CommentGroup::new(vec![Comment::new(text, p(line, column), p(line, column + len))])
            .unwrap()
    }

    /// `SELECT <col> FROM <table>` starting at column 1 of `line`.
    fn select(line: u32, col: &str, table: &str) -> Statement {
        let col_start = 8;
        let table_start = col_start + u32::try_from(col.len()).unwrap() + 6;
        let mut select = Select::new(
            p(line, 1),
            vec![SelectItem::Unnamed(UnnamedSelectItem {
                expr: Expr::Ident(ident(col, line, col_start)),
            })],
        )
        .unwrap();
        select.from = vec![TableReference::Table(Box::new(Table::named(
            ObjectName::single(ident(table, line, table_start)),
        )))];
        Statement::Query(Box::new(Query::from_body(SetExpr::Select(Box::new(
            select,
        )))))
    }

    fn query(stmt: &Statement) -> &Query {
        match stmt {
            Statement::Query(q) => q,
            other => panic!("expected query, got {other:?}"),
        }
    }

    #[test]
    fn test_no_comments_gives_empty_map() {
        let file = File::new(vec![select(1, "a", "t")], Vec::new()).unwrap();
        let map = build_comment_map(&file).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.group_count(), 0);
    }

    #[test]
    fn test_same_line_comment_trails_statement() {
        // SELECT a FROM t; -- one
        // SELECT b FROM u;
        let file = File::new(
            vec![select(1, "a", "t"), select(2, "b", "u")],
            vec![line_comment("-- one", 1, 18)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        let first = query(&file.statements[0]);
        assert_eq!(map.lookup(first), [&file.comments[0]]);
        assert!(!map.contains(query(&file.statements[1])));
    }

    #[test]
    fn test_comment_after_blank_line_leads_next_statement() {
        // SELECT a FROM t;
        //
        // -- lead
        // SELECT b FROM u;
        let file = File::new(
            vec![select(1, "a", "t"), select(4, "b", "u")],
            vec![line_comment("-- lead", 3, 1)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert_eq!(map.lookup(query(&file.statements[1])), [&file.comments[0]]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_next_line_without_blank_line_follows_by_default() {
        // SELECT a FROM t;
        // -- between
        // SELECT b FROM u;
        let file = File::new(
            vec![select(1, "a", "t"), select(3, "b", "u")],
            vec![line_comment("-- between", 2, 1)],
        )
        .unwrap();

        let map = build_comment_map(&file).unwrap();
        assert!(map.contains(query(&file.statements[1])));

        let config = CommentMapConfig {
            require_blank_line_after: false,
            ..CommentMapConfig::default()
        };
        let map = build_comment_map_with(&file, &config).unwrap();
        assert!(map.contains(query(&file.statements[0])));
    }

    #[test]
    fn test_next_line_with_blank_line_trails_statement() {
        // SELECT a FROM t;
        // -- note
        //
        // SELECT b FROM u;
        let file = File::new(
            vec![select(1, "a", "t"), select(4, "b", "u")],
            vec![line_comment("-- note", 2, 1)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert!(map.contains(query(&file.statements[0])));
    }

    #[test]
    fn test_comment_at_end_of_file_trails_last_statement() {
        let file = File::new(
            vec![select(1, "a", "t")],
            vec![line_comment("-- tail", 2, 1)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert!(map.contains(query(&file.statements[0])));
    }

    #[test]
    fn test_distant_comment_at_end_of_file_goes_to_last_node() {
        // Far below the last statement: no container claims it, so the last
        // visited node does.
        let file = File::new(
            vec![select(1, "a", "t")],
            vec![line_comment("-- eof", 9, 1)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert_eq!(map.nodes()[0].kind(), NodeKind::Ident);
        assert_eq!(map.nodes()[0].to_sql(), "t");
    }

    #[test]
    fn test_comment_before_first_statement_leads_it() {
        let file = File::new(
            vec![select(2, "a", "t")],
            vec![line_comment("-- header", 1, 1)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert!(map.contains(query(&file.statements[0])));
    }

    #[test]
    fn test_comment_inside_query_attaches_to_preceding_leaf() {
        // SELECT a -- pick a
        //   FROM t
        let mut stmt = select(1, "a", "t");
        if let Statement::Query(q) = &mut stmt {
            if let SetExpr::Select(s) = &mut q.body {
                s.from = vec![TableReference::Table(Box::new(Table::named(
                    ObjectName::single(ident("t", 2, 8)),
                )))];
            }
        }
        let file = File::new(vec![stmt], vec![line_comment("-- pick a", 1, 10)]).unwrap();
        let map = build_comment_map(&file).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.nodes()[0].kind(), NodeKind::Ident);
        assert_eq!(map.nodes()[0].to_sql(), "a");
    }

    #[test]
    fn test_every_group_attached_once() {
        let file = File::new(
            vec![select(2, "a", "t"), select(5, "b", "u")],
            vec![
                line_comment("-- one", 1, 1),
                line_comment("-- two", 2, 18),
                line_comment("-- three", 4, 1),
                line_comment("-- four", 6, 1),
            ],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert_eq!(map.group_count(), 4);
        let sorted: Vec<Position> = map.comments().iter().map(|g| g.start()).collect();
        assert_eq!(sorted, vec![p(1, 1), p(2, 18), p(4, 1), p(6, 1)]);
    }

    #[test]
    fn test_filter_restricts_to_subtree() {
        let file = File::new(
            vec![select(1, "a", "t"), select(2, "b", "u")],
            vec![line_comment("-- one", 1, 18), line_comment("-- two", 2, 18)],
        )
        .unwrap();
        let map = build_comment_map(&file).unwrap();
        assert_eq!(map.len(), 2);
        let second = NodeRef::from(&file.statements[1]);
        let sub = map.filter(second);
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.lookup(second), [&file.comments[1]]);
        assert_eq!(sub.iter().count(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let file = File::new(vec![select(1, "a", "t")], Vec::new()).unwrap();
        let config = CommentMapConfig {
            trailing_line_gap: 0,
            require_blank_line_after: false,
        };
        let err = build_comment_map_with(&file, &config).unwrap_err();
        assert!(matches!(err, AstError::InvalidConfig { .. }));
    }

    #[test]
    fn test_comment_group_span() {
        let group = CommentGroup::new(vec![
            Comment::new("-- a", p(1, 1), p(1, 5)),
            Comment::new("-- b", p(2, 1), p(2, 5)),
        ])
        .unwrap();
        assert_eq!(group.span(), Span::new(p(1, 1), p(2, 5)));
        assert_eq!(group.to_sql(), "-- a\n-- b");
        assert!(CommentGroup::new(Vec::new()).is_err());
    }
}
