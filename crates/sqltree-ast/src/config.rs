//! Comment-attachment configuration.

use serde::{Deserialize, Serialize};

use crate::comments::CommentGroup;
use crate::{AstError, Node, Position, Result};

/// Line-adjacency thresholds for deciding when a comment trails the node
/// above it instead of leading the node below.
///
/// A comment that starts on the line a node ends on always trails that node.
/// The defaults additionally let a comment on the very next line trail the
/// node, provided a blank line separates the comment from whatever follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentMapConfig {
    /// How many lines below a node's last line a comment may start and still
    /// trail it. `0` restricts trailing comments to the same line.
    pub trailing_line_gap: u32,
    /// Whether a trailing comment below the node must be followed by a blank
    /// line before the next node.
    pub require_blank_line_after: bool,
}

impl Default for CommentMapConfig {
    fn default() -> Self {
        Self {
            trailing_line_gap: 1,
            require_blank_line_after: true,
        }
    }
}

impl CommentMapConfig {
    /// Reject contradictory settings.
    pub fn validate(&self) -> Result<()> {
        if self.trailing_line_gap == 0 && !self.require_blank_line_after {
            return Err(AstError::invalid_config(
                "require_blank_line_after = false has no effect with trailing_line_gap = 0",
            ));
        }
        Ok(())
    }

    /// Whether `group` trails a node ending at `node_end`, given that the next
    /// node starts at `next`.
    pub(crate) fn trails(&self, node_end: Position, group: &CommentGroup, next: Position) -> bool {
        let first_line = group.start().line;
        if first_line == node_end.line {
            return true;
        }
        if first_line < node_end.line || first_line - node_end.line > self.trailing_line_gap {
            return false;
        }
        !self.require_blank_line_after || group.end().line.saturating_add(1) < next.line
    }
}
