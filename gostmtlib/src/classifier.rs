//! Statement classification over Go syntax trees.
//!
//! The classifier walks every node of a parsed file and maps each node kind
//! onto a closed taxonomy of [`StatementKind`]s. A node contributes at most a
//! fixed, small number of units; a block and the statements inside it are
//! counted separately, never nested-counted.
//!
//! Node kinds are those of the `tree-sitter-go` grammar. A few Go constructs
//! own statements that the grammar folds into their parent node, so those
//! parents contribute more than one unit:
//!
//! - `switch`, type switch and `select` each own a body block.
//! - A type switch guard (`t := v.(type)` or `v.(type)`) is a statement.
//! - A `select` arm receiving from a channel holds a receive statement.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Tree};

use crate::stats::StatementCounts;

/// The kinds of syntax that count as statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// `var`, `const` or `type` declaration inside a function body
    Declaration,
    /// `=`, `op=` and `:=`
    Assignment,
    /// Expression evaluated for its side effect
    Expression,
    Return,
    /// `x++` / `x--`
    IncDec,
    /// `go f()`
    Go,
    /// `defer f()`
    Defer,
    /// `break`, `continue`, `goto`, `fallthrough`
    Branch,
    /// `for ... range ...`
    Range,
    If,
    /// Any `for` that is not a range loop
    For,
    /// `case` / `default` arm of a value or type switch
    CaseClause,
    Switch,
    TypeSwitch,
    Select,
    /// `case` / `default` arm of a select
    CommClause,
    /// A label, counted on top of the statement it labels
    Labeled,
    /// Brace-delimited statement list
    Block,
}

impl StatementKind {
    /// All kinds, in taxonomy order.
    pub const ALL: [StatementKind; 18] = [
        StatementKind::Declaration,
        StatementKind::Assignment,
        StatementKind::Expression,
        StatementKind::Return,
        StatementKind::IncDec,
        StatementKind::Go,
        StatementKind::Defer,
        StatementKind::Branch,
        StatementKind::Range,
        StatementKind::If,
        StatementKind::For,
        StatementKind::CaseClause,
        StatementKind::Switch,
        StatementKind::TypeSwitch,
        StatementKind::Select,
        StatementKind::CommClause,
        StatementKind::Labeled,
        StatementKind::Block,
    ];
}

/// Count the statements in a parsed file.
pub fn classify(tree: &Tree) -> StatementCounts {
    classify_node(tree.root_node())
}

/// Count the statements in the subtree rooted at `root`, `root` included.
pub fn classify_node(root: Node<'_>) -> StatementCounts {
    let mut counts = StatementCounts::new();
    let mut cursor = root.walk();

    // Pre-order traversal; the cursor never leaves `root`.
    loop {
        for &kind in statement_units(cursor.node()) {
            counts.record(kind);
        }

        if cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return counts;
            }
        }
    }
}

/// The statement units a single node contributes.
pub fn statement_units(node: Node<'_>) -> &'static [StatementKind] {
    use StatementKind::*;

    if !node.is_named() {
        return &[];
    }

    match node.kind() {
        "var_declaration" | "const_declaration" | "type_declaration" => {
            if is_top_level(node) {
                &[]
            } else {
                &[Declaration]
            }
        }
        "import_declaration" => &[],
        "assignment_statement" | "short_var_declaration" => &[Assignment],
        "expression_statement" => &[Expression],
        "receive_statement" => {
            if node.child_by_field_name("left").is_some() {
                &[Assignment]
            } else {
                &[Expression]
            }
        }
        "return_statement" => &[Return],
        "inc_statement" | "dec_statement" => &[IncDec],
        "go_statement" => &[Go],
        "defer_statement" => &[Defer],
        "break_statement" | "continue_statement" | "goto_statement" | "fallthrough_statement" => {
            &[Branch]
        }
        "for_statement" => {
            if has_named_child(node, "range_clause") {
                &[Range]
            } else {
                &[For]
            }
        }
        "if_statement" => &[If],
        "expression_case" | "type_case" => &[CaseClause],
        "communication_case" => &[CommClause],
        "default_case" => {
            if node.parent().is_some_and(|p| p.kind() == "select_statement") {
                &[CommClause]
            } else {
                &[CaseClause]
            }
        }
        "expression_switch_statement" => &[Switch, Block],
        "type_switch_statement" => {
            if node.child_by_field_name("alias").is_some() {
                &[TypeSwitch, Assignment, Block]
            } else {
                &[TypeSwitch, Expression, Block]
            }
        }
        "select_statement" => &[Select, Block],
        "labeled_statement" => &[Labeled],
        "block" => &[Block],
        "send_statement" | "empty_statement" => &[],
        _ => &[],
    }
}

fn is_top_level(node: Node<'_>) -> bool {
    node.parent().map_or(true, |p| p.kind() == "source_file")
}

fn has_named_child(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).any(|c| c.kind() == kind);
    found
}
