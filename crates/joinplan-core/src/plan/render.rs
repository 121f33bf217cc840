//! Plan text rendering.
//!
//! The plan line is a fully parenthesized tree:
//!
//! - scan: the table number followed by its filter attribute names, e.g. `1` or `1a`
//! - join with a condition: `(<left> <right> {<t1>.<a1> <t2>.<a2>})`
//! - join of two base scans, compact form: `(<left> <right> {<a1> <a2>})`, with
//!   the attributes in operand order
//! - cross join: `(<left> <right>)`

use std::fmt;

use super::{JoinOp, PlanNode};

/// How join conditions are written in the plan line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlanNotation {
    /// Joins of two base tables use the short `(1 2 {a b})` form.
    #[default]
    Compact,
    /// Every join condition is table-qualified: `(1 2 {1.a 2.b})`.
    Qualified,
}

impl PlanNode {
    /// Renders the plan line.
    #[must_use]
    pub fn render(&self, notation: PlanNotation) -> String {
        let mut out = String::new();
        self.write_plan(&mut out, notation);
        out
    }

    fn write_plan(&self, out: &mut String, notation: PlanNotation) {
        match self {
            PlanNode::Empty => {}
            PlanNode::Scan(scan) => {
                out.push_str(&scan.table.to_string());
                for filter in &scan.filters {
                    out.push_str(filter);
                }
            }
            PlanNode::Join(join) => write_join(join, out, notation),
        }
    }

    /// Renders an indented operator tree with row and cost estimates.
    #[must_use]
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();
        self.explain_into(0, &mut lines);
        lines.join("\n")
    }

    fn explain_into(&self, depth: usize, lines: &mut Vec<String>) {
        let pad = "  ".repeat(depth);
        match self {
            PlanNode::Empty => lines.push(format!("{pad}Empty")),
            PlanNode::Scan(scan) => {
                let filters = if scan.filters.is_empty() {
                    String::new()
                } else {
                    format!(" filter=[{}]", scan.filters.join(", "))
                };
                lines.push(format!(
                    "{pad}Scan {}{filters} rows={:.2}",
                    scan.table, scan.rows
                ));
            }
            PlanNode::Join(join) => {
                let head = match (&join.condition, join.strategy) {
                    (Some(c), Some(strategy)) => format!(
                        "{} on {}.{} = {}.{}",
                        strategy.description(),
                        c.left_table,
                        c.left_attribute,
                        c.right_table,
                        c.right_attribute
                    ),
                    (Some(c), None) => format!(
                        "Join on {}.{} = {}.{}",
                        c.left_table, c.left_attribute, c.right_table, c.right_attribute
                    ),
                    (None, _) => "Cross Join".to_string(),
                };
                lines.push(format!(
                    "{pad}{head} rows={:.2} cost={:.2}",
                    join.rows, join.cost
                ));
                join.left.explain_into(depth + 1, lines);
                join.right.explain_into(depth + 1, lines);
            }
        }
    }
}

fn write_join(join: &JoinOp, out: &mut String, notation: PlanNotation) {
    match &join.condition {
        Some(c) if notation == PlanNotation::Compact && join.is_leaf_pair() => {
            // Attributes follow operand order, whatever the predicate's orientation.
            let (first, second) = if join.left.scan_table() == Some(c.left_table) {
                (&c.left_attribute, &c.right_attribute)
            } else {
                (&c.right_attribute, &c.left_attribute)
            };
            out.push('(');
            join.left.write_plan(out, notation);
            out.push(' ');
            join.right.write_plan(out, notation);
            out.push_str(&format!(" {{{first} {second}}})"));
        }
        Some(c) => {
            out.push('(');
            join.left.write_plan(out, notation);
            out.push(' ');
            join.right.write_plan(out, notation);
            out.push_str(&format!(
                " {{{}.{} {}.{}}})",
                c.left_table, c.left_attribute, c.right_table, c.right_attribute
            ));
        }
        None => {
            out.push('(');
            join.left.write_plan(out, notation);
            out.push(' ');
            join.right.write_plan(out, notation);
            out.push(')');
        }
    }
}

impl fmt::Display for PlanNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(PlanNotation::Compact))
    }
}
