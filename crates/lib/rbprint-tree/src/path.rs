//! Read-only cursor over a borrowed syntax tree.
//!
//! [`AstPath`] keeps a stack of node references from the root to the current
//! node and the slot indices taken at every step. Descending never copies the
//! tree; the callback runs with the cursor moved onto the child and the cursor
//! is moved back before the call returns.

use std::fmt;

use crate::node::{Node, Slot};

/// Why a slot lookup failed.
#[derive(Clone, Debug, PartialEq)]
pub enum PathError {
    /// The current node is a scanner token and has no slots.
    LiteralBody { kind: String },
    /// No slot at the given position.
    Missing { kind: String, slots: Vec<usize> },
    /// The slot exists but holds something else than the caller asked for.
    Shape {
        kind: String,
        slots: Vec<usize>,
        expected: &'static str,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::LiteralBody { kind } => {
                write!(f, "`{kind}` is a literal token and has no slots")
            }
            PathError::Missing { kind, slots } => {
                write!(f, "`{kind}` has no slot at {}", Trail(slots))
            }
            PathError::Shape {
                kind,
                slots,
                expected,
            } => write!(f, "slot {} of `{kind}` is not {expected}", Trail(slots)),
        }
    }
}

impl std::error::Error for PathError {}

struct Trail<'a>(&'a [usize]);

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in self.0 {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// A node on the way down together with the slot indices that led to it.
#[derive(Clone, Copy, Debug)]
struct Frame<'t> {
    node: &'t Node,
    /// Offset in `AstPath::trail` where the indices leading to `node` begin.
    start: usize,
}

#[derive(Clone, Debug)]
pub struct AstPath<'t> {
    stack: Vec<Frame<'t>>,
    trail: Vec<usize>,
}

impl<'t> AstPath<'t> {
    pub fn new(root: &'t Node) -> Self {
        Self {
            stack: vec![Frame {
                node: root,
                start: 0,
            }],
            trail: Vec::new(),
        }
    }

    pub fn node(&self) -> &'t Node {
        // The root frame is pushed in `new` and never popped.
        self.stack[self.stack.len() - 1].node
    }

    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The slot behind `slots`, following nested lists. An empty path yields
    /// the whole body as a list.
    pub fn slot(&self, slots: &[usize]) -> Result<Target<'t>, PathError> {
        let node = self.node();
        let Some((first, rest)) = slots.split_first() else {
            return match node.literal() {
                Some(_) => Err(PathError::LiteralBody {
                    kind: node.kind.to_string(),
                }),
                None => Ok(Target::List(node.slots())),
            };
        };
        if node.literal().is_some() {
            return Err(PathError::LiteralBody {
                kind: node.kind.to_string(),
            });
        }
        let missing = || PathError::Missing {
            kind: node.kind.to_string(),
            slots: slots.to_vec(),
        };
        let mut slot = node.slots().get(*first).ok_or_else(missing)?;
        for index in rest {
            slot = match slot {
                Slot::List(items) => items.get(*index).ok_or_else(missing)?,
                _ => {
                    return Err(PathError::Shape {
                        kind: node.kind.to_string(),
                        slots: slots.to_vec(),
                        expected: "a list",
                    });
                }
            };
        }
        Ok(Target::from(slot))
    }

    /// True when `slots` resolves to something other than an absent child.
    pub fn has(&self, slots: &[usize]) -> bool {
        self.slot(slots)
            .is_ok_and(|target| !matches!(target, Target::Empty))
    }

    /// Raw token text at `slots` (operators, call connectors). Newer Ripper
    /// versions wrap these in scanner events (`[:@period, "."]`), so literal
    /// leaves count as tokens as well.
    pub fn token(&self, slots: &[usize]) -> Result<&'t str, PathError> {
        match self.slot(slots)? {
            Target::Token(text) => Ok(text),
            Target::Node(node) => node
                .literal()
                .ok_or_else(|| self.shape_error(slots, "a token")),
            _ => Err(self.shape_error(slots, "a token")),
        }
    }

    /// Move onto the single child at `slots`, run `f`, and move back.
    pub fn call<R, E>(
        &mut self,
        slots: &[usize],
        f: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<PathError>,
    {
        match self.slot(slots)? {
            Target::Node(child) => self.descend(child, slots, f),
            _ => Err(self.shape_error(slots, "a node").into()),
        }
    }

    /// Run `f` on every node of the list at `slots`, in order. Absent
    /// elements are skipped.
    pub fn map<R, E>(
        &mut self,
        slots: &[usize],
        mut f: impl FnMut(&mut Self) -> Result<R, E>,
    ) -> Result<Vec<R>, E>
    where
        E: From<PathError>,
    {
        let items = match self.slot(slots)? {
            Target::List(items) => items,
            _ => return Err(self.shape_error(slots, "a list").into()),
        };
        let mut results = Vec::with_capacity(items.len());
        let mut path = slots.to_vec();
        for (index, item) in items.iter().enumerate() {
            match item {
                Slot::Node(child) => {
                    path.push(index);
                    results.push(self.descend(child, &path, &mut f)?);
                    path.pop();
                }
                Slot::Empty => {}
                _ => {
                    path.push(index);
                    return Err(self.shape_error(&path, "a node").into());
                }
            }
        }
        Ok(results)
    }

    fn descend<R, E>(
        &mut self,
        child: &'t Node,
        slots: &[usize],
        f: impl FnOnce(&mut Self) -> Result<R, E>,
    ) -> Result<R, E> {
        let start = self.trail.len();
        self.trail.extend_from_slice(slots);
        self.stack.push(Frame { node: child, start });
        let result = f(self);
        self.stack.pop();
        self.trail.truncate(start);
        result
    }

    fn shape_error(&self, slots: &[usize], expected: &'static str) -> PathError {
        PathError::Shape {
            kind: self.node().kind.to_string(),
            slots: slots.to_vec(),
            expected,
        }
    }

    /// Human readable route from the root, e.g. `program[0][1] > class[2]`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, frame) in self.stack.iter().enumerate() {
            if i > 0 {
                out.push_str(" > ");
            }
            out.push_str(frame.node.kind.as_str());
            if let Some(next) = self.stack.get(i + 1) {
                let end = self
                    .stack
                    .get(i + 2)
                    .map_or(self.trail.len(), |after| after.start);
                out.push_str(&Trail(&self.trail[next.start..end]).to_string());
            }
        }
        out
    }
}

/// What a slot path resolves to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target<'t> {
    Empty,
    Token(&'t str),
    Node(&'t Node),
    List(&'t [Slot]),
}

impl<'t> From<&'t Slot> for Target<'t> {
    fn from(slot: &'t Slot) -> Self {
        match slot {
            Slot::Empty => Target::Empty,
            Slot::Token(text) => Target::Token(text),
            Slot::Node(node) => Target::Node(node),
            Slot::List(items) => Target::List(items),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kind::NodeKind;
    use pretty_assertions::assert_eq;

    fn params() -> Node {
        Node::new(
            "params",
            vec![
                vec![Node::leaf("@ident", "a")].into(),
                Slot::list([Slot::list([
                    Node::leaf("@ident", "b").into(),
                    Node::leaf("@int", "1").into(),
                ])]),
                Slot::Empty,
            ],
        )
    }

    fn kind_of(path: &mut AstPath<'_>) -> Result<NodeKind, PathError> {
        Ok(path.node().kind.clone())
    }

    #[test]
    fn call_follows_nested_lists() {
        let tree = params();
        let mut path = AstPath::new(&tree);
        let text = path
            .call(&[1, 0, 1], |p| Ok::<_, PathError>(p.node().literal().map(str::to_string)))
            .unwrap();
        assert_eq!(text.as_deref(), Some("1"));
        // back on the root afterwards
        assert_eq!(path.node().kind, NodeKind::Params);
        assert_eq!(path.depth(), 0);
    }

    #[test]
    fn map_visits_list_in_order() {
        let tree = Node::new(
            "bodystmt",
            vec![Slot::list([
                Node::leaf("@ident", "x").into(),
                Slot::Empty,
                Node::leaf("@int", "2").into(),
            ])],
        );
        let mut path = AstPath::new(&tree);
        let kinds = path.map(&[0], kind_of).unwrap();
        assert_eq!(kinds, vec![NodeKind::Ident, NodeKind::Int]);
    }

    #[test]
    fn empty_slot_path_is_whole_body() {
        let tree = Node::new(
            "symbol",
            vec![Node::leaf("@ident", "foo").into()],
        );
        let mut path = AstPath::new(&tree);
        assert_eq!(path.map(&[], kind_of).unwrap(), vec![NodeKind::Ident]);
    }

    #[test]
    fn shape_errors() {
        let tree = params();
        let mut path = AstPath::new(&tree);
        assert!(matches!(
            path.call(&[0], kind_of),
            Err(PathError::Shape { expected: "a node", .. })
        ));
        assert!(matches!(
            path.map(&[5], kind_of),
            Err(PathError::Missing { .. })
        ));
        assert!(!path.has(&[2]));
        assert!(path.has(&[1, 0]));

        let leaf = Node::leaf("@int", "1");
        let path = AstPath::new(&leaf);
        assert_eq!(
            path.slot(&[0]),
            Err(PathError::LiteralBody {
                kind: "@int".to_string()
            })
        );
    }

    #[test]
    fn tokens() {
        let tree = Node::new(
            "call",
            vec![
                Node::leaf("@ident", "a").into(),
                Node::leaf("@period", ".").into(),
                Node::leaf("@ident", "b").into(),
            ],
        );
        let path = AstPath::new(&tree);
        assert_eq!(path.token(&[1]), Ok("."));
        let tree = Node::new("binary", vec![Slot::Empty, Slot::token("&&")]);
        let path = AstPath::new(&tree);
        assert_eq!(path.token(&[1]), Ok("&&"));
        assert!(path.token(&[0]).is_err());
    }

    #[test]
    fn describe_route() {
        let tree = Node::new(
            "program",
            vec![Slot::list([Node::new(
                "class",
                vec![Slot::Empty, Slot::Empty, Node::leaf("@ident", "x").into()],
            )
            .into()])],
        );
        let mut path = AstPath::new(&tree);
        let route = path
            .map(&[0], |p| p.call(&[2], |p| Ok::<_, PathError>(p.describe())))
            .unwrap();
        assert_eq!(route, vec!["program[0][0] > class[2] > @ident".to_string()]);
    }
}
