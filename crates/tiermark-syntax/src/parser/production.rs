//! Productions: flat `(kind, range)` records and their fold into a tree shape.
//!
//! Block matchers never build nodes directly. They record productions into a
//! [`ProductionHolder`] in the order they complete, and the assembler later
//! folds the flat list into nested nodes by interval containment.
//!
//! Ranges are byte offsets for block productions and token indices for inline
//! productions; the fold does not care which.

use std::ops::Range;

use crate::syntax_kind::SyntaxKind;

/// A completed span of a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub kind: SyntaxKind,
    pub range: Range<usize>,
}

impl Production {
    pub fn new(kind: SyntaxKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }
}

/// Collects productions in emission order.
#[derive(Debug, Default)]
pub struct ProductionHolder {
    productions: Vec<Production>,
}

impl ProductionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `start` as the beginning of a span completed later.
    pub fn mark(&self, start: usize) -> Marker {
        Marker { start }
    }

    /// Record a finished span.
    pub fn add(&mut self, kind: SyntaxKind, range: Range<usize>) {
        debug_assert!(range.start <= range.end, "inverted range for {kind:?}");
        log::trace!("production {kind:?}@{range:?}");
        self.productions.push(Production::new(kind, range));
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }
}

/// The start of a span whose end is not known yet.
///
/// A marker emits nothing until [`Marker::complete`] is called.
#[must_use = "a marker records nothing unless completed"]
#[derive(Debug)]
pub struct Marker {
    start: usize,
}

impl Marker {
    pub fn start(&self) -> usize {
        self.start
    }

    /// Record the span `start..end` as `kind`.
    pub fn complete(self, holder: &mut ProductionHolder, kind: SyntaxKind, end: usize) {
        holder.add(kind, self.start..end);
    }
}

/// A node of a folded production list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FoldNode {
    pub kind: SyntaxKind,
    pub range: Range<usize>,
    /// Indices into [`Folded::nodes`], in document order.
    pub children: Vec<usize>,
}

/// Productions arranged by containment.
#[derive(Debug, Default)]
pub(crate) struct Folded {
    pub nodes: Vec<FoldNode>,
    pub roots: Vec<usize>,
}

/// Two productions that overlap without one containing the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Crossing {
    pub outer: Production,
    pub inner: Production,
}

/// Fold productions into a forest.
///
/// Productions are ordered by start, then by descending end; for identical
/// ranges the one emitted later becomes the ancestor.
pub(crate) fn fold(productions: &[Production]) -> Result<Folded, Crossing> {
    let mut order: Vec<usize> = (0..productions.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (&productions[a].range, &productions[b].range);
        pa.start
            .cmp(&pb.start)
            .then(pb.end.cmp(&pa.end))
            .then(b.cmp(&a))
    });

    let mut folded = Folded::default();
    let mut stack: Vec<usize> = Vec::new();

    for index in order {
        let production = &productions[index];
        while let Some(&top) = stack.last() {
            let top_range = &folded.nodes[top].range;
            if production.range.end <= top_range.end {
                break;
            }
            if production.range.start < top_range.end {
                return Err(Crossing {
                    outer: Production::new(folded.nodes[top].kind, top_range.clone()),
                    inner: production.clone(),
                });
            }
            stack.pop();
        }

        let id = folded.nodes.len();
        folded.nodes.push(FoldNode {
            kind: production.kind,
            range: production.range.clone(),
            children: Vec::new(),
        });
        match stack.last() {
            Some(&parent) => folded.nodes[parent].children.push(id),
            None => folded.roots.push(id),
        }
        stack.push(id);
    }

    Ok(folded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shape(folded: &Folded, id: usize) -> String {
        let node = &folded.nodes[id];
        let children: Vec<String> = node.children.iter().map(|&c| shape(folded, c)).collect();
        if children.is_empty() {
            format!("{:?}", node.kind)
        } else {
            format!("{:?}[{}]", node.kind, children.join(", "))
        }
    }

    #[test]
    fn marker_completes_into_production() {
        let mut holder = ProductionHolder::new();
        let marker = holder.mark(3);
        assert_eq!(marker.start(), 3);
        marker.complete(&mut holder, SyntaxKind::PARAGRAPH, 9);
        assert_eq!(
            holder.productions(),
            &[Production::new(SyntaxKind::PARAGRAPH, 3..9)]
        );
    }

    #[test]
    fn fold_nests_by_containment() {
        let productions = vec![
            Production::new(SyntaxKind::LIST_ITEM_MARKER, 0..2),
            Production::new(SyntaxKind::LIST_ITEM_CONTENT, 3..4),
            Production::new(SyntaxKind::LIST_ITEM, 0..4),
            Production::new(SyntaxKind::UNORDERED_LIST, 0..4),
            Production::new(SyntaxKind::ROOT, 0..5),
        ];
        let folded = fold(&productions).unwrap();
        assert_eq!(folded.roots.len(), 1);
        assert_eq!(
            shape(&folded, folded.roots[0]),
            "ROOT[UNORDERED_LIST[LIST_ITEM[LIST_ITEM_MARKER, LIST_ITEM_CONTENT]]]"
        );
    }

    #[test]
    fn later_emission_wins_identical_ranges() {
        let productions = vec![
            Production::new(SyntaxKind::NESTED_UNORDERED_LIST, 0..6),
            Production::new(SyntaxKind::UNORDERED_LIST, 0..6),
        ];
        let folded = fold(&productions).unwrap();
        assert_eq!(
            shape(&folded, folded.roots[0]),
            "UNORDERED_LIST[NESTED_UNORDERED_LIST]"
        );
    }

    #[test]
    fn siblings_stay_in_document_order() {
        let productions = vec![
            Production::new(SyntaxKind::PARAGRAPH, 6..10),
            Production::new(SyntaxKind::HORIZONTAL_RULE, 0..5),
            Production::new(SyntaxKind::ROOT, 0..10),
        ];
        let folded = fold(&productions).unwrap();
        assert_eq!(
            shape(&folded, folded.roots[0]),
            "ROOT[HORIZONTAL_RULE, PARAGRAPH]"
        );
    }

    #[test]
    fn crossing_ranges_are_rejected() {
        let productions = vec![
            Production::new(SyntaxKind::STRONG, 0..4),
            Production::new(SyntaxKind::ITALIC, 2..6),
        ];
        let crossing = fold(&productions).unwrap_err();
        assert_eq!(crossing.outer.kind, SyntaxKind::STRONG);
        assert_eq!(crossing.inner.kind, SyntaxKind::ITALIC);
    }
}
