use std::{collections::TryReserveError, rc::Rc};

pub type NodeIndex = u32;

/// A state reached during the search, with the move that produced it.
///
/// The state is only held until the node is popped; afterwards the node is
/// kept for path reconstruction alone.
#[derive(Debug)]
pub struct Node<S, M> {
    state: Option<Rc<S>>,
    parent: Option<NodeIndex>,
    mov: Option<M>,
    cost: u32,
}

impl<S, M> Node<S, M> {
    pub fn root(state: Rc<S>) -> Self {
        Node {
            state: Some(state),
            parent: None,
            mov: None,
            cost: 0,
        }
    }

    pub fn child(state: Rc<S>, parent: NodeIndex, mov: M, cost: u32) -> Self {
        Node {
            state: Some(state),
            parent: Some(parent),
            mov: Some(mov),
            cost,
        }
    }

    pub fn state(&self) -> Option<&Rc<S>> {
        self.state.as_ref()
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn mov(&self) -> Option<&M> {
        self.mov.as_ref()
    }

    /// Accumulated path cost from the root.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

/// Every node generated by one search, addressed by index so that children
/// only hold the index of their parent.
#[derive(Debug)]
pub struct NodeTree<S, M> {
    nodes: Vec<Node<S, M>>,
}

impl<S, M> Default for NodeTree<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> NodeTree<S, M> {
    pub fn new() -> Self {
        NodeTree { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: Node<S, M>) -> Result<NodeIndex, TryReserveError> {
        self.nodes.try_reserve(1)?;
        let index = self.nodes.len() as NodeIndex;
        self.nodes.push(node);
        Ok(index)
    }

    pub fn get(&self, index: NodeIndex) -> &Node<S, M> {
        &self.nodes[index as usize]
    }

    /// Hands out the state of a node, leaving the node without one.
    pub fn take_state(&mut self, index: NodeIndex) -> Option<Rc<S>> {
        self.nodes[index as usize].state.take()
    }
}

impl<S, M: Clone> NodeTree<S, M> {
    /// The moves leading from the root to `index`, in play order.
    pub fn moves_to(&self, index: NodeIndex) -> Vec<M> {
        let mut moves = Vec::new();
        let mut current = self.get(index);
        while let Some(parent) = current.parent() {
            if let Some(mov) = current.mov() {
                moves.push(mov.clone());
            }
            current = self.get(parent);
        }
        moves.reverse();
        moves
    }
}
