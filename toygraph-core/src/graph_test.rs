#[cfg(test)]
mod tests {
    use crate::graph::Graph;
    use crate::node::{Node, NodeId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Forward(usize),
        Backward(usize),
        ZeroGrad(usize),
    }

    // Records every call it receives into a shared journal.
    struct Recorder {
        tag: usize,
        journal: Rc<RefCell<Vec<Call>>>,
    }

    impl Node for Recorder {
        fn forward(&mut self) {
            self.journal.borrow_mut().push(Call::Forward(self.tag));
        }

        fn backward(&mut self) {
            self.journal.borrow_mut().push(Call::Backward(self.tag));
        }

        fn zero_grad(&mut self) {
            self.journal.borrow_mut().push(Call::ZeroGrad(self.tag));
        }
    }

    fn recorded_graph(n: usize) -> (Graph, Rc<RefCell<Vec<Call>>>) {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut graph = Graph::new();
        for tag in 0..n {
            graph.add(Box::new(Recorder {
                tag,
                journal: Rc::clone(&journal),
            }));
        }
        (graph, journal)
    }

    #[test]
    fn test_add_returns_insertion_index() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut graph = Graph::new();
        assert!(graph.is_empty());
        let first = graph.add(Box::new(Recorder { tag: 0, journal: Rc::clone(&journal) }));
        let second = graph.add(Box::new(Recorder { tag: 1, journal }));
        assert_eq!(first, NodeId(0));
        assert_eq!(second.index(), 1);
        assert_eq!(graph.len(), 2);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_forward_runs_in_insertion_order() {
        let (mut graph, journal) = recorded_graph(4);
        graph.all_forward();
        let expected: Vec<Call> = (0..4).map(Call::Forward).collect();
        assert_eq!(*journal.borrow(), expected);
    }

    #[test]
    fn test_backward_runs_in_reverse_order() {
        let (mut graph, journal) = recorded_graph(4);
        graph.all_backward();
        let expected: Vec<Call> = (0..4).rev().map(Call::Backward).collect();
        assert_eq!(*journal.borrow(), expected);
    }

    #[test]
    fn test_zero_grads_reaches_every_node() {
        let (mut graph, journal) = recorded_graph(3);
        graph.all_zero_grads();
        let mut tags: Vec<usize> = journal
            .borrow()
            .iter()
            .map(|c| match c {
                Call::ZeroGrad(t) => *t,
                other => panic!("unexpected call {:?}", other),
            })
            .collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![0, 1, 2]);
    }

    #[test]
    fn test_add_does_not_deduplicate() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut graph = Graph::new();
        for _ in 0..2 {
            graph.add(Box::new(Recorder { tag: 7, journal: Rc::clone(&journal) }));
        }
        graph.all_forward();
        assert_eq!(graph.len(), 2);
        assert_eq!(*journal.borrow(), vec![Call::Forward(7), Call::Forward(7)]);
    }

    #[test]
    fn test_empty_graph_passes_are_noops() {
        let mut graph = Graph::default();
        graph.all_forward();
        graph.all_zero_grads();
        graph.all_backward();
        assert_eq!(graph.len(), 0);
    }
}
