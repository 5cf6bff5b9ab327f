// Feeds the leaves of a tree into a push coroutine.
//
// The visitor only knows it has a callback to call for each leaf. That
// callback is a transfer into a suspended coroutine body, which consumes the
// leaves incrementally and keeps its own local state between them.

use symco::{Push, Source};

trait Visitor<'t> {
    fn visit_branch(&mut self, branch: &'t Branch);
    fn visit_leaf(&mut self, leaf: &'t Leaf);
}

enum Node {
    Branch(Branch),
    Leaf(Leaf),
}

impl Node {
    fn accept<'t>(&'t self, visitor: &mut dyn Visitor<'t>) {
        match self {
            Node::Branch(branch) => visitor.visit_branch(branch),
            Node::Leaf(leaf) => visitor.visit_leaf(leaf),
        }
    }
}

struct Branch {
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

#[derive(Debug)]
struct Leaf {
    value: String,
}

struct CoroVisitor<'p, 't> {
    push: &'p mut Push<'t, &'t Leaf, Vec<String>>,
}

impl<'t> Visitor<'t> for CoroVisitor<'_, 't> {
    fn visit_branch(&mut self, branch: &'t Branch) {
        if let Some(left) = &branch.left {
            left.accept(self);
        }
        if let Some(right) = &branch.right {
            right.accept(self);
        }
    }

    fn visit_leaf(&mut self, leaf: &'t Leaf) {
        if let Err(err) = self.push.send(leaf) {
            eprintln!("Leaf {:?} was not delivered: {err}", leaf.value);
        }
    }
}

fn branch(left: Node, right: Node) -> Node {
    Node::Branch(Branch {
        left: Some(Box::new(left)),
        right: Some(Box::new(right)),
    })
}

fn leaf(value: &str) -> Node {
    Node::Leaf(Leaf {
        value: value.to_string(),
    })
}

// Pairs up consecutive leaves; a leftover leaf is reported on its own.
fn pair_up(source: &mut Source<'_, '_, &Leaf>) -> Vec<String> {
    let mut pairs = Vec::new();
    while let Some(first) = source.recv() {
        match source.recv() {
            Some(second) => pairs.push(format!("{} & {}", first.value, second.value)),
            None => pairs.push(format!("{} alone", first.value)),
        }
    }
    pairs
}

fn main() {
    let _ = env_logger::builder().try_init();

    let tree = branch(
        branch(leaf("A"), leaf("B")),
        branch(leaf("C"), branch(leaf("D"), leaf("E"))),
    );

    let mut push = match Push::new(pair_up) {
        Ok(push) => push,
        Err(err) => {
            eprintln!("Cannot start the consumer: {err}");
            return;
        }
    };
    tree.accept(&mut CoroVisitor { push: &mut push });

    match push.finish() {
        Ok(pairs) => {
            for pair in pairs {
                println!("{pair}");
            }
        }
        Err(err) => eprintln!("Consumer failed: {err}"),
    }
}
