// src/autograd/graph.rs

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;

/// Stable identity of a graph node: the address of the tensor's storage lock.
type NodeId = *const RwLock<TensorData>;

/// Builds a post-order (inputs before outputs) topological sort of the graph
/// reachable backward from `root`. Iterative to avoid recursion limits on
/// deep models.
fn topo_sort(root: &Tensor) -> Vec<Tensor> {
    let mut sorted: Vec<Tensor> = Vec::new();
    let mut visited: HashSet<NodeId> = HashSet::new();
    // (node, children_pushed)
    let mut stack: Vec<(Tensor, bool)> = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            sorted.push(node);
            continue;
        }
        if !visited.insert(node.node_id()) {
            continue;
        }
        stack.push((node.clone(), true));
        if let Some(grad_fn) = node.grad_fn() {
            for input in grad_fn.inputs() {
                if !visited.contains(&input.node_id()) {
                    stack.push((input, false));
                }
            }
        }
    }
    sorted
}

/// Sums `contribution` into the gradient map entry for `id`.
fn accumulate(
    grads: &mut HashMap<NodeId, Tensor>,
    id: NodeId,
    contribution: Tensor,
) -> Result<(), FerrogradError> {
    match grads.get(&id) {
        Some(existing) => {
            let mut dst = existing.write_data();
            let src = contribution.read_data();
            if dst.shape != src.shape {
                return Err(FerrogradError::ShapeMismatch {
                    expected: dst.shape.clone(),
                    actual: src.shape.clone(),
                    operation: "gradient accumulation".to_string(),
                });
            }
            for (d, s) in dst.data.iter_mut().zip(src.data.iter()) {
                *d += *s;
            }
        }
        None => {
            // Detach so in-flight gradients never record graph nodes.
            grads.insert(id, contribution.detach());
        }
    }
    Ok(())
}

/// Executes the backward pass from `root` with the given seed gradient.
///
/// Gradients of intermediate tensors live only in the traversal map and are
/// dropped once their node has been processed; leaf tensors with
/// `requires_grad = true` retain the summed result in their `grad` field.
pub(crate) fn run_backward(root: &Tensor, seed: Tensor) -> Result<(), FerrogradError> {
    let order = topo_sort(root);
    log::debug!("backward pass over {} graph nodes", order.len());

    let mut grads: HashMap<NodeId, Tensor> = HashMap::new();
    grads.insert(root.node_id(), seed);

    // Reverse post-order: root first, leaves last.
    for node in order.iter().rev() {
        let id = node.node_id();
        let grad = match grads.remove(&id) {
            Some(g) => g,
            // Unreachable from the seed (e.g. sibling branch); nothing flows here.
            None => continue,
        };

        match node.grad_fn() {
            Some(grad_fn) => {
                let input_grads = grad_fn.backward(&grad)?;
                let inputs = grad_fn.inputs();
                if input_grads.len() != inputs.len() {
                    return Err(FerrogradError::InternalError(format!(
                        "backward op returned {} gradients for {} inputs",
                        input_grads.len(),
                        inputs.len()
                    )));
                }
                for (input, input_grad) in inputs.iter().zip(input_grads) {
                    // Only propagate along tracked paths.
                    if input.requires_grad() || input.grad_fn().is_some() {
                        accumulate(&mut grads, input.node_id(), input_grad)?;
                    }
                }
            }
            None => {
                if node.requires_grad() {
                    node.acc_grad(grad)?;
                }
            }
        }
    }
    Ok(())
}
