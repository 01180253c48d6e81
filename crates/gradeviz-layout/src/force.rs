//! Spring embedding with root-distance leveling.
//!
//! A plain force-directed pass gives connectivity-respecting x coordinates;
//! the y coordinate of every node is then overridden with its leveled root
//! distance so the drawing reads as a tree: root on the bottom rank, leaves
//! on top. Only the leveling is part of the layout contract; the spring
//! phase just has to spread nodes out.

use crate::{distances_to_root, find_root, Point, Positions, Result};
use gradeviz_core::ScoreGraph;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct SpringOptions {
    /// Optimal pairwise distance of the spring model.
    pub k: f64,
    pub iterations: usize,
    /// Starting temperature of the cooling schedule.
    pub initial_temp: f64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        SpringOptions {
            k: 0.5,
            iterations: 50,
            initial_temp: 0.1,
        }
    }
}

pub fn layout(graph: &ScoreGraph, opts: &SpringOptions) -> Result<Positions> {
    let root = find_root(graph)?;

    let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    let index: BTreeMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let edges: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|e| Some((*index.get(e.child.as_str())?, *index.get(e.parent.as_str())?)))
        .collect();

    let mut pos = seed_positions(ids.len());
    run_spring(&mut pos, &edges, opts);

    // Leveling: shift ranks so the root gets the minimum y and the deepest
    // leaves sit at zero. x keeps whatever the embedding produced.
    let distances = distances_to_root(graph, root);
    let max_dist = distances.values().copied().max().unwrap_or(0);
    let mut positions = Positions::new();
    for (i, id) in ids.iter().enumerate() {
        let dist = distances.get(*id).copied().unwrap_or(max_dist + 1);
        positions.insert(
            id.to_string(),
            Point {
                x: pos[i].0,
                y: dist as f64 - max_dist as f64,
            },
        );
    }
    Ok(positions)
}

/// Deterministic starting layout: nodes spaced around the unit circle in
/// insertion order. The embedding does not need randomness, just distinct
/// starting points.
fn seed_positions(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n.max(1) as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

/// Fruchterman-Reingold style iteration: pairwise repulsion of k^2/d,
/// spring attraction of d^2/k along edges, displacement capped by a
/// linearly cooling temperature.
fn run_spring(pos: &mut [(f64, f64)], edges: &[(usize, usize)], opts: &SpringOptions) {
    let n = pos.len();
    if n < 2 {
        return;
    }
    let k = opts.k.max(1e-9);
    for iter in 0..opts.iterations {
        let temp = opts.initial_temp * (1.0 - iter as f64 / opts.iterations.max(1) as f64);
        let mut disp = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        for &(u, v) in edges {
            let dx = pos[u].0 - pos[v].0;
            let dy = pos[u].1 - pos[v].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[u].0 -= fx;
            disp[u].1 -= fy;
            disp[v].0 += fx;
            disp[v].1 += fy;
        }

        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temp);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }
    }
}
