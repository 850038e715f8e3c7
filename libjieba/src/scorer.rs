// libjieba/src/scorer.rs
//
// Reverse dynamic programming over a segmentation DAG.
//
// Each node is scored with the best total weight achievable from that node
// to the end of the range. Scores live in a separate `Route` table indexed
// like the DAG, so a DAG is never observed half-scored.

use libjieba_core::{DagNode, DictUnit};

/// Best way forward from one DAG node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route<'d> {
    /// Best total weight from this node to the end of the range.
    pub score: f64,
    /// Unit of the chosen edge, `None` for the single-rune fallback.
    pub unit: Option<&'d DictUnit>,
    /// Inclusive index of the last rune covered by the chosen edge.
    pub next: usize,
}

/// Score every node of `dag`, last node first.
///
/// For node `i` every edge `(j, unit)` is worth `weight(unit)` plus the score
/// of node `j + 1` (zero past the end), where a fallback edge weighs
/// `min_weight`. Edges are visited in DAG order and a later edge replaces
/// the current best on equal value, so ties go to the last candidate.
///
/// # Panics
/// When a node has no edges. Dictionaries guarantee at least one, so an
/// empty edge list means the DAG is broken.
pub fn score<'d>(dag: &[DagNode<'d>], min_weight: f64) -> Vec<Route<'d>> {
    let n = dag.len();
    let unscored = Route {
        score: 0.0,
        unit: None,
        next: 0,
    };
    let mut routes = vec![unscored; n];
    for i in (0..n).rev() {
        let node = &dag[i];
        assert!(
            !node.edges.is_empty(),
            "DAG node {} ({:?}) has no outgoing edges",
            i,
            node.rune.ch
        );

        let mut best = Route {
            score: f64::NEG_INFINITY,
            unit: None,
            next: i,
        };
        for edge in &node.edges {
            debug_assert!(edge.next >= i && edge.next < n, "edge {} -> {} out of range", i, edge.next);
            let mut val = match edge.unit {
                Some(unit) => unit.weight,
                None => min_weight,
            };
            if edge.next + 1 < n {
                val += routes[edge.next + 1].score;
            }
            if val >= best.score {
                best = Route {
                    score: val,
                    unit: edge.unit,
                    next: edge.next,
                };
            }
        }
        routes[i] = best;
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use libjieba_core::{decode_runes, DagNode, DictUnit, Edge};

    fn dag<'d>(text: &str, edges: Vec<Vec<Edge<'d>>>) -> Vec<DagNode<'d>> {
        decode_runes(text)
            .into_iter()
            .zip(edges)
            .map(|(rune, edges)| DagNode { rune, edges })
            .collect()
    }

    #[test]
    fn empty_dag_scores_nothing() {
        assert!(score(&[], -10.0).is_empty());
    }

    #[test]
    fn fallback_only_sums_min_weight() {
        let d = dag("abc", vec![vec![Edge::fallback(0)], vec![Edge::fallback(1)], vec![Edge::fallback(2)]]);
        let routes = score(&d, -2.0);
        let scores: Vec<f64> = routes.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![-6.0, -4.0, -2.0]);
        assert!(routes.iter().all(|r| r.unit.is_none()));
        assert_eq!(routes[1].next, 1);
    }

    #[test]
    fn higher_total_beats_longer_or_shorter() {
        let bj = DictUnit::new("北京", -3.0, "ns");
        let dx = DictUnit::new("大学", -3.0, "n");
        let bjdx = DictUnit::new("北京大学", -8.0, "nt");
        let d = dag(
            "北京大学",
            vec![
                vec![Edge::fallback(0), Edge::new(1, Some(&bj)), Edge::new(3, Some(&bjdx))],
                vec![Edge::fallback(1)],
                vec![Edge::fallback(2), Edge::new(3, Some(&dx))],
                vec![Edge::fallback(3)],
            ],
        );
        let routes = score(&d, -20.0);
        assert_eq!(routes[2].unit, Some(&dx));
        assert_eq!(routes[2].score, -3.0);
        // 北京 + 大学 = -6 beats 北京大学 = -8
        assert_eq!(routes[0].unit, Some(&bj));
        assert_eq!(routes[0].next, 1);
        assert_eq!(routes[0].score, -6.0);
    }

    #[test]
    fn equal_values_keep_the_later_edge() {
        let ab = DictUnit::new("ab", -1.0, "");
        let a = DictUnit::new("a", -0.5, "");
        let b = DictUnit::new("b", -0.5, "");
        let d = dag(
            "ab",
            vec![
                vec![Edge::new(0, Some(&a)), Edge::new(1, Some(&ab))],
                vec![Edge::new(1, Some(&b))],
            ],
        );
        let routes = score(&d, -9.0);
        assert_eq!(routes[0].unit, Some(&ab));

        let d = dag(
            "ab",
            vec![
                vec![Edge::new(1, Some(&ab)), Edge::new(0, Some(&a))],
                vec![Edge::new(1, Some(&b))],
            ],
        );
        let routes = score(&d, -9.0);
        assert_eq!(routes[0].unit, Some(&a));
        assert_eq!(routes[0].score, -1.0);
    }

    #[test]
    #[should_panic(expected = "no outgoing edges")]
    fn empty_edge_list_is_fatal() {
        let d = dag("x", vec![vec![]]);
        score(&d, -1.0);
    }
}
