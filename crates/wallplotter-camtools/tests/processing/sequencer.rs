use proptest::prelude::*;
use wallplotter_camtools::{permutation_of, sequence, travel_distance};
use wallplotter_core::{PlotPack, PlotPath, SourcePoint};

fn path(points: &[(f64, f64)]) -> PlotPath<SourcePoint> {
    PlotPath::new(points.iter().map(|&(x, y)| SourcePoint::new(x, y)).collect()).unwrap()
}

#[test]
fn test_three_path_greedy_chain() {
    // Input order: a, b, c. Seed is c, which ends at (100, 0).
    // From (100, 0): a starts 100 away, b starts 10 away -> b.
    // From b's end (0, 5): only a remains.
    let a = path(&[(0.0, 0.0), (0.0, -20.0)]);
    let b = path(&[(110.0, 0.0), (0.0, 5.0)]);
    let c = path(&[(50.0, 50.0), (100.0, 0.0)]);

    let out = sequence(PlotPack::new(vec![a.clone(), b.clone(), c.clone()]));
    assert_eq!(out.paths(), &[c, b, a]);
}

#[test]
fn test_sequencing_reduces_travel() {
    let strokes = vec![
        path(&[(0.0, 0.0), (1.0, 0.0)]),
        path(&[(90.0, 0.0), (91.0, 0.0)]),
        path(&[(2.0, 0.0), (3.0, 0.0)]),
        path(&[(92.0, 0.0), (93.0, 0.0)]),
    ];
    let input = PlotPack::new(strokes);
    let before = travel_distance(&input);
    let out = sequence(input);
    assert!(travel_distance(&out) < before);
}

fn arb_pack() -> impl Strategy<Value = Vec<Vec<(f64, f64)>>> {
    prop::collection::vec(
        prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..5),
        0..16,
    )
}

proptest! {
    #[test]
    fn sequencing_is_a_permutation(raw in arb_pack()) {
        let pack = PlotPack::new(raw.iter().map(|p| path(p)).collect());
        let out = sequence(pack.clone());

        let mut order = permutation_of(&pack, &out).expect("not a permutation");
        order.sort_unstable();
        prop_assert_eq!(order, (0..pack.len()).collect::<Vec<_>>());
    }
}
