#[test]
fn ideal_gas_structure_factor_is_unity() {
    let (r, g_r) = flat_rdf(100, 0.05);
    let (q, s_q) = rdf_to_structure_factor(&r, &g_r, 1.0, 10.0, 0.8).unwrap();
    assert_eq!(q.len(), Q_GRID_POINTS);
    assert_eq!(s_q.len(), Q_GRID_POINTS);
    for &s in &s_q {
        assert!((s - 1.0).abs() < 1e-12);
    }
}

#[test]
fn q_grid_covers_the_range_inclusively() {
    let (r, g_r) = flat_rdf(50, 0.1);
    let (q, _) = rdf_to_structure_factor(&r, &g_r, 0.5, 12.5, 1.0).unwrap();
    assert_eq!(q.len(), 1000);
    assert_eq!(q[0], 0.5);
    assert_eq!(q[999], 12.5);
    for w in q.windows(2) {
        assert!(w[1] > w[0]);
    }
}

#[test]
fn structure_factor_deviation_scales_with_density() {
    let bins = 200;
    let dr = 0.05;
    let r: Vec<f64> = (0..bins).map(|i| (i as f64 + 0.5) * dr).collect();
    // A short-range correlation bump around r = 2.
    let g_r: Vec<f64> = r
        .iter()
        .map(|&ri| 1.0 + 0.5 * (-(ri - 2.0) * (ri - 2.0) / 0.1).exp())
        .collect();
    let (_, s_lo) = structure_factor_on_grid(&r, &g_r, 0.5, 8.0, 32, 0.4).unwrap();
    let (_, s_hi) = structure_factor_on_grid(&r, &g_r, 0.5, 8.0, 32, 0.8).unwrap();
    for (lo, hi) in s_lo.iter().zip(&s_hi) {
        assert!((hi - 1.0) - 2.0 * (lo - 1.0) < 1e-9);
        assert!((hi - 1.0) - 2.0 * (lo - 1.0) > -1e-9);
    }
}

#[test]
fn transform_rejects_degenerate_input() {
    let (r, g_r) = flat_rdf(50, 0.1);
    let cases = [
        rdf_to_structure_factor(&r[..1], &g_r[..1], 1.0, 10.0, 1.0),
        rdf_to_structure_factor(&r, &g_r[..49], 1.0, 10.0, 1.0),
        rdf_to_structure_factor(&r, &g_r, 0.0, 10.0, 1.0),
        rdf_to_structure_factor(&r, &g_r, -1.0, 10.0, 1.0),
        rdf_to_structure_factor(&r, &g_r, 5.0, 5.0, 1.0),
        rdf_to_structure_factor(&r, &g_r, 1.0, 10.0, 0.0),
        structure_factor_on_grid(&r, &g_r, 1.0, 10.0, 1, 1.0),
    ];
    for case in cases {
        match case {
            Err(ScatterError::Invalid(_)) => {}
            other => panic!("expected invalid-input error, got {other:?}"),
        }
    }
}

#[test]
fn custom_grid_point_count() {
    let (r, g_r) = flat_rdf(50, 0.1);
    let (q, s_q) = structure_factor_on_grid(&r, &g_r, 1.0, 2.0, 5, 1.0).unwrap();
    assert_eq!(q.len(), 5);
    assert_eq!(s_q.len(), 5);
    assert!((q[1] - 1.25).abs() < 1e-12);
}

#[test]
fn executor_rejects_atom_count_mismatch() {
    let system = mono_system(3);
    let frames = vec![vec![[0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]]];
    let mut traj = InMemoryFrames::new(2, BOX10, frames).unwrap();
    let mut plan = IntermolecularRdfPlan::new("A", "A").with_r_max(2.0).with_bins(4);
    let exec = Executor::new(system);
    match exec.run_plan(&mut plan, &mut traj) {
        Err(ScatterError::Mismatch(_)) => {}
        other => panic!("expected mismatch error, got {other:?}"),
    }
}

#[test]
fn empty_trajectory_is_invalid() {
    let system = pair_system();
    let mut traj = InMemoryFrames::new(2, BOX10, vec![]).unwrap();
    let mut plan = IntermolecularRdfPlan::new("A", "B").with_r_max(2.0).with_bins(4);
    let exec = Executor::new(system);
    match exec.run_plan(&mut plan, &mut traj) {
        Err(ScatterError::Invalid(_)) => {}
        other => panic!("expected invalid-input error, got {other:?}"),
    }
}

#[test]
fn frame_window_limits_processing() {
    let system = pair_system();
    let near = vec![[0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]];
    let far = vec![[0.0, 0.0, 0.0, 0.0], [5.0, 0.0, 0.0, 0.0]];
    let frames = vec![far.clone(), near.clone(), near, far];
    let mut traj = InMemoryFrames::new(2, BOX10, frames).unwrap();
    let mut plan = IntermolecularRdfPlan::new("A", "B")
        .with_r_max(2.0)
        .with_bins(4)
        .with_exclude_bonded(false);
    let exec = Executor::new(system).with_chunk_frames(1);
    let out = exec.run_plan_on_range(&mut plan, &mut traj, 1, Some(3)).unwrap();
    match out {
        PlanOutput::Rdf(rdf) => {
            // One A-B pair in each of the two windowed frames.
            assert_eq!(rdf.counts.iter().sum::<u64>(), 2);
        }
        _ => panic!("unexpected output"),
    }
}

#[test]
fn frame_window_start_beyond_end_leaves_nothing() {
    let system = pair_system();
    let frames = vec![vec![[0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]]];
    let mut traj = InMemoryFrames::new(2, BOX10, frames).unwrap();
    let mut plan = IntermolecularRdfPlan::new("A", "B").with_r_max(2.0).with_bins(4);
    let exec = Executor::new(system);
    match exec.run_plan_on_range(&mut plan, &mut traj, 5, None) {
        Err(ScatterError::Invalid(_)) => {}
        other => panic!("expected invalid-input error, got {other:?}"),
    }
}

#[test]
fn inverted_frame_window_is_rejected() {
    let system = pair_system();
    let frames = vec![vec![[0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]]];
    let mut traj = InMemoryFrames::new(2, BOX10, frames).unwrap();
    let mut plan = IntermolecularRdfPlan::new("A", "B").with_r_max(2.0).with_bins(4);
    let exec = Executor::new(system);
    match exec.run_plan_on_range(&mut plan, &mut traj, 3, Some(1)) {
        Err(ScatterError::Invalid(_)) => {}
        other => panic!("expected invalid-input error, got {other:?}"),
    }
}
