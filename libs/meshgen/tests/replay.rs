use config::constants::{KernelConfig, UNGROUPED};
use glam::{Vec3, Vec4};
use meshgen::{MeshGen, OpcodeLog};

fn build_scene(session: &mut MeshGen) {
    session.add_cube(Vec3::ZERO, Vec3::ONE);
    session.extrude_face(4, 0.5).unwrap();
    session.hsplit_edge(0, 0.3).unwrap();
    session.slice_uniform(1, 2).unwrap();
    let group = session.start_group();
    session.create_cylinder(Vec3::new(3.0, 0.0, 0.0), 0.5, 1.0, 8).unwrap();
    session.end_group();
    session.rotate_group(group, Vec3::new(0.2, 0.0, 0.1)).unwrap();
    session.create_ring(Vec3::new(-3.0, 0.0, 0.0), 1.0, 0.5, 0.25, 6).unwrap();
    session.move_face(2, Vec3::Y).unwrap();
    session.scale_face(3, 0.75).unwrap();
    session.set_color(5, Vec4::new(0.0, 0.5, 1.0, 1.0)).unwrap();
    session.extrude_edge_normal(0, 0.5).unwrap();
}

#[test]
fn replaying_a_log_reproduces_the_mesh() {
    let mut original = MeshGen::new();
    build_scene(&mut original);

    let mut replayed = MeshGen::new();
    let applied = replayed.execute_opcodes(original.log()).unwrap();

    assert_eq!(applied, original.log().len());
    assert_eq!(replayed.mesh().face_count(), original.mesh().face_count());
    assert_eq!(replayed.mesh().vertices(), original.mesh().vertices());
    assert_eq!(replayed.mesh().faces(), original.mesh().faces());
    // replay records again, so the logs match too
    assert_eq!(replayed.log(), original.log());
}

#[test]
fn move_group_moves_only_its_faces() {
    let mut session = MeshGen::new();
    session.add_cube(Vec3::ZERO, Vec3::ONE);
    let group = session.start_group();
    session.add_cube(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
    session.end_group();
    let other = session.start_group();
    session.add_cube(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);
    session.end_group();

    let before = session.mesh().clone();
    let delta = Vec3::new(0.5, -1.0, 2.0);
    session.move_group(group, delta).unwrap();

    for face in 0..before.face_count() as u32 {
        let old = before.face_vertices(face).unwrap();
        let new = session.mesh().face_vertices(face).unwrap();
        let tag = before.face(face).unwrap().group;
        for (a, b) in old.iter().zip(new.iter()) {
            if tag == group {
                assert_eq!(*b, *a + delta);
            } else {
                assert_eq!(a, b);
            }
        }
    }
    assert_eq!(before.face(0).unwrap().group, UNGROUPED);
    assert_eq!(session.mesh().group_faces(other).len(), 6);
}

#[test]
fn scale_face_by_one_is_identity() {
    let mut session = MeshGen::new();
    session.create_hexagon(Vec3::new(0.3, 0.7, -1.1), 1.3, 0.4).unwrap();
    for face in 0..session.mesh().face_count() as u32 {
        let before = session.mesh().face_vertices(face).unwrap();
        session.scale_face(face, 1.0).unwrap();
        let after = session.mesh().face_vertices(face).unwrap();
        for (a, b) in before.iter().zip(after.iter()) {
            assert!(a.abs_diff_eq(*b, 1e-6), "{a:?} != {b:?}");
        }
    }
}

#[test]
fn combine_edges_winding_ignores_argument_order() {
    let square = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 1.0), Vec3::Z];
    let lifted = square.map(|c| c + Vec3::Y * 2.0);
    let flipped = [lifted[0], lifted[3], lifted[2], lifted[1]];

    let mut a = MeshGen::new();
    a.add_face(square);
    a.add_face(flipped);
    // edge 0 runs along the bottom front, edge 7 along the top front
    let forward = a.combine_edges(0, 7).unwrap();

    let mut b = MeshGen::new();
    b.add_face(square);
    b.add_face(flipped);
    let backward = b.combine_edges(7, 0).unwrap();

    let n_a = a.mesh().face(forward).unwrap().normal;
    let n_b = b.mesh().face(backward).unwrap().normal;
    assert!(n_a.abs_diff_eq(n_b, 1e-6), "{n_a:?} vs {n_b:?}");
    // the bridge faces away from the two faces it joins
    let center = a.mesh().get_center(forward).unwrap();
    let between = Vec3::new(0.5, 1.0, 0.5);
    assert!(n_a.dot(center - between) > 0.0);
}

#[test]
fn bad_entries_stop_replay() {
    let mut log = OpcodeLog::new();
    log.record(&meshgen::Opcode::AddCube { position: Vec3::ZERO, size: Vec3::ONE });
    log.record(&meshgen::Opcode::MoveVertex { vertex: 99, delta: Vec3::X });

    let mut session = MeshGen::with_config(KernelConfig::default());
    let err = session.execute_opcodes(&log).unwrap_err();
    assert!(err.is_index_error());
    assert_eq!(session.log().len(), 1);
}
