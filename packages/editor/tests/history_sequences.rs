//! Long edit/undo/redo sequences against the session
//!
//! Deterministic pseudo-random walks; every step checks the tree stays
//! well-formed and that history moves the way a linear log should.

use pagecraft_common::check_integrity;
use pagecraft_document::{tree, Element, ElementKind, ElementPatch};
use pagecraft_editor::{EditSession, EditorConfig, Project};

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

const PALETTE: [&str; 5] = [
    "palette:paragraph",
    "palette:container",
    "palette:button",
    "palette:columns-2",
    "palette:image",
];

fn random_id(session: &EditSession, rng: &mut Lcg) -> Option<String> {
    let ids = tree::collect_ids(session.elements());
    if ids.is_empty() {
        return None;
    }
    Some(ids[rng.below(ids.len())].to_string())
}

fn step(session: &mut EditSession, rng: &mut Lcg) {
    match rng.below(7) {
        0 => {
            let over = random_id(session, rng).unwrap_or_else(|| "canvas".to_string());
            let source = PALETTE[rng.below(PALETTE.len())];
            session.handle_drag_refs(source, Some(&over)).unwrap();
        }
        1 => {
            if let (Some(a), Some(b)) = (random_id(session, rng), random_id(session, rng)) {
                session.handle_drag_refs(&a, Some(&b)).unwrap();
            }
        }
        2 => {
            if let Some(id) = random_id(session, rng) {
                session.delete_node(&id).unwrap();
            }
        }
        3 => {
            if let Some(id) = random_id(session, rng) {
                let content = format!("text {}", rng.next() % 100);
                session
                    .update_properties(&id, ElementPatch::content(content))
                    .unwrap();
            }
        }
        4 => {
            session.undo();
        }
        5 => {
            session.redo();
        }
        _ => {
            let id = random_id(session, rng);
            session.select(id.as_deref());
        }
    }
}

#[test]
fn test_random_walks_keep_tree_and_history_consistent() {
    for seed in 1..=25u64 {
        let mut rng = Lcg(seed);
        let mut session = EditSession::from_project(
            &EditorConfig::default(),
            Project {
                elements: vec![Element::new("root-box", ElementKind::Container)],
                ..Project::default()
            },
        )
        .unwrap();

        for _ in 0..150 {
            step(&mut session, &mut rng);

            let violations = check_integrity(session.elements());
            assert!(violations.is_empty(), "seed {seed}: {violations:?}");

            // The live tree is always the snapshot at the cursor
            let current = session.history().current().unwrap();
            assert_eq!(current.as_slice(), session.elements(), "seed {seed}");

            if let Some(id) = session.selected_id() {
                assert!(tree::contains_id(session.elements(), id), "seed {seed}");
            }
        }

        // Walking all the way back lands on the initial state
        while session.undo() {}
        assert_eq!(session.history().cursor(), 0);
    }
}

#[test]
fn test_undo_redo_round_trip_restores_every_state() {
    let mut session = EditSession::new(&EditorConfig::default()).unwrap();
    let mut states = vec![session.snapshot()];

    for source in PALETTE {
        session.handle_drag_refs(source, Some("canvas")).unwrap();
        states.push(session.snapshot());
    }

    for expected in states.iter().rev().skip(1) {
        assert!(session.undo());
        assert_eq!(session.elements(), expected.as_slice());
    }
    for expected in states.iter().skip(1) {
        assert!(session.redo());
        assert_eq!(session.elements(), expected.as_slice());
    }
}
