//! Long edit sequences must keep the tree structurally sound

use pagecraft_common::{check_integrity, IntegrityViolation};
use pagecraft_document::tree;
use pagecraft_document::{Element, ElementKind, ElementPatch, IdGenerator};

/// Small deterministic sequence so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as usize
    }

    fn pick<'a>(&mut self, ids: &[&'a str]) -> Option<&'a str> {
        if ids.is_empty() {
            None
        } else {
            Some(ids[self.next() % ids.len()])
        }
    }
}

const KINDS: [ElementKind; 5] = [
    ElementKind::Container,
    ElementKind::Columns2,
    ElementKind::Paragraph,
    ElementKind::Button,
    ElementKind::Heading2,
];

/// Nested subtree straight from the builders, derived fields left unset
fn subtree(ids: &mut IdGenerator, rng: &mut Lcg) -> Element {
    let leaves = (0..1 + rng.next() % 3)
        .map(|_| Element::new(ids.new_id(), ElementKind::Paragraph))
        .collect();
    let inner = Element::new(ids.new_id(), ElementKind::Columns2).with_children(leaves);
    let sibling = Element::new(ids.new_id(), ElementKind::Button);
    Element::new(ids.new_id(), ElementKind::Container).with_children(vec![sibling, inner])
}

fn run_sequence(seed: u64, steps: usize) -> Vec<Element> {
    let mut rng = Lcg(seed);
    let mut ids = IdGenerator::new("integrity-test");
    let mut page: Vec<Element> = Vec::new();

    for _ in 0..steps {
        let all: Vec<String> = tree::collect_ids(&page).into_iter().map(String::from).collect();
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();

        page = match rng.next() % 5 {
            op @ (0 | 4) => {
                let node = if op == 0 {
                    Element::new(ids.new_id(), KINDS[rng.next() % KINDS.len()])
                } else {
                    subtree(&mut ids, &mut rng)
                };
                let container = rng
                    .pick(&refs)
                    .filter(|id| tree::find_by_id(&page, id).is_some_and(|e| e.kind.accepts_children()));
                tree::insert_into(&page, container, node, None).expect("fresh ids")
            }
            1 => match rng.pick(&refs) {
                Some(id) => tree::remove_by_id(&page, id),
                None => page,
            },
            2 => match (rng.pick(&refs), rng.pick(&refs)) {
                (Some(active), Some(over)) => tree::reorder_or_reparent(&page, active, over),
                _ => page,
            },
            _ => match rng.pick(&refs) {
                Some(id) => tree::update_by_id(&page, id, &ElementPatch::content("edited")),
                None => page,
            },
        };

        let violations = check_integrity(&page);
        assert!(violations.is_empty(), "seed {seed}: {violations:?}");
    }

    page
}

#[test]
fn test_random_edit_sequences_keep_invariants() {
    for seed in 1..=40u64 {
        let page = run_sequence(seed, 200);
        let violations = check_integrity(&page);
        assert!(
            violations.is_empty(),
            "seed {seed} produced {violations:?}"
        );
    }
}

#[test]
fn test_inserted_subtree_is_consistent() {
    let root = vec![Element::new("r", ElementKind::Paragraph)];
    let boxed = Element::new("box", ElementKind::Container).with_children(vec![
        Element::new("c1", ElementKind::Paragraph),
        Element::new("c2", ElementKind::Paragraph),
    ]);

    let page = tree::insert_into(&root, None, boxed, None).unwrap();
    assert!(check_integrity(&page).is_empty());
}

#[test]
fn test_duplicate_insert_is_refused_before_it_lands() {
    let mut page = vec![Element::new("a", ElementKind::Container)];
    tree::normalize(&mut page);

    let result = tree::insert_into(&page, Some("a"), Element::new("a", ElementKind::Paragraph), None);
    assert!(result.is_err());
    assert!(check_integrity(&page).is_empty());
}

#[test]
fn test_checker_sees_hand_built_damage() {
    let mut page = vec![
        Element::new("a", ElementKind::Container)
            .with_children(vec![Element::new("b", ElementKind::Paragraph)]),
        Element::new("b", ElementKind::Paragraph),
    ];
    tree::normalize(&mut page);

    assert_eq!(
        check_integrity(&page),
        vec![IntegrityViolation::DuplicateId("b".to_string())]
    );
}
