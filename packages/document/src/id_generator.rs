use crc32fast::Hasher;

use crate::element::Element;

/// Derive a stable seed from a project key using CRC32
pub fn get_project_seed(key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for elements within one project
///
/// Ids look like `el-<seed>-<n>`. The counter only moves forward, so ids
/// minted in the same tick never collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(project_key: &str) -> Self {
        Self {
            seed: get_project_seed(project_key),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("el-{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance past an id minted by this seed in an earlier session
    pub fn observe(&mut self, id: &str) {
        let Some(rest) = id.strip_prefix("el-") else {
            return;
        };
        let Some((seed, n)) = rest.rsplit_once('-') else {
            return;
        };
        if seed != self.seed {
            return;
        }
        if let Ok(n) = n.parse::<u64>() {
            self.count = self.count.max(n);
        }
    }

    /// Advance past every id in `elements`
    pub fn observe_tree(&mut self, elements: &[Element]) {
        for element in elements {
            self.observe(&element.id);
            self.observe_tree(&element.children);
        }
    }

    /// Give `element` and its whole subtree fresh ids
    ///
    /// Children's `parent_id` is rewritten to follow the new ids. The root's
    /// `parent_id` is left for the inserting operation to set.
    pub fn remint(&mut self, element: &mut Element) {
        element.id = self.new_id();
        let parent_id = element.id.clone();
        for child in &mut element.children {
            self.remint(child);
            child.parent_id = Some(parent_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ElementKind;

    #[test]
    fn test_project_seed_is_stable() {
        assert_eq!(get_project_seed("home"), get_project_seed("home"));
        assert_ne!(get_project_seed("home"), get_project_seed("about"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("home");
        let id1 = gen.new_id();
        let id2 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id1.starts_with(&format!("el-{}", gen.seed())));
    }

    #[test]
    fn test_observe_skips_existing_ids() {
        let mut gen = IdGenerator::new("home");
        let seed = gen.seed().to_string();
        gen.observe(&format!("el-{seed}-41"));
        gen.observe("el-othersd-900");
        gen.observe("hero-heading");

        assert_eq!(gen.new_id(), format!("el-{seed}-42"));
    }

    #[test]
    fn test_remint_rewrites_subtree() {
        let mut gen = IdGenerator::new("home");
        let mut section = Element::new("hero", ElementKind::Container).with_children(vec![
            Element::new("hero-title", ElementKind::Heading1),
            Element::new("hero-cta", ElementKind::Button),
        ]);

        gen.remint(&mut section);

        assert!(section.id.starts_with("el-"));
        for child in &section.children {
            assert!(child.id.starts_with("el-"));
            assert_eq!(child.parent_id.as_deref(), Some(section.id.as_str()));
        }
        assert_ne!(section.children[0].id, section.children[1].id);
    }
}
