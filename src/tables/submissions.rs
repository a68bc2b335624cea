//! Submission catalogue

use crate::core::{Position, SubmissionKind};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionEntry {
    pub kind: SubmissionKind,
    pub name: &'static str,
    /// Success chance is divided by this; 1.0 is the easiest hold
    pub difficulty: f64,
    pub positions: SmallVec<[Position; 4]>,
}

impl SubmissionEntry {
    pub fn new(kind: SubmissionKind, name: &'static str, difficulty: f64, positions: &[Position]) -> Self {
        SubmissionEntry {
            kind,
            name,
            difficulty,
            positions: positions.iter().copied().collect(),
        }
    }

    pub fn applies_from(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionCatalogue {
    entries: Vec<SubmissionEntry>,
}

impl SubmissionCatalogue {
    pub fn standard() -> Self {
        use Position::*;
        use SubmissionKind::*;
        SubmissionCatalogue {
            entries: vec![
                SubmissionEntry::new(RearNakedChoke, "Rear-Naked Choke", 1.0, &[BackControlOffence]),
                SubmissionEntry::new(Armbar, "Armbar", 1.2, &[MountTop, SideControlTop, FullGuardBottom]),
                SubmissionEntry::new(Triangle, "Triangle Choke", 1.3, &[FullGuardBottom]),
                SubmissionEntry::new(Guillotine, "Guillotine Choke", 1.15, &[FullGuardBottom, HalfGuardTop]),
                SubmissionEntry::new(Kimura, "Kimura", 1.25, &[SideControlTop, HalfGuardTop, HalfGuardBottom]),
                SubmissionEntry::new(ArmTriangle, "Arm-Triangle Choke", 1.1, &[MountTop, SideControlTop]),
                SubmissionEntry::new(Americana, "Americana", 1.3, &[MountTop, SideControlTop]),
                SubmissionEntry::new(HeelHook, "Heel Hook", 1.45, &[HalfGuardBottom, FullGuardBottom]),
            ],
        }
    }

    pub fn from_entries(entries: Vec<SubmissionEntry>) -> Self {
        SubmissionCatalogue { entries }
    }

    pub fn entries(&self) -> &[SubmissionEntry] {
        &self.entries
    }

    pub fn get(&self, kind: SubmissionKind) -> Option<&SubmissionEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Catalogue entries usable from `position`, in catalogue order
    pub fn applicable(&self, position: Position) -> impl Iterator<Item = &SubmissionEntry> {
        self.entries.iter().filter(move |e| e.applies_from(position))
    }

    pub fn any_applicable(&self, position: Position) -> bool {
        self.applicable(position).next().is_some()
    }
}

impl Default for SubmissionCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_control_has_choke() {
        let catalogue = SubmissionCatalogue::standard();
        let first = catalogue.applicable(Position::BackControlOffence).next().unwrap();
        assert_eq!(first.kind, SubmissionKind::RearNakedChoke);
    }

    #[test]
    fn test_no_submissions_from_bad_positions() {
        let catalogue = SubmissionCatalogue::standard();
        assert!(!catalogue.any_applicable(Position::MountBottom));
        assert!(!catalogue.any_applicable(Position::BackControlDefence));
        assert!(!catalogue.any_applicable(Position::Standing));
    }

    #[test]
    fn test_difficulties_not_below_one() {
        for entry in SubmissionCatalogue::standard().entries() {
            assert!(entry.difficulty >= 1.0, "{}", entry.name);
        }
    }
}
