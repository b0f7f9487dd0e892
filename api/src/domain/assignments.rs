/// Membership changes needed to turn one id set into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentDiff {
    pub to_add: Vec<i64>,
    pub to_remove: Vec<i64>,
}

impl AssignmentDiff {
    pub fn between(current: &[i64], wanted: &[i64]) -> Self {
        let mut to_add: Vec<i64> = wanted
            .iter()
            .copied()
            .filter(|id| !current.contains(id))
            .collect();
        to_add.sort_unstable();
        to_add.dedup();
        let mut to_remove: Vec<i64> = current
            .iter()
            .copied()
            .filter(|id| !wanted.contains(id))
            .collect();
        to_remove.sort_unstable();
        to_remove.dedup();
        Self { to_add, to_remove }
    }
}
