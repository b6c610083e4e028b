use crate::model::{Role, RoleBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBounds {
    pub min: u8,
    pub max: u8,
}

/// Legal on-pitch count range for every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationBounds {
    bounds: [RoleBounds; 4],
}

impl FormationBounds {
    pub fn from_role_book(book: &RoleBook) -> Self {
        let mut bounds = [RoleBounds { min: 0, max: 0 }; 4];
        for role in Role::ALL {
            let et = book.element_type(role);
            bounds[role.index()] = RoleBounds {
                min: et.squad_min_play,
                max: et.squad_max_play.max(et.squad_min_play),
            };
        }
        Self { bounds }
    }

    pub fn get(&self, role: Role) -> RoleBounds {
        self.bounds[role.index()]
    }
}

impl Default for FormationBounds {
    fn default() -> Self {
        Self::from_role_book(&RoleBook::default())
    }
}

/// Number of players of each role currently in the eleven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCounts([u8; 4]);

impl RoleCounts {
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut counts = Self::default();
        for role in roles {
            counts.0[role.index()] = counts.0[role.index()].saturating_add(1);
        }
        counts
    }

    pub fn get(&self, role: Role) -> u8 {
        self.0[role.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|c| u32::from(*c)).sum()
    }

    fn swap(&mut self, out_role: Role, in_role: Role) {
        self.0[out_role.index()] = self.0[out_role.index()].saturating_sub(1);
        self.0[in_role.index()] = self.0[in_role.index()].saturating_add(1);
    }
}

/// Whether swapping a player of `out_role` for one of `in_role` keeps the
/// eleven within bounds. Only the two affected roles change, so only they
/// are checked.
pub fn is_legal_substitution(
    counts: &RoleCounts,
    bounds: &FormationBounds,
    out_role: Role,
    in_role: Role,
) -> bool {
    if out_role == in_role {
        return true;
    }
    let leaving = counts.get(out_role);
    if leaving == 0 {
        return false;
    }
    leaving - 1 >= bounds.get(out_role).min
        && counts.get(in_role).saturating_add(1) <= bounds.get(in_role).max
}

/// Running role counts across an ordered substitution pass.
#[derive(Debug, Clone)]
pub struct FormationTracker {
    counts: RoleCounts,
    bounds: FormationBounds,
}

impl FormationTracker {
    pub fn new(counts: RoleCounts, bounds: FormationBounds) -> Self {
        Self { counts, bounds }
    }

    pub fn counts(&self) -> RoleCounts {
        self.counts
    }

    /// Commits the substitution and returns true if it is legal.
    pub fn try_substitute(&mut self, out_role: Role, in_role: Role) -> bool {
        if !is_legal_substitution(&self.counts, &self.bounds, out_role, in_role) {
            return false;
        }
        self.counts.swap(out_role, in_role);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_four_two() -> RoleCounts {
        RoleCounts::from_roles(
            std::iter::once(Role::Goalkeeper)
                .chain(std::iter::repeat_n(Role::Defender, 4))
                .chain(std::iter::repeat_n(Role::Midfielder, 4))
                .chain(std::iter::repeat_n(Role::Forward, 2)),
        )
    }

    #[test]
    fn like_for_like_is_always_legal() {
        let counts = four_four_two();
        let bounds = FormationBounds::default();
        for role in Role::ALL {
            assert!(is_legal_substitution(&counts, &bounds, role, role));
        }
    }

    #[test]
    fn goalkeeper_only_swaps_with_goalkeeper() {
        let counts = four_four_two();
        let bounds = FormationBounds::default();
        assert!(!is_legal_substitution(&counts, &bounds, Role::Goalkeeper, Role::Forward));
        assert!(!is_legal_substitution(&counts, &bounds, Role::Defender, Role::Goalkeeper));
    }

    #[test]
    fn tracker_enforces_minimum_defenders() {
        let mut tracker = FormationTracker::new(four_four_two(), FormationBounds::default());
        assert!(tracker.try_substitute(Role::Defender, Role::Midfielder));
        assert_eq!(tracker.counts().get(Role::Defender), 3);
        assert!(!tracker.try_substitute(Role::Defender, Role::Forward));
        assert_eq!(tracker.counts().get(Role::Defender), 3);
        assert_eq!(tracker.counts().total(), 11);
    }

    #[test]
    fn tracker_enforces_maximum_forwards() {
        let mut tracker = FormationTracker::new(four_four_two(), FormationBounds::default());
        assert!(tracker.try_substitute(Role::Midfielder, Role::Forward));
        assert!(!tracker.try_substitute(Role::Midfielder, Role::Forward));
        assert_eq!(tracker.counts().get(Role::Forward), 3);
    }

    #[test]
    fn bounds_come_from_role_book() {
        let mut book = RoleBook::default();
        book.element_types = vec![crate::model::ElementType::new(Role::Forward, 0, 4)];
        let bounds = FormationBounds::from_role_book(&book);
        assert_eq!(bounds.get(Role::Forward), RoleBounds { min: 0, max: 4 });
        assert_eq!(bounds.get(Role::Defender), RoleBounds { min: 3, max: 5 });
    }
}
