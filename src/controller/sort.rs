//! Tri-state column sort: ascending, descending, back to the default.

use crate::paging::{Sort, SortDirection};

/// Whether the displayed order is the implicit default or a user choice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Default,
    User {
        field: String,
        direction: SortDirection,
    },
}

impl SortState {
    pub fn is_user_selected(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Sort currently in effect, `None` when the server's natural order applies.
    pub fn effective(&self, default: Option<&Sort>) -> Option<Sort> {
        match self {
            Self::Default => default.cloned(),
            Self::User { field, direction } => Some(Sort::new(field.clone(), *direction)),
        }
    }

    /// Applies a click on the `field` column header. Returns `true` when the
    /// displayed order changes and the list must be fetched again.
    pub fn toggle(&mut self, field: &str, default: Option<&Sort>) -> bool {
        let (next, refetch) = match &*self {
            Self::Default => match default {
                Some(sort) if sort.field.eq_ignore_ascii_case(field) => (
                    Self::User {
                        field: sort.field.clone(),
                        direction: sort.direction,
                    },
                    false,
                ),
                _ => (Self::ascending(field), true),
            },
            Self::User {
                field: current,
                direction,
            } if current.eq_ignore_ascii_case(field) => match direction {
                SortDirection::Asc => (
                    Self::User {
                        field: current.clone(),
                        direction: SortDirection::Desc,
                    },
                    true,
                ),
                SortDirection::Desc => (Self::Default, true),
            },
            Self::User { .. } => (Self::ascending(field), true),
        };
        *self = next;
        refetch
    }

    fn ascending(field: &str) -> Self {
        Self::User {
            field: field.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_column_cycles_through_user_asc_desc_and_back() {
        let default = Sort::asc("Name");
        let mut state = SortState::Default;

        assert!(!state.toggle("Name", Some(&default)));
        assert!(state.is_user_selected());
        assert_eq!(state.effective(Some(&default)), Some(Sort::asc("Name")));

        assert!(state.toggle("Name", Some(&default)));
        assert_eq!(state.effective(Some(&default)), Some(Sort::desc("Name")));

        assert!(state.toggle("Name", Some(&default)));
        assert_eq!(state, SortState::Default);
        assert_eq!(state.effective(Some(&default)), Some(Sort::asc("Name")));
    }

    #[test]
    fn other_column_starts_ascending() {
        let default = Sort::desc("CreatedAt");
        let mut state = SortState::Default;

        assert!(state.toggle("Email", Some(&default)));
        assert_eq!(state.effective(Some(&default)), Some(Sort::asc("Email")));

        assert!(state.toggle("Email", Some(&default)));
        assert_eq!(state.effective(Some(&default)), Some(Sort::desc("Email")));

        assert!(state.toggle("Name", Some(&default)));
        assert_eq!(state.effective(Some(&default)), Some(Sort::asc("Name")));
    }

    #[test]
    fn without_default_first_click_sorts_ascending() {
        let mut state = SortState::Default;
        assert_eq!(state.effective(None), None);
        assert!(state.toggle("Name", None));
        assert_eq!(state.effective(None), Some(Sort::asc("Name")));
        state.toggle("Name", None);
        assert!(state.toggle("Name", None));
        assert_eq!(state.effective(None), None);
    }

    #[test]
    fn descending_default_is_kept_on_first_click() {
        let default = Sort::desc("CreatedAt");
        let mut state = SortState::Default;
        assert!(!state.toggle("createdAt", Some(&default)));
        assert_eq!(state.effective(Some(&default)), Some(Sort::desc("CreatedAt")));
        assert!(state.toggle("CreatedAt", Some(&default)));
        assert_eq!(state, SortState::Default);
    }
}
