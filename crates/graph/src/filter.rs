use graphql_model::{Definition, NameReference};
use std::collections::{BTreeMap, BTreeSet};

/// The members of one type selected by a set of roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    All,
    Fields(BTreeSet<String>),
}

impl FieldSelection {
    fn from_root(root: &NameReference<'_>) -> Self {
        match root.field_name() {
            None => Self::All,
            Some(field) => Self::Fields(BTreeSet::from([field.to_string()])),
        }
    }

    /// Union of two selections. `All` absorbs any field list.
    pub fn merge(&mut self, other: Self) {
        match (&mut *self, other) {
            (Self::All, _) => {}
            (_, Self::All) => *self = Self::All,
            (Self::Fields(fields), Self::Fields(more)) => fields.extend(more),
        }
    }

    #[must_use]
    pub fn includes(&self, member: &str) -> bool {
        match self {
            Self::All => true,
            Self::Fields(fields) => fields.contains(member),
        }
    }

    /// A copy of `definition` restricted to the selected fields and input fields.
    #[must_use]
    pub fn apply(&self, definition: &Definition) -> Definition {
        match self {
            Self::All => definition.clone(),
            Self::Fields(_) => definition.with_members_filtered(|member| self.includes(member)),
        }
    }
}

/// Groups roots by type name, merging selections that name the same type.
#[must_use]
pub fn field_filters(roots: &[NameReference<'_>]) -> BTreeMap<String, FieldSelection> {
    let mut filters: BTreeMap<String, FieldSelection> = BTreeMap::new();
    for root in roots {
        let selection = FieldSelection::from_root(root);
        match filters.get_mut(root.type_name()) {
            Some(existing) => existing.merge(selection),
            None => {
                filters.insert(root.type_name().to_string(), selection);
            }
        }
    }
    filters
}

/// Restricts `definitions` to the types named by `roots`, each pruned to its selected members.
pub fn apply_field_filters<'d>(
    definitions: impl IntoIterator<Item = &'d Definition>,
    roots: &[NameReference<'_>],
) -> Vec<Definition> {
    let filters = field_filters(roots);
    definitions
        .into_iter()
        .filter_map(|definition| {
            filters
                .get(&definition.name)
                .map(|selection| selection.apply(definition))
        })
        .collect()
}
