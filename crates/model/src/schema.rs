use crate::builtins::{is_builtin_directive, is_builtin_field, is_builtin_type};
use crate::definition::{Definition, DirectiveDefinition};
use crate::name_reference::NameReference;
use crate::types::{DefinitionKind, Type};
use crate::{ModelError, Result};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// A complete, kind-resolved GraphQL type system.
///
/// Types are keyed and iterated by name. Directive definitions are kept sorted
/// by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(serialize_with = "serialize_types")]
    pub types: BTreeMap<String, Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_type_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<DirectiveDefinition>,
}

impl Schema {
    /// Builds the model from a compiled schema.
    ///
    /// The compiled schema is expected to contain every referenced type,
    /// including the built-in scalars. Fails if any field, argument, or
    /// directive argument names a type with no definition.
    #[tracing::instrument(skip_all, fields(types = compiled.types.len()))]
    pub fn build(compiled: &apollo_compiler::Schema) -> Result<Self> {
        let implementers = compiled.implementers_map();

        let mut types = BTreeMap::new();
        for (name, extended) in &compiled.types {
            let mut definition = Definition::from_extended(extended)?;
            if definition.kind == DefinitionKind::Interface {
                if let Some(found) = implementers.get(name) {
                    definition.possible_types =
                        found.objects.iter().map(ToString::to_string).collect();
                }
            }
            types.insert(definition.name.clone(), definition);
        }

        let mut directives = compiled
            .directive_definitions
            .values()
            .map(|directive| DirectiveDefinition::from_ast(directive))
            .collect::<Result<Vec<_>>>()?;
        directives.sort_by(|a, b| a.name.cmp(&b.name));

        let root = &compiled.schema_definition;
        let mut schema = Self {
            types,
            description: root.description.as_ref().map(|d| d.to_string()),
            query_type_name: root.query.as_ref().map(ToString::to_string),
            mutation_type_name: root.mutation.as_ref().map(ToString::to_string),
            subscription_type_name: root.subscription.as_ref().map(ToString::to_string),
            directives,
        };
        schema.resolve_kinds()?;

        tracing::debug!(
            types = schema.types.len(),
            directives = schema.directives.len(),
            "Built schema model"
        );
        Ok(schema)
    }

    /// Builds a schema from loose definitions, resolving every type reference.
    pub fn from_definitions(definitions: impl IntoIterator<Item = Definition>) -> Result<Self> {
        let mut schema = Self {
            types: BTreeMap::new(),
            description: None,
            query_type_name: None,
            mutation_type_name: None,
            subscription_type_name: None,
            directives: Vec::new(),
        };
        schema.replace_types(definitions);
        schema.resolve_kinds()?;
        Ok(schema)
    }

    /// Sets the kind of every named type reference from the definition it names.
    pub fn resolve_kinds(&mut self) -> Result<()> {
        let kinds: HashMap<String, DefinitionKind> = self
            .types
            .values()
            .map(|definition| (definition.name.clone(), definition.kind))
            .collect();

        for definition in self.types.values_mut() {
            for ty in definition.type_refs_mut() {
                resolve_kind(&kinds, ty)?;
            }
        }
        for directive in &mut self.directives {
            for argument in &mut directive.arguments {
                resolve_kind(&kinds, &mut argument.ty)?;
            }
        }
        Ok(())
    }

    /// Drops built-in types, built-in directives, and reserved `__` fields.
    #[tracing::instrument(skip(self))]
    pub fn filter_builtins(&mut self) {
        let before = self.types.len();
        self.types.retain(|name, _| !is_builtin_type(name));
        self.directives
            .retain(|directive| !is_builtin_directive(&directive.name));
        for definition in self.types.values_mut() {
            definition.fields.retain(|field| !is_builtin_field(&field.name));
            definition
                .input_fields
                .retain(|field| !is_builtin_field(&field.name));
        }
        tracing::debug!(removed = before - self.types.len(), "Filtered builtin types");
    }

    /// Resolves `Type` and `Type.field` names against this schema.
    ///
    /// A member name is looked up among the type's fields first and its input
    /// fields second. Every name that fails to resolve is reported in a single
    /// [`ModelError::UnknownNames`].
    #[tracing::instrument(skip_all, fields(count = names.len()))]
    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<NameReference<'_>>> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut unknown = Vec::new();

        for name in names {
            let name = name.as_ref();
            match self.resolve_name(name) {
                Some(reference) => resolved.push(reference),
                None => unknown.push(name.to_string()),
            }
        }

        if unknown.is_empty() {
            Ok(resolved)
        } else {
            Err(ModelError::UnknownNames(unknown))
        }
    }

    fn resolve_name(&self, name: &str) -> Option<NameReference<'_>> {
        let (type_name, member) = match name.split_once('.') {
            Some((type_name, member)) => (type_name, Some(member)),
            None => (name, None),
        };

        let definition = self.types.get(type_name)?;
        let Some(member) = member else {
            return Some(NameReference::Type { definition });
        };

        if let Some(field) = definition.field(member) {
            return Some(NameReference::Field { definition, field });
        }
        definition
            .input_field(member)
            .map(|input_field| NameReference::InputField {
                definition,
                input_field,
            })
    }

    /// Replaces the type set, e.g. with the pruned definitions of a reachability graph.
    pub fn replace_types(&mut self, definitions: impl IntoIterator<Item = Definition>) {
        self.types = definitions
            .into_iter()
            .map(|definition| (definition.name.clone(), definition))
            .collect();
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&Definition> {
        self.types.get(name)
    }

    #[must_use]
    pub fn get_directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives
            .iter()
            .find(|directive| directive.name == name)
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.types.values()
    }
}

fn resolve_kind(kinds: &HashMap<String, DefinitionKind>, ty: &mut Type) -> Result<()> {
    let named = ty.named_type_mut();
    let kind = kinds
        .get(&named.name)
        .ok_or_else(|| ModelError::UnresolvedType {
            name: named.name.clone(),
        })?;
    named.kind = Some(*kind);
    Ok(())
}

fn serialize_types<S: Serializer>(
    types: &BTreeMap<String, Definition>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(types.values())
}
