use graphql_model::{DefinitionKind, ModelError, NameReference, Schema, Type};
use pretty_assertions::assert_eq;
use serde_json::json;

fn build(sdl: &str) -> Schema {
    let compiled = apollo_compiler::Schema::parse_and_validate(sdl, "schema.graphql").unwrap();
    Schema::build(&compiled).unwrap()
}

const LIBRARY: &str = r#"
"A small lending library"
schema {
  query: Query
  mutation: Mutation
}

directive @auth(role: Role = READER, scopes: [String!]) repeatable on FIELD_DEFINITION | OBJECT

type Query {
  book(id: ID!): Book
  search(filter: BookFilter, limit: Int = 10): [SearchResult!]!
  node(id: ID!): Node
}

type Mutation {
  borrow(bookId: ID!): Loan @auth(role: MEMBER)
}

interface Node {
  id: ID!
}

"A printed book"
type Book implements Node @auth(role: READER, scopes: ["books"]) {
  id: ID!
  title: String!
  author: Author
  tags: [String!]
  legacyCode: String @deprecated(reason: "use id")
}

type Author implements Node {
  id: ID!
  name: String!
  books: [Book!]!
}

type Loan {
  book: Book!
  due: Float
}

union SearchResult = Book | Author

input BookFilter {
  titleLike: String
  genre: Genre = FICTION
  published: DateRange
  exact: Boolean = null
}

input DateRange {
  from: Int
  to: Int
}

enum Genre {
  FICTION
  HISTORY
  POETRY @deprecated
}

enum Role {
  READER
  MEMBER
}
"#;

fn assert_kind_matches(schema: &Schema, ty: &Type) {
    let named = ty.named_type();
    let definition = schema
        .get_type(&named.name)
        .unwrap_or_else(|| panic!("missing definition for {}", named.name));
    assert_eq!(named.kind, Some(definition.kind), "kind of {}", named.name);
}

#[test]
fn test_every_type_reference_matches_its_definition_kind() {
    let schema = build(LIBRARY);

    for definition in schema.definitions() {
        for field in &definition.fields {
            assert_kind_matches(&schema, &field.ty);
            for argument in &field.arguments {
                assert_kind_matches(&schema, &argument.ty);
            }
        }
        for input_field in &definition.input_fields {
            assert_kind_matches(&schema, &input_field.ty);
        }
    }
    for directive in &schema.directives {
        for argument in &directive.arguments {
            assert_kind_matches(&schema, &argument.ty);
        }
    }
}

#[test]
fn test_builtin_types_are_present_before_filtering() {
    let schema = build(LIBRARY);
    for name in ["String", "Int", "Float", "Boolean", "ID", "__Schema", "__Type"] {
        assert!(schema.types.contains_key(name), "{name} should be present");
    }
    assert!(schema.get_directive("deprecated").is_some());
    assert!(schema.get_directive("skip").is_some());
}

#[test]
fn test_root_operation_names_and_description() {
    let schema = build(LIBRARY);
    assert_eq!(schema.query_type_name.as_deref(), Some("Query"));
    assert_eq!(schema.mutation_type_name.as_deref(), Some("Mutation"));
    assert_eq!(schema.subscription_type_name, None);
    assert_eq!(schema.description.as_deref(), Some("A small lending library"));
}

#[test]
fn test_member_lists_follow_kind() {
    let schema = build(LIBRARY);

    let book = &schema.types["Book"];
    assert_eq!(book.kind, DefinitionKind::Object);
    assert_eq!(book.interfaces, vec!["Node"]);
    assert_eq!(book.fields.len(), 5);
    assert!(book.input_fields.is_empty());
    assert!(book.possible_types.is_empty());
    assert_eq!(book.description.as_deref(), Some("A printed book"));

    let node = &schema.types["Node"];
    assert_eq!(node.kind, DefinitionKind::Interface);
    assert_eq!(node.possible_types, vec!["Book", "Author"]);

    let result = &schema.types["SearchResult"];
    assert_eq!(result.possible_types, vec!["Book", "Author"]);
    assert!(result.fields.is_empty());

    let filter = &schema.types["BookFilter"];
    assert_eq!(filter.kind, DefinitionKind::InputObject);
    assert_eq!(filter.input_fields.len(), 4);
    assert!(filter.fields.is_empty());

    let genre = &schema.types["Genre"];
    let values: Vec<_> = genre.enum_values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(values, vec!["FICTION", "HISTORY", "POETRY"]);
    assert_eq!(genre.enum_values[2].directives[0].name, "deprecated");
}

#[test]
fn test_default_values_and_directive_arguments_are_decoded() {
    let schema = build(LIBRARY);

    let search = schema.types["Query"].field("search").unwrap();
    assert_eq!(search.argument("limit").unwrap().default_value, Some(json!(10)));
    assert_eq!(search.argument("filter").unwrap().default_value, None);

    let filter = &schema.types["BookFilter"];
    assert_eq!(
        filter.input_field("genre").unwrap().default_value,
        Some(json!("FICTION"))
    );
    assert_eq!(
        filter.input_field("exact").unwrap().default_value,
        Some(json!(null))
    );

    let book = &schema.types["Book"];
    assert_eq!(book.directives.len(), 1);
    let auth = &book.directives[0];
    assert_eq!(auth.name, "auth");
    assert_eq!(auth.arguments[0].name, "role");
    assert_eq!(auth.arguments[0].value, json!("READER"));
    assert_eq!(auth.arguments[1].value, json!(["books"]));

    let legacy = book.field("legacyCode").unwrap();
    assert_eq!(legacy.directives[0].arguments[0].value, json!("use id"));
}

#[test]
fn test_directive_definitions_are_sorted_and_described() {
    let schema = build(LIBRARY);
    let names: Vec<_> = schema.directives.iter().map(|d| d.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    let auth = schema.get_directive("auth").unwrap();
    assert!(auth.is_repeatable);
    assert_eq!(auth.locations, vec!["FIELD_DEFINITION", "OBJECT"]);
    assert_eq!(auth.arguments[0].default_value, Some(json!("READER")));
    assert_eq!(
        auth.arguments[0].ty.named_type().kind,
        Some(DefinitionKind::Enum)
    );
}

#[test]
fn test_filter_builtins() {
    let mut schema = build(LIBRARY);
    schema.filter_builtins();

    for name in schema.types.keys() {
        assert!(!name.starts_with("__"), "{name} should be filtered");
    }
    for name in ["String", "Int", "Float", "Boolean", "ID"] {
        assert!(!schema.types.contains_key(name), "{name} should be filtered");
    }
    for name in ["skip", "include", "deprecated", "specifiedBy", "defer"] {
        assert!(schema.get_directive(name).is_none(), "@{name} should be filtered");
    }
    assert!(schema.get_directive("auth").is_some());
    assert!(schema.types.contains_key("Book"));
    for definition in schema.definitions() {
        assert!(definition.fields.iter().all(|f| !f.name.starts_with("__")));
    }
}

#[test]
fn test_filter_builtins_strips_reserved_fields_from_surviving_types() {
    let mut schema = build("type Query { a: String }");
    let query = schema.types.get_mut("Query").unwrap();
    let mut reserved = query.fields[0].clone();
    reserved.name = "__internal".to_string();
    query.fields.push(reserved);

    schema.filter_builtins();
    let names: Vec<_> = schema.types["Query"]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["a"]);
}

#[test]
fn test_resolve_names() {
    let schema = build(LIBRARY);
    let resolved = schema
        .resolve_names(&["Book", "Query.search", "BookFilter.genre"])
        .unwrap();

    assert!(matches!(resolved[0], NameReference::Type { .. }));
    assert_eq!(resolved[0].type_name(), "Book");
    assert_eq!(resolved[0].field_name(), None);

    assert!(matches!(resolved[1], NameReference::Field { .. }));
    assert_eq!(resolved[1].to_string(), "Query.search");

    assert!(matches!(resolved[2], NameReference::InputField { .. }));
    assert_eq!(resolved[2].field_name(), Some("genre"));
}

#[test]
fn test_resolve_names_splits_on_first_dot_only() {
    let schema = build(LIBRARY);
    let err = schema.resolve_names(&["Book.author.name"]).unwrap_err();
    assert_eq!(err, ModelError::UnknownNames(vec!["Book.author.name".to_string()]));
}

#[test]
fn test_resolve_names_reports_every_unknown_name() {
    let schema = build(LIBRARY);
    let err = schema
        .resolve_names(&["Book", "Nope", "Query.missing", "book"])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown name(s): Nope, Query.missing, book"
    );
}

#[test]
fn test_json_shape() {
    let mut schema = build(
        r"
        type Query {
          items(first: Int = 5): [Item!]! @cacheControl(maxAge: 30)
        }
        type Item { id: ID! }
        directive @cacheControl(maxAge: Int) on FIELD_DEFINITION
        ",
    );
    schema.filter_builtins();

    let mut value = serde_json::to_value(&schema).unwrap();
    let directives = value
        .as_object_mut()
        .unwrap()
        .remove("directives")
        .unwrap();
    let cache_control = directives
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["name"] == "cacheControl")
        .unwrap();
    assert_eq!(
        cache_control,
        &json!({
            "name": "cacheControl",
            "arguments": [{
                "name": "maxAge",
                "type": {"kind": "SCALAR", "name": "Int"},
                "typeName": "Int",
                "underlyingTypeName": "Int"
            }],
            "locations": ["FIELD_DEFINITION"],
            "repeatable": false
        })
    );

    assert_eq!(
        value,
        json!({
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Item",
                    "fields": [{
                        "name": "id",
                        "type": {"kind": "NON_NULL", "ofType": {"kind": "SCALAR", "name": "ID"}},
                        "typeName": "ID!",
                        "underlyingTypeName": "ID"
                    }]
                },
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [{
                        "name": "items",
                        "type": {
                            "kind": "NON_NULL",
                            "ofType": {
                                "kind": "LIST",
                                "ofType": {
                                    "kind": "NON_NULL",
                                    "ofType": {"kind": "OBJECT", "name": "Item"}
                                }
                            }
                        },
                        "typeName": "[Item!]!",
                        "underlyingTypeName": "Item",
                        "arguments": [{
                            "name": "first",
                            "type": {"kind": "SCALAR", "name": "Int"},
                            "typeName": "Int",
                            "underlyingTypeName": "Int",
                            "defaultValue": 5
                        }],
                        "directives": [{
                            "name": "cacheControl",
                            "arguments": [{"name": "maxAge", "value": 30}]
                        }]
                    }]
                }
            ],
            "queryTypeName": "Query"
        })
    );
}
