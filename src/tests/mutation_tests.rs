use arcstr::literal;
use pretty_assertions::assert_eq;

use crate::{
    ArgumentBindingError, FieldError, RawArguments, SharedRegistry,
    tests::fixtures::blog::{self, Database, DuplicateTitle, Post},
};

fn create_post_args(json: &str) -> RawArguments {
    serde_json::from_str(json).unwrap()
}

#[test]
fn missing_required_argument_names_it() {
    let registry: SharedRegistry = blog::registry();
    let fields = blog::mutation_fields(&registry);
    let db = Database::new();

    let err = fields
        .get("createPost")
        .unwrap()
        .run_mutation(&db, &create_post_args(r#"{"title": "Hello"}"#))
        .unwrap_err();

    assert_eq!(
        err.as_binding_error(),
        Some(&ArgumentBindingError::Missing {
            names: vec![literal!("body"), literal!("authorId")],
        }),
    );
    assert_eq!(db.post_count(), 3);
}

#[test]
fn runs_mutation_then_projects() {
    let registry: SharedRegistry = blog::registry();
    let fields = blog::mutation_fields(&registry);
    let db = Database::new();
    let create = fields.get("createPost").unwrap();
    assert!(create.has_mutation());

    let raw = create_post_args(
        r#"{"title": "Hello", "body": "First!", "authorId": 2, "tags": "intro"}"#,
    );
    create.run_mutation(&db, &raw).unwrap();
    assert_eq!(db.post_count(), 4);

    let post = create
        .bind_and_project(&raw)
        .unwrap()
        .apply_as::<Option<Post>>(&db, &())
        .unwrap()
        .unwrap();
    assert_eq!(post.body, "First!");
    assert_eq!(post.author_id, crate::ID::new("2"));
    assert_eq!(post.tags, ["intro"]);
}

#[test]
fn mutation_error_is_passed_through() {
    let registry: SharedRegistry = blog::registry();
    let fields = blog::mutation_fields(&registry);
    let db = Database::new();

    let err = fields
        .get("createPost")
        .unwrap()
        .run_mutation(
            &db,
            &create_post_args(r#"{"title": "Notes", "body": "again", "authorId": "1"}"#),
        )
        .unwrap_err();

    match err {
        FieldError::Mutation { field, source } => {
            assert_eq!(field, "createPost");
            let source = source.downcast::<DuplicateTitle>().unwrap();
            assert_eq!(source.0, "Notes");
        }
        e => panic!("expected a mutation error, found: {e}"),
    }
    assert_eq!(db.post_count(), 3);
}

#[test]
fn field_without_mutation_is_a_no_op() {
    let registry: SharedRegistry = blog::registry();
    let fields = blog::user_fields(&registry);
    let db = Database::new();
    let posts = fields.get("posts").unwrap();
    assert!(!posts.has_mutation());

    posts
        .run_mutation(&db, &create_post_args(r#"{"first": 1}"#))
        .unwrap();
    assert_eq!(db.post_count(), 3);

    // Arguments are still bound.
    let err = posts
        .run_mutation(&db, &create_post_args(r#"{"title": "Hello"}"#))
        .unwrap_err();
    assert!(err.as_binding_error().is_some());
}

#[test]
fn computed_once_field_has_no_mutation() {
    let registry: SharedRegistry = blog::registry();
    let fields = blog::mutation_fields(&registry);
    let version = fields.get("apiVersion").unwrap();

    assert!(!version.has_mutation());
    let err = version
        .run_mutation(&Database::new(), &RawArguments::new())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Field \"apiVersion\" is not a derived field",
    );
}
