use std::sync::{Arc, RwLock};

use derive_more::with_trait::{Display, Error};

use crate::{BoxError, Field, FieldSet, ID, SchemaRegistry, SharedRegistry, meta::MetaType};

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    pub id: ID,
    pub title: String,
    pub body: String,
    pub author_id: ID,
    pub tags: Vec<String>,
}

graphql_output!(User, Post);

#[derive(Debug, Display, Error)]
#[display("Post titled \"{_0}\" already exists")]
pub struct DuplicateTitle(#[error(not(source))] pub String);

#[derive(Debug)]
pub struct Database {
    users: Vec<User>,
    posts: RwLock<Vec<Post>>,
}

impl Database {
    pub fn new() -> Self {
        let ada = ID::new("1");
        let alan = ID::new("2");
        let post = |id: &str, title: &str, author_id: &ID, tags: &[&str]| Post {
            id: ID::new(id),
            title: title.into(),
            body: format!("All about {title}."),
            author_id: author_id.clone(),
            tags: tags.iter().map(|&t| t.into()).collect(),
        };

        Self {
            users: vec![
                User {
                    id: ada.clone(),
                    name: "Ada".into(),
                },
                User {
                    id: alan.clone(),
                    name: "Alan".into(),
                },
            ],
            posts: RwLock::new(vec![
                post("10", "Engines", &ada, &["math", "machines"]),
                post("11", "Notes", &ada, &["math"]),
                post("12", "Computable numbers", &alan, &["math", "logic"]),
            ]),
        }
    }

    pub fn user(&self, id: &ID) -> Option<User> {
        self.users.iter().find(|u| &u.id == id).cloned()
    }

    pub fn posts_by(&self, author_id: &ID) -> Vec<Post> {
        self.posts
            .read()
            .unwrap()
            .iter()
            .filter(|p| &p.author_id == author_id)
            .cloned()
            .collect()
    }

    pub fn post_titled(&self, title: &str) -> Option<Post> {
        self.posts
            .read()
            .unwrap()
            .iter()
            .find(|p| p.title == title)
            .cloned()
    }

    pub fn post_count(&self) -> usize {
        self.posts.read().unwrap().len()
    }

    pub fn insert_post(&self, args: CreatePostArgs) -> Result<(), BoxError> {
        let mut posts = self.posts.write().unwrap();
        if posts.iter().any(|p| p.title == args.title) {
            return Err(DuplicateTitle(args.title).into());
        }
        let id = ID::new((posts.len() + 10).to_string());
        posts.push(Post {
            id,
            title: args.title,
            body: args.body,
            author_id: args.author_id,
            tags: args.tags,
        });
        Ok(())
    }
}

graphql_arguments! {
    #[derive(Clone, Debug)]
    pub struct PostsArgs {
        /// Maximum number of posts to return.
        pub first: i32 = 10,
        /// Only return posts with this tag.
        pub tag: Option<String>,
    }
}

graphql_arguments! {
    #[derive(Clone, Debug)]
    pub struct CreatePostArgs {
        pub title: String,
        pub body: String,
        pub author_id: ID,
        pub tags: Vec<String> = Vec::<String>::new(),
    }
}

/// Registry knowing the builtin scalars, `User` and `Post`.
pub fn registry() -> Arc<SchemaRegistry> {
    let registry = SchemaRegistry::new();
    registry.register::<User>(MetaType::object("User").description("A blog author"));
    registry.register::<Post>(MetaType::object("Post"));
    Arc::new(registry)
}

pub fn user_fields(registry: &SharedRegistry) -> FieldSet<Database, User> {
    let mut fields = FieldSet::new("User");
    fields
        .add(
            Field::derived(registry, "name", |(): ()| {
                |_: &Database, u: &User| u.name.clone()
            })
            .unwrap(),
        )
        .unwrap();
    fields
        .add(
            Field::derived(registry, "posts", |args: PostsArgs| {
                move |db: &Database, u: &User| {
                    db.posts_by(&u.id)
                        .into_iter()
                        .filter(|p| args.tag.as_ref().is_none_or(|t| p.tags.contains(t)))
                        .take(usize::try_from(args.first).unwrap_or(0))
                        .collect::<Vec<_>>()
                }
            })
            .unwrap()
            .description("Posts written by the user"),
        )
        .unwrap();
    fields
}

pub fn post_fields(registry: &SharedRegistry) -> FieldSet<Database, Post> {
    let mut fields = FieldSet::new("Post");
    fields
        .add(
            Field::derived(registry, "title", |(): ()| {
                |_: &Database, p: &Post| p.title.clone()
            })
            .unwrap(),
        )
        .unwrap();
    fields
        .add(
            Field::derived(registry, "author", |(): ()| {
                |db: &Database, p: &Post| db.user(&p.author_id)
            })
            .unwrap(),
        )
        .unwrap();
    fields
}

pub fn mutation_fields(registry: &SharedRegistry) -> FieldSet<Database, ()> {
    let mut fields = FieldSet::new("Mutation");
    fields
        .add(
            Field::derived_with_mutation(
                registry,
                "createPost",
                |args: CreatePostArgs| move |db: &Database, _: &()| db.post_titled(&args.title),
                |db: &Database, args: CreatePostArgs| db.insert_post(args),
            )
            .unwrap(),
        )
        .unwrap();
    fields
        .add(Field::computed_once(registry, "apiVersion", || "1.2".to_owned()))
        .unwrap();
    fields
}
