/// Quickstart example - decode a document twice into the same collection
use jsonapi_decode::{Decoder, Record, RecordSchema};
use once_cell::sync::Lazy;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
struct BlogPost {
    id: i64,
    title: String,
    body: String,
    author_id: i64,
    comments_ids: Vec<String>,
}

impl Record for BlogPost {
    fn schema() -> &'static RecordSchema<Self> {
        static SCHEMA: Lazy<RecordSchema<BlogPost>> = Lazy::new(|| {
            RecordSchema::<BlogPost>::builder("BlogPost")
                .id(|p| &p.id, |p| &mut p.id)
                .attribute("Title", |p| &mut p.title)
                .attribute("Body", |p| &mut p.body)
                .to_one("AuthorID", |p| &mut p.author_id)
                .to_many("CommentsIDs", |p| &mut p.comments_ids)
                .build()
                .expect("valid BlogPost schema")
        });
        &SCHEMA
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== JSON:API Decode Quick Start ===\n");

    let decoder = Decoder::default();
    println!("Collection key: {}\n", decoder.collection_name::<BlogPost>());

    // Step 1: Initial load
    let first = json!({
        "blog-posts": [
            {
                "id": "1",
                "title": "Hello",
                "body": "First post",
                "links": {"author": "7", "comments": ["c1", "c2"]}
            },
            {"id": "2", "title": "Drafts", "body": "Work in progress"}
        ]
    });

    let mut posts: Vec<BlogPost> = Vec::new();
    let outcome = decoder.decode(&first, &mut posts)?;
    println!("Initial load: {} appended, {} updated", outcome.appended, outcome.updated);

    // Step 2: Partial update of post 2, plus a new post
    let second = json!({
        "blog-posts": [
            {"id": "2", "title": "Published"},
            {"id": "3", "title": "Third", "links": {"author": "8"}}
        ]
    });
    let outcome = decoder.decode(&second, &mut posts)?;
    println!("Update: {} appended, {} updated\n", outcome.appended, outcome.updated);

    for post in &posts {
        println!("{:?}", post);
    }

    // Step 3: A failing document leaves the collection untouched
    let broken = json!({"blog-posts": [{"id": "1", "rating": 5}]});
    if let Err(e) = decoder.decode(&broken, &mut posts) {
        println!("\nRejected: {}", e);
        println!("Still {} posts", posts.len());
    }

    Ok(())
}
