use jsonapi_decode::{
    decode, decode_bytes, DecodeConfig, Decoder, ErrorKind, MergeOutcome, Record, RecordSchema,
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq)]
struct Article {
    id: i64,
    title: String,
    word_count: i64,
    subtitle: Option<String>,
    author_id: i64,
    tags_ids: Vec<i64>,
}

impl Record for Article {
    fn schema() -> &'static RecordSchema<Self> {
        static SCHEMA: Lazy<RecordSchema<Article>> = Lazy::new(|| {
            RecordSchema::<Article>::builder("Article")
                .id(|a| &a.id, |a| &mut a.id)
                .attribute("Title", |a| &mut a.title)
                .attribute("WordCount", |a| &mut a.word_count)
                .attribute("Subtitle", |a| &mut a.subtitle)
                .to_one("AuthorID", |a| &mut a.author_id)
                .to_many("TagsIDs", |a| &mut a.tags_ids)
                .build()
                .unwrap()
        });
        &SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Bookmark {
    id: String,
    url: String,
    tags_ids: Vec<String>,
    owner_id: String,
}

impl Record for Bookmark {
    fn schema() -> &'static RecordSchema<Self> {
        static SCHEMA: Lazy<RecordSchema<Bookmark>> = Lazy::new(|| {
            RecordSchema::<Bookmark>::builder("Bookmark")
                .id(|b| &b.id, |b| &mut b.id)
                .attribute("URL", |b| &mut b.url)
                .to_many("TagsIDs", |b| &mut b.tags_ids)
                .to_one("OwnerID", |b| &mut b.owner_id)
                .build()
                .unwrap()
        });
        &SCHEMA
    }
}

fn article(id: i64, title: &str) -> Article {
    Article {
        id,
        title: title.to_string(),
        ..Article::default()
    }
}

#[test]
fn test_new_entry_is_appended() {
    let mut articles: Vec<Article> = Vec::new();
    let doc = json!({
        "articles": [{"title": "Hello", "word-count": 120, "subtitle": "Intro"}]
    });

    let outcome = decode(&doc, &mut articles).unwrap();

    assert_eq!(outcome, MergeOutcome { appended: 1, updated: 0 });
    assert_eq!(
        articles,
        vec![Article {
            title: "Hello".to_string(),
            word_count: 120,
            subtitle: Some("Intro".to_string()),
            ..Article::default()
        }]
    );
}

#[test]
fn test_upsert_by_identity_keeps_unspecified_fields() {
    let mut articles = vec![
        Article {
            word_count: 300,
            author_id: 5,
            ..article(42, "Before")
        },
        article(43, "Neighbour"),
    ];
    let doc = json!({"articles": [{"id": "42", "title": "After"}]});

    let outcome = decode(&doc, &mut articles).unwrap();

    assert_eq!(outcome, MergeOutcome { appended: 0, updated: 1 });
    assert_eq!(articles.len(), 2);
    assert_eq!(
        articles[0],
        Article {
            word_count: 300,
            author_id: 5,
            ..article(42, "After")
        }
    );
    assert_eq!(articles[1], article(43, "Neighbour"));
}

#[test]
fn test_integer_identity_matches_string_id() {
    let mut articles = vec![article(42, "Existing")];
    let doc = json!({"articles": [{"id": "42", "word-count": 9}]});

    decode(&doc, &mut articles).unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 42);
    assert_eq!(articles[0].word_count, 9);
}

#[test]
fn test_to_many_string_ids() {
    let mut bookmarks: Vec<Bookmark> = Vec::new();
    let doc = json!({"bookmarks": [{"id": "1", "links": {"tags": ["10", "11"]}}]});

    decode(&doc, &mut bookmarks).unwrap();

    assert_eq!(bookmarks[0].id, "1");
    assert_eq!(bookmarks[0].tags_ids, vec!["10".to_string(), "11".to_string()]);
}

#[test]
fn test_to_many_integer_ids() {
    let mut articles: Vec<Article> = Vec::new();
    let doc = json!({"articles": [{"id": "1", "links": {"tags": ["10", "11"]}}]});

    decode(&doc, &mut articles).unwrap();
    assert_eq!(articles[0].tags_ids, vec![10, 11]);

    let bad = json!({"articles": [{"id": "1", "links": {"tags": ["10", "eleven"]}}]});
    let err = decode(&bad, &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert_eq!(articles[0].tags_ids, vec![10, 11]);
}

#[test]
fn test_to_one_relationship() {
    let mut articles: Vec<Article> = Vec::new();
    let doc = json!({"articles": [{"links": {"author": "7"}}]});

    decode(&doc, &mut articles).unwrap();
    assert_eq!(articles[0].author_id, 7);

    let mut bookmarks: Vec<Bookmark> = Vec::new();
    let doc = json!({"bookmarks": [{"links": {"owner": "u-7"}}]});
    decode(&doc, &mut bookmarks).unwrap();
    assert_eq!(bookmarks[0].owner_id, "u-7");
}

#[test]
fn test_to_one_conversion_failure_leaves_target_untouched() {
    let mut articles = vec![article(1, "Keep")];
    let doc = json!({"articles": [{"id": "1", "links": {"author": "seven"}}]});

    let err = decode(&doc, &mut articles).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(err.to_string().contains("AuthorID"));
    assert_eq!(articles, vec![article(1, "Keep")]);
}

#[test]
fn test_missing_collection_leaves_target_untouched() {
    let mut articles = vec![article(1, "Keep")];
    let doc = json!({"article": [{"title": "Wrong key"}]});

    let err = decode(&doc, &mut articles).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingCollection);
    assert!(err.to_string().contains("'articles'"));
    assert_eq!(articles, vec![article(1, "Keep")]);
}

#[test]
fn test_unknown_field_is_atomic() {
    let mut articles = vec![article(1, "Keep")];
    let doc = json!({
        "articles": [
            {"id": "1", "title": "Changed"},
            {"title": "Appended"},
            {"title": "Broken", "colour": "red"}
        ]
    });

    let err = decode(&doc, &mut articles).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(err.to_string().contains("Colour"));
    assert!(err.to_string().contains("declared: AuthorID, ID, Subtitle, TagsIDs, Title, WordCount"));
    assert_eq!(articles, vec![article(1, "Keep")]);
}

#[test]
fn test_identity_must_be_a_string() {
    let mut articles: Vec<Article> = Vec::new();
    let err = decode(&json!({"articles": [{"id": 1}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("id must be a string"));

    let err = decode(&json!({"articles": [{"id": null}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_integer_identity_conversion_failure() {
    let mut articles: Vec<Article> = Vec::new();
    let err = decode(&json!({"articles": [{"id": "abc"}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);
    assert!(articles.is_empty());
}

#[test]
fn test_attribute_type_mismatch() {
    let mut articles: Vec<Article> = Vec::new();
    let err = decode(&json!({"articles": [{"word-count": "many"}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("WordCount"));

    decode(&json!({"articles": [{"subtitle": null}]}), &mut articles).unwrap();
    assert_eq!(articles[0].subtitle, None);
}

#[test]
fn test_relationship_errors() {
    let mut articles: Vec<Article> = Vec::new();

    let err = decode(&json!({"articles": [{"links": ["author"]}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    let err = decode(&json!({"articles": [{"links": {"editor": "1"}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(err.to_string().contains("EditorIDs"));
    assert!(err.to_string().contains("declared: AuthorID, ID"));

    let err = decode(&json!({"articles": [{"links": {"tags": [10, 11]}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = decode(&json!({"articles": [{"links": {"author": 7}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = decode(&json!({"articles": [{"links": {"author": null}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = decode(&json!({"articles": [{"links": {"author": [7]}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = decode(&json!({"articles": [{"links": {"author": ["7"]}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    let err = decode(&json!({"articles": [{"links": {"tags": "10"}}]}), &mut articles).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);

    assert!(articles.is_empty());
}

#[test]
fn test_duplicate_identities_first_match_wins() {
    let mut articles = vec![article(7, "First"), article(7, "Second")];

    decode(&json!({"articles": [{"id": "7", "title": "Updated"}]}), &mut articles).unwrap();

    assert_eq!(articles[0].title, "Updated");
    assert_eq!(articles[1].title, "Second");
}

#[test]
fn test_new_records_keep_document_order() {
    let mut articles = vec![article(1, "Existing")];
    let doc = json!({
        "articles": [
            {"id": "3", "title": "Third"},
            {"id": "2", "title": "Second"},
            {"title": "No id"}
        ]
    });

    decode(&doc, &mut articles).unwrap();

    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Existing", "Third", "Second", "No id"]);
}

#[test]
fn test_decode_bytes() {
    let mut bookmarks: Vec<Bookmark> = Vec::new();
    let raw = br#"{"bookmarks": [{"id": "b1", "url": "https://example.com"}]}"#;

    decode_bytes(raw, &mut bookmarks).unwrap();
    assert_eq!(bookmarks[0].url, "https://example.com");

    let err = decode_bytes(b"{\"bookmarks\": [", &mut bookmarks).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_eq!(bookmarks.len(), 1);
}

#[test]
fn test_custom_config() {
    let decoder = Decoder::new(DecodeConfig {
        separator: String::from("_"),
        id_key: String::from("uid"),
        links_key: String::from("relationships"),
        ..DecodeConfig::default()
    });
    let mut articles = vec![article(4, "Old")];
    let doc = json!({
        "articles": [
            {"uid": "4", "word_count": 10, "relationships": {"tags": ["1"]}}
        ]
    });

    decoder.decode(&doc, &mut articles).unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].word_count, 10);
    assert_eq!(articles[0].tags_ids, vec![1]);
}
