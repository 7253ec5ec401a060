use jiff::Timestamp;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthorErr {
    #[error("failed to decode author fullName {0}")]
    FullName(String),
}

/// Author as the panel displays it, with `fullName` already decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawAuthor", into = "RawAuthor")]
pub struct Author {
    pub email: String,
    pub display_name: String,
}

/// Author as the remote API sends it. `full_name` is a JSON document of its own.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthor {
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FullName {
    pub name: String,
}

impl TryFrom<RawAuthor> for Author {
    type Error = AuthorErr;

    fn try_from(value: RawAuthor) -> Result<Self, Self::Error> {
        let full_name = serde_json::from_str::<FullName>(&value.full_name)
            .map_err(|err| AuthorErr::FullName(err.to_string()))?;

        Ok(Self {
            email: value.email,
            display_name: full_name.name,
        })
    }
}

impl From<Author> for RawAuthor {
    fn from(value: Author) -> Self {
        Self {
            email: value.email,
            full_name: serde_json::json!({ "name": value.display_name }).to_string(),
        }
    }
}

impl Author {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "comment")]
    pub text: String,
    pub author: Author,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
}

impl Like {
    pub fn new(id: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Post {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    pub author: Author,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: Vec<Like>,
}

#[cfg(test)]
mod model_tests {
    use pretty_assertions::assert_eq;
    use test_log::test;

    use super::{Author, Comment, Like, Post};

    #[test]
    fn test_author_decodes_full_name() {
        let author: Author = serde_json::from_str(
            r#"{ "_id": "u1", "email": "kim@tree.dev", "fullName": "{\"name\":\"Kim\"}" }"#,
        )
        .unwrap();

        assert_eq!(author, Author::new("kim@tree.dev", "Kim"));
    }

    #[test]
    fn test_author_rejects_flat_full_name() {
        let result = serde_json::from_str::<Author>(r#"{ "email": "kim@tree.dev", "fullName": "Kim" }"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_author_encodes_full_name() {
        let value = serde_json::to_value(Author::new("kim@tree.dev", "Kim")).unwrap();
        let full_name = value["fullName"].as_str().unwrap();

        assert_eq!(value["email"], "kim@tree.dev");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(full_name).unwrap(),
            serde_json::json!({ "name": "Kim" })
        );
    }

    #[test]
    fn test_post_from_wire() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "title": "first post",
            "author": { "email": "kim@tree.dev", "fullName": "{\"name\":\"Kim\"}" },
            "comments": [
                {
                    "_id": "c1",
                    "comment": "hello",
                    "author": { "email": "lee@tree.dev", "fullName": "{\"name\":\"Lee\"}" },
                    "createdAt": "2021-12-01T10:00:00.000Z"
                }
            ],
            "likes": [ { "_id": "l1", "user": "u2", "post": "p1" } ]
        }))
        .unwrap();

        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "first post");
        assert_eq!(post.author.display_name, "Kim");
        assert_eq!(
            post.comments,
            vec![Comment {
                id: "c1".to_string(),
                text: "hello".to_string(),
                author: Author::new("lee@tree.dev", "Lee"),
                created_at: "2021-12-01T10:00:00Z".parse().unwrap(),
            }]
        );
        assert_eq!(post.likes, vec![Like::new("l1", "u2")]);
    }

    #[test]
    fn test_post_without_lists() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "title": "bare",
            "author": { "email": "kim@tree.dev", "fullName": "{\"name\":\"Kim\"}" }
        }))
        .unwrap();

        assert!(post.comments.is_empty());
        assert!(post.likes.is_empty());
    }
}
