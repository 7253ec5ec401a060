use bytes::Bytes;
use http::header::AUTHORIZATION;
use leptos::prelude::*;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, trace};

use crate::path::{
    PATH_API_COMMENT_CREATE, PATH_API_COMMENT_DELETE, PATH_API_LIKE_CREATE, PATH_API_LIKE_DELETE,
    link_api_post,
};
use crate::settings::{Settings, SettingsErr};

pub mod client;

pub mod path {
    pub const PATH_API: &'static str = "/api";
    pub const PATH_API_POSTS: &'static str = "/posts";
    pub const PATH_API_COMMENT_CREATE: &'static str = "/comments/create";
    pub const PATH_API_COMMENT_DELETE: &'static str = "/comments/delete";
    pub const PATH_API_LIKE_CREATE: &'static str = "/likes/create";
    pub const PATH_API_LIKE_DELETE: &'static str = "/likes/delete";

    pub fn link_api_post(post_id: impl AsRef<str>) -> String {
        format!("{}/{}", PATH_API_POSTS, post_id.as_ref())
    }
}

pub mod settings {
    use config::{Config, Environment, File};
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum SettingsErr {
        #[error("config err {0}")]
        Config(#[from] config::ConfigError),
    }

    #[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Settings {
        pub api: Api,
    }

    #[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    pub struct Api {
        pub origin: String,
        pub prefix: String,
    }

    impl Settings {
        /// Reads `posttree.{toml,json,..}` when present, then `POSTTREE__API__ORIGIN` style overrides.
        pub fn new_from_file() -> Result<Self, SettingsErr> {
            let settings = Config::builder()
                .set_default("api.origin", "http://localhost:3000")?
                .set_default("api.prefix", crate::path::PATH_API)?
                .add_source(File::with_name("posttree").required(false))
                .add_source(Environment::with_prefix("POSTTREE").separator("__"))
                .build()?
                .try_deserialize()?;

            Ok(settings)
        }

        pub fn new_from_origin(origin: impl Into<String>) -> Self {
            Self {
                api: Api {
                    origin: origin.into(),
                    prefix: crate::path::PATH_API.to_string(),
                },
            }
        }

        pub fn new_testing(origin: impl AsRef<str>) -> Self {
            Self::new_from_origin(origin.as_ref().trim_end_matches('/'))
        }

        pub fn url(&self, path: impl AsRef<str>) -> String {
            format!("{}{}{}", self.api.origin, self.api.prefix, path.as_ref())
        }
    }

    #[cfg(test)]
    mod settings_tests {
        use pretty_assertions::assert_eq;
        use test_log::test;

        use super::Settings;

        #[test]
        fn test_settings_url() {
            let settings = Settings::new_testing("http://127.0.0.1:4000/");
            assert_eq!(settings.url("/posts/p1"), "http://127.0.0.1:4000/api/posts/p1");
        }

        #[test]
        fn test_settings_defaults() {
            let settings = Settings::new_from_file().unwrap();
            assert_eq!(settings.api.prefix, "/api");
            assert!(!settings.api.origin.is_empty());
        }

        #[test]
        fn test_native_api_from_file() {
            let api = crate::ApiNative::new_from_file().unwrap();
            assert_eq!(api.settings, Settings::new_from_file().unwrap());
            assert_eq!(
                api.settings.url("/posts/p1"),
                format!("{}/api/posts/p1", api.settings.api.origin)
            );
        }
    }
}

pub mod session {
    /// Current user as handed over by whoever signs the user in.
    #[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct Session {
        pub id: String,
        pub email: String,
        pub token: String,
    }

    impl Session {
        pub fn new(
            id: impl Into<String>,
            email: impl Into<String>,
            token: impl Into<String>,
        ) -> Self {
            Self {
                id: id.into(),
                email: email.into(),
                token: token.into(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ServerReq {
    None,
    AddComment {
        comment: String,
        #[serde(rename = "postId")]
        post_id: String,
    },
    AddLike {
        #[serde(rename = "postId")]
        post_id: String,
    },
    Id {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl ServerReq {
    pub fn has_body(&self) -> bool {
        !matches!(self, ServerReq::None)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiErr {
    #[error("client err {0}")]
    ClientErr(#[from] ClientErr),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientErr {
    #[error("failed to deserialize res {0}")]
    ClientDesErr(String),

    #[error("failed to send req {0}")]
    ClientSendErr(String),
}

pub trait Api {
    fn provide_builder(&self, method: Method, path: impl AsRef<str>) -> RequestBuilder;

    fn into_req(&self, method: Method, path: impl AsRef<str>, req: ServerReq) -> ApiReq {
        ApiReq::from_api(self, method, path, req)
    }

    // post

    fn get_post(&self, post_id: impl AsRef<str>) -> ApiReq {
        self.into_req(Method::GET, link_api_post(post_id), ServerReq::None)
    }

    // post comment

    fn add_post_comment(&self, post_id: impl Into<String>, comment: impl Into<String>) -> ApiReq {
        self.into_req(
            Method::POST,
            PATH_API_COMMENT_CREATE,
            ServerReq::AddComment {
                comment: comment.into(),
                post_id: post_id.into(),
            },
        )
    }

    fn delete_post_comment(&self, comment_id: impl Into<String>) -> ApiReq {
        self.into_req(
            Method::DELETE,
            PATH_API_COMMENT_DELETE,
            ServerReq::Id {
                id: Some(comment_id.into()),
            },
        )
    }

    // post like

    fn add_post_like(&self, post_id: impl Into<String>) -> ApiReq {
        self.into_req(
            Method::POST,
            PATH_API_LIKE_CREATE,
            ServerReq::AddLike {
                post_id: post_id.into(),
            },
        )
    }

    fn delete_post_like(&self, like_id: Option<String>) -> ApiReq {
        self.into_req(
            Method::DELETE,
            PATH_API_LIKE_DELETE,
            ServerReq::Id { id: like_id },
        )
    }
}

pub struct ApiReq {
    pub builder: RequestBuilder,
    pub server_req: ServerReq,
}

impl ApiReq {
    pub fn from_api<A>(api: &A, method: Method, url: impl AsRef<str>, req: ServerReq) -> Self
    where
        A: Api + ?Sized,
    {
        let builder = api.provide_builder(method, url.as_ref());
        ApiReq {
            builder,
            server_req: req,
        }
    }

    pub async fn send_native<T: DeserializeOwned>(self) -> Result<T, ApiErr> {
        let bytes = send(self.builder, self.server_req, None::<&str>).await?;
        decode(&bytes)
    }

    pub async fn send_native_with_token<T: DeserializeOwned>(
        self,
        auth_token: impl AsRef<str>,
    ) -> Result<T, ApiErr> {
        let bytes = send(self.builder, self.server_req, Some(auth_token)).await?;
        decode(&bytes)
    }

    /// For calls whose response body carries nothing the client needs.
    pub async fn send_native_with_token_empty(
        self,
        auth_token: impl AsRef<str>,
    ) -> Result<(), ApiErr> {
        send(self.builder, self.server_req, Some(auth_token)).await?;
        Ok(())
    }
}

#[derive(Clone, Copy, Default)]
pub struct ApiWeb {}

impl Api for ApiWeb {
    fn provide_builder(&self, method: Method, path: impl AsRef<str>) -> RequestBuilder {
        let origin = location()
            .origin()
            .inspect_err(|err| error!("failed to read window origin {err:?}"))
            .unwrap_or_default();
        let url = Settings::new_from_origin(origin).url(path);
        reqwest::Client::new().request(method, url)
    }
}

impl ApiWeb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Clone)]
pub struct ApiNative {
    pub settings: Settings,
    pub client: reqwest::Client,
}

impl Api for ApiNative {
    fn provide_builder(&self, method: Method, path: impl AsRef<str>) -> RequestBuilder {
        self.client.request(method, self.settings.url(path))
    }
}

impl ApiNative {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    /// Native client configured from the `posttree` file and `POSTTREE__*` env.
    pub fn new_from_file() -> Result<Self, SettingsErr> {
        let settings = Settings::new_from_file()?;
        trace!("native api at {}{}", settings.api.origin, settings.api.prefix);

        Ok(Self::new(settings))
    }
}

pub fn create_auth_header(token: impl AsRef<str>) -> String {
    format!("Bearer {}", token.as_ref())
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiErr> {
    serde_json::from_slice::<T>(bytes)
        .inspect_err(|err| error!("client failed to decode {err}"))
        .map_err(|err| ApiErr::from(ClientErr::ClientDesErr(err.to_string())))
}

pub async fn send(
    mut req_builder: RequestBuilder,
    req: ServerReq,
    token: Option<impl AsRef<str>>,
) -> Result<Bytes, ApiErr> {
    debug!("CLIENT SEND:\n{req:?}");
    if let Some(token) = token {
        req_builder = req_builder.header(AUTHORIZATION, create_auth_header(token));
    }
    if req.has_body() {
        req_builder = req_builder.json(&req);
    }
    let res = req_builder
        .send()
        .await
        .inspect_err(|err| error!("client failed to send {err}"))
        .map_err(|err| ClientErr::ClientSendErr(err.to_string()))?;

    let status = res.status();
    let bytes = res
        .bytes()
        .await
        .inspect_err(|err| error!("client byte stream status {status}\nerr: {err}"))
        .map_err(|err| ClientErr::ClientDesErr(err.to_string()))?;

    debug!(
        "CLIENT RECV:\nstatus: {status}\n{}",
        String::from_utf8_lossy(&bytes)
    );

    if !status.is_success() {
        trace!("non success status {status}");
        return Err(ApiErr::Status {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }

    Ok(bytes)
}
