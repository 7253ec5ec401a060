use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use page::{feed, intro, main, mytree, not_found, post, settings};
use posttree_api::session::Session;
use posttree_shared::model::Like;
use tracing::{error, info, trace};

pub mod components;
pub mod hook;
pub mod page;

#[derive(Clone, Copy, Default, Debug)]
pub struct GlobalState {
    pub acc: RwSignal<Option<Acc>>,
}

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Acc {
    pub session: Session,
    pub likes: Vec<Like>,
}

impl GlobalState {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            acc: RwSignal::new(session.map(|session| Acc {
                session,
                likes: Vec::new(),
            })),
        }
    }

    /// Signed out users get an empty session, their token is never accepted.
    pub fn get_session_untracked(&self) -> Session {
        self.acc
            .with_untracked(|acc| acc.as_ref().map(|acc| acc.session.clone()))
            .unwrap_or_default()
    }

    pub fn get_session_tracked(&self) -> Session {
        self.acc
            .with(|acc| acc.as_ref().map(|acc| acc.session.clone()))
            .unwrap_or_default()
    }

    pub fn get_email_tracked(&self) -> Option<String> {
        self.acc
            .with(|acc| acc.as_ref().map(|acc| acc.session.email.clone()))
    }

    pub fn get_likes_untracked(&self) -> Vec<Like> {
        self.acc
            .with_untracked(|acc| acc.as_ref().map(|acc| acc.likes.clone()))
            .unwrap_or_default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.acc.with(|acc| acc.is_some())
    }

    pub fn sign_in(&self, session: Session) {
        info!("signed in as {}", session.email);
        let r = self.acc.try_set(Some(Acc {
            session,
            likes: Vec::new(),
        }));
        if r.is_some() {
            error!("global state acc was disposed somehow");
        }
    }

    pub fn sign_out(&self) {
        let r = self.acc.try_set(None);
        if r.is_some() {
            error!("global state acc was disposed somehow");
        }
    }

    pub fn set_likes(&self, likes: Vec<Like>) {
        trace!("user likes updated: {}", likes.len());
        let r = self.acc.try_update(|acc| {
            let Some(acc) = acc else {
                return;
            };
            acc.likes = likes;
        });
        if r.is_none() {
            error!("global state acc was disposed somehow");
        }
    }
}

#[component]
pub fn App(#[prop(optional)] session: Option<Session>) -> impl IntoView {
    provide_context(GlobalState::new(session));

    view! {
        <Router>
            <Routes fallback=not_found::Page>
                <Route path=path!("") view=intro::Page />
                <Route path=path!("/main") view=main::Page />
                <Route path=path!("/main/:id") view=main::IdPage />
                <Route path=path!("/feed") view=feed::Page />
                <Route path=path!("/feed/:id") view=post::Page />
                <Route path=path!("/mytree") view=mytree::Page />
                <Route path=path!("/settings") view=settings::Page />
            </Routes>
        </Router>
    }
}
