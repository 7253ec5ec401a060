pub mod intro {
    use leptos::prelude::*;

    use crate::path::{PATH_FEED, PATH_MYTREE, PATH_SETTINGS};

    #[component]
    pub fn Page() -> impl IntoView {
        view! {
            <main class="flex flex-col items-center gap-4 py-16">
                <h1 class="text-[2rem] font-bold">"PostTree"</h1>
                <nav class="flex gap-4 underline">
                    <a href=PATH_FEED>"Feed"</a>
                    <a href=PATH_MYTREE>"MyTree"</a>
                    <a href=PATH_SETTINGS>"Settings"</a>
                </nav>
            </main>
        }
    }
}

pub mod main {
    use leptos::prelude::*;

    #[component]
    pub fn Page() -> impl IntoView {
        view! { <main></main> }
    }

    #[component]
    pub fn IdPage() -> impl IntoView {
        view! { <h1>"Main/id"</h1> }
    }
}

pub mod feed {
    use leptos::prelude::*;

    #[component]
    pub fn Page() -> impl IntoView {
        view! { <h1>"Feed"</h1> }
    }
}

pub mod post {
    use leptos::Params;
    use leptos::prelude::*;
    use leptos_router::hooks::use_params;
    use leptos_router::params::Params;

    use crate::app::components::post_panel::PostPanel;

    #[derive(Params, PartialEq, Clone)]
    pub struct PostParams {
        pub id: Option<String>,
    }

    #[component]
    pub fn Page() -> impl IntoView {
        let param = use_params::<PostParams>();
        let post_id = Memo::new(move |_| param.read().as_ref().ok().and_then(|v| v.id.clone()));

        view! {
            <main class="py-8">
                <PostPanel post_id />
            </main>
        }
    }
}

pub mod mytree {
    use leptos::prelude::*;

    #[component]
    pub fn Page() -> impl IntoView {
        view! { <h1>"MyTree"</h1> }
    }
}

pub mod settings {
    use leptos::prelude::*;

    #[component]
    pub fn Page() -> impl IntoView {
        view! { <h1>"Settings"</h1> }
    }
}

pub mod not_found {
    use leptos::prelude::*;

    use crate::path::PATH_HOME;

    #[component]
    pub fn Page() -> impl IntoView {
        view! {
            <main class="flex flex-col items-center gap-4 py-16">
                <h1>"NotFound"</h1>
                <a href=PATH_HOME class="underline">"Home"</a>
            </main>
        }
    }
}
