//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::dispatch::ActionDispatcher;
use crate::pages::route::RoutePage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the client configuration and the command dispatcher to every
/// page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    #[cfg(feature = "hydrate")]
    let config = ClientConfig::from_document();
    #[cfg(not(feature = "hydrate"))]
    let config = ClientConfig::default();

    provide_context(ActionDispatcher::http(&config.api_base));
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/tradeview.css"/>
        <Title text="Tradeview"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=RoutePage/>
            </Routes>
        </Router>
    }
}
