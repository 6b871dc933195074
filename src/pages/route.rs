//! Route page wiring live sources to the route, summary, and log views.
//!
//! SYSTEM CONTEXT
//! ==============
//! `/route` and `/route_info` are polled, the activity log follows
//! `/data_stream`. Every source is started when the page mounts and stopped
//! when it unmounts, so no timer or channel outlives the page.

use leptos::prelude::*;

use crate::components::data_view::DataView;
use crate::components::info_panel::InfoPanel;
use crate::components::log_panel::LogPanel;
use crate::components::source_banner::{SourceBanner, banner_for};
use crate::config::ClientConfig;
use crate::net::dispatch::ActionDispatcher;
use crate::net::types::{Location, RouteInfo, StreamEnvelope};
use crate::state::source::SourceState;

#[component]
pub fn RoutePage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let dispatcher = expect_context::<ActionDispatcher>();

    let route = RwSignal::new(SourceState::<Vec<Location>>::default());
    let route_info = RwSignal::new(SourceState::<Option<RouteInfo>>::default());
    let stream = RwSignal::new(SourceState::<StreamEnvelope>::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::HttpBackend;
        use crate::net::polling::start_polling_source;
        use crate::net::stream::start_stream_source;
        use crate::net::types::{decode_route, decode_route_info, decode_stream_envelope};

        let backend = HttpBackend::new(config.api_base.clone());
        let route_handle =
            start_polling_source(route, backend.clone(), config.route_path.clone(), config.route_poll, decode_route);
        let info_handle = start_polling_source(
            route_info,
            backend,
            config.route_info_path.clone(),
            config.route_info_poll,
            decode_route_info,
        );
        let stream_handle =
            start_stream_source(stream, config.url(&config.stream_path), config.reconnect, decode_stream_envelope);
        on_cleanup(move || {
            route_handle.stop();
            info_handle.stop();
            stream_handle.stop();
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = &config;
    }

    let locations = Signal::derive(move || route.with(|s| s.payload.clone().unwrap_or_default()));
    let info = Signal::derive(move || route_info.with(|s| s.payload.flatten()));
    let log = Signal::derive(move || stream.with(|s| s.payload.as_ref().map(|e| e.log.clone()).unwrap_or_default()));

    let create_status = RwSignal::new(None::<String>);
    let on_create = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let dispatcher = dispatcher.clone();
            leptos::task::spawn_local(async move {
                let message = dispatcher.create_route().await;
                let _ = create_status.try_set(Some(message));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &dispatcher;
        }
    };

    view! {
        <div class="route-page">
            <section class="route-page__route">
                <div class="route-page__controls">
                    <button class="route-page__create" on:click=on_create>"Create route"</button>
                    <span class="route-page__status">{move || create_status.get()}</span>
                </div>
                <SourceBanner banner=Signal::derive(move || route.with(banner_for)) />
                <DataView locations=locations />
            </section>
            <section class="route-page__info">
                <SourceBanner banner=Signal::derive(move || route_info.with(banner_for)) />
                <InfoPanel info=info />
            </section>
            <section class="route-page__log">
                <SourceBanner banner=Signal::derive(move || stream.with(banner_for)) />
                <LogPanel lines=log />
            </section>
        </div>
    }
}
