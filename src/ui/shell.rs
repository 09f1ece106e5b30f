use dioxus::prelude::*;

use crate::app::{sync_session, AppServices, Route, APP_TITLE};
use crate::domain::Session;

#[component]
pub fn Shell(children: Element) -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    // Reading the signal re-renders the header after login and logout; the store decides.
    let display_name = session.with(|s| s.display_name().map(str::to_string));
    let signed_in_as = services
        .auth
        .is_authenticated()
        .then(|| display_name.unwrap_or_else(|| "Signed in".to_string()));
    let logo = services.storage.storage_url(Some("brand/logo.png"));

    let on_logout = {
        let services = services.clone();
        move |_| {
            let services = services.clone();
            spawn(async move {
                let target = services.auth.logout().await;
                sync_session(&services, session);
                if let Ok(route) = target.parse::<Route>() {
                    nav.replace(route);
                }
            });
        }
    };

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header { class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4",
                    div { class: "flex items-center gap-3",
                        img { class: "h-8 w-8", src: "{logo}", alt: "" }
                        h1 { class: "text-xl font-semibold tracking-tight", "{APP_TITLE}" }
                    }
                    nav { class: "flex items-center gap-2 text-sm",
                        NavButton { active: matches!(current_route, Route::Calculator {}), onclick: move |_| { nav.push(Route::Calculator {}); }, label: "Tax calculator" }
                        NavButton { active: matches!(current_route, Route::Valuations {}), onclick: move |_| { nav.push(Route::Valuations {}); }, label: "Valuations" }
                        NavButton { active: matches!(current_route, Route::Backoffice {} | Route::BackofficeAuth {}), onclick: move |_| { nav.push(Route::Backoffice {}); }, label: "Backoffice" }
                        if let Some(name) = signed_in_as {
                            span { class: "ml-4 text-slate-400", "{name}" }
                            button {
                                class: "rounded-lg border border-slate-700 px-3 py-1.5 text-slate-300 hover:border-rose-600 hover:text-rose-300",
                                onclick: on_logout,
                                "Log out"
                            }
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-indigo-500/60 bg-indigo-500/15 px-4 py-2 font-semibold text-indigo-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
