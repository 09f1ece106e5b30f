use dioxus::prelude::*;

use crate::{
    app::{sync_session, AppServices},
    domain::{entities::WILDCARD_PERMISSION, Session},
    ui::components::notice::{push_notice, NoticeKind, NoticeMessage},
};

const MANAGE_VALUATIONS: &str = "valuations.manage";

#[component]
pub fn BackofficePage() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();
    let refreshing = use_signal(|| false);

    let Some(user) = session().user else {
        return rsx! { p { class: "text-sm text-slate-500", "No user details loaded yet." } };
    };
    let can_manage = services.auth.can(MANAGE_VALUATIONS);
    let is_superuser = user.has_permission(WILDCARD_PERMISSION);

    let on_refresh = {
        let services = services.clone();
        move |_| {
            let services = services.clone();
            let mut refreshing = refreshing;
            refreshing.set(true);
            spawn(async move {
                match services.auth.refresh_user().await {
                    Ok(_) => {
                        sync_session(&services, session);
                        push_notice(notices, NoticeKind::Info, "Profile refreshed.");
                    }
                    Err(err) => push_notice(notices, NoticeKind::Error, format!("Refresh failed: {err}")),
                }
                refreshing.set(false);
            });
        }
    };

    let role = user.role.clone().unwrap_or_else(|| "—".to_string());
    let phone = user.phone.clone().unwrap_or_else(|| "—".to_string());

    rsx! {
        div { class: "space-y-6",
            section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                div { class: "flex items-start justify-between gap-4",
                    div {
                        h2 { class: "text-lg font-semibold", "{user.name}" }
                        p { class: "text-sm text-slate-400", "{user.email}" }
                    }
                    button {
                        class: "rounded-lg border border-slate-700 px-3 py-1.5 text-sm hover:border-indigo-500",
                        disabled: refreshing(),
                        onclick: on_refresh,
                        if refreshing() { "Refreshing…" } else { "Refresh" }
                    }
                }
                dl { class: "mt-4 grid gap-2 text-sm sm:grid-cols-2",
                    div { dt { class: "text-xs uppercase text-slate-500", "Role" } dd { "{role}" } }
                    div { dt { class: "text-xs uppercase text-slate-500", "Phone" } dd { "{phone}" } }
                }
            }
            section { class: "rounded-xl border border-slate-800 p-6",
                h3 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Permissions" }
                if is_superuser {
                    p { class: "mt-2 text-sm text-emerald-300", "Full access" }
                } else if user.permissions.is_empty() {
                    p { class: "mt-2 text-sm text-slate-500", "None granted" }
                } else {
                    ul { class: "mt-2 flex flex-wrap gap-2",
                        for permission in user.permissions.iter() {
                            li { key: "{permission}", class: "rounded-md bg-slate-800 px-2 py-1 font-mono text-xs", "{permission}" }
                        }
                    }
                }
            }
            if can_manage {
                section { class: "rounded-xl border border-indigo-500/40 bg-indigo-500/5 p-6 text-sm",
                    h3 { class: "font-semibold", "Valuation management" }
                    p { class: "mt-1 text-slate-400", "Your account may upload and review valuation batches." }
                }
            }
        }
    }
}
