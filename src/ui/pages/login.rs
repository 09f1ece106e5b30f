use dioxus::prelude::*;
use reqwest::StatusCode;

use crate::{
    app::{sync_session, AppServices, Route},
    domain::Session,
    ui::components::notice::{push_notice, NoticeKind, NoticeMessage},
};

#[component]
pub fn LoginPage() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let pending = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        let secret = password();
        if address.is_empty() || secret.is_empty() {
            push_notice(notices, NoticeKind::Warning, "Email and password are required.");
            return;
        }

        let services = services.clone();
        let mut pending = pending;
        let mut password = password;
        pending.set(true);
        spawn(async move {
            match services.auth.login(&address, &secret).await {
                Ok(user) => {
                    sync_session(&services, session);
                    password.set(String::new());
                    push_notice(notices, NoticeKind::Success, format!("Welcome back, {}.", user.name));
                    nav.replace(Route::Backoffice {});
                }
                Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) => {
                    push_notice(notices, NoticeKind::Error, "Incorrect email or password.")
                }
                Err(err) => push_notice(notices, NoticeKind::Error, format!("Sign-in failed: {err}")),
            }
            pending.set(false);
        });
    };

    rsx! {
        div { class: "mx-auto max-w-sm space-y-6",
            h2 { class: "text-lg font-semibold", "Backoffice sign-in" }
            form { class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                onsubmit: on_submit,
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Email" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        r#type: "email",
                        autocomplete: "username",
                        value: email(),
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Password" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: password(),
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "w-full rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400",
                    r#type: "submit",
                    disabled: pending(),
                    if pending() { "Signing in…" } else { "Sign in" }
                }
            }
        }
    }
}
