use dioxus::prelude::*;

use crate::{
    app::AppServices,
    domain::{ModelYear, TaxCalculatorPayload, TaxCalculatorResponse},
    ui::components::notice::{push_notice, NoticeKind, NoticeMessage},
    util::format::{format_currency, format_date},
};

const LOCAL_CURRENCY: &str = "UGX";

#[component]
pub fn CalculatorPage() -> Element {
    let services = use_context::<AppServices>();
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();

    let mut make = use_signal(String::new);
    let mut year = use_signal(String::new);
    let mut cif = use_signal(String::new);
    let mut is_luxury = use_signal(|| false);
    let mut is_ev = use_signal(|| false);
    let result = use_signal(|| None::<TaxCalculatorResponse>);
    let pending = use_signal(|| false);

    let batch = use_resource({
        let services = services.clone();
        move || {
            let services = services.clone();
            async move { services.tax.fetch_latest_batch_info().await }
        }
    });

    let on_submit = {
        let services = services.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let make_value = make().trim().to_string();
            if make_value.is_empty() {
                push_notice(notices, NoticeKind::Warning, "Enter the vehicle make first.");
                return;
            }
            let cif_value = match cif().trim() {
                "" => None,
                raw => match raw.replace(',', "").parse::<f64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        push_notice(notices, NoticeKind::Warning, "CIF must be a number in USD.");
                        return;
                    }
                },
            };
            let payload = TaxCalculatorPayload {
                cif: cif_value,
                year: ModelYear::from(year().as_str()),
                is_luxury: is_luxury(),
                is_ev: is_ev(),
                make: make_value,
            };

            let services = services.clone();
            let mut result = result;
            let mut pending = pending;
            pending.set(true);
            spawn(async move {
                match services.tax.fetch_taxes(&payload).await {
                    Ok(taxes) => result.set(Some(taxes)),
                    Err(err) => push_notice(
                        notices,
                        NoticeKind::Error,
                        format!("Tax calculation failed: {err}"),
                    ),
                }
                pending.set(false);
            });
        }
    };

    let batch_label = match &*batch.read() {
        Some(Ok(info)) => {
            let reviewed = format_date(&info.review_date, "d MMMM YYYY")
                .unwrap_or_else(|_| info.review_date.clone());
            Some(format!("{} · reviewed {reviewed}", info.title))
        }
        _ => None,
    };

    let breakdown = result().map(|taxes| {
        let rows = taxes
            .line_items()
            .into_iter()
            .map(|(label, amount)| (label, money(amount)))
            .collect::<Vec<_>>();
        (rows, money(taxes.total_tax), money(taxes.total_car_value), money(taxes.cif_ugx), taxes.usd_rate)
    });

    rsx! {
        div { class: "space-y-8",
            if let Some(label) = batch_label {
                p { class: "text-xs uppercase tracking-wide text-slate-500", "Valuation data: {label}" }
            }
            form {
                class: "grid gap-4 rounded-xl border border-slate-800 bg-slate-900/40 p-6 sm:grid-cols-2",
                onsubmit: on_submit,
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Make" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        value: make(),
                        placeholder: "e.g. Toyota",
                        oninput: move |evt| make.set(evt.value()),
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Year of manufacture" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        value: year(),
                        placeholder: "2016",
                        oninput: move |evt| year.set(evt.value()),
                    }
                }
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "CIF (USD, optional)" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        value: cif(),
                        oninput: move |evt| cif.set(evt.value()),
                    }
                }
                div { class: "flex items-end gap-6 text-sm",
                    label { class: "flex items-center gap-2",
                        input {
                            r#type: "checkbox",
                            checked: is_luxury(),
                            onchange: move |evt| is_luxury.set(evt.checked()),
                        }
                        "Luxury vehicle"
                    }
                    label { class: "flex items-center gap-2",
                        input {
                            r#type: "checkbox",
                            checked: is_ev(),
                            onchange: move |evt| is_ev.set(evt.checked()),
                        }
                        "Electric"
                    }
                }
                button {
                    class: "rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400 sm:col-span-2",
                    r#type: "submit",
                    disabled: pending(),
                    if pending() { "Calculating…" } else { "Calculate taxes" }
                }
            }
            if let Some((rows, total, car_value, cif_ugx, usd_rate)) = breakdown {
                section { class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                    h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "Assessment" }
                    dl { class: "mt-4 grid gap-2 text-sm sm:grid-cols-2",
                        for (label, amount) in rows {
                            div { class: "flex justify-between gap-4",
                                dt { class: "text-slate-400", "{label}" }
                                dd { class: "font-mono", "{amount}" }
                            }
                        }
                    }
                    div { class: "mt-6 flex flex-wrap gap-8 border-t border-slate-800 pt-4",
                        div { p { class: "text-xs text-slate-500", "CIF" } p { class: "font-mono", "{cif_ugx}" } }
                        div { p { class: "text-xs text-slate-500", "Total tax" } p { class: "text-2xl font-semibold", "{total}" } }
                        div { p { class: "text-xs text-slate-500", "Car value incl. taxes" } p { class: "font-mono", "{car_value}" } }
                        div { p { class: "text-xs text-slate-500", "USD rate" } p { class: "font-mono", "{usd_rate}" } }
                    }
                }
            }
            MailingListSignup {}
        }
    }
}

#[component]
fn MailingListSignup() -> Element {
    let services = use_context::<AppServices>();
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();
    let mut email = use_signal(String::new);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let address = email().trim().to_string();
        if address.is_empty() {
            return;
        }
        let services = services.clone();
        let mut email = email;
        spawn(async move {
            match services.tax.add_email(&address).await {
                Ok(envelope) => {
                    let text = if envelope.message.is_empty() {
                        "You're on the list.".to_string()
                    } else {
                        envelope.message
                    };
                    push_notice(notices, NoticeKind::Success, text);
                    email.set(String::new());
                }
                Err(err) => push_notice(notices, NoticeKind::Error, format!("Signup failed: {err}")),
            }
        });
    };

    rsx! {
        form { class: "flex flex-wrap items-end gap-3 rounded-xl border border-slate-800 px-6 py-4",
            onsubmit: on_submit,
            div { class: "flex-1 min-w-[220px]",
                label { class: "block text-xs font-semibold uppercase text-slate-500", "Get notified when rates change" }
                input {
                    class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                    r#type: "email",
                    value: email(),
                    placeholder: "you@example.com",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            button { class: "rounded-lg border border-slate-700 px-4 py-2 text-sm hover:border-indigo-500", r#type: "submit", "Subscribe" }
        }
    }
}

fn money(amount: f64) -> String {
    format_currency(amount, LOCAL_CURRENCY).unwrap_or_else(|_| "—".to_string())
}
