use dioxus::prelude::*;

use crate::{
    app::AppServices,
    domain::VehicleValuation,
    ui::components::notice::{push_notice, NoticeKind, NoticeMessage},
    util::format::format_currency,
};

#[derive(Clone, PartialEq)]
struct ValuationRow {
    id: u64,
    name: String,
    hsc: String,
    model: String,
    year: String,
    cc: String,
    origin: String,
    cif: String,
    batch: String,
}

impl From<VehicleValuation> for ValuationRow {
    fn from(entry: VehicleValuation) -> Self {
        let dash = || "—".to_string();
        Self {
            id: entry.id,
            name: entry.name,
            hsc: entry.hsc.unwrap_or_else(dash),
            model: entry.model.unwrap_or_else(dash),
            year: entry.year.map(|y| y.to_string()).unwrap_or_else(dash),
            cc: entry.cc.unwrap_or_else(dash),
            origin: entry.origin.unwrap_or_else(dash),
            cif: format_currency(entry.cif, "USD").unwrap_or_else(|_| dash()),
            batch: entry.batch.title,
        }
    }
}

#[component]
pub fn ValuationPage() -> Element {
    let services = use_context::<AppServices>();
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();

    let mut query = use_signal(String::new);
    let rows = use_signal(|| None::<Vec<ValuationRow>>);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let name = query().trim().to_string();
        let services = services.clone();
        let mut rows = rows;
        spawn(async move {
            match services.tax.search(&name).await {
                Ok(results) => rows.set(Some(results.into_iter().map(ValuationRow::from).collect())),
                Err(err) => push_notice(notices, NoticeKind::Error, format!("Search failed: {err}")),
            }
        });
    };

    rsx! {
        div { class: "space-y-6",
            form { class: "flex flex-wrap items-end gap-4 rounded-xl border border-slate-800 bg-slate-900/40 px-4 py-4",
                onsubmit: on_submit,
                div { class: "flex-1 min-w-[240px]",
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Vehicle" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm",
                        value: query(),
                        placeholder: "e.g. Harrier",
                        oninput: move |evt| query.set(evt.value()),
                    }
                }
                button { class: "rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400", r#type: "submit", "Search" }
            }
            match rows() {
                None => rsx! { p { class: "text-sm text-slate-500", "Search the valuation guide by make or model." } },
                Some(list) if list.is_empty() => rsx! { p { class: "text-sm text-slate-500", "No vehicles matched." } },
                Some(list) => rsx! {
                    table { class: "w-full text-left text-sm",
                        thead {
                            tr { class: "text-xs uppercase text-slate-500",
                                th { "Vehicle" } th { "HS code" } th { "Model" } th { "Year" } th { "CC" } th { "Origin" } th { class: "text-right", "CIF" } th { "Batch" }
                            }
                        }
                        tbody {
                            for row in list {
                                tr { key: "{row.id}", class: "border-t border-slate-800",
                                    td { "{row.name}" }
                                    td { class: "font-mono text-slate-400", "{row.hsc}" }
                                    td { "{row.model}" }
                                    td { "{row.year}" }
                                    td { "{row.cc}" }
                                    td { "{row.origin}" }
                                    td { class: "text-right font-mono", "{row.cif}" }
                                    td { class: "text-xs text-slate-500", "{row.batch}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
