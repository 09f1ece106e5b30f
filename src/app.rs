use std::sync::Arc;

use dioxus::{prelude::*, signals::Signal};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    domain::{GuardDecision, RouteGuard, Session},
    infra::{
        api::{ApiClient, ApiClientError},
        auth::AuthService,
        cookies::{CookieJar, FileCookieJar, MemoryCookieJar},
        interceptor::BearerTokenInterceptor,
        session_store::SessionStore,
        tax::TaxApi,
    },
    ui::{
        components::notice::{NoticeList, NoticeMessage},
        pages::{BackofficePage, CalculatorPage, LoginPage, ValuationPage},
        shell::Shell,
    },
    util::storage::StorageResolver,
};

pub const APP_TITLE: &str = "EzzyDrive Uganda";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build API client: {0}")]
    Client(#[from] ApiClientError),
}

/// Everything the views need to talk to the backend, built once in `main`.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub tax: TaxApi,
    pub storage: StorageResolver,
    pub guard: RouteGuard,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let jar: Arc<dyn CookieJar> = match &config.cookie_jar_path {
            Some(path) => Arc::new(FileCookieJar::open(path.clone())),
            None => match FileCookieJar::open_default() {
                Ok(jar) => {
                    debug!(path = %jar.path().display(), "using cookie jar");
                    Arc::new(jar)
                }
                Err(err) => {
                    warn!(error = %err, "no cookie storage available; session will not survive restarts");
                    Arc::new(MemoryCookieJar::new())
                }
            },
        };
        let session = Arc::new(SessionStore::restore(jar));

        let client = ApiClient::builder(&config.api_base_url)
            .with_interceptor(Arc::new(BearerTokenInterceptor::new(session.clone())))
            .build()?;
        debug!(
            base_url = client.base_url(),
            interceptors = ?client.interceptor_names(),
            "api client ready"
        );
        let guard = RouteGuard::default();

        Ok(Self {
            auth: AuthService::new(client.clone(), session, &guard),
            tax: TaxApi::new(client),
            storage: StorageResolver::new(config.storage_url.clone()),
            guard,
        })
    }
}

#[derive(Routable, Clone, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Guarded)]
        #[route("/")]
        Calculator {},
        #[route("/valuations")]
        Valuations {},
        #[route("/backoffice")]
        Backoffice {},
        #[route("/backoffice/auth")]
        BackofficeAuth {},
}

#[component]
pub fn App() -> Element {
    let services = use_context::<AppServices>();

    let session = use_signal(|| services.auth.session().snapshot());
    use_context_provider(|| session);

    let notices = use_signal(Vec::<NoticeMessage>::new);
    use_context_provider(|| notices);

    let favicon = services.storage.storage_url(Some("fav.png"));

    rsx! {
        document::Title { "{APP_TITLE}" }
        document::Link { rel: "icon", href: favicon }
        Router::<Route> {}
        NoticeList {}
    }
}

/// Copies the store's current session into the signal the views render from.
pub fn sync_session(services: &AppServices, mut session: Signal<Session>) {
    session.set(services.auth.session().snapshot());
}

/// Layout wrapping every route; applies the backoffice guard before rendering.
#[component]
fn Guarded() -> Element {
    let services = use_context::<AppServices>();
    let session = use_context::<Signal<Session>>();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let authenticated = session.with(|s| s.is_authenticated());
    let path = route.to_string();

    if let GuardDecision::Redirect(target) = services.guard.check(&path, authenticated) {
        debug!(from = %path, to = %target, "route guard redirect");
        match target.parse::<Route>() {
            Ok(destination) => {
                spawn(async move {
                    nav.replace(destination);
                });
            }
            Err(_) => warn!(%target, "guard redirect does not match a known route"),
        }
        return rsx! { Fragment {} };
    }

    rsx! {
        Shell { Outlet::<Route> {} }
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { CalculatorPage {} }
}

#[component]
pub fn Valuations() -> Element {
    rsx! { ValuationPage {} }
}

#[component]
pub fn Backoffice() -> Element {
    rsx! { BackofficePage {} }
}

#[component]
pub fn BackofficeAuth() -> Element {
    rsx! { LoginPage {} }
}
