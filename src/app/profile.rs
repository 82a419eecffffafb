//! Profile loading: credential lookup, fetch dispatch and result application
//!
//! Each fetch gets a sequence number and a cancellation token. Starting a new
//! fetch cancels the previous one, and any completion whose sequence number is
//! not the latest is dropped, so an older response can never overwrite a newer
//! one.

use super::navigation::Navigator;
use crate::api::DataSource;
use crate::constants::*;
use crate::error::ProfileError;
use crate::storage::CredentialStore;
use crate::types::*;
use chrono::{DateTime, Local};
use eframe::egui;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Completion of one fetch, tagged with the sequence number it was issued under
pub(crate) struct FetchOutcome {
    pub seq: u64,
    pub result: Result<UserProfile, ProfileError>,
    pub fetched_at: DateTime<Local>,
}

pub struct ProfileView {
    source: DataSource,
    snapshot: Option<ProfileSnapshot>,
    load_state: LoadState,
    alert: Option<String>,
    latest_seq: u64,
    in_flight: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl ProfileView {
    pub fn new(source: DataSource) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            snapshot: None,
            load_state: LoadState::Idle,
            alert: None,
            latest_seq: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    pub fn snapshot(&self) -> Option<&ProfileSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn source_kind(&self) -> DataSourceKind {
        self.source.kind()
    }

    /// Start a fresh fetch each time the profile screen gains focus
    pub fn on_become_visible(
        &mut self,
        store: &CredentialStore,
        runtime: &tokio::runtime::Handle,
        ctx: &egui::Context,
    ) {
        let (user_id, token) = match read_credentials(store) {
            Ok(creds) => creds,
            Err(e) => {
                error!(error = %e, "Failed to read credentials");
                self.supersede();
                self.fail(e);
                return;
            }
        };

        if self.source.requires_credentials() && user_id.is_none() {
            warn!("No stored user id, profile requires sign-in");
            self.supersede();
            self.snapshot = None;
            self.load_state = LoadState::NotAuthenticated;
            return;
        }

        let (seq, cancel) = self.begin_fetch();
        info!(seq = seq, source = ?self.source.kind(), "Fetching profile");

        let source = self.source.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(seq = seq, "Profile fetch cancelled");
                }
                result = source.fetch(user_id.as_deref(), token.as_deref()) => {
                    let outcome = FetchOutcome { seq, result, fetched_at: Local::now() };
                    if tx.send(outcome).is_err() {
                        debug!(seq = seq, "Profile view gone, dropping result");
                    }
                    ctx.request_repaint();
                }
            }
        });
    }

    /// Issue a new sequence number, cancelling whatever was in flight
    pub(crate) fn begin_fetch(&mut self) -> (u64, CancellationToken) {
        self.supersede();
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.load_state = LoadState::Loading;
        (self.latest_seq, token)
    }

    /// Cancel the in-flight fetch and make any late completion stale
    fn supersede(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.latest_seq += 1;
    }

    /// Drain finished fetches; called once per frame
    pub fn poll_results(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
        }
    }

    /// Apply one completion. Returns false if it was stale.
    pub(crate) fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.latest_seq {
            debug!(seq = outcome.seq, latest = self.latest_seq, "Discarding stale profile response");
            return false;
        }
        self.in_flight = None;

        match outcome.result {
            Ok(profile) => {
                let snapshot = ProfileSnapshot::from_profile(profile, outcome.fetched_at);
                info!(
                    seq = outcome.seq,
                    selected = snapshot.selections.active_count(),
                    "Profile loaded"
                );
                self.snapshot = Some(snapshot);
                self.load_state = LoadState::Loaded;
            }
            Err(ProfileError::NotAuthenticated) => {
                warn!(seq = outcome.seq, "Profile source reported missing credentials");
                self.snapshot = None;
                self.load_state = LoadState::NotAuthenticated;
            }
            Err(e) => {
                warn!(seq = outcome.seq, kind = e.kind(), error = %e, "Profile fetch failed");
                self.fail(e);
            }
        }
        true
    }

    fn fail(&mut self, e: ProfileError) {
        debug!(kind = e.kind(), "Showing fetch error alert");
        self.load_state = LoadState::Failed;
        self.alert = Some(FETCH_ERROR_MESSAGE.to_string());
    }

    /// Open the edit screen; no parameters are passed
    pub fn on_edit_pressed(&self, nav: &mut Navigator) {
        nav.navigate(Screen::ProfileEdit);
    }
}

fn read_credentials(
    store: &CredentialStore,
) -> Result<(Option<String>, Option<String>), ProfileError> {
    let user_id = store
        .get_item(STORE_KEY_USER_ID)?
        .filter(|id| !id.trim().is_empty());
    let token = store
        .get_item(STORE_KEY_TOKEN)?
        .filter(|t| !t.trim().is_empty());
    Ok((user_id, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{mock_profile, ApiClient};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn outcome(seq: u64, result: Result<UserProfile, ProfileError>) -> FetchOutcome {
        FetchOutcome { seq, result, fetched_at: Local::now() }
    }

    fn profile(nickname: &str, email: &str, crime: &str) -> UserProfile {
        UserProfile {
            nickname: nickname.into(),
            email: email.into(),
            crime_selections: crime.into(),
        }
    }

    fn live_view(base: &str) -> ProfileView {
        ProfileView::new(DataSource::Live(
            ApiClient::new(base, Duration::from_secs(5)).unwrap(),
        ))
    }

    fn signed_in_store(id: &str) -> CredentialStore {
        let store = CredentialStore::open_in_memory().unwrap();
        store.set_item(STORE_KEY_USER_ID, id).unwrap();
        store
    }

    async fn wait_settled(view: &mut ProfileView) {
        for _ in 0..200 {
            view.poll_results();
            if view.load_state() != LoadState::Loading {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("profile fetch never settled");
    }

    /// Answers every connection with the given status and body
    async fn serve(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = vec![0u8; 4096];
                let _ = sock.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = sock.write_all(response.as_bytes()).await;
                let _ = sock.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn success_replaces_whole_snapshot() {
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        let (seq, _) = view.begin_fetch();
        assert_eq!(view.load_state(), LoadState::Loading);

        assert!(view.apply(outcome(seq, Ok(profile("Hyun2", "abc@purdue.edu", "0,3,7")))));
        let snap = view.snapshot().unwrap();
        assert_eq!(snap.nickname, "Hyun2");
        assert_eq!(snap.email, "abc@purdue.edu");
        assert_eq!(snap.selections.active_positions(), vec![0, 3, 7]);
        assert_eq!(view.load_state(), LoadState::Loaded);
        assert!(view.alert().is_none());
    }

    #[test]
    fn failure_keeps_previous_snapshot_and_alerts() {
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        let (seq, _) = view.begin_fetch();
        view.apply(outcome(seq, Ok(profile("old", "old@x.io", "1"))));

        let (seq, _) = view.begin_fetch();
        view.apply(outcome(seq, Err(ProfileError::Status(500))));

        let snap = view.snapshot().unwrap();
        assert_eq!(snap.nickname, "old");
        assert_eq!(snap.email, "old@x.io");
        assert_eq!(view.load_state(), LoadState::Failed);
        assert_eq!(view.alert(), Some(FETCH_ERROR_MESSAGE));

        view.dismiss_alert();
        assert!(view.alert().is_none());
    }

    #[test]
    fn first_load_failure_leaves_view_empty() {
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        let (seq, _) = view.begin_fetch();
        view.apply(outcome(seq, Err(ProfileError::Decode("missing field `crime`".into()))));
        assert!(view.snapshot().is_none());
        assert_eq!(view.load_state(), LoadState::Failed);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        let (first, first_token) = view.begin_fetch();
        let (second, _) = view.begin_fetch();
        assert!(first_token.is_cancelled());

        assert!(view.apply(outcome(second, Ok(profile("new", "new@x.io", "2")))));
        assert!(!view.apply(outcome(first, Ok(profile("old", "old@x.io", "1")))));
        assert_eq!(view.snapshot().unwrap().nickname, "new");
    }

    #[test]
    fn stale_failure_does_not_alert() {
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        let (first, _) = view.begin_fetch();
        let (_second, _) = view.begin_fetch();
        assert!(!view.apply(outcome(first, Err(ProfileError::Timeout(Duration::from_secs(10))))));
        assert!(view.alert().is_none());
        assert_eq!(view.load_state(), LoadState::Loading);
    }

    #[test]
    fn edit_emits_one_navigation_regardless_of_state() {
        let mut nav = Navigator::new();
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        view.on_edit_pressed(&mut nav);
        assert_eq!(nav.history(), &[Screen::ProfileEdit]);

        nav.navigate(Screen::Profile);
        view.begin_fetch();
        view.on_edit_pressed(&mut nav);
        let edits = nav.history().iter().filter(|s| **s == Screen::ProfileEdit).count();
        assert_eq!(edits, 2);
        assert_eq!(nav.current(), Screen::ProfileEdit);
    }

    #[tokio::test]
    async fn missing_user_id_fails_fast_without_request() {
        let store = CredentialStore::open_in_memory().unwrap();
        let mut view = live_view("http://127.0.0.1:9");
        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        assert_eq!(view.load_state(), LoadState::NotAuthenticated);
        assert!(view.alert().is_none());
        assert!(view.snapshot().is_none());
    }

    #[tokio::test]
    async fn sign_out_invalidates_in_flight_fetch() {
        let store = CredentialStore::open_in_memory().unwrap();
        let mut view = live_view("http://127.0.0.1:9");
        let (seq, token) = view.begin_fetch();
        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        assert!(token.is_cancelled());
        assert!(!view.apply(outcome(seq, Ok(mock_profile()))));
        assert!(view.snapshot().is_none());
    }

    #[tokio::test]
    async fn blank_user_id_counts_as_missing() {
        let store = signed_in_store("   ");
        let mut view = live_view("http://127.0.0.1:9");
        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        assert_eq!(view.load_state(), LoadState::NotAuthenticated);
    }

    #[tokio::test]
    async fn static_source_loads_without_sign_in() {
        let store = CredentialStore::open_in_memory().unwrap();
        let mut view = ProfileView::new(DataSource::Static(mock_profile()));
        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        wait_settled(&mut view).await;
        assert_eq!(view.load_state(), LoadState::Loaded);
        assert_eq!(view.snapshot().unwrap().nickname, "Hyun2");
    }

    #[tokio::test]
    async fn live_fetch_populates_view() {
        let base = serve(
            "200 OK",
            r#"{"nickname":"Hyun2","email":"abc@purdue.edu","crime":"0,3,7"}"#,
        )
        .await;
        let store = signed_in_store("42");
        let mut view = live_view(&base);

        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        wait_settled(&mut view).await;

        let snap = view.snapshot().unwrap();
        assert_eq!(snap.nickname, "Hyun2");
        assert_eq!(snap.email, "abc@purdue.edu");
        for pos in 0..crate::catalog::CATEGORY_COUNT {
            assert_eq!(snap.selections.is_active(pos), [0, 3, 7].contains(&pos));
        }
    }

    #[tokio::test]
    async fn live_error_status_leaves_fields_empty() {
        let base = serve("503 Service Unavailable", "{}").await;
        let store = signed_in_store("42");
        let mut view = live_view(&base);

        view.on_become_visible(&store, &tokio::runtime::Handle::current(), &egui::Context::default());
        wait_settled(&mut view).await;

        assert!(view.snapshot().is_none());
        assert_eq!(view.load_state(), LoadState::Failed);
        assert_eq!(view.alert(), Some(FETCH_ERROR_MESSAGE));
    }
}
