use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::action::Action;
use crate::api::auth;
use crate::api::client::{PostsApi, PostsFilter};
use crate::api::error::ApiError;
use crate::api::session::SessionStore;
use crate::config::AppConfig;
use crate::event::{self, EventHandler};
use crate::models::editor::validate_content;
use crate::models::feed::FeedState;
use crate::models::pagination::PageDelta;
use crate::models::profile::ProfileState;
use crate::models::view::{Generation, NavTab, PageRequest, View, ViewerSession};
use crate::tui::Tui;
use crate::ui::composer::Composer;
use crate::ui::editor::InlineEditor;
use crate::ui::login::LoginForm;
use crate::ui::Component;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Transient status-bar message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    expires_at: Instant,
}

/// What was on screen before an activation, put back if its load fails.
struct LastGood {
    request: PageRequest,
    feed: FeedState,
    profile: Option<ProfileState>,
}

/// Owns the active view and everything rendered for it.
pub struct App {
    should_quit: bool,
    config: AppConfig,
    client: Arc<dyn PostsApi>,
    store: SessionStore,
    restore_session: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    viewer: Option<ViewerSession>,
    request: PageRequest,
    generation: Generation,

    // Rendered content of the active view
    feed: FeedState,
    profile: Option<ProfileState>,
    notice: Option<Notice>,

    // Active page load (aborted when a new activation starts)
    active_load: Option<JoinHandle<()>>,
    last_good: Option<LastGood>,

    // Modals
    login_form: LoginForm,
    show_login: bool,
    composer: Composer,
    show_composer: bool,
    editor: Option<InlineEditor>,
}

impl App {
    pub fn new(config: AppConfig, client: Arc<dyn PostsApi>, store: SessionStore) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let default_username = config
            .default_username
            .clone()
            .or_else(|| store.last_username());

        App {
            should_quit: false,
            config,
            client,
            store,
            restore_session: true,
            action_tx,
            action_rx,
            viewer: None,
            request: PageRequest::first(View::AllPosts),
            generation: Generation::default(),
            feed: FeedState::loading(),
            profile: None,
            notice: None,
            active_load: None,
            last_good: None,
            login_form: LoginForm::new(default_username),
            show_login: false,
            composer: Composer::new(),
            show_composer: false,
            editor: None,
        }
    }

    pub fn with_session_restore(mut self, restore: bool) -> Self {
        self.restore_session = restore;
        self
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        if self.restore_session {
            if let auth::AuthResult::Success(viewer) =
                auth::try_restore_session(self.client.as_ref(), &self.store).await
            {
                self.viewer = Some(viewer);
            }
        }
        self.dispatch(Action::Activate(PageRequest::first(View::AllPosts)));

        let mut events = EventHandler::new(TICK_RATE);
        let mut ticker = tokio::time::interval(TICK_RATE);

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                Some(event) = events.next() => {
                    self.handle_event(event);
                }
                Some(action) = self.action_rx.recv() => {
                    self.update(action);
                }
                _ = ticker.tick() => {
                    self.update(Action::Tick);
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.cancel_load();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.dispatch(Action::Quit);
            return;
        }

        // Modals take keys first
        if self.show_login {
            if let Some(action) = self.login_form.handle_key_event(key) {
                self.dispatch(action);
            }
            return;
        }

        if self.show_composer {
            if let Some(action) = self.composer.handle_key_event(key) {
                self.dispatch(action);
            }
            return;
        }

        if let Some(editor) = self.editor.as_mut() {
            let saving = self
                .feed
                .editing_post()
                .is_some_and(|p| p.editor.is_saving());
            if !saving {
                if let Some(action) = editor.handle_key_event(key) {
                    self.dispatch(action);
                }
            }
            return;
        }

        if let Some(action) = event::key_to_action(key) {
            self.dispatch(action);
        }
    }

    fn dispatch(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn spawn_load(&mut self, future: impl std::future::Future<Output = ()> + Send + 'static) {
        self.cancel_load();
        self.active_load = Some(tokio::spawn(future));
    }

    fn cancel_load(&mut self) {
        if let Some(handle) = self.active_load.take() {
            handle.abort();
        }
    }

    fn signed_in(&self) -> bool {
        self.viewer.is_some()
    }

    fn notify(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            expires_at: Instant::now() + self.config.notice_duration(),
        });
    }

    fn notify_error(&mut self, context: &str, err: &ApiError) {
        warn!("{} failed: {}", context, err);
        self.notify(err.notice());
    }

    /// Tears down the rendered content of every view and loads `request`.
    fn activate(&mut self, request: PageRequest) {
        if request.view.requires_viewer() && !self.signed_in() {
            self.notify(ApiError::NotSignedIn.notice());
            return;
        }

        self.generation = self.generation.next();
        let generation = self.generation;
        info!("activating {} page {}", request.view, request.page);

        let feed = std::mem::replace(&mut self.feed, FeedState::loading());
        let profile = self.profile.take();
        // A superseded load has nothing worth keeping; the older snapshot stays.
        if !feed.loading {
            self.last_good = Some(LastGood {
                request: self.request.clone(),
                feed: feed.settled(),
                profile: profile.map(|mut p| {
                    p.follow_pending = false;
                    p
                }),
            });
        }
        self.editor = None;
        self.request = request.clone();

        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let page = request.page;
        let filter = match request.view {
            View::AllPosts => PostsFilter::All,
            View::Following => PostsFilter::Following,
            View::Profile(username) => {
                self.spawn_load(async move {
                    let result = client.get_profile(&username, page).await;
                    let _ = tx.send(Action::ProfileLoaded { generation, result });
                });
                return;
            }
        };
        self.spawn_load(async move {
            let result = client.list_posts(filter, page).await;
            let _ = tx.send(Action::PageLoaded { generation, result });
        });
    }

    fn is_current(&self, generation: Generation) -> bool {
        if generation != self.generation {
            debug!("dropping response for superseded activation {:?}", generation);
            return false;
        }
        true
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.cancel_load();
                self.should_quit = true;
            }

            Action::Tick => {
                if self
                    .notice
                    .as_ref()
                    .is_some_and(|n| Instant::now() >= n.expires_at)
                {
                    self.notice = None;
                }
            }

            Action::SelectNext => self.feed.select_next(),
            Action::SelectPrev => self.feed.select_prev(),
            Action::ScrollToTop => self.feed.select_first(),
            Action::ScrollToBottom => self.feed.select_last(),

            Action::Activate(request) => self.activate(request),

            Action::Reload => self.activate(self.request.clone()),

            Action::Paginate(delta) => self.paginate(delta),

            Action::SwitchTab(idx) => {
                let tabs = NavTab::visible(self.viewer.as_ref());
                let view = match tabs.get(idx) {
                    Some(NavTab::AllPosts) => View::AllPosts,
                    Some(NavTab::Following) => View::Following,
                    Some(NavTab::OwnProfile) => match &self.viewer {
                        Some(v) => View::Profile(v.username.clone()),
                        None => return,
                    },
                    None => return,
                };
                self.activate(PageRequest::first(view));
            }

            Action::ViewPosterProfile => {
                if let Some(poster) = self.feed.selected_post().map(|p| p.record.poster_name.clone()) {
                    self.activate(PageRequest::first(View::Profile(poster)));
                }
            }

            Action::PageLoaded { generation, result } => {
                if !self.is_current(generation) {
                    return;
                }
                self.active_load = None;
                match result {
                    Ok(page) => {
                        self.last_good = None;
                        self.feed.render_page(page);
                    }
                    Err(e) => {
                        self.restore_last_good();
                        self.notify_error("loading posts", &e);
                    }
                }
            }

            Action::ProfileLoaded { generation, result } => {
                if !self.is_current(generation) {
                    return;
                }
                self.active_load = None;
                match result {
                    Ok(record) => {
                        self.last_good = None;
                        let (profile, page) = record.into_parts();
                        self.profile = Some(profile);
                        self.feed.render_page(page);
                    }
                    Err(e) => {
                        self.restore_last_good();
                        self.notify_error("loading profile", &e);
                    }
                }
            }

            Action::ShowLogin => {
                if !self.signed_in() {
                    let username = self.store.last_username().or_else(|| self.config.default_username.clone());
                    self.login_form = LoginForm::new(username);
                    self.show_login = true;
                }
            }

            Action::CloseLogin => self.show_login = false,

            Action::SubmitLogin { username, password } => {
                let client = self.client.clone();
                let store = self.store.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = auth::login(client.as_ref(), &store, &username, &password).await;
                    let _ = tx.send(Action::LoginFinished(result));
                });
            }

            Action::SubmitRegister(form) => {
                let client = self.client.clone();
                let store = self.store.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = auth::register(client.as_ref(), &store, &form).await;
                    let _ = tx.send(Action::LoginFinished(result));
                });
            }

            Action::LoginFinished(result) => match result {
                Ok(viewer) => {
                    self.viewer = Some(viewer);
                    self.show_login = false;
                    self.login_form.clear_error();
                    self.activate(PageRequest::first(View::AllPosts));
                }
                Err(e) => {
                    warn!("login failed: {}", e);
                    self.login_form.set_error(e.notice());
                }
            },

            Action::Logout => {
                if self.viewer.is_none() {
                    return;
                }
                let client = self.client.clone();
                let store = self.store.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = auth::logout(client.as_ref(), &store).await {
                        error!("logout request failed: {}", e);
                    }
                    let _ = tx.send(Action::LogoutFinished);
                });
            }

            Action::LogoutFinished => {
                self.viewer = None;
                self.activate(PageRequest::first(View::AllPosts));
            }

            Action::OpenComposer => {
                if !self.config.compose_enabled {
                    return;
                }
                if !self.signed_in() {
                    self.notify(ApiError::NotSignedIn.notice());
                    return;
                }
                self.composer = Composer::new();
                self.show_composer = true;
            }

            Action::CloseComposer => self.show_composer = false,

            Action::SubmitPost(text) => {
                if let Err(refusal) = validate_content(&text) {
                    self.notify(refusal.to_string());
                    return;
                }
                self.composer.set_submitting(true);
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = client.create_post(&text).await;
                    let _ = tx.send(Action::PostCreated(result));
                });
            }

            Action::PostCreated(result) => match result {
                Ok(()) => {
                    self.show_composer = false;
                    self.activate(PageRequest::first(View::AllPosts));
                }
                Err(e) => {
                    self.composer.set_submitting(false);
                    self.notify_error("creating post", &e);
                }
            },

            Action::ToggleLike => self.toggle_like(),

            Action::LikeFinished {
                post_id,
                liked,
                result,
            } => {
                let Some(unit) = self.feed.post_mut(post_id) else {
                    debug!("like result for post {} no longer on screen", post_id);
                    return;
                };
                match result {
                    Ok(like_count) => unit.finish_like(liked, like_count),
                    Err(e) => {
                        unit.fail_like();
                        self.notify_error("like", &e);
                    }
                }
            }

            Action::BeginEdit => {
                if self.editor.is_some() || !self.signed_in() {
                    return;
                }
                let Some(unit) = self.feed.selected_post_mut() else {
                    return;
                };
                match unit.open_editor() {
                    Ok(prefill) => self.editor = Some(InlineEditor::new(unit.id(), &prefill)),
                    Err(refusal) => debug!("edit refused: {}", refusal),
                }
            }

            Action::CancelEdit => {
                let Some(editor) = self.editor.as_ref() else {
                    return;
                };
                let post_id = editor.post_id();
                if let Some(unit) = self.feed.post_mut(post_id) {
                    if unit.editor.is_saving() {
                        return;
                    }
                    unit.cancel_editor();
                }
                self.editor = None;
            }

            Action::SaveEdit(draft) => {
                let Some(post_id) = self.editor.as_ref().map(|e| e.post_id()) else {
                    return;
                };
                let Some(unit) = self.feed.post_mut(post_id) else {
                    self.editor = None;
                    return;
                };
                if let Err(refusal) = unit.submit_edit(draft.clone()) {
                    self.notify(refusal.to_string());
                    return;
                }
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = client.edit_post(post_id, &draft).await;
                    let _ = tx.send(Action::EditFinished { post_id, result });
                });
            }

            Action::EditFinished { post_id, result } => {
                let Some(unit) = self.feed.post_mut(post_id) else {
                    debug!("edit result for post {} no longer on screen", post_id);
                    return;
                };
                match result {
                    Ok(()) => {
                        unit.confirm_edit();
                        if self.editor.as_ref().is_some_and(|e| e.post_id() == post_id) {
                            self.editor = None;
                        }
                    }
                    Err(e) => {
                        unit.reject_edit();
                        self.notify_error("saving edit", &e);
                    }
                }
            }

            Action::ToggleFollow => self.toggle_follow(),

            Action::FollowFinished {
                username,
                following,
                result,
            } => {
                let Some(profile) = self.profile.as_mut().filter(|p| p.username == username) else {
                    debug!("follow result for {} no longer on screen", username);
                    return;
                };
                match result {
                    Ok(count) => profile.finish_follow(following, count),
                    Err(e) => {
                        profile.fail_follow();
                        self.notify_error("follow", &e);
                    }
                }
            }

        }
    }

    /// Failed load: show what was there before, or an empty view if nothing was.
    fn restore_last_good(&mut self) {
        match self.last_good.take() {
            Some(last) => {
                debug!("restoring {} page {}", last.request.view, last.request.page);
                self.request = last.request;
                self.feed = last.feed;
                self.profile = last.profile;
            }
            None => self.feed.loading = false,
        }
    }

    /// Disabled controls are re-checked here, not only when drawn.
    fn paginate(&mut self, delta: PageDelta) {
        match self.feed.pagination.navigate(delta) {
            Some(page) => self.activate(PageRequest::new(self.request.view.clone(), page)),
            None => debug!("{:?} is disabled", delta),
        }
    }

    fn toggle_like(&mut self) {
        if !self.signed_in() {
            self.notify(ApiError::NotSignedIn.notice());
            return;
        }
        let Some(unit) = self.feed.selected_post_mut() else {
            return;
        };
        let post_id = unit.id();
        let Some(liked) = unit.begin_like() else {
            debug!("like for post {} already in flight", post_id);
            return;
        };

        let client = self.client.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.set_like(post_id, liked).await;
            let _ = tx.send(Action::LikeFinished {
                post_id,
                liked,
                result,
            });
        });
    }

    fn toggle_follow(&mut self) {
        let signed_in = self.signed_in();
        let page = self.request.page;
        let Some(profile) = self.profile.as_mut() else {
            return;
        };
        if !profile.shows_follow(signed_in) {
            return;
        }
        let Some(following) = profile.begin_follow() else {
            return;
        };

        let username = profile.username.clone();
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.set_follow(&username, page, following).await;
            let _ = tx.send(Action::FollowFinished {
                username,
                following,
                result,
            });
        });
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        crate::ui::tabs::draw_tabs(frame, chunks[0], &self.request.view, self.viewer.as_ref());

        let signed_in = self.signed_in();
        match &self.request.view {
            View::Profile(_) => crate::ui::profile::draw_profile(
                frame,
                chunks[1],
                self.profile.as_ref(),
                &self.feed,
                signed_in,
                self.editor.as_ref(),
            ),
            view => crate::ui::timeline::draw_timeline(
                frame,
                chunks[1],
                &view.title(),
                &self.feed,
                signed_in,
                self.editor.as_ref(),
            ),
        }

        crate::ui::statusbar::draw_statusbar(
            frame,
            chunks[2],
            crate::ui::statusbar::StatusContext {
                view: &self.request.view,
                signed_in,
                compose_enabled: self.config.compose_enabled,
                editing: self.editor.is_some(),
                in_modal: self.show_login || self.show_composer,
            },
            self.notice.as_ref().map(|n| n.text.as_str()),
        );

        if self.show_composer {
            self.composer.draw(frame, area);
        }

        if self.show_login {
            self.login_form.draw(frame, area);
        }
    }
}
