//! Command-line front end: one-shot page rendering and an interactive browser.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::api::{ApiError, ApiTransport, HttpApiClient};
use crate::controller::sources::{
    AttendanceSource, BranchEmployeesSource, ClientsSource, ShiftsSource,
};
use crate::controller::{ListController, ListSource, ListState};
use crate::domain::branch::DEFAULT_BRANCH_ID;
use crate::domain::types::BranchId;
use crate::dto::attendance::AttendancePageData;
use crate::dto::clients::ClientsPageData;
use crate::dto::employees::EmployeesPageData;
use crate::dto::profile::ProfilePageData;
use crate::dto::shifts::ShiftsPageData;
use crate::forms::client::AddClientForm;
use crate::forms::login::LoginForm;
use crate::forms::shift::AddShiftForm;
use crate::lookup::{EmployeeNames, NameLookup};
use crate::models::config::DashboardConfig;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::routes::{Navigation, Route, RouteGuard};
use crate::services::{ServiceError, auth, clients, shifts};
use crate::session::{FileSessionStore, SessionStore};
use crate::views::{ViewError, Views};

#[derive(Debug, Parser)]
#[command(name = "noventer-dashboard", version, about = "Noventer company dashboard")]
pub struct Cli {
    /// Configuration profile loaded from `config/{APP_ENV}.yaml`.
    #[arg(long, env = "APP_ENV", default_value = "local")]
    pub app_env: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the credential.
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long, env = "NOVENTER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored credential.
    Logout,
    /// Render any page by path, e.g. `/attendance?search=Ali&page=2`.
    Open { path: String },
    /// Employees of one branch.
    Employees {
        #[arg(long, default_value_t = DEFAULT_BRANCH_ID)]
        branch: i32,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Attendance records.
    Attendance {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Clients, optionally filtered by branch name.
    Clients {
        #[arg(long)]
        branch: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a client.
    AddClient {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        branch: Option<i32>,
    },
    /// Shifts grouped by branch.
    Shifts {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a shift.
    AddShift {
        #[arg(long)]
        name: String,
        #[arg(long)]
        branch: String,
        #[arg(long)]
        start_time: String,
        #[arg(long)]
        end_time: String,
    },
    /// Browse interactively, starting at `path`.
    Browse {
        #[arg(default_value = "/")]
        path: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown page: {0}")]
    UnknownPage(String),
}

/// Query parameters understood by list pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub branch: Option<String>,
}

impl PageParams {
    /// Splits `path?query` into a route and its parameters.
    pub fn parse(path: &str) -> Result<(Route, PageParams), AppError> {
        let route = Route::from_path(path).ok_or_else(|| AppError::UnknownPage(path.to_string()))?;
        let params = match path.split_once('?') {
            Some((_, query)) => serde_html_form::from_str(query).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed query '{query}': {err}");
                PageParams::default()
            }),
            None => PageParams::default(),
        };
        Ok((route, params))
    }
}

/// Operations shared by every list page.
trait Pager {
    fn mount(&self);
    fn input_search(&self, term: &str);
    fn commit_search(&self, term: &str);
    fn go_to_page(&self, page: usize);
    fn first_page(&self);
    fn previous_page(&self);
    fn next_page(&self);
    fn last_page(&self);
    fn refresh(&self);
    fn restart(&self);
    fn unmount(&self);
}

impl<S: ListSource> Pager for ListController<S> {
    fn mount(&self) {
        ListController::mount(self);
    }
    fn input_search(&self, term: &str) {
        ListController::input_search(self, term);
    }
    fn commit_search(&self, term: &str) {
        ListController::commit_search(self, term);
    }
    fn go_to_page(&self, page: usize) {
        ListController::go_to_page(self, page);
    }
    fn first_page(&self) {
        ListController::first_page(self);
    }
    fn previous_page(&self) {
        ListController::previous_page(self);
    }
    fn next_page(&self) {
        ListController::next_page(self);
    }
    fn last_page(&self) {
        ListController::last_page(self);
    }
    fn refresh(&self) {
        ListController::refresh(self);
    }
    fn restart(&self) {
        ListController::restart(self);
    }
    fn unmount(&self) {
        ListController::unmount(self);
    }
}

/// A list controller together with the receiver used to wait for redraws.
struct Mounted<S: ListSource> {
    controller: ListController<S>,
    rx: watch::Receiver<ListState<S::Item>>,
}

impl<S: ListSource> Mounted<S> {
    fn new(source: S) -> Self {
        let controller = ListController::new(source, DEFAULT_ITEMS_PER_PAGE);
        let rx = controller.subscribe();
        Self { controller, rx }
    }

    async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

enum ActivePage {
    Login,
    Home(Result<ProfilePageData, String>),
    Employees(Mounted<BranchEmployeesSource>),
    Attendance(Mounted<AttendanceSource>, NameLookup<EmployeeNames>),
    Clients(Mounted<ClientsSource>),
    Shifts(Mounted<ShiftsSource>),
}

impl ActivePage {
    fn route(&self) -> Route {
        match self {
            ActivePage::Login => Route::Login,
            ActivePage::Home(_) => Route::Home,
            ActivePage::Employees(_) => Route::Employees,
            ActivePage::Attendance(..) => Route::Attendance,
            ActivePage::Clients(_) => Route::Clients,
            ActivePage::Shifts(_) => Route::Shifts,
        }
    }

    fn pager(&self) -> Option<&dyn Pager> {
        match self {
            ActivePage::Login | ActivePage::Home(_) => None,
            ActivePage::Employees(page) => Some(&page.controller),
            ActivePage::Attendance(page, _) => Some(&page.controller),
            ActivePage::Clients(page) => Some(&page.controller),
            ActivePage::Shifts(page) => Some(&page.controller),
        }
    }

    async fn settle(&self) {
        match self {
            ActivePage::Login | ActivePage::Home(_) => {}
            ActivePage::Employees(page) => {
                page.controller.settled().await;
            }
            ActivePage::Attendance(page, _) => {
                page.controller.settled().await;
            }
            ActivePage::Clients(page) => {
                page.controller.settled().await;
            }
            ActivePage::Shifts(page) => {
                page.controller.settled().await;
            }
        }
    }

    /// Resolves when the page needs to be drawn again; never for static pages.
    async fn changed(&mut self) -> bool {
        match self {
            ActivePage::Login | ActivePage::Home(_) => std::future::pending().await,
            ActivePage::Employees(page) => page.changed().await,
            ActivePage::Attendance(page, _) => page.changed().await,
            ActivePage::Clients(page) => page.changed().await,
            ActivePage::Shifts(page) => page.changed().await,
        }
    }

    fn unmount(&self) {
        if let Some(pager) = self.pager() {
            pager.unmount();
        }
    }
}

enum Event {
    Line(Option<String>),
    Changed(bool),
}

enum Flow {
    Continue(Option<String>),
    Open(String),
    Quit,
}

const BROWSE_HELP: &str = "Buyruqlar: /yo'l | s <matn> | n | p | f | l | g <sahifa> | b <filial> | r | add <a;b;..> | login <telefon> <parol> | logout | q";

/// Wires the session store, HTTP client, guard and views together.
pub struct App {
    api: Arc<dyn ApiTransport>,
    session: Arc<dyn SessionStore>,
    guard: RouteGuard,
    views: Views,
}

impl App {
    pub fn new(config: &DashboardConfig) -> Result<Self, AppError> {
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));
        let api = HttpApiClient::new(
            &config.api_base_url,
            Arc::clone(&session),
            config.request_timeout(),
        )?;
        Self::with_parts(Arc::new(api), session).map_err(AppError::from)
    }

    pub fn with_parts(
        api: Arc<dyn ApiTransport>,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ViewError> {
        Ok(Self {
            api,
            guard: RouteGuard::new(Arc::clone(&session)),
            session,
            views: Views::new()?,
        })
    }

    /// Runs one command and returns what should be printed.
    pub async fn execute(&self, command: Command) -> Result<String, AppError> {
        match command {
            Command::Login { phone, password } => {
                auth::login(
                    self.api.as_ref(),
                    self.session.as_ref(),
                    &LoginForm::new(phone, password),
                )
                .await?;
                self.show(Route::Home, PageParams::default()).await
            }
            Command::Logout => {
                auth::logout(self.session.as_ref())?;
                self.show(Route::Login, PageParams::default()).await
            }
            Command::Open { path } => {
                let (route, params) = PageParams::parse(&path)?;
                self.show(route, params).await
            }
            Command::Employees { branch, page } => {
                let params = PageParams {
                    page: Some(page),
                    branch: Some(branch.to_string()),
                    ..PageParams::default()
                };
                self.show(Route::Employees, params).await
            }
            Command::Attendance { search, page } => {
                let params = PageParams {
                    page: Some(page),
                    search,
                    ..PageParams::default()
                };
                self.show(Route::Attendance, params).await
            }
            Command::Clients {
                branch,
                search,
                page,
            } => {
                let params = PageParams {
                    page: Some(page),
                    search,
                    branch,
                };
                self.show(Route::Clients, params).await
            }
            Command::AddClient {
                name,
                phone,
                branch,
            } => {
                let form = AddClientForm {
                    name,
                    phone,
                    branch,
                };
                let created = clients::add_client(self.api.as_ref(), &form).await?;
                Ok(format!("Mijoz qo'shildi: {} ({})", created.name, created.id))
            }
            Command::Shifts { search, page } => {
                let params = PageParams {
                    page: Some(page),
                    search,
                    ..PageParams::default()
                };
                self.show(Route::Shifts, params).await
            }
            Command::AddShift {
                name,
                branch,
                start_time,
                end_time,
            } => {
                let form = AddShiftForm {
                    name,
                    branch,
                    start_time,
                    end_time,
                };
                shifts::add_shift(self.api.as_ref(), &form).await?;
                self.show(Route::Shifts, PageParams::default()).await
            }
            Command::Browse { path } => self.browse(&path).await.map(|()| String::new()),
        }
    }

    /// Opens a page, waits for its data and renders it once.
    pub async fn show(&self, route: Route, params: PageParams) -> Result<String, AppError> {
        let page = self.open(route, &params).await?;
        let output = self.render(&page, None).await;
        page.unmount();
        output
    }

    async fn open(&self, route: Route, params: &PageParams) -> Result<ActivePage, AppError> {
        let route = match self.guard.navigate(route) {
            Navigation::Render(route) => route,
            Navigation::Redirect(target) => target,
        };

        let page = match route {
            Route::Login => ActivePage::Login,
            Route::Home => ActivePage::Home(
                auth::load_profile(self.api.as_ref())
                    .await
                    .map(|profile| ProfilePageData::from(&profile))
                    .map_err(|err| err.to_string()),
            ),
            Route::Employees => {
                let branch = match params.branch.as_deref().map(str::parse::<i32>) {
                    Some(Ok(id)) => BranchId::new(id).map_err(ServiceError::from)?,
                    Some(Err(_)) => {
                        log::warn!("Ignoring non-numeric branch filter");
                        BranchId::new(DEFAULT_BRANCH_ID).map_err(ServiceError::from)?
                    }
                    None => BranchId::new(DEFAULT_BRANCH_ID).map_err(ServiceError::from)?,
                };
                ActivePage::Employees(Mounted::new(BranchEmployeesSource::new(
                    Arc::clone(&self.api),
                    branch,
                )))
            }
            Route::Attendance => ActivePage::Attendance(
                Mounted::new(AttendanceSource::new(Arc::clone(&self.api))),
                NameLookup::new(EmployeeNames::new(Arc::clone(&self.api))),
            ),
            Route::Clients => {
                let source = ClientsSource::new(Arc::clone(&self.api));
                if let Some(branch) = params.branch.as_deref() {
                    source.set_branch_filter(branch);
                }
                ActivePage::Clients(Mounted::new(source))
            }
            Route::Shifts => ActivePage::Shifts(Mounted::new(ShiftsSource::new(Arc::clone(
                &self.api,
            )))),
        };

        if let Some(pager) = page.pager() {
            match params.search.as_deref().map(str::trim) {
                Some(search) if !search.is_empty() => pager.commit_search(search),
                _ => pager.mount(),
            }
            page.settle().await;

            if let Some(target) = params.page.filter(|target| *target > 1) {
                pager.go_to_page(target);
                page.settle().await;
            }
        }

        Ok(page)
    }

    async fn render(&self, page: &ActivePage, notice: Option<&str>) -> Result<String, AppError> {
        let output = match page {
            ActivePage::Login => self.views.login("", notice)?,
            ActivePage::Home(Ok(profile)) => self.views.profile(Some(profile), None)?,
            ActivePage::Home(Err(error)) => self.views.profile(None, Some(error.as_str()))?,
            ActivePage::Employees(page) => {
                let state = page.controller.snapshot();
                let branch = page.controller.source().branch();
                self.views
                    .employees(&EmployeesPageData::new(branch, &state))?
            }
            ActivePage::Attendance(page, lookup) => {
                let names = lookup.names().await;
                let state = page.controller.snapshot();
                self.views
                    .attendance(&AttendancePageData::new(&state, names))?
            }
            ActivePage::Clients(page) => {
                let source = page.controller.source();
                let data = ClientsPageData::new(
                    &source.filter_options(),
                    &source.branch_filter(),
                    &page.controller.snapshot(),
                );
                self.views.clients(&data, notice)?
            }
            ActivePage::Shifts(page) => {
                let data = ShiftsPageData::new(&page.controller.snapshot());
                self.views.shifts(&data, notice)?
            }
        };

        // Pages without their own notice slot get it appended.
        match (notice, page) {
            (Some(notice), ActivePage::Home(_) | ActivePage::Employees(_) | ActivePage::Attendance(..)) => {
                Ok(format!("{output}\n! {notice}"))
            }
            _ => Ok(output),
        }
    }

    /// Interactive loop: reads commands from stdin and redraws on every state change.
    pub async fn browse(&self, start: &str) -> Result<(), AppError> {
        let (route, params) = PageParams::parse(start)?;
        let mut page = self.open(route, &params).await?;
        println!("{}\n{BROWSE_HELP}", self.render(&page, None).await?);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let event = tokio::select! {
                line = lines.next_line() => Event::Line(line?),
                changed = page.changed() => Event::Changed(changed),
            };

            let flow = match event {
                Event::Line(None) => Flow::Quit,
                Event::Line(Some(line)) => self.handle_line(&page, line.trim()).await,
                Event::Changed(true) => Flow::Continue(None),
                Event::Changed(false) => Flow::Quit,
            };

            match flow {
                Flow::Quit => break,
                Flow::Continue(notice) => {
                    println!("{}", self.render(&page, notice.as_deref()).await?);
                }
                Flow::Open(path) => match PageParams::parse(&path) {
                    Ok((route, params)) => {
                        page.unmount();
                        page = self.open(route, &params).await?;
                        println!("{}", self.render(&page, None).await?);
                    }
                    Err(err) => println!("! {err}"),
                },
            }
        }

        page.unmount();
        Ok(())
    }

    async fn handle_line(&self, page: &ActivePage, line: &str) -> Flow {
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        if command.starts_with('/') {
            return Flow::Open(line.to_string());
        }

        match (command, page.pager()) {
            ("q" | "quit", _) => Flow::Quit,
            ("login", _) => {
                let (phone, password) = argument.rsplit_once(' ').unwrap_or((argument, ""));
                let form = LoginForm::new(phone, password);
                match auth::login(self.api.as_ref(), self.session.as_ref(), &form).await {
                    Ok(_) => Flow::Open(Route::Home.path().to_string()),
                    Err(err) => Flow::Continue(Some(err.to_string())),
                }
            }
            ("logout", _) => match auth::logout(self.session.as_ref()) {
                Ok(()) => Flow::Open(Route::Login.path().to_string()),
                Err(err) => Flow::Continue(Some(err.to_string())),
            },
            ("add", _) => self.add_from_line(page, argument).await,
            ("b", Some(pager)) => Self::select_branch(page, pager, argument),
            ("s", Some(pager)) => {
                pager.input_search(argument);
                Flow::Continue(None)
            }
            ("n", Some(pager)) => {
                pager.next_page();
                Flow::Continue(None)
            }
            ("p", Some(pager)) => {
                pager.previous_page();
                Flow::Continue(None)
            }
            ("f", Some(pager)) => {
                pager.first_page();
                Flow::Continue(None)
            }
            ("l", Some(pager)) => {
                pager.last_page();
                Flow::Continue(None)
            }
            ("g", Some(pager)) => match argument.parse::<usize>() {
                Ok(target) => {
                    pager.go_to_page(target);
                    Flow::Continue(None)
                }
                Err(_) => Flow::Continue(Some(BROWSE_HELP.to_string())),
            },
            ("r", Some(pager)) => {
                pager.refresh();
                Flow::Continue(None)
            }
            ("r", None) => Flow::Open(page.route().path().to_string()),
            _ => Flow::Continue(Some(BROWSE_HELP.to_string())),
        }
    }

    fn select_branch(page: &ActivePage, pager: &dyn Pager, argument: &str) -> Flow {
        match page {
            ActivePage::Employees(mounted) => {
                match argument.parse::<i32>().ok().and_then(|id| BranchId::new(id).ok()) {
                    Some(branch) => {
                        mounted.controller.source().set_branch(branch);
                        pager.restart();
                        Flow::Continue(None)
                    }
                    None => Flow::Continue(Some(BROWSE_HELP.to_string())),
                }
            }
            ActivePage::Clients(mounted) => {
                mounted.controller.source().set_branch_filter(argument);
                pager.restart();
                Flow::Continue(None)
            }
            _ => Flow::Continue(Some(BROWSE_HELP.to_string())),
        }
    }

    async fn add_from_line(&self, page: &ActivePage, argument: &str) -> Flow {
        let fields: Vec<&str> = argument.split(';').map(str::trim).collect();
        match page {
            ActivePage::Clients(mounted) => {
                let form = AddClientForm {
                    name: fields.first().copied().unwrap_or_default().to_string(),
                    phone: fields.get(1).copied().unwrap_or_default().to_string(),
                    branch: fields.get(2).and_then(|branch| branch.parse().ok()),
                };
                match clients::add_client(self.api.as_ref(), &form).await {
                    Ok(created) => {
                        mounted.controller.refresh();
                        Flow::Continue(Some(format!("Mijoz qo'shildi: {}", created.name)))
                    }
                    Err(err) => Flow::Continue(Some(err.to_string())),
                }
            }
            ActivePage::Shifts(mounted) => {
                let field = |index: usize| fields.get(index).copied().unwrap_or_default().to_string();
                let form = AddShiftForm {
                    name: field(0),
                    branch: field(1),
                    start_time: field(2),
                    end_time: field(3),
                };
                match shifts::add_shift(self.api.as_ref(), &form).await {
                    Ok(()) => {
                        mounted.controller.refresh();
                        Flow::Continue(None)
                    }
                    Err(err) => Flow::Continue(Some(err.to_string())),
                }
            }
            _ => Flow::Continue(Some(BROWSE_HELP.to_string())),
        }
    }
}

/// Entry point used by the binary.
pub async fn run(cli: Cli, config: DashboardConfig) -> Result<(), AppError> {
    let app = App::new(&config)?;
    let output = app.execute(cli.command).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
