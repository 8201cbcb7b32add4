//! Browse command handler
//!
//! Interactive session over the dashboard controller. Filter edits are
//! debounced, paging and sorting apply at once, and every settled listing is
//! printed as it arrives. Theme, height unit and filters are saved on exit.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::players::{stdout_error, today};
use crate::cli::render;
use crate::config::settings::Settings;
use crate::dashboard::state::load_or;
use crate::dashboard::{
    DashboardController, DashboardState, JsonFileStore, LoadState, Notice, NoticeReceiver,
    StateStore, Theme,
};
use crate::error::{AppError, AppResult};
use crate::external::players::PlayerApi;
use crate::filters::{FilterEdit, FilterField, FilterStateManager};
use crate::import::CsvPreflight;
use crate::models::{
    HeightUnit, Player, Position, SortBy, SortDirection, UpdatePlayer, normalize_nationality,
    round_to_cm,
};

const HELP: &str = "\
Commands:
  set <field> <value>     edit a filter (applied after a short pause)
  clear <field>           clear a filter
                          fields: name, nationalities, positions, minAge, maxAge,
                                  minHeight, maxHeight
  next | prev | page <n>  move between pages
  size <n>                players per page
  sort <key> [asc|desc]   key: name, age, height, positions, nationality
  reset                   restore default filters
  show | refresh          print the current page again / fetch it again
  get <id>                show one player
  create <key=value>...   keys: firstName, lastName, dateOfBirth, height,
                          nationalities, positions (lists comma separated)
  update <id> <key=value>...
  delete <id> confirm     delete a player
  import <file>           upload a CSV file
  units | theme           toggle height unit / color theme
  help | quit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Set(FilterField, String),
    Clear(FilterField),
    Next,
    Prev,
    /// 1-based
    Page(u32),
    Size(u32),
    Sort(SortBy, SortDirection),
    Reset,
    Show,
    Refresh,
    Get(i64),
    Create(Vec<(String, String)>),
    Update(i64, Vec<(String, String)>),
    Delete { id: i64, confirmed: bool },
    Import(PathBuf),
    Units,
    Theme,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: set <field> <value>")?;
            BrowseCommand::Set(filter_field(field)?, value.trim().to_string())
        }
        "clear" => BrowseCommand::Clear(filter_field(rest)?),
        "next" | "n" => BrowseCommand::Next,
        "prev" | "p" => BrowseCommand::Prev,
        "page" => BrowseCommand::Page(positive(rest, "page")?),
        "size" => BrowseCommand::Size(positive(rest, "size")?),
        "sort" => match FilterEdit::parse(FilterField::Sort, rest, HeightUnit::Meters) {
            Ok(FilterEdit::Sort(by, direction)) => BrowseCommand::Sort(by, direction),
            Ok(_) => return Err("usage: sort <key> [asc|desc]".to_string()),
            Err(e) => return Err(e.to_string()),
        },
        "reset" => BrowseCommand::Reset,
        "show" | "ls" => BrowseCommand::Show,
        "refresh" => BrowseCommand::Refresh,
        "get" => BrowseCommand::Get(player_id(rest)?),
        "create" => BrowseCommand::Create(key_values(rest)?),
        "update" => {
            let (id, fields) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: update <id> <key=value>...")?;
            BrowseCommand::Update(player_id(id)?, key_values(fields)?)
        }
        "delete" => {
            let mut parts = rest.split_whitespace();
            let id = player_id(parts.next().unwrap_or(""))?;
            BrowseCommand::Delete {
                id,
                confirmed: parts.next() == Some("confirm"),
            }
        }
        "import" if !rest.is_empty() => BrowseCommand::Import(PathBuf::from(rest)),
        "import" => return Err("usage: import <file>".to_string()),
        "units" => BrowseCommand::Units,
        "theme" => BrowseCommand::Theme,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

fn filter_field(raw: &str) -> Result<FilterField, String> {
    match raw.parse::<FilterField>()? {
        FilterField::Sort | FilterField::Page | FilterField::PageSize => Err(format!(
            "'{}' is not a filter; use sort, page or size",
            raw
        )),
        field => Ok(field),
    }
}

fn positive(raw: &str, what: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{} expects a number greater than 0", what)),
    }
}

fn player_id(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("'{}' is not a player id", raw.trim())),
    }
}

/// Split `key=value` pairs; values may be double-quoted to keep spaces.
fn key_values(raw: &str) -> Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    let mut chars = raw.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let key: String = std::iter::from_fn(|| chars.next_if(|&c| c != '=' && !c.is_whitespace()))
            .collect();
        if chars.next() != Some('=') {
            return Err(format!("expected key=value, got '{}'", key));
        }

        let value: String = if chars.next_if_eq(&'"').is_some() {
            let quoted: String = std::iter::from_fn(|| chars.next_if(|&c| c != '"')).collect();
            if chars.next() != Some('"') {
                return Err(format!("unterminated quote for '{}'", key));
            }
            quoted
        } else {
            std::iter::from_fn(|| chars.next_if(|c| !c.is_whitespace())).collect()
        };
        pairs.push((key, value));
    }

    if pairs.is_empty() {
        return Err("expected at least one key=value".to_string());
    }
    Ok(pairs)
}

/// Turn `key=value` pairs into a partial update. Heights are read in `unit`.
pub fn player_fields(pairs: &[(String, String)], unit: HeightUnit) -> Result<UpdatePlayer, String> {
    let mut update = UpdatePlayer::default();
    for (key, value) in pairs {
        match key.to_ascii_lowercase().as_str() {
            "firstname" => update.first_name = Some(value.trim().to_string()),
            "lastname" => update.last_name = Some(value.trim().to_string()),
            "dateofbirth" | "dob" => {
                update.date_of_birth = Some(
                    value
                        .parse::<jiff::civil::Date>()
                        .map_err(|_| format!("dateOfBirth expects YYYY-MM-DD, got '{}'", value))?,
                )
            }
            "height" => match value.parse::<f64>() {
                Ok(h) if h.is_finite() && h > 0.0 => {
                    update.height = Some(round_to_cm(unit.to_meters(h)))
                }
                _ => return Err(format!("height expects a positive number, got '{}'", value)),
            },
            "nationalities" | "nationality" => {
                let codes = list(value)
                    .map(normalize_nationality)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.to_string())?;
                update.nationalities = Some(codes);
            }
            "positions" | "position" => {
                let codes = list(value)
                    .map(str::parse::<Position>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.to_string())?;
                update.positions = Some(codes);
            }
            other => return Err(format!("Unknown player field '{}'", other)),
        }
    }
    Ok(update)
}

fn list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// A complete new player from fields; names every missing one.
pub fn new_player(fields: UpdatePlayer) -> Result<Player, String> {
    let mut missing = Vec::new();
    if fields.first_name.as_deref().is_none_or(str::is_empty) {
        missing.push("firstName");
    }
    if fields.last_name.as_deref().is_none_or(str::is_empty) {
        missing.push("lastName");
    }
    if fields.date_of_birth.is_none() {
        missing.push("dateOfBirth");
    }
    if fields.height.is_none() {
        missing.push("height");
    }
    if fields.nationalities.as_ref().is_none_or(Vec::is_empty) {
        missing.push("nationalities");
    }
    if fields.positions.as_ref().is_none_or(Vec::is_empty) {
        missing.push("positions");
    }

    match fields {
        UpdatePlayer {
            first_name: Some(first_name),
            last_name: Some(last_name),
            nationalities: Some(nationalities),
            positions: Some(positions),
            date_of_birth: Some(date_of_birth),
            height: Some(height),
        } if missing.is_empty() => Ok(Player {
            id: None,
            first_name,
            last_name,
            nationalities,
            date_of_birth,
            positions,
            height,
            creation_date: None,
            last_modified_date: None,
        }),
        _ => Err(format!("Missing fields: {}", missing.join(", "))),
    }
}

fn say(out: &mut impl Write, text: impl fmt::Display) -> AppResult<()> {
    writeln!(out, "{}", text).map_err(stdout_error)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Handler for the browse command
pub struct BrowseCommandHandler {
    api: Arc<dyn PlayerApi>,
    config: Settings,
}

impl BrowseCommandHandler {
    pub fn new(api: Arc<dyn PlayerApi>, config: Settings) -> Self {
        Self { api, config }
    }

    /// Run the session on stdin/stdout until `quit` or end of input.
    pub async fn execute(&self, fresh: bool) -> AppResult<()> {
        let store = Arc::new(JsonFileStore::new(self.config.dashboard.state_path()));
        let (session, notices) = BrowseSession::start(self.api.clone(), &self.config, store, fresh)?;
        session
            .run(BufReader::new(tokio::io::stdin()), notices, std::io::stdout())
            .await?;
        Ok(())
    }
}

/// A running browse session. Output goes to the writer given to [`run`](Self::run).
pub struct BrowseSession {
    controller: DashboardController,
    store: Arc<dyn StateStore>,
    state: DashboardState,
    page_size_options: Vec<u32>,
    preflight: CsvPreflight,
}

impl BrowseSession {
    /// Restore saved preferences (unless `fresh`) and wire the controller.
    /// Must be called within a tokio runtime.
    pub fn start(
        api: Arc<dyn PlayerApi>,
        config: &Settings,
        store: Arc<dyn StateStore>,
        fresh: bool,
    ) -> AppResult<(Self, NoticeReceiver)> {
        let defaults = config.dashboard.default_criteria();
        let fallback = DashboardState::new(defaults.clone(), config.dashboard.height_unit);
        let state = if fresh {
            fallback
        } else {
            load_or(store.as_ref(), fallback)
        };

        let filters =
            FilterStateManager::with_initial(defaults, state.filters.clone(), config.dashboard.debounce());
        let (controller, notices) = DashboardController::new(api, filters);

        let session = Self {
            controller,
            store,
            state,
            page_size_options: config.dashboard.page_size_options.clone(),
            preflight: CsvPreflight::new()?,
        };
        Ok((session, notices))
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    /// Read commands from `input` until `quit` or end of input, then save
    /// preferences. Returns the writer.
    pub async fn run<R, W>(
        mut self,
        input: R,
        mut notices: NoticeReceiver,
        mut out: W,
    ) -> AppResult<W>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Type 'help' for commands.").map_err(stdout_error)?;
        self.controller.refresh().await;
        self.print_results(&mut out)?;

        // Subscribed after the first load so it is not printed twice.
        let mut revisions = self.controller.results().subscribe();
        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.map_err(|e| AppError::io("stdin", e))? else {
                        break;
                    };
                    if self.handle_line(&line, &mut out).await? == Flow::Quit {
                        break;
                    }
                }
                Ok(()) = revisions.changed() => {
                    self.print_results(&mut out)?;
                }
                Some(notice) = notices.recv() => {
                    writeln!(out, "{}", notice).map_err(stdout_error)?;
                }
            }
        }

        while let Ok(notice) = notices.try_recv() {
            writeln!(out, "{}", notice).map_err(stdout_error)?;
        }
        self.save();
        Ok(out)
    }

    async fn handle_line(&mut self, line: &str, out: &mut impl Write) -> AppResult<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(message) => {
                writeln!(out, "{}", Notice::warning(message)).map_err(stdout_error)?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "Browse command");

        let unit = self.state.units;
        match command {
            BrowseCommand::Set(field, value) => {
                if let Err(e) = self.controller.filters().update_raw(field, &value, unit) {
                    say(out, Notice::warning(e.to_string()))?;
                }
            }
            BrowseCommand::Clear(field) => match FilterEdit::clear(field) {
                Some(edit) => self.controller.filters().update(edit),
                None => say(out, Notice::warning(format!("'{}' cannot be cleared", field)))?,
            },
            BrowseCommand::Next => {
                if !self.controller.next_page() {
                    say(out, "Already on the last page.")?;
                }
            }
            BrowseCommand::Prev => {
                if !self.controller.prev_page() {
                    say(out, "Already on the first page.")?;
                }
            }
            BrowseCommand::Page(n) => {
                self.controller.set_page(n - 1);
            }
            BrowseCommand::Size(n) => {
                if !self.page_size_options.contains(&n) {
                    let message = format!(
                        "{} is not one of the usual sizes {:?}",
                        n, self.page_size_options
                    );
                    say(out, Notice::info(message))?;
                }
                if let Err(e) = self.controller.set_page_size(n) {
                    say(out, Notice::warning(e.to_string()))?;
                }
            }
            BrowseCommand::Sort(by, direction) => {
                self.controller.set_sort(by, direction);
            }
            BrowseCommand::Reset => {
                if !self.controller.reset() {
                    say(out, "Filters are already at their defaults.")?;
                }
            }
            BrowseCommand::Show => self.print_results(out)?,
            BrowseCommand::Refresh => {
                self.controller.refresh().await;
            }
            BrowseCommand::Get(id) => {
                if let Ok(player) = self.controller.get(id).await {
                    write!(out, "{}", render::player_detail(&player, unit, today()))
                        .map_err(stdout_error)?;
                }
            }
            BrowseCommand::Create(pairs) => {
                match player_fields(&pairs, unit).and_then(new_player) {
                    Ok(player) => {
                        let _ = self.controller.create(&player).await;
                    }
                    Err(message) => say(out, Notice::warning(message))?,
                }
            }
            BrowseCommand::Update(id, pairs) => match player_fields(&pairs, unit) {
                Ok(update) => {
                    let _ = self.controller.update(id, &update).await;
                }
                Err(message) => say(out, Notice::warning(message))?,
            },
            BrowseCommand::Delete { id, confirmed } => {
                if confirmed {
                    let _ = self.controller.delete(id).await;
                } else {
                    let message = format!(
                        "Are you sure you want to delete player {}? Run 'delete {} confirm'.",
                        id, id
                    );
                    say(out, message)?;
                }
            }
            BrowseCommand::Import(path) => self.import(&path, out).await?,
            BrowseCommand::Units => {
                self.state.units = unit.toggled();
                say(out, format!("Heights now shown in {}.", self.state.units))?;
                self.print_results(out)?;
            }
            BrowseCommand::Theme => {
                self.state.theme = self.state.theme.toggled();
                let theme = match self.state.theme {
                    Theme::Light => "light",
                    Theme::Dark => "dark",
                };
                say(out, format!("Theme: {}.", theme))?;
            }
            BrowseCommand::Help => say(out, HELP)?,
            BrowseCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn import(&self, path: &std::path::Path, out: &mut impl Write) -> AppResult<()> {
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(e) => {
                let message = format!("Cannot read {}: {}", path.display(), e);
                return writeln!(out, "{}", Notice::error(message)).map_err(stdout_error);
            }
        };
        if let Err(e) = self.preflight.check(&contents) {
            return writeln!(out, "{}", Notice::error(e.to_string())).map_err(stdout_error);
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "players.csv".to_string());
        let _ = self.controller.upload_csv(&file_name, contents).await;
        Ok(())
    }

    fn print_results(&self, out: &mut impl Write) -> AppResult<()> {
        let unit = self.state.units;
        match self.controller.results().state() {
            LoadState::Idle | LoadState::Failed(_) => Ok(()),
            LoadState::Loading => writeln!(out, "Loading players...").map_err(stdout_error),
            LoadState::Success(page) => {
                let criteria = self.controller.filters().committed();
                if let Some(summary) = render::filter_summary(&criteria, unit) {
                    writeln!(out, "{}", summary).map_err(stdout_error)?;
                }
                for issue in criteria.bound_issues() {
                    writeln!(out, "{}", Notice::warning(render::bound_issue(&issue, unit)))
                        .map_err(stdout_error)?;
                }
                write!(out, "{}", render::page(&page, unit, today())).map_err(stdout_error)
            }
        }
    }

    fn save(&self) {
        let mut state = self.state.clone();
        state.filters = (*self.controller.filters().current()).clone();
        if let Err(e) = self.store.save(&state) {
            tracing::warn!(error = %e, "Could not save dashboard state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::MemoryStore;
    use crate::external::players::PlayerServiceClient;
    use crate::external::players::test_support::MockService;
    use axum::http::StatusCode;
    use jiff::civil::date;

    const PAGE: &str = r#"{"content":[{"id":1,"firstName":"Bukayo","lastName":"Saka",
        "nationalities":["GB"],"dateOfBirth":"2001-09-05","positions":["RW"],"height":1.78}],
        "totalElements":25,"totalPages":3,"number":0}"#;

    async fn session(
        service: &MockService,
        store: Arc<MemoryStore>,
    ) -> (BrowseSession, NoticeReceiver) {
        let client = PlayerServiceClient::new(reqwest::Client::new(), service.base_url());
        BrowseSession::start(Arc::new(client), &Settings::default(), store, false).unwrap()
    }

    async fn run(service: &MockService, store: Arc<MemoryStore>, input: &str) -> String {
        let (session, notices) = session(service, store).await;
        let out = session.run(input.as_bytes(), notices, Vec::new()).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(
            parse_command("set nat fr br").unwrap(),
            Some(BrowseCommand::Set(FilterField::Nationalities, "fr br".to_string()))
        );
        assert_eq!(
            parse_command("clear minHeight").unwrap(),
            Some(BrowseCommand::Clear(FilterField::MinHeight))
        );
        assert_eq!(parse_command("page 3").unwrap(), Some(BrowseCommand::Page(3)));
        assert_eq!(
            parse_command("sort height desc").unwrap(),
            Some(BrowseCommand::Sort(SortBy::Height, SortDirection::Desc))
        );
        assert_eq!(
            parse_command("delete 4 confirm").unwrap(),
            Some(BrowseCommand::Delete {
                id: 4,
                confirmed: true
            })
        );
        assert_eq!(parse_command("Q").unwrap(), Some(BrowseCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_command("page 0").is_err());
        assert!(parse_command("set page 2").is_err());
        assert!(parse_command("set name").is_err());
        assert!(parse_command("get abc").is_err());
        assert!(parse_command("import").is_err());
        assert!(parse_command("dance").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_key_values_with_quotes() {
        let pairs = key_values(r#"firstName=Virgil lastName="van Dijk" height=1.95"#).unwrap();
        assert_eq!(pairs[1], ("lastName".to_string(), "van Dijk".to_string()));
        assert_eq!(pairs.len(), 3);
        assert!(key_values("firstName").is_err());
        assert!(key_values(r#"lastName="van"#).is_err());
        assert!(key_values("").is_err());
    }

    #[test]
    fn test_player_fields_and_new_player() {
        let pairs = key_values(
            "firstName=Virgil lastName=Dijk dateOfBirth=1991-07-08 height=6.4 \
             nationalities=nl positions=CB",
        )
        .unwrap();
        let fields = player_fields(&pairs, HeightUnit::Feet).unwrap();
        assert_eq!(fields.height, Some(1.95));
        assert_eq!(fields.nationalities, Some(vec!["NL".to_string()]));

        let player = new_player(fields).unwrap();
        assert_eq!(player.date_of_birth, date(1991, 7, 8));
        assert_eq!(player.positions, vec![Position::Cb]);

        let partial = player_fields(&key_values("firstName=A height=1.8").unwrap(), HeightUnit::Meters)
            .unwrap();
        let err = new_player(partial).unwrap_err();
        assert_eq!(err, "Missing fields: lastName, dateOfBirth, nationalities, positions");

        assert!(player_fields(&key_values("shoe=42").unwrap(), HeightUnit::Meters).is_err());
    }

    #[tokio::test]
    async fn test_session_prints_first_page_and_saves_state() {
        let service = MockService::start(StatusCode::OK, PAGE).await;
        let store = Arc::new(MemoryStore::new());

        let out = run(&service, store.clone(), "units\ntheme\nquit\n").await;
        assert!(out.contains("Bukayo Saka"));
        assert!(out.contains("Players 1-1 of 25 | page 1 of 3"));
        assert!(out.contains("Heights now shown in ft."));
        assert!(out.contains("5.84 ft"));

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.units, HeightUnit::Feet);
        assert_eq!(saved.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_session_restores_and_saves_filters() {
        let service = MockService::start(StatusCode::OK, PAGE).await;
        let store = Arc::new(MemoryStore::new());

        run(&service, store.clone(), "set nat fr\nnext\n").await;
        let saved = store.load().unwrap().unwrap();
        assert!(saved.filters.nationalities.contains("FR"));

        let (session, _notices) = session(&service, store.clone()).await;
        assert!(session.controller().filters().committed().nationalities.contains("FR"));
        assert!(!session.controller().filters().has_pending());
    }

    #[tokio::test]
    async fn test_session_reports_failures_as_notices() {
        let service = MockService::start(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let out = run(&service, Arc::new(MemoryStore::new()), "bogus\nquit\n").await;
        assert!(out.contains("[error] Failed to fetch players."));
        assert!(out.contains("[warning] Unknown command 'bogus'"));
    }

    #[tokio::test]
    async fn test_clear_removes_filter() {
        let service = MockService::start(StatusCode::OK, PAGE).await;
        let store = Arc::new(MemoryStore::new());

        run(&service, store.clone(), "set minAge 20
clear minAge
set name Saka
quit
").await;
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.filters.min_age, None);
        assert_eq!(saved.filters.name, "Saka");
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let service = MockService::start(StatusCode::OK, PAGE).await;
        let out = run(&service, Arc::new(MemoryStore::new()), "delete 1\nquit\n").await;
        assert!(out.contains("Run 'delete 1 confirm'"));
        assert!(service.request_count() >= 1);
        assert_eq!(service.last_request().method, "GET");
    }
}
