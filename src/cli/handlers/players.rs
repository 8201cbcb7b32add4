//! One-shot player commands: list, get, create, update, delete.

use std::io::{BufRead, Write};
use std::sync::Arc;

use jiff::Zoned;
use jiff::civil::Date;

use crate::cli::parser::{CreateArgs, ListArgs, UpdateArgs};
use crate::cli::render;
use crate::config::settings::Settings;
use crate::dashboard::{PLAYER_CREATED, PLAYER_DELETED, PLAYER_UPDATED};
use crate::error::{AppError, AppResult};
use crate::external::players::PlayerApi;
use crate::filters::{FilterCriteria, FilterEdit};
use crate::models::{HeightUnit, Player, UpdatePlayer, round_to_cm};

/// Handler for commands that make a single call to the player service
pub struct PlayersCommandHandler {
    api: Arc<dyn PlayerApi>,
    config: Settings,
}

impl PlayersCommandHandler {
    pub fn new(api: Arc<dyn PlayerApi>, config: Settings) -> Self {
        Self { api, config }
    }

    fn unit(&self, requested: Option<HeightUnit>) -> HeightUnit {
        requested.unwrap_or(self.config.dashboard.height_unit)
    }

    /// Criteria for `list`, starting from the configured defaults.
    pub fn criteria(&self, args: &ListArgs) -> FilterCriteria {
        let unit = self.unit(args.units);
        let mut edits = Vec::new();
        if let Some(name) = &args.name {
            edits.push(FilterEdit::Name(name.clone()));
        }
        if !args.nationalities.is_empty() {
            edits.push(FilterEdit::Nationalities(
                args.nationalities.iter().cloned().collect(),
            ));
        }
        if !args.positions.is_empty() {
            edits.push(FilterEdit::Positions(args.positions.iter().copied().collect()));
        }
        edits.push(FilterEdit::MinAge(args.min_age));
        edits.push(FilterEdit::MaxAge(args.max_age));
        edits.push(FilterEdit::MinHeight(args.min_height.map(|h| unit.to_meters(h))));
        edits.push(FilterEdit::MaxHeight(args.max_height.map(|h| unit.to_meters(h))));

        let defaults = self.config.dashboard.default_criteria();
        if args.sort.is_some() || args.order.is_some() {
            edits.push(FilterEdit::Sort(
                args.sort.unwrap_or(defaults.sort_by),
                args.order.unwrap_or(defaults.sort_direction),
            ));
        }
        if let Some(size) = args.size {
            edits.push(FilterEdit::PageSize(size));
        }
        // Filter edits go back to page 0, so the page comes last.
        if let Some(page) = args.page {
            edits.push(FilterEdit::Page(page.saturating_sub(1)));
        }

        edits
            .into_iter()
            .fold(defaults, |criteria, edit| criteria.with_edit(edit))
    }

    pub async fn list(&self, args: &ListArgs, out: &mut impl Write) -> AppResult<()> {
        let unit = self.unit(args.units);
        let criteria = self.criteria(args);
        for issue in criteria.bound_issues() {
            tracing::warn!("{}", render::bound_issue(&issue, unit));
        }

        let page = self.api.fetch_page(&criteria).await?;
        if args.json {
            write_json(out, &page)?;
        } else {
            if let Some(summary) = render::filter_summary(&criteria, unit) {
                writeln!(out, "{}", summary).map_err(stdout_error)?;
            }
            write!(out, "{}", render::page(&page, unit, today())).map_err(stdout_error)?;
        }
        Ok(())
    }

    pub async fn get(
        &self,
        id: i64,
        json: bool,
        units: Option<HeightUnit>,
        out: &mut impl Write,
    ) -> AppResult<()> {
        let player = self.api.get_player(id).await?;
        if json {
            write_json(out, &player)
        } else {
            write!(out, "{}", render::player_detail(&player, self.unit(units), today()))
                .map_err(stdout_error)
        }
    }

    pub async fn create(&self, args: &CreateArgs, out: &mut impl Write) -> AppResult<()> {
        let unit = self.unit(args.units);
        let player = Player {
            id: None,
            first_name: args.first_name.trim().to_string(),
            last_name: args.last_name.trim().to_string(),
            nationalities: args.nationalities.clone(),
            date_of_birth: args.date_of_birth,
            positions: args.positions.clone(),
            height: round_to_cm(unit.to_meters(args.height)),
            creation_date: None,
            last_modified_date: None,
        };

        let created = self.api.create_player(&player).await?;
        tracing::info!(id = ?created.id, "Player created");
        writeln!(out, "{}", PLAYER_CREATED).map_err(stdout_error)?;
        write!(out, "{}", render::player_detail(&created, unit, today())).map_err(stdout_error)
    }

    pub async fn update(&self, args: &UpdateArgs, out: &mut impl Write) -> AppResult<()> {
        let unit = self.unit(args.units);
        let update = UpdatePlayer {
            first_name: args.first_name.as_ref().map(|s| s.trim().to_string()),
            last_name: args.last_name.as_ref().map(|s| s.trim().to_string()),
            nationalities: args.nationalities.clone(),
            positions: args.positions.clone(),
            date_of_birth: args.date_of_birth,
            height: args.height.map(|h| round_to_cm(unit.to_meters(h))),
        };
        if update.is_empty() {
            return Err(AppError::Validation {
                field: "update".to_string(),
                reason: "no field to change".to_string(),
            });
        }

        let updated = self.api.update_player(args.id, &update).await?;
        tracing::info!(id = args.id, "Player updated");
        writeln!(out, "{}", PLAYER_UPDATED).map_err(stdout_error)?;
        write!(out, "{}", render::player_detail(&updated, unit, today())).map_err(stdout_error)
    }

    /// Delete after confirmation read from `input`, unless `skip_confirm`.
    pub async fn delete(
        &self,
        id: i64,
        skip_confirm: bool,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> AppResult<()> {
        if !skip_confirm && !confirm(&format!("Delete player {}?", id), input, out)? {
            writeln!(out, "Cancelled.").map_err(stdout_error)?;
            return Ok(());
        }

        self.api.delete_player(id).await?;
        tracing::info!(id, "Player deleted");
        writeln!(out, "{}", PLAYER_DELETED).map_err(stdout_error)
    }
}

/// Ask a yes/no question; anything but y/yes declines.
pub fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> AppResult<bool> {
    write!(out, "{} [y/N] ", question).map_err(stdout_error)?;
    out.flush().map_err(stdout_error)?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .map_err(|e| AppError::io("stdin", e))?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub(crate) fn today() -> Date {
    Zoned::now().date()
}

pub(crate) fn stdout_error(e: std::io::Error) -> AppError {
    AppError::io("stdout", e)
}

fn write_json<T: serde::Serialize>(out: &mut impl Write, value: &T) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| AppError::Internal { source: e.into() })?;
    writeln!(out, "{}", json).map_err(stdout_error)
}
