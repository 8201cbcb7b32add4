//! Plain-text rendering of players and pages.

use jiff::civil::Date;

use crate::filters::{BoundIssue, FilterCriteria};
use crate::import::PreflightReport;
use crate::models::{HeightUnit, Player};
use crate::pagination::PageResult;

const HEADERS: [&str; 6] = ["ID", "NAME", "AGE", "HEIGHT", "NATIONALITIES", "POSITIONS"];

pub fn format_height(meters: f64, unit: HeightUnit) -> String {
    format!("{:.2} {}", unit.from_meters(meters), unit.suffix())
}

fn row(player: &Player, unit: HeightUnit, today: Date) -> [String; 6] {
    [
        player.id.map(|id| id.to_string()).unwrap_or_default(),
        player.full_name(),
        player.age_on(today).to_string(),
        format_height(player.height, unit),
        player.nationalities.join(", "),
        player
            .positions
            .iter()
            .map(|p| p.code())
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

/// Column-aligned table, one player per line.
pub fn player_table(players: &[Player], unit: HeightUnit, today: Date) -> String {
    let rows: Vec<[String; 6]> = players.iter().map(|p| row(p, unit, today)).collect();

    let mut widths = HEADERS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS.iter().map(|h| h.to_string()), &widths);
    for cells in rows {
        push_line(&mut out, cells.into_iter(), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize; 6]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// "Players 11-20 of 25 | page 2 of 3"
pub fn page_summary<T>(page: &PageResult<T>) -> String {
    match page.item_range() {
        Some((first, last)) => format!(
            "Players {}-{} of {} | page {} of {}",
            first,
            last,
            page.total_count,
            page.page + 1,
            page.total_pages()
        ),
        None => "No players found.".to_string(),
    }
}

pub fn page(page: &PageResult<Player>, unit: HeightUnit, today: Date) -> String {
    if page.items.is_empty() {
        return format!("{}\n", page_summary(page));
    }
    format!(
        "{}{}\n",
        player_table(&page.items, unit, today),
        page_summary(page)
    )
}

pub fn player_detail(player: &Player, unit: HeightUnit, today: Date) -> String {
    let mut out = String::new();
    if let Some(id) = player.id {
        out.push_str(&format!("ID:             {}\n", id));
    }
    out.push_str(&format!("Name:           {}\n", player.full_name()));
    out.push_str(&format!(
        "Date of birth:  {} (age {})\n",
        player.date_of_birth,
        player.age_on(today)
    ));
    out.push_str(&format!("Height:         {}\n", format_height(player.height, unit)));
    out.push_str(&format!("Nationalities:  {}\n", player.nationalities.join(", ")));
    let positions: Vec<String> = player
        .positions
        .iter()
        .map(|p| format!("{} ({})", p.code(), p.group()))
        .collect();
    out.push_str(&format!("Positions:      {}\n", positions.join(", ")));
    if let Some(created) = player.creation_date {
        out.push_str(&format!("Created:        {}\n", created));
    }
    if let Some(modified) = player.last_modified_date {
        out.push_str(&format!("Last modified:  {}\n", modified));
    }
    out
}

/// One line describing the active filters, or `None` when nothing narrows the listing.
pub fn filter_summary(criteria: &FilterCriteria, unit: HeightUnit) -> Option<String> {
    let mut parts = Vec::new();
    if !criteria.name.trim().is_empty() {
        parts.push(format!("name '{}'", criteria.name.trim()));
    }
    if !criteria.nationalities.is_empty() {
        let codes: Vec<&str> = criteria.nationalities.iter().map(String::as_str).collect();
        parts.push(format!("nationalities {}", codes.join(",")));
    }
    if !criteria.positions.is_empty() {
        let codes: Vec<&str> = criteria.positions.iter().map(|p| p.code()).collect();
        parts.push(format!("positions {}", codes.join(",")));
    }
    match (criteria.min_age, criteria.max_age) {
        (Some(min), Some(max)) => parts.push(format!("age {}-{}", min, max)),
        (Some(min), None) => parts.push(format!("age >= {}", min)),
        (None, Some(max)) => parts.push(format!("age <= {}", max)),
        (None, None) => {}
    }
    match (criteria.min_height, criteria.max_height) {
        (Some(min), Some(max)) => parts.push(format!(
            "height {} - {}",
            format_height(min, unit),
            format_height(max, unit)
        )),
        (Some(min), None) => parts.push(format!("height >= {}", format_height(min, unit))),
        (None, Some(max)) => parts.push(format!("height <= {}", format_height(max, unit))),
        (None, None) => {}
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("Filters: {}", parts.join("; ")))
    }
}

pub fn bound_issue(issue: &BoundIssue, unit: HeightUnit) -> String {
    match issue {
        BoundIssue::AgeRangeInverted { min, max } => {
            format!("Minimum age {} is greater than maximum age {}", min, max)
        }
        BoundIssue::HeightRangeInverted { min, max } => format!(
            "Minimum height {} is greater than maximum height {}",
            format_height(*min, unit),
            format_height(*max, unit)
        ),
    }
}

pub fn preflight(report: &PreflightReport) -> String {
    let mut out = format!("{} data rows checked", report.rows);
    if report.is_clean() {
        out.push_str(", no issues found.\n");
        return out;
    }
    out.push_str(&format!(
        ", {} with issues:\n",
        report.rows_with_issues()
    ));
    for issue in &report.issues {
        out.push_str(&format!("  {}\n", issue));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use jiff::civil::date;

    fn player(id: i64, first: &str, height: f64) -> Player {
        Player {
            id: Some(id),
            first_name: first.to_string(),
            last_name: "Silva".to_string(),
            nationalities: vec!["PT".to_string(), "BR".to_string()],
            date_of_birth: date(1994, 8, 8),
            positions: vec![Position::Cam, Position::Rw],
            height,
            creation_date: None,
            last_modified_date: None,
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let players = [player(1, "Bernardo", 1.73), player(120, "Jo", 1.85)];
        let table = player_table(&players, HeightUnit::Meters, date(2024, 8, 8));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID   NAME"));
        assert!(lines[1].contains("Bernardo Silva"));
        assert!(lines[1].contains("30"));
        assert!(lines[1].contains("1.73 m"));
        assert!(lines[1].ends_with("CAM, RW"));
        let name_col = lines[0].find("NAME").unwrap();
        assert_eq!(lines[2].find("Jo Silva").unwrap(), name_col);
    }

    #[test]
    fn test_heights_in_feet() {
        assert_eq!(format_height(1.83, HeightUnit::Feet), "6.00 ft");
        assert_eq!(format_height(1.8, HeightUnit::Meters), "1.80 m");
    }

    #[test]
    fn test_page_summary() {
        let page = PageResult::new(vec![1, 2, 3, 4, 5], 25, 2, 10);
        assert_eq!(page_summary(&page), "Players 21-25 of 25 | page 3 of 3");
        let empty: PageResult<u8> = PageResult::new(Vec::new(), 0, 0, 10);
        assert_eq!(page_summary(&empty), "No players found.");
    }

    #[test]
    fn test_filter_summary() {
        let criteria = FilterCriteria::default();
        assert!(filter_summary(&criteria, HeightUnit::Meters).is_none());

        let mut criteria = FilterCriteria::default();
        criteria.name = " mba ".to_string();
        criteria.min_age = Some(20);
        criteria.max_height = Some(1.83);
        let summary = filter_summary(&criteria, HeightUnit::Feet).unwrap();
        assert_eq!(summary, "Filters: name 'mba'; age >= 20; height <= 6.00 ft");
    }

    #[test]
    fn test_detail_lists_position_groups() {
        let detail = player_detail(&player(1, "Bernardo", 1.73), HeightUnit::Meters, date(2024, 1, 1));
        assert!(detail.contains("Positions:      CAM (midfielder), RW (forward)"));
        assert!(detail.contains("Date of birth:  1994-08-08 (age 29)"));
    }
}
