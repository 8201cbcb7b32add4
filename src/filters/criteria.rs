use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{HeightUnit, Position, SortBy, SortDirection, normalize_nationality};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Canonical filter, sort and page state for one player listing.
///
/// Values are never mutated in place: [`FilterCriteria::with_edit`] returns a
/// new snapshot so a pending commit can always be compared against a known
/// earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    pub name: String,
    pub nationalities: BTreeSet<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    /// Meters
    pub min_height: Option<f64>,
    /// Meters
    pub max_height: Option<f64>,
    pub positions: BTreeSet<Position>,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// A single typed change to [`FilterCriteria`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    Name(String),
    Nationalities(BTreeSet<String>),
    MinAge(Option<u32>),
    MaxAge(Option<u32>),
    MinHeight(Option<f64>),
    MaxHeight(Option<f64>),
    Positions(BTreeSet<Position>),
    Sort(SortBy, SortDirection),
    Page(u32),
    PageSize(u32),
}

/// Field addressed by raw text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Name,
    Nationalities,
    MinAge,
    MaxAge,
    MinHeight,
    MaxHeight,
    Positions,
    Sort,
    Page,
    PageSize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterInputError {
    #[error("{field} expects a whole number, got '{value}'")]
    NotAnInteger { field: FilterField, value: String },

    #[error("{field} expects a positive number, got '{value}'")]
    NotANumber { field: FilterField, value: String },

    #[error("{0}")]
    Nationality(#[from] crate::models::InvalidNationality),

    #[error("{0}")]
    Position(#[from] crate::models::UnknownPosition),

    #[error("{0}")]
    Sort(String),

    #[error("page size must be greater than 0")]
    ZeroPageSize,
}

/// Range bounds that are set but inverted. Reported for display only; the
/// criteria are still sent as entered.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundIssue {
    AgeRangeInverted { min: u32, max: u32 },
    HeightRangeInverted { min: f64, max: f64 },
}

impl FilterCriteria {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            name: String::new(),
            nationalities: BTreeSet::new(),
            min_age: None,
            max_age: None,
            min_height: None,
            max_height: None,
            positions: BTreeSet::new(),
            sort_by: SortBy::default(),
            sort_direction: SortDirection::default(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Produce the snapshot that results from applying `edit`.
    ///
    /// Filter edits go back to the first page; so does a page size change.
    /// A zero page size is ignored.
    pub fn with_edit(&self, edit: FilterEdit) -> FilterCriteria {
        let mut next = self.clone();
        match edit {
            FilterEdit::Name(name) => {
                next.name = name;
                next.page = 0;
            }
            FilterEdit::Nationalities(set) => {
                next.nationalities = set;
                next.page = 0;
            }
            FilterEdit::MinAge(v) => {
                next.min_age = v;
                next.page = 0;
            }
            FilterEdit::MaxAge(v) => {
                next.max_age = v;
                next.page = 0;
            }
            FilterEdit::MinHeight(v) => {
                next.min_height = v;
                next.page = 0;
            }
            FilterEdit::MaxHeight(v) => {
                next.max_height = v;
                next.page = 0;
            }
            FilterEdit::Positions(set) => {
                next.positions = set;
                next.page = 0;
            }
            FilterEdit::Sort(by, direction) => {
                next.sort_by = by;
                next.sort_direction = direction;
            }
            FilterEdit::Page(page) => next.page = page,
            FilterEdit::PageSize(size) if size > 0 => {
                next.page_size = size;
                next.page = 0;
            }
            FilterEdit::PageSize(_) => {}
        }
        next
    }

    /// Whether any filter field (not sort or paging) narrows the listing.
    pub fn is_filtered(&self) -> bool {
        !self.name.trim().is_empty()
            || !self.nationalities.is_empty()
            || self.min_age.is_some()
            || self.max_age.is_some()
            || self.min_height.is_some()
            || self.max_height.is_some()
            || !self.positions.is_empty()
    }

    pub fn bound_issues(&self) -> Vec<BoundIssue> {
        let mut issues = Vec::new();
        if let (Some(min), Some(max)) = (self.min_age, self.max_age)
            && min > max
        {
            issues.push(BoundIssue::AgeRangeInverted { min, max });
        }
        if let (Some(min), Some(max)) = (self.min_height, self.max_height)
            && min > max
        {
            issues.push(BoundIssue::HeightRangeInverted { min, max });
        }
        issues
    }
}

impl FilterEdit {
    /// The edit that empties `field`, or `None` when the field has no empty state.
    pub fn clear(field: FilterField) -> Option<Self> {
        match field {
            FilterField::Name => Some(FilterEdit::Name(String::new())),
            FilterField::Nationalities => Some(FilterEdit::Nationalities(BTreeSet::new())),
            FilterField::MinAge => Some(FilterEdit::MinAge(None)),
            FilterField::MaxAge => Some(FilterEdit::MaxAge(None)),
            FilterField::MinHeight => Some(FilterEdit::MinHeight(None)),
            FilterField::MaxHeight => Some(FilterEdit::MaxHeight(None)),
            FilterField::Positions => Some(FilterEdit::Positions(BTreeSet::new())),
            FilterField::Sort | FilterField::Page | FilterField::PageSize => None,
        }
    }

    /// Parse raw text for `field` into a typed edit.
    ///
    /// Empty input clears optional fields and sets. Heights are read in
    /// `unit` and converted to meters.
    pub fn parse(field: FilterField, raw: &str, unit: HeightUnit) -> Result<Self, FilterInputError> {
        let trimmed = raw.trim();
        match field {
            FilterField::Name => Ok(FilterEdit::Name(raw.to_string())),
            FilterField::Nationalities => split_list(trimmed)
                .map(normalize_nationality)
                .collect::<Result<BTreeSet<_>, _>>()
                .map(FilterEdit::Nationalities)
                .map_err(Into::into),
            FilterField::Positions => split_list(trimmed)
                .map(str::parse::<Position>)
                .collect::<Result<BTreeSet<_>, _>>()
                .map(FilterEdit::Positions)
                .map_err(Into::into),
            FilterField::MinAge => parse_optional_u32(field, trimmed).map(FilterEdit::MinAge),
            FilterField::MaxAge => parse_optional_u32(field, trimmed).map(FilterEdit::MaxAge),
            FilterField::MinHeight => {
                parse_optional_height(field, trimmed, unit).map(FilterEdit::MinHeight)
            }
            FilterField::MaxHeight => {
                parse_optional_height(field, trimmed, unit).map(FilterEdit::MaxHeight)
            }
            FilterField::Sort => {
                let mut parts = trimmed.split_whitespace();
                let by = parts
                    .next()
                    .ok_or_else(|| FilterInputError::Sort("sort expects a field".to_string()))?
                    .parse::<SortBy>()
                    .map_err(FilterInputError::Sort)?;
                let direction = match parts.next() {
                    Some(d) => d.parse::<SortDirection>().map_err(FilterInputError::Sort)?,
                    None => SortDirection::default(),
                };
                Ok(FilterEdit::Sort(by, direction))
            }
            FilterField::Page => trimmed
                .parse::<u32>()
                .map(FilterEdit::Page)
                .map_err(|_| FilterInputError::NotAnInteger {
                    field,
                    value: trimmed.to_string(),
                }),
            FilterField::PageSize => {
                let size = trimmed
                    .parse::<u32>()
                    .map_err(|_| FilterInputError::NotAnInteger {
                        field,
                        value: trimmed.to_string(),
                    })?;
                if size == 0 {
                    return Err(FilterInputError::ZeroPageSize);
                }
                Ok(FilterEdit::PageSize(size))
            }
        }
    }

    pub fn field(&self) -> FilterField {
        match self {
            FilterEdit::Name(_) => FilterField::Name,
            FilterEdit::Nationalities(_) => FilterField::Nationalities,
            FilterEdit::MinAge(_) => FilterField::MinAge,
            FilterEdit::MaxAge(_) => FilterField::MaxAge,
            FilterEdit::MinHeight(_) => FilterField::MinHeight,
            FilterEdit::MaxHeight(_) => FilterField::MaxHeight,
            FilterEdit::Positions(_) => FilterField::Positions,
            FilterEdit::Sort(..) => FilterField::Sort,
            FilterEdit::Page(_) => FilterField::Page,
            FilterEdit::PageSize(_) => FilterField::PageSize,
        }
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
}

fn parse_optional_u32(field: FilterField, raw: &str) -> Result<Option<u32>, FilterInputError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| FilterInputError::NotAnInteger {
            field,
            value: raw.to_string(),
        })
}

fn parse_optional_height(
    field: FilterField,
    raw: &str,
    unit: HeightUnit,
) -> Result<Option<f64>, FilterInputError> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Some(unit.to_meters(value))),
        _ => Err(FilterInputError::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Nationalities => "nationalities",
            FilterField::MinAge => "minAge",
            FilterField::MaxAge => "maxAge",
            FilterField::MinHeight => "minHeight",
            FilterField::MaxHeight => "maxHeight",
            FilterField::Positions => "positions",
            FilterField::Sort => "sort",
            FilterField::Page => "page",
            FilterField::PageSize => "pageSize",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "name" => Ok(FilterField::Name),
            "nat" | "nationality" | "nationalities" => Ok(FilterField::Nationalities),
            "minage" => Ok(FilterField::MinAge),
            "maxage" => Ok(FilterField::MaxAge),
            "minheight" => Ok(FilterField::MinHeight),
            "maxheight" => Ok(FilterField::MaxHeight),
            "pos" | "position" | "positions" => Ok(FilterField::Positions),
            "sort" => Ok(FilterField::Sort),
            "page" => Ok(FilterField::Page),
            "size" | "pagesize" => Ok(FilterField::PageSize),
            _ => Err(format!("Unknown filter field '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_restores_default_field_values() {
        let edited = FilterCriteria::default()
            .with_edit(FilterEdit::MinHeight(Some(1.8)))
            .with_edit(FilterEdit::Name("Kane".to_string()));
        let cleared = [FilterField::MinHeight, FilterField::Name]
            .into_iter()
            .filter_map(FilterEdit::clear)
            .fold(edited, |c, edit| c.with_edit(edit));
        assert_eq!(cleared, FilterCriteria::default());

        assert_eq!(FilterEdit::clear(FilterField::Page), None);
        assert_eq!(FilterEdit::clear(FilterField::Sort), None);
    }

    #[test]
    fn test_default_criteria() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.page, 0);
        assert_eq!(criteria.page_size, DEFAULT_PAGE_SIZE);
        assert!(!criteria.is_filtered());
    }

    #[test]
    fn test_with_edit_returns_new_snapshot() {
        let original = FilterCriteria::default();
        let edited = original.with_edit(FilterEdit::Name("Messi".to_string()));
        assert_eq!(original.name, "");
        assert_eq!(edited.name, "Messi");
        assert!(edited.is_filtered());
    }

    #[test]
    fn test_filter_edit_resets_page() {
        let criteria = FilterCriteria::default().with_edit(FilterEdit::Page(3));
        assert_eq!(criteria.page, 3);
        let filtered = criteria.with_edit(FilterEdit::MinAge(Some(20)));
        assert_eq!(filtered.page, 0);
    }

    #[test]
    fn test_sort_keeps_page() {
        let criteria = FilterCriteria::default()
            .with_edit(FilterEdit::Page(2))
            .with_edit(FilterEdit::Sort(SortBy::Height, SortDirection::Desc));
        assert_eq!(criteria.page, 2);
        assert_eq!(criteria.sort_by, SortBy::Height);
    }

    #[test]
    fn test_zero_page_size_is_ignored() {
        let criteria = FilterCriteria::default().with_edit(FilterEdit::PageSize(0));
        assert_eq!(criteria.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(
            FilterEdit::parse(FilterField::MinAge, " 21 ", HeightUnit::Meters).unwrap(),
            FilterEdit::MinAge(Some(21))
        );
        assert_eq!(
            FilterEdit::parse(FilterField::MaxAge, "", HeightUnit::Meters).unwrap(),
            FilterEdit::MaxAge(None)
        );
        assert!(matches!(
            FilterEdit::parse(FilterField::MinAge, "abc", HeightUnit::Meters),
            Err(FilterInputError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_parse_height_in_feet_converts_to_meters() {
        assert_eq!(
            FilterEdit::parse(FilterField::MinHeight, "6.00", HeightUnit::Feet).unwrap(),
            FilterEdit::MinHeight(Some(1.83))
        );
        assert!(FilterEdit::parse(FilterField::MaxHeight, "-1", HeightUnit::Meters).is_err());
    }

    #[test]
    fn test_parse_lists() {
        let edit = FilterEdit::parse(FilterField::Nationalities, "fr, br", HeightUnit::Meters)
            .unwrap();
        let expected: BTreeSet<String> = ["BR", "FR"].iter().map(|s| s.to_string()).collect();
        assert_eq!(edit, FilterEdit::Nationalities(expected));

        let edit = FilterEdit::parse(FilterField::Positions, "st cam", HeightUnit::Meters).unwrap();
        let expected: BTreeSet<Position> = [Position::St, Position::Cam].into_iter().collect();
        assert_eq!(edit, FilterEdit::Positions(expected));

        assert!(FilterEdit::parse(FilterField::Positions, "GK", HeightUnit::Meters).is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            FilterEdit::parse(FilterField::Sort, "age desc", HeightUnit::Meters).unwrap(),
            FilterEdit::Sort(SortBy::Age, SortDirection::Desc)
        );
        assert_eq!(
            FilterEdit::parse(FilterField::Sort, "height", HeightUnit::Meters).unwrap(),
            FilterEdit::Sort(SortBy::Height, SortDirection::Asc)
        );
    }

    #[test]
    fn test_parse_page_size_rejects_zero() {
        assert_eq!(
            FilterEdit::parse(FilterField::PageSize, "0", HeightUnit::Meters),
            Err(FilterInputError::ZeroPageSize)
        );
    }

    #[test]
    fn test_bound_issues_are_reported_not_enforced() {
        let criteria = FilterCriteria::default()
            .with_edit(FilterEdit::MinAge(Some(30)))
            .with_edit(FilterEdit::MaxAge(Some(20)));
        assert_eq!(criteria.min_age, Some(30));
        assert_eq!(
            criteria.bound_issues(),
            vec![BoundIssue::AgeRangeInverted { min: 30, max: 20 }]
        );
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("min-age".parse::<FilterField>().unwrap(), FilterField::MinAge);
        assert_eq!("nat".parse::<FilterField>().unwrap(), FilterField::Nationalities);
        assert!("weight".parse::<FilterField>().is_err());
    }

    #[test]
    fn test_serde_round_trip_for_persistence() {
        let criteria = FilterCriteria::default()
            .with_edit(FilterEdit::MinHeight(Some(1.8)))
            .with_edit(FilterEdit::Positions([Position::Cb].into_iter().collect()));
        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains("\"minHeight\":1.8"));
        let back: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }
}
