//! Paging and sorting parameters shared by the listing endpoints.
//!
//! Sort columns and directions only ever reach SQL through the `as_sql`
//! fragments below; raw query-string values are parsed into these enums first
//! and rejected when they fall outside the allow-list.

use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE: i64 = 1;
pub const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("page must be at least 1, got {0}")]
    Page(i64),
    #[error("per_page must be between 1 and 100, got {0}")]
    PerPage(i64),
    #[error("unsupported sort_by '{value}', expected one of: {allowed}")]
    SortBy { value: String, allowed: &'static str },
    #[error("unsupported order '{0}', expected asc or desc")]
    Order(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
}

impl Page {
    pub fn new(
        page: Option<i64>,
        per_page: Option<i64>,
        default_per_page: i64,
    ) -> Result<Self, ParamError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(ParamError::Page(page));
        }

        let per_page = per_page.unwrap_or(default_per_page);
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ParamError::PerPage(per_page));
        }

        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        if total > 0 {
            (total + self.per_page - 1) / self.per_page
        } else {
            0
        }
    }

    pub fn describe(&self, total: i64) -> Pagination {
        Pagination {
            current_page: self.page,
            total_pages: self.total_pages(total),
            total_items: total,
            items_per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Result<Self, ParamError> {
        let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Self::default());
        };
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParamError::Order(raw.to_string())),
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WordSort {
    #[default]
    Kanji,
    Romaji,
    English,
    CorrectCount,
    WrongCount,
}

impl WordSort {
    const ALLOWED: &'static str = "kanji, romaji, english, correct_count, wrong_count";

    pub fn parse(raw: Option<&str>) -> Result<Self, ParamError> {
        let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Self::default());
        };
        match raw {
            "kanji" => Ok(Self::Kanji),
            "romaji" => Ok(Self::Romaji),
            "english" => Ok(Self::English),
            "correct_count" => Ok(Self::CorrectCount),
            "wrong_count" => Ok(Self::WrongCount),
            _ => Err(ParamError::SortBy {
                value: raw.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }

    /// Column expression valid in queries that alias `words` as `w` and
    /// select `correct_count` / `wrong_count`.
    pub const fn as_sql(self) -> &'static str {
        match self {
            WordSort::Kanji => r#"w."kanji""#,
            WordSort::Romaji => r#"w."romaji""#,
            WordSort::English => r#"w."english""#,
            WordSort::CorrectCount => r#""correct_count""#,
            WordSort::WrongCount => r#""wrong_count""#,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupSort {
    #[default]
    Name,
    WordsCount,
}

impl GroupSort {
    const ALLOWED: &'static str = "name, words_count";

    pub fn parse(raw: Option<&str>) -> Result<Self, ParamError> {
        let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Self::default());
        };
        match raw {
            "name" => Ok(Self::Name),
            "words_count" | "word_count" => Ok(Self::WordsCount),
            _ => Err(ParamError::SortBy {
                value: raw.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            GroupSort::Name => r#"g."name""#,
            GroupSort::WordsCount => r#""word_count""#,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_apply_when_params_missing() {
        let page = Page::new(None, None, 10).unwrap();
        assert_eq!(page, Page { page: 1, per_page: 10 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn rejects_out_of_range_paging() {
        assert_eq!(Page::new(Some(0), None, 10), Err(ParamError::Page(0)));
        assert_eq!(Page::new(None, Some(0), 10), Err(ParamError::PerPage(0)));
        assert_eq!(
            Page::new(None, Some(MAX_PER_PAGE + 1), 10),
            Err(ParamError::PerPage(MAX_PER_PAGE + 1))
        );
    }

    #[test]
    fn empty_table_has_zero_pages() {
        let page = Page::new(Some(1), Some(10), 10).unwrap();
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.describe(0).total_items, 0);
    }

    #[test]
    fn order_is_case_insensitive() {
        assert_eq!(SortOrder::parse(Some("DESC")), Ok(SortOrder::Desc));
        assert_eq!(SortOrder::parse(Some("Asc")), Ok(SortOrder::Asc));
        assert_eq!(SortOrder::parse(None), Ok(SortOrder::Asc));
        assert_eq!(SortOrder::parse(Some("")), Ok(SortOrder::Asc));
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(WordSort::parse(Some("kanji; DROP TABLE words")).is_err());
        assert!(WordSort::parse(Some("id")).is_err());
        assert!(SortOrder::parse(Some("asc, (SELECT 1)")).is_err());
        assert!(GroupSort::parse(Some("name--")).is_err());
    }

    #[test]
    fn word_sort_maps_to_fixed_fragments() {
        assert_eq!(WordSort::parse(None).unwrap().as_sql(), r#"w."kanji""#);
        assert_eq!(
            WordSort::parse(Some("wrong_count")).unwrap().as_sql(),
            r#""wrong_count""#
        );
        assert_eq!(
            GroupSort::parse(Some("words_count")).unwrap(),
            GroupSort::WordsCount
        );
    }

    proptest! {
        #[test]
        fn total_pages_is_ceiling(total in 0i64..100_000, per_page in 1i64..=MAX_PER_PAGE) {
            let page = Page::new(Some(1), Some(per_page), 10).unwrap();
            let pages = page.total_pages(total);
            prop_assert!(pages * per_page >= total);
            prop_assert!(pages == 0 || (pages - 1) * per_page < total);
        }

        #[test]
        fn offset_steps_by_per_page(p in 1i64..10_000, per_page in 1i64..=MAX_PER_PAGE) {
            let page = Page::new(Some(p), Some(per_page), 10).unwrap();
            prop_assert_eq!(page.offset(), (p - 1) * per_page);
        }
    }
}
