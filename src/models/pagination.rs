use serde::Deserialize;

use crate::utils::AppError;

/// Query string of `GET /api/users/paginate/{items}`
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-indexed page number (defaults to 1)
    pub page: Option<String>,
}

/// A validated page window: `items` records starting at page `page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub items: i64,
    pub page: i64,
}

impl Pagination {
    pub fn parse(items: &str, page: Option<&str>) -> Result<Self, AppError> {
        let items = parse_positive("items", items)?;
        let page = match page {
            Some(raw) => parse_positive("page", raw)?,
            None => 1,
        };

        let pagination = Self { items, page };
        // skip must fit in the driver's u64 option
        if pagination.checked_skip().is_none() {
            return Err(AppError::InvalidRequest(
                "\"page\" is out of range".to_string(),
            ));
        }
        Ok(pagination)
    }

    fn checked_skip(&self) -> Option<u64> {
        let skip = (self.page - 1).checked_mul(self.items)?;
        u64::try_from(skip).ok()
    }

    /// Number of records before this page: `(page - 1) * items`.
    pub fn skip(&self) -> u64 {
        self.checked_skip().unwrap_or(u64::MAX)
    }

    pub fn limit(&self) -> i64 {
        self.items
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(AppError::InvalidRequest(format!(
            "\"{}\" must be a positive integer",
            name
        ))),
    }
}
