use crate::configuration::QuerySettings;
use serde::Deserialize;
use serde_valid::Validate;
use std::fmt;
use std::str::FromStr;

/// Raw query-string parameters of the list and search endpoints.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    #[validate(max_length = 64)]
    pub sort_by: Option<String>,
    #[validate(max_length = 8)]
    pub sort_order: Option<String>,
    #[validate(max_length = 200)]
    pub keyword: Option<String>,
    #[validate(max_length = 64)]
    pub user_id: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unsupported sort column: {0}")]
    SortColumn(String),
    #[error("unsupported sort order: {0}, expected asc or desc")]
    SortOrder(String),
    #[error("page must be a positive integer, got {0}")]
    Page(i64),
    #[error("size must be between 1 and {max}, got {got}")]
    Size { got: i64, max: i64 },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    CreateTime,
    UpdateTime,
    Name,
    Id,
}

impl SortColumn {
    /// Caller-facing key, as listed in `query.sort_columns`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CreateTime => "create_time",
            Self::UpdateTime => "update_time",
            Self::Name => "name",
            Self::Id => "id",
        }
    }

    /// Column name interpolated into ORDER BY. Only ever one of these literals.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreateTime => "create_date",
            Self::UpdateTime => "update_date",
            Self::Name => "name",
            Self::Id => "id",
        }
    }
}

impl FromStr for SortColumn {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create_time" | "create_date" => Ok(Self::CreateTime),
            "update_time" | "update_date" => Ok(Self::UpdateTime),
            "name" => Ok(Self::Name),
            "id" => Ok(Self::Id),
            _ => Err(InputError::SortColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(InputError::SortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// Validated paging, ordering and filter for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: i64,
    pub size: i64,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub keyword: Option<String>,
    /// Rows skipped before the page, `(page - 1) * size`. Checked on construction.
    pub offset: i64,
}

impl ListParams {
    #[cfg(test)]
    pub(crate) fn new(page: i64, size: i64) -> Self {
        Self {
            page,
            size,
            offset: (page - 1) * size,
            sort_by: SortColumn::UpdateTime,
            sort_order: SortOrder::Desc,
            keyword: None,
        }
    }
}

impl ListQuery {
    /// Checks every caller-supplied value before any query is built.
    pub fn into_params(self, settings: &QuerySettings) -> Result<ListParams, InputError> {
        if let Err(errors) = self.validate() {
            return Err(InputError::Invalid(errors.to_string()));
        }

        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(InputError::Page(page));
        }

        let size = self.size.unwrap_or(settings.default_page_size);
        if size < 1 || size > settings.max_page_size {
            return Err(InputError::Size {
                got: size,
                max: settings.max_page_size,
            });
        }

        let offset = (page - 1)
            .checked_mul(size)
            .ok_or(InputError::Page(page))?;

        let sort_by = match self.sort_by.as_deref() {
            Some(raw) => {
                let column = raw.parse::<SortColumn>()?;
                if !settings.sort_columns.iter().any(|c| c == column.key()) {
                    return Err(InputError::SortColumn(raw.to_string()));
                }
                column
            }
            None => SortColumn::UpdateTime,
        };

        let sort_order = match self.sort_order.as_deref() {
            Some(raw) => raw.parse::<SortOrder>()?,
            None => SortOrder::default(),
        };

        // a blank keyword means no filter, not "match the empty string"
        let keyword = self
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(ListParams {
            page,
            size,
            sort_by,
            sort_order,
            keyword,
            offset,
        })
    }
}
