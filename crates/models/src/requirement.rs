use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{EnumIter, EnumProperty, IntoEnumIterator};

#[cfg(feature = "database")]
use sea_orm::Value;

/// How a required course relates to the course that depends on it
///
/// Variants are described for a prerequisite row with target course B and required course A.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumProperty,
)]
#[serde(rename_all = "snake_case")]
pub enum RequirementCode {
    /// Taking A has no bearing on taking B
    #[default]
    #[strum(props(label = "no relation"))]
    None,
    /// B can't be taken once A was taken, before or alongside it
    #[strum(props(label = "can't be taken together"))]
    Cant,
    /// A must be taken at the same time as B, or before it
    #[strum(props(label = "taken at the same time or before"))]
    Simultaneous,
    /// A must be completed before B
    #[strum(props(label = "taken before"))]
    Before,
}

impl RequirementCode {
    pub fn code(self) -> i16 {
        match self {
            Self::None => -2,
            Self::Cant => -1,
            Self::Simultaneous => 0,
            Self::Before => 1,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        Self::iter().find(|req| req.code() == code)
    }

    pub fn label(self) -> &'static str {
        self.get_str("label").unwrap_or_default()
    }
}

impl Display for RequirementCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.label())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for RequirementCode {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::SmallInt(Some(code)) => {
                Self::from_code(code).ok_or(sea_orm::sea_query::ValueTypeErr)
            }
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "RequirementCode".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::SmallInt
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::SmallInteger
    }
}

#[cfg(feature = "database")]
impl From<RequirementCode> for Value {
    fn from(requirement: RequirementCode) -> Self {
        Value::SmallInt(Some(requirement.code()))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for RequirementCode {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let code: i16 = res.try_get_by(index)?;

        Self::from_code(code).ok_or_else(|| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Unknown requirement code: {code}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for RequirementCode {
    fn null() -> Value {
        Value::SmallInt(None)
    }
}
