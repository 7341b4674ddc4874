//! Column conversion helpers shared by the query modules.

use std::{fmt::Display, str::FromStr};

use jiff::civil::Date;
use rusqlite::{types::Type, Row};

/// Reads a text column and parses it with `FromStr`.
pub(crate) fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value: String = row.get(idx)?;
    value.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.to_string().into())
    })
}

/// Reads a nullable text column and parses it with `FromStr`.
pub(crate) fn parse_optional_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let value: Option<String> = row.get(idx)?;
    value
        .map(|v| {
            v.parse::<T>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.to_string().into())
            })
        })
        .transpose()
}

/// Reads an integer ID column.
pub(crate) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Reads a nullable integer ID column.
pub(crate) fn optional_id_column(row: &Row, idx: usize) -> rusqlite::Result<Option<u64>> {
    Ok(row.get::<_, Option<i64>>(idx)?.map(|id| id as u64))
}

/// Stored form of a civil date (`YYYY-MM-DD`).
pub(crate) fn date_text(date: Date) -> String {
    date.to_string()
}
