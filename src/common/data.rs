use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, DataType, NamedFrom, Series};

use super::PipelineError;

/// Error listing every column of `needed` absent from `df`.
pub(crate) fn require_columns(df: &DataFrame, table: &str, needed: &[&str]) -> Result<(), PipelineError> {
    let missing = needed.iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    if missing.is_empty() { return Ok(()) }
    Err(PipelineError::MissingColumns { table: table.to_string(), columns: missing })
}

/// Read a column as nullable f64. Unparseable values become `None`.
pub(crate) fn f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)
        .with_context(|| format!("[common::data] Column {name} not found"))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .with_context(|| format!("[common::data] Column {name} is not numeric"))?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as nullable i64. Unparseable and fractional values become `None`.
pub(crate) fn i64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    // Text such as "11.0" only parses through a float.
    Ok(f64_column(df, name)?.into_iter()
        .map(|v| v.filter(|x| x.is_finite() && x.fract() == 0.0).map(|x| x as i64))
        .collect())
}

/// Read a column as nullable strings. Empty text counts as missing.
pub(crate) fn str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)
        .with_context(|| format!("[common::data] Column {name} not found"))?
        .as_materialized_series()
        .cast(&DataType::String)
        .with_context(|| format!("[common::data] Column {name} cannot be read as text"))?;
    Ok(series.str()?.into_iter()
        .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
        .collect())
}

/// Read a boolean column, treating nulls as `false`. Text columns accept `true`/`false`.
pub(crate) fn bool_column(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let column = df.column(name)
        .with_context(|| format!("[common::data] Column {name} not found"))?;
    if column.dtype() == &DataType::String {
        return Ok(str_column(df, name)?.into_iter()
            .map(|v| v.is_some_and(|s| s.eq_ignore_ascii_case("true")))
            .collect());
    }
    let series = column.as_materialized_series()
        .cast(&DataType::Boolean)
        .with_context(|| format!("[common::data] Column {name} is not boolean"))?;
    Ok(series.bool()?.into_iter().map(|v| v.unwrap_or(false)).collect())
}

/// Read a column that may be absent, yielding `None` for every row when it is.
pub(crate) fn optional_str_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if df.column(name).is_err() { return Ok(vec![None; df.height()]) }
    str_column(df, name)
}

/// Read a nullable f64 column that may be absent.
pub(crate) fn optional_f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    if df.column(name).is_err() { return Ok(vec![None; df.height()]) }
    f64_column(df, name)
}

/// Shorthand for a named column built from any polars-compatible vector.
pub(crate) fn column<T, V>(name: &str, values: V) -> Column
where
    Series: NamedFrom<V, T>,
    T: ?Sized,
{
    Series::new(name.into(), values).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            column("lat", vec![Some(-34.6), None]),
            column("hora", vec!["7", "x"]),
        ]).unwrap()
    }

    #[test]
    fn missing_columns_are_listed() {
        let err = require_columns(&frame(), "cleaned", &["lat", "lon", "id_tarjeta"]).unwrap_err();
        match err {
            PipelineError::MissingColumns { table, columns } => {
                assert_eq!(table, "cleaned");
                assert_eq!(columns, vec!["lon".to_string(), "id_tarjeta".to_string()]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn text_coerces_to_numbers() {
        let hours = f64_column(&frame(), "hora").unwrap();
        assert_eq!(hours, vec![Some(7.0), None]);
    }

    #[test]
    fn fractional_values_are_not_integers() {
        let df = DataFrame::new(vec![column("etapa_red_sube", vec!["0.5", "0", "2.0", ""])]).unwrap();
        assert_eq!(i64_column(&df, "etapa_red_sube").unwrap(), vec![None, Some(0), Some(2), None]);
    }

    #[test]
    fn absent_optional_column_is_all_none() {
        assert_eq!(optional_str_column(&frame(), "modo").unwrap(), vec![None, None]);
    }
}
