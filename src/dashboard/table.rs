//! Table View
//! Text cells of a DataFrame, ready to be drawn in a grid.

use polars::prelude::*;

/// Stringified table contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn from_frame(df: &DataFrame) -> Self {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..df.height())
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(val) if !val.is_null() => val.to_string().trim_matches('"').to_string(),
                        _ => "-".to_string(),
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_stringified() {
        let df = df! {
            "nivel_agua" => [Some(1.5), None],
            "estado" => ["ok", "falla"],
        }
        .unwrap();

        let view = TableView::from_frame(&df);
        assert_eq!(view.columns, vec!["nivel_agua", "estado"]);
        assert_eq!(view.len(), 2);
        assert_eq!(view.rows[0], vec!["1.5", "ok"]);
        assert_eq!(view.rows[1], vec!["-", "falla"]);
    }
}
