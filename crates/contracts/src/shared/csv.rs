//! CSV rendering used by report and inventory downloads.
//!
//! Output starts with a UTF-8 BOM so spreadsheet apps pick the right
//! encoding. Every cell is quoted, inner quotes doubled, lines end in `\n`.

pub const UTF8_BOM: &str = "\u{FEFF}";

/// Row-oriented export of a record type.
pub trait CsvExportable {
    fn headers() -> Vec<&'static str>;

    fn to_csv_row(&self) -> Vec<String>;
}

pub fn escape_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn render_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| escape_cell(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Full CSV document (BOM + header + rows).
pub fn to_csv<T: CsvExportable>(items: &[T]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&render_line(&T::headers()));
    out.push('\n');
    for item in items {
        out.push_str(&render_line(&item.to_csv_row()));
        out.push('\n');
    }
    out
}

/// "reporte_ventas_2024-05-01_2024-05-31.csv"
pub fn csv_filename(prefix: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("{}.csv", prefix)
    } else {
        format!("{}_{}.csv", prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: String,
        qty: i64,
    }

    impl CsvExportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Nombre", "Cantidad"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.name.clone(), self.qty.to_string()]
        }
    }

    #[test]
    fn test_escape_cell_doubles_quotes() {
        assert_eq!(escape_cell(r#"Pijama "Polar""#), r#""Pijama ""Polar""""#);
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell(""), "\"\"");
    }

    #[test]
    fn test_to_csv_layout() {
        let rows = vec![
            Row { name: "Tela".into(), qty: 3 },
            Row { name: "Hilo \"rojo\"".into(), qty: 10 },
        ];
        let csv = to_csv(&rows);
        assert!(csv.starts_with(UTF8_BOM));
        let body = csv.trim_start_matches(UTF8_BOM);
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "\"Nombre\",\"Cantidad\"");
        assert_eq!(lines[1], "\"Tela\",\"3\"");
        assert_eq!(lines[2], "\"Hilo \"\"rojo\"\"\",\"10\"");
        assert!(body.ends_with('\n'));
        assert!(!body.contains('\r'));
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let csv = to_csv::<Row>(&[]);
        assert_eq!(csv, format!("{}\"Nombre\",\"Cantidad\"\n", UTF8_BOM));
    }

    #[test]
    fn test_filename() {
        assert_eq!(csv_filename("inventario", ""), "inventario.csv");
        assert_eq!(csv_filename("ventas", "2024-05"), "ventas_2024-05.csv");
    }
}
