use crate::domain::model::State;
use crate::utils::error::Result;
use std::io::Write;

pub const CSV_HEADER: [&str; 4] = ["freezer", "item", "date", "container"];

/// Write one CSV row per stored container. Returns the number of rows written.
pub fn export_csv<W: Write>(state: &State, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for freezer in &state.freezers {
        for item in &freezer.contents {
            for container in &item.containers {
                csv_writer.write_record([
                    freezer.name.as_str(),
                    item.name.as_str(),
                    item.date.as_str(),
                    container.as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    csv_writer.flush()?;
    tracing::debug!("Exported {} container rows", rows);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Freezer, Item};

    #[test]
    fn test_export_one_row_per_container() {
        let state = State {
            containers: vec![],
            freezers: vec![
                Freezer {
                    name: "Chest".to_string(),
                    contents: vec![
                        Item::new("Pie, apple", "2021", vec!["c1".to_string(), "c2".to_string()]),
                        Item::new("Soup", "2022", vec![]),
                    ],
                },
                Freezer {
                    name: "Empty".to_string(),
                    contents: vec![],
                },
            ],
        };

        let mut buffer = Vec::new();
        let rows = export_csv(&state, &mut buffer).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "freezer,item,date,container");
        assert_eq!(lines[1], "Chest,\"Pie, apple\",2021,c1");
        assert_eq!(lines[2], "Chest,\"Pie, apple\",2021,c2");
        assert_eq!(lines.len(), 3);
    }
}
